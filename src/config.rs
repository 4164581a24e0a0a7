//! `models.toml`: model definitions and their baking into core model values.

use std::collections::BTreeMap;
use std::sync::Arc;

use ctm_blocks::{BlockId, BlockRegistry, RenderTags};
use ctm_geom::{Face, Vec3};
use ctm_model::constants::{MAX_FACE_DEPTH, NO_TINT};
use ctm_model::{
    BakedCtLayer, BakedCubeLayer, BakedLayeredModel, BakedModel, BakedModelLayer,
    BakedSpriteSupplier, BlendMode, Connector, DisplayContext, ModelSet, ModelTransformation,
    RenderMaterial, RenderTagConnector, Sprite, Transformation, UvRect, WeightedSprites,
};
use serde::Deserialize;

use crate::error::{ConfigError, Result};

fn default_true() -> bool {
    true
}

fn no_tint() -> i32 {
    NO_TINT
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Deserialize, Debug, Default)]
pub struct ModelsConfig {
    #[serde(default)]
    pub models: BTreeMap<String, ModelDef>,
}

#[derive(Deserialize, Debug)]
pub struct ModelDef {
    #[serde(default)]
    pub particle: Option<String>,
    #[serde(default = "default_true")]
    pub side_lit: bool,
    #[serde(default = "default_true")]
    pub ambient_occlusion: bool,
    #[serde(default)]
    pub display: BTreeMap<String, TransformDef>,
    #[serde(default)]
    pub layers: Vec<LayerDef>,
}

#[derive(Deserialize, Debug)]
pub struct TransformDef {
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default)]
    pub translation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

#[derive(Deserialize, Debug)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerDef {
    Ct(CtLayerDef),
    Cube(CubeLayerDef),
}

#[derive(Deserialize, Debug)]
pub struct CtLayerDef {
    pub sprites: Vec<SpriteRef>,
    #[serde(default)]
    pub depth: f32,
    #[serde(default = "default_true")]
    pub cull_faces: bool,
    #[serde(default)]
    pub interior_border: bool,
    #[serde(default = "no_tint")]
    pub tint_index: i32,
    #[serde(default)]
    pub material: MaterialDef,
    #[serde(default)]
    pub connector: ConnectorDef,
}

#[derive(Deserialize, Debug)]
pub struct CubeLayerDef {
    /// Keyed by face name (`up`, `north`, ...) or `all`; faces override `all`.
    pub sprites: BTreeMap<String, SpriteRef>,
    #[serde(default)]
    pub depth: f32,
    #[serde(default = "default_true")]
    pub cull_faces: bool,
    #[serde(default = "no_tint")]
    pub tint_index: i32,
    #[serde(default)]
    pub material: MaterialDef,
}

// A sprite: "key", "key@tile", "none", or weighted variants.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum SpriteRef {
    Name(String),
    Variants { variants: Vec<VariantDef> },
}

#[derive(Deserialize, Debug, Clone)]
pub struct VariantDef {
    pub sprite: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

#[derive(Deserialize, Debug, Default)]
pub struct MaterialDef {
    #[serde(default)]
    pub blend: Option<String>,
    #[serde(default)]
    pub disable_ao: bool,
    #[serde(default)]
    pub emissive: bool,
}

#[derive(Deserialize, Debug, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConnectorDef {
    RenderTag {
        tag: String,
    },
    #[default]
    SameBlock,
}

/// Resolves names in model definitions against a loaded registry.
pub struct Baker<'a> {
    reg: &'a BlockRegistry,
    tags: Arc<RenderTags>,
}

impl<'a> Baker<'a> {
    pub fn new(reg: &'a BlockRegistry) -> Self {
        Self {
            reg,
            tags: Arc::new(reg.tags.clone()),
        }
    }

    /// Parses `key` or `key@tile`. `"none"` is an empty slot.
    pub fn sprite(&self, s: &str) -> Result<Option<Sprite>> {
        if s == "none" {
            return Ok(None);
        }
        let (key, tile) = match s.split_once('@') {
            Some((key, tile)) => {
                let tile: u32 = tile
                    .parse()
                    .map_err(|_| ConfigError::BadSpriteRef(s.to_string()))?;
                (key, Some(tile))
            }
            None => (s, None),
        };
        let id = self
            .reg
            .materials
            .get_id(key)
            .ok_or_else(|| ConfigError::UnknownMaterial(key.to_string()))?;
        let uv = match tile {
            None => UvRect::FULL,
            Some(tile) => self
                .reg
                .materials
                .get(id)
                .and_then(|m| m.tile_uv(tile))
                .map(UvRect::from)
                .ok_or_else(|| ConfigError::InvalidTile {
                    material: key.to_string(),
                    tile,
                })?,
        };
        Ok(Some(Sprite::new(id, uv)))
    }

    pub fn supplier(&self, model: &str, r: &SpriteRef) -> Result<Option<BakedSpriteSupplier>> {
        match r {
            SpriteRef::Name(s) => Ok(self.sprite(s)?.map(BakedSpriteSupplier::Fixed)),
            SpriteRef::Variants { variants } => {
                let mut entries = Vec::with_capacity(variants.len());
                for v in variants {
                    if let Some(sprite) = self.sprite(&v.sprite)? {
                        entries.push((sprite, v.weight));
                    }
                }
                WeightedSprites::new(entries)
                    .map(|w| Some(BakedSpriteSupplier::Weighted(w)))
                    .ok_or_else(|| ConfigError::ZeroWeight(model.to_string()))
            }
        }
    }

    fn material(&self, def: &MaterialDef) -> Result<RenderMaterial> {
        let blend = match &def.blend {
            None => BlendMode::Default,
            Some(name) => {
                BlendMode::from_name(name).ok_or_else(|| ConfigError::UnknownBlend(name.clone()))?
            }
        };
        Ok(RenderMaterial {
            blend,
            disable_ao: def.disable_ao,
            emissive: def.emissive,
        })
    }

    fn connector(&self, def: &ConnectorDef) -> Result<Connector> {
        match def {
            ConnectorDef::SameBlock => Ok(Connector::default()),
            ConnectorDef::RenderTag { tag } => {
                let id = self
                    .tags
                    .id(tag)
                    .ok_or_else(|| ConfigError::UnknownTag(tag.clone()))?;
                Ok(Connector::RenderTag(RenderTagConnector::new(
                    id,
                    Arc::clone(&self.tags),
                )))
            }
        }
    }

    fn depth(&self, model: &str, depth: f32) -> Result<f32> {
        if !depth.is_finite() || depth < 0.0 {
            return Err(ConfigError::InvalidDepth {
                model: model.to_string(),
                depth,
            });
        }
        if depth > MAX_FACE_DEPTH {
            log::warn!(
                "model `{}`: depth {} exceeds {}; faces stop at the block center but item icons use the full inset",
                model,
                depth,
                MAX_FACE_DEPTH
            );
        }
        Ok(depth)
    }

    pub fn layer(&self, model: &str, def: &LayerDef) -> Result<Box<dyn BakedModelLayer>> {
        match def {
            LayerDef::Ct(ct) => {
                if ct.sprites.is_empty() {
                    return Err(ConfigError::EmptySpriteTable(model.to_string()));
                }
                let sprites = ct
                    .sprites
                    .iter()
                    .map(|r| self.supplier(model, r))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Box::new(BakedCtLayer::new(
                    sprites,
                    self.material(&ct.material)?,
                    self.depth(model, ct.depth)?,
                    ct.cull_faces,
                    ct.interior_border,
                    ct.tint_index,
                    self.connector(&ct.connector)?,
                )))
            }
            LayerDef::Cube(cube) => {
                if cube.sprites.is_empty() {
                    return Err(ConfigError::EmptySpriteTable(model.to_string()));
                }
                let mut faces: [Option<BakedSpriteSupplier>; 6] = Default::default();
                if let Some(all) = cube.sprites.get("all") {
                    let s = self.supplier(model, all)?;
                    for slot in faces.iter_mut() {
                        *slot = s.clone();
                    }
                }
                for (name, r) in cube.sprites.iter().filter(|(k, _)| k.as_str() != "all") {
                    let face =
                        Face::from_name(name).ok_or_else(|| ConfigError::UnknownFace(name.clone()))?;
                    faces[face.index()] = self.supplier(model, r)?;
                }
                Ok(Box::new(BakedCubeLayer::new(
                    faces,
                    self.material(&cube.material)?,
                    self.depth(model, cube.depth)?,
                    cube.cull_faces,
                    cube.tint_index,
                )))
            }
        }
    }

    pub fn model(&self, name: &str, def: &ModelDef) -> Result<BakedLayeredModel> {
        let mut transformation = ModelTransformation::default();
        for (ctx, t) in &def.display {
            let ctx = DisplayContext::from_name(ctx)
                .ok_or_else(|| ConfigError::UnknownDisplay(ctx.clone()))?;
            transformation = transformation.with(
                ctx,
                Transformation {
                    rotation: Vec3::from(t.rotation),
                    translation: Vec3::from(t.translation),
                    scale: Vec3::from(t.scale),
                },
            );
        }
        let particle = match &def.particle {
            Some(p) => self.sprite(p)?,
            None => None,
        };
        let layers = def
            .layers
            .iter()
            .map(|l| self.layer(name, l))
            .collect::<Result<Vec<_>>>()?;
        Ok(
            BakedLayeredModel::new(transformation, particle, layers, def.side_lit)
                .with_ambient_occlusion(def.ambient_occlusion),
        )
    }

    /// Bakes every model, keyed by the block it renders.
    pub fn bake(&self, cfg: &ModelsConfig) -> Result<BTreeMap<BlockId, Arc<BakedLayeredModel>>> {
        let mut out = BTreeMap::new();
        for (name, def) in &cfg.models {
            let block = self
                .reg
                .id_by_name(name)
                .ok_or_else(|| ConfigError::UnknownBlock(name.clone()))?;
            let model = self.model(name, def)?;
            log::debug!("baked model `{}` with {} layers", name, model.layers().len());
            out.insert(block, Arc::new(model));
        }
        Ok(out)
    }
}

/// Collects baked models into the set the mesher reads.
pub fn model_set(baked: &BTreeMap<BlockId, Arc<BakedLayeredModel>>) -> ModelSet {
    let mut set = ModelSet::new();
    for (block, model) in baked {
        set.insert(*block, Arc::clone(model) as Arc<dyn BakedModel>);
    }
    set
}

pub fn parse_models(src: &str, path: &std::path::Path) -> Result<ModelsConfig> {
    toml::from_str(src).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::fixtures;
    use ctm_blocks::types::{Block, ItemStack, MaterialId};
    use ctm_chunk::BlockView;
    use ctm_geom::BlockPos;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Lone;

    impl BlockView for Lone {
        fn block_at(&self, pos: BlockPos) -> Block {
            if pos == BlockPos::ORIGIN { Block::new(1) } else { Block::AIR }
        }
    }

    fn bake(src: &str) -> Result<BTreeMap<BlockId, Arc<BakedLayeredModel>>> {
        let reg = fixtures::registry();
        let cfg: ModelsConfig = toml::from_str(src).unwrap();
        Baker::new(&reg).bake(&cfg)
    }

    fn ct_with(sprites: &str, extra: &str) -> String {
        format!("[[models.glass.layers]]\nkind = \"ct\"\nsprites = {sprites}\n{extra}\n")
    }

    const GLASS: &str = r#"
[models.glass]
particle = "glass_ct@0"
side_lit = false

[models.glass.display.gui]
rotation = [30.0, 225.0, 0.0]
scale = [0.625, 0.625, 0.625]

[[models.glass.layers]]
kind = "ct"
sprites = ["glass_ct@0", "glass_ct@1", "glass_ct@2", "glass_ct@3", "glass_ct@4"]
interior_border = true
tint_index = 0
material = { blend = "translucent" }
connector = { kind = "render_tag", tag = "glassy" }

[[models.glass.layers]]
kind = "cube"
sprites = { all = "none", up = "stone" }
depth = 0.1
cull_faces = false
"#;

    #[test]
    fn bakes_a_two_layer_model() {
        let reg = fixtures::registry();
        let glass = reg.id_by_name("glass").unwrap();
        let models = bake(GLASS).unwrap();
        let m = &models[&glass];
        assert_eq!(m.layers().len(), 2);
        assert!(!m.is_side_lit());
        assert!(m.use_ambient_occlusion());
        let particle = m.particle_sprite().unwrap();
        assert_eq!(reg.materials.key_of(particle.material), "glass_ct");
        assert_eq!(particle.uv, UvRect::new(0.0, 0.0, 0.2, 1.0));
        assert_eq!(m.transformation().get(DisplayContext::Gui).scale.x, 0.625);
        assert_eq!(
            *m.transformation().get(DisplayContext::Head),
            Transformation::IDENTITY
        );

        let mut quads = Vec::new();
        let mut rng = StdRng::seed_from_u64(0);
        m.emit_item_quads(&ItemStack::of(Block::new(glass)), &mut rng, &mut quads);
        assert_eq!(quads.len(), 7);
        assert!(quads[..6].iter().all(|q| q.material.blend == BlendMode::Translucent));
        assert!(quads[..6].iter().all(|q| q.tint_index == 0));
        assert_eq!(quads[6].nominal_face, Face::PosY);
        assert_eq!(reg.materials.key_of(quads[6].sprite.material), "stone");
        assert_eq!(quads[6].cull_face, None);

        // Isolated glass: every quadrant picks the first tile.
        let mut block_quads = Vec::new();
        m.emit_block_quads(&Lone, Block::new(glass), BlockPos::ORIGIN, &mut rng, &mut block_quads);
        assert_eq!(block_quads.len(), 25);
        assert!(block_quads[..24].iter().all(|q| q.sprite.uv.u1 == 0.2));
    }

    #[test]
    fn none_slots_and_weighted_variants() {
        let src = ct_with(
            r#"["none", { variants = [{ sprite = "glass_ct@1", weight = 2 }, { sprite = "stone" }] }]"#,
            "",
        );
        let models = bake(&src).unwrap();
        assert_eq!(models.len(), 1);

        let reg = fixtures::registry();
        let baker = Baker::new(&reg);
        assert_eq!(baker.sprite("none").unwrap(), None);
        let stone = baker.sprite("stone").unwrap().unwrap();
        assert_eq!(stone.uv, UvRect::FULL);
        assert_ne!(stone.material, MaterialId(0));
    }

    #[test]
    fn deep_layers_are_accepted() {
        assert!(bake(&ct_with(r#"["glass_ct"]"#, "depth = 0.9")).is_ok());
    }

    #[test]
    fn reports_bad_definitions() {
        let cases: [(String, fn(&ConfigError) -> bool); 11] = [
            (ct_with(r#"["nope"]"#, ""), |e| matches!(e, ConfigError::UnknownMaterial(k) if k == "nope")),
            (ct_with(r#"["glass_ct@9"]"#, ""), |e| matches!(e, ConfigError::InvalidTile { tile: 9, .. })),
            (ct_with(r#"["glass_ct@x"]"#, ""), |e| matches!(e, ConfigError::BadSpriteRef(_))),
            (ct_with(r#"["stone"]"#, "depth = -0.1"), |e| matches!(e, ConfigError::InvalidDepth { .. })),
            (ct_with("[]", ""), |e| matches!(e, ConfigError::EmptySpriteTable(_))),
            (
                ct_with(r#"[{ variants = [{ sprite = "stone", weight = 0 }] }]"#, ""),
                |e| matches!(e, ConfigError::ZeroWeight(_)),
            ),
            (
                ct_with(r#"["stone"]"#, r#"connector = { kind = "render_tag", tag = "missing" }"#),
                |e| matches!(e, ConfigError::UnknownTag(t) if t == "missing"),
            ),
            (
                ct_with(r#"["stone"]"#, r#"material = { blend = "glow" }"#),
                |e| matches!(e, ConfigError::UnknownBlend(_)),
            ),
            (
                "[[models.glass.layers]]\nkind = \"cube\"\nsprites = { top = \"stone\" }\n".to_string(),
                |e| matches!(e, ConfigError::UnknownFace(f) if f == "top"),
            ),
            (
                "[models.glass.display.hat]\nscale = [1.0, 1.0, 1.0]\n".to_string(),
                |e| matches!(e, ConfigError::UnknownDisplay(_)),
            ),
            (
                "[models.marble]\n".to_string(),
                |e| matches!(e, ConfigError::UnknownBlock(b) if b == "marble"),
            ),
        ];
        for (src, check) in cases {
            let err = bake(&src).err().unwrap_or_else(|| panic!("accepted:\n{src}"));
            assert!(check(&err), "unexpected {err:?} for:\n{src}");
        }
    }

    #[test]
    fn models_file_parse_errors_carry_the_path() {
        let err = parse_models("[models.glass", std::path::Path::new("models.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("models.toml"));
    }
}
