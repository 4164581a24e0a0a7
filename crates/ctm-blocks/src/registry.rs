use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::config::BlocksConfig;
use super::material::MaterialCatalog;
use super::tags::RenderTags;
use super::types::{Block, BlockId, BlockState};

#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub materials: MaterialCatalog,
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
    pub tags: RenderTags,
    pub unknown_block_id: Option<BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            materials: MaterialCatalog::new(),
            blocks: vec![BlockType::air()],
            by_name: HashMap::from([("air".to_string(), 0)]),
            tags: RenderTags::new(),
            unknown_block_id: None,
        }
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    /// Name of `id`, or `"?"` for ids outside the registry.
    pub fn name_of(&self, id: BlockId) -> &str {
        self.get(id).map(|t| t.name.as_str()).unwrap_or("?")
    }

    /// Whether `block` fully hides the faces of its neighbors.
    #[inline]
    pub fn is_solid(&self, block: Block) -> bool {
        self.get(block.id).is_some_and(|t| t.is_solid(block.state))
    }

    pub fn load_from_paths(
        materials_path: impl AsRef<Path>,
        blocks_path: impl AsRef<Path>,
    ) -> Result<Self, Box<dyn Error>> {
        let materials = MaterialCatalog::from_path(materials_path)?;
        let blocks_toml = fs::read_to_string(blocks_path)?;
        let blocks_cfg: BlocksConfig = toml::from_str(&blocks_toml)?;
        Self::from_configs(materials, blocks_cfg)
    }

    pub fn from_configs(
        materials: MaterialCatalog,
        cfg: BlocksConfig,
    ) -> Result<Self, Box<dyn Error>> {
        let mut reg = BlockRegistry {
            materials,
            ..BlockRegistry::new()
        };
        let unknown_name = cfg.unknown_block.clone();
        for def in cfg.blocks.into_iter() {
            let id = def.id.unwrap_or(reg.blocks.len() as u16);
            let state_schema = def.state_schema.unwrap_or_default();
            let (state_fields, prop_index) = compute_state_layout(&state_schema);
            let ty = BlockType {
                id,
                name: def.name,
                solid: def.solid.unwrap_or(true),
                tags: def.tags,
                state_fields,
                prop_index,
            };
            if reg.blocks.len() <= id as usize {
                reg.blocks
                    .resize(id as usize + 1, BlockType::placeholder(id));
            }
            reg.blocks[id as usize] = ty;
        }
        reg.by_name = reg
            .blocks
            .iter()
            .filter(|t| !t.name.is_empty())
            .map(|t| (t.name.clone(), t.id))
            .collect();

        for ty in &reg.blocks {
            for tag in &ty.tags {
                reg.tags.insert(tag, ty.id);
            }
        }
        // Sort tag names so TagId assignment is stable across loads.
        let mut tag_entries: Vec<(String, Vec<String>)> = cfg.tags.into_iter().collect();
        tag_entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (tag, members) in tag_entries {
            reg.tags.intern(&tag);
            for name in members {
                let Some(id) = reg.id_by_name(&name) else {
                    return Err(format!("tag `{tag}` references unknown block `{name}`").into());
                };
                reg.tags.insert(&tag, id);
            }
        }

        if let Some(name) = unknown_name {
            reg.unknown_block_id = reg.id_by_name(&name);
        }
        Ok(reg)
    }

    /// Builds a block by name, packing `props` into its state. Missing props take the first value.
    pub fn make_block_by_name(
        &self,
        name: &str,
        props: Option<&HashMap<String, String>>,
    ) -> Option<Block> {
        let id = self.id_by_name(name)?;
        let state = if let Some(p) = props {
            self.get(id).map(|ty| ty.pack_state(p)).unwrap_or(0)
        } else {
            0
        };
        Some(Block { id, state })
    }
}

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub solid: bool,
    pub tags: Vec<String>,
    // Precomputed, sorted layout for fast state packing/unpacking
    pub state_fields: Vec<StateField>,
    pub prop_index: HashMap<String, usize>,
}

impl BlockType {
    fn air() -> Self {
        BlockType {
            name: "air".to_string(),
            ..BlockType::placeholder(0)
        }
    }

    fn placeholder(id: BlockId) -> Self {
        BlockType {
            id,
            name: String::new(),
            solid: false,
            tags: Vec::new(),
            state_fields: Vec::new(),
            prop_index: HashMap::new(),
        }
    }

    pub fn is_solid(&self, _state: BlockState) -> bool {
        self.solid
    }

    pub fn state_prop_value<'a>(&'a self, state: BlockState, prop: &str) -> Option<&'a str> {
        if self.state_fields.is_empty() {
            return None;
        }
        let &i = self.prop_index.get(prop)?;
        let f = &self.state_fields[i];
        if f.bits == 0 {
            return f.values.first().map(|s| s.as_str());
        }
        let mask: u32 = (1u32 << f.bits) - 1;
        let idx: usize = (((state as u32) >> f.offset) & mask) as usize;
        f.values.get(idx).map(|s| s.as_str())
    }

    pub fn pack_state(&self, props: &HashMap<String, String>) -> BlockState {
        let mut acc: u32 = 0;
        for f in &self.state_fields {
            if f.bits == 0 {
                continue;
            }
            let sel_idx: u32 = match props.get(&f.name) {
                Some(val) => f.values.iter().position(|s| s == val).unwrap_or(0) as u32,
                None => 0,
            };
            acc |= (sel_idx & ((1u32 << f.bits) - 1)) << f.offset;
        }
        acc as BlockState
    }
}

#[derive(Clone, Debug)]
pub struct StateField {
    pub name: String,
    pub values: Vec<String>,
    pub bits: u32,
    pub offset: u32,
}

fn compute_state_layout(
    schema: &HashMap<String, Vec<String>>,
) -> (Vec<StateField>, HashMap<String, usize>) {
    let mut keys: Vec<&String> = schema.keys().collect();
    keys.sort();
    let mut offset: u32 = 0;
    let mut fields: Vec<StateField> = Vec::with_capacity(keys.len());
    for k in keys.into_iter() {
        let vals = schema.get(k).cloned().unwrap_or_default();
        let vlen = vals.len() as u32;
        let bits: u32 = if vlen <= 1 {
            0
        } else {
            32 - (vlen - 1).leading_zeros()
        };
        fields.push(StateField {
            name: k.to_string(),
            values: vals,
            bits,
            offset,
        });
        offset = offset.saturating_add(bits);
    }
    let index = fields
        .iter()
        .enumerate()
        .map(|(i, f)| (f.name.clone(), i))
        .collect();
    (fields, index)
}
