use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ctm_blocks::{BlockId, BlockRegistry};
use ctm_model::{BakedLayeredModel, ModelSet};

use crate::config::{Baker, model_set, parse_models};
use crate::error::{ConfigError, Result};

pub fn resolve_assets_root(cli: Option<PathBuf>) -> PathBuf {
    // Precedence: CLI flag -> CTM_ASSETS env -> search nearby dirs -> CWD
    if let Some(pb) = cli {
        if pb.exists() {
            return pb;
        }
        log::warn!("assets root {:?} not found; searching", pb);
    }
    if let Ok(p) = std::env::var("CTM_ASSETS") {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return pb;
        }
    }
    // Search candidates: CWD, executable dir, crate root; climb up to 5 parents
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.to_path_buf());
        }
    }
    candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));

    for base in candidates {
        let mut cur = base.clone();
        for _ in 0..5 {
            if materials_path(&cur).exists() {
                return cur;
            }
            if let Some(parent) = cur.parent() {
                cur = parent.to_path_buf();
            } else {
                break;
            }
        }
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

pub fn voxels_dir(root: &Path) -> PathBuf {
    root.join("assets/voxels")
}

pub fn materials_path(root: &Path) -> PathBuf {
    voxels_dir(root).join("materials.toml")
}

pub fn blocks_path(root: &Path) -> PathBuf {
    voxels_dir(root).join("blocks.toml")
}

pub fn models_path(root: &Path) -> PathBuf {
    voxels_dir(root).join("models.toml")
}

pub fn scene_path(root: &Path) -> PathBuf {
    root.join("assets/scene.toml")
}

pub(crate) fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Registry plus the baked models of every block that has one.
pub struct Assets {
    pub registry: BlockRegistry,
    pub layered: BTreeMap<BlockId, Arc<BakedLayeredModel>>,
    pub models: ModelSet,
}

impl Assets {
    pub fn load(root: &Path) -> Result<Self> {
        let registry = BlockRegistry::load_from_paths(materials_path(root), blocks_path(root))
            .map_err(|e| ConfigError::Registry(e.to_string()))?;
        let models_file = models_path(root);
        let cfg = parse_models(&read(&models_file)?, &models_file)?;
        Self::from_parts(registry, &cfg)
    }

    pub fn from_parts(registry: BlockRegistry, cfg: &crate::config::ModelsConfig) -> Result<Self> {
        let layered = Baker::new(&registry).bake(cfg)?;
        let models = model_set(&layered);
        log::info!(
            "loaded {} blocks, {} materials, {} models",
            registry.blocks.len(),
            registry.materials.materials.len(),
            models.len()
        );
        Ok(Self {
            registry,
            layered,
            models,
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use ctm_blocks::BlockRegistry;
    use ctm_blocks::config::BlocksConfig;
    use ctm_blocks::material::MaterialCatalog;

    pub const MATERIALS: &str = r#"
[materials]
glass_ct = { paths = ["blocks/glass_ct.png"], grid = [5, 1] }
stone = ["blocks/stone.png"]
"#;

    pub const BLOCKS: &str = r#"
unknown_block = "stone"

[[blocks]]
name = "glass"
solid = false
tags = ["glassy"]

[[blocks]]
name = "stone"

[tags]
framed = ["stone"]
"#;

    pub fn registry() -> BlockRegistry {
        let mats = MaterialCatalog::from_toml_str(MATERIALS).unwrap();
        let blocks: BlocksConfig = toml::from_str(BLOCKS).unwrap();
        BlockRegistry::from_configs(mats, blocks).unwrap()
    }
}
