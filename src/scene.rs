//! `scene.toml`: boxes of blocks filled into a chunk grid.

use std::collections::HashMap;
use std::path::Path;

use ctm_blocks::BlockRegistry;
use ctm_chunk::ChunkGrid;
use ctm_geom::BlockPos;
use serde::Deserialize;

use crate::assets::read;
use crate::error::{ConfigError, Result};

fn default_chunk_size() -> usize {
    16
}

#[derive(Deserialize, Debug)]
pub struct SceneConfig {
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default)]
    pub fill: Vec<FillDef>,
}

/// An inclusive box of one block. Later fills overwrite earlier ones.
#[derive(Deserialize, Debug)]
pub struct FillDef {
    pub block: String,
    pub from: [i32; 3],
    #[serde(default)]
    pub to: Option<[i32; 3]>,
    #[serde(default)]
    pub props: HashMap<String, String>,
}

pub struct Scene {
    pub seed: u64,
    pub grid: ChunkGrid,
}

impl SceneConfig {
    pub fn build(&self, reg: &BlockRegistry) -> Result<Scene> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ChunkSize(self.chunk_size));
        }
        let mut grid = ChunkGrid::new(self.chunk_size);
        for f in &self.fill {
            let props = (!f.props.is_empty()).then_some(&f.props);
            let block = reg
                .make_block_by_name(&f.block, props)
                .ok_or_else(|| ConfigError::UnknownBlock(f.block.clone()))?;
            let to = f.to.unwrap_or(f.from);
            let lo = [0, 1, 2].map(|i| f.from[i].min(to[i]));
            let hi = [0, 1, 2].map(|i| f.from[i].max(to[i]));
            for x in lo[0]..=hi[0] {
                for y in lo[1]..=hi[1] {
                    for z in lo[2]..=hi[2] {
                        grid.set(BlockPos::new(x, y, z), block);
                    }
                }
            }
        }
        log::info!(
            "scene: {} fills into {} chunks of {}^3",
            self.fill.len(),
            grid.len(),
            self.chunk_size
        );
        Ok(Scene {
            seed: self.seed,
            grid,
        })
    }
}

pub fn load_scene(path: &Path, reg: &BlockRegistry) -> Result<Scene> {
    let cfg: SceneConfig = toml::from_str(&read(path)?).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    cfg.build(reg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::fixtures;
    use ctm_blocks::types::Block;
    use ctm_chunk::BlockView;

    fn build(src: &str) -> Result<Scene> {
        let cfg: SceneConfig = toml::from_str(src).unwrap();
        cfg.build(&fixtures::registry())
    }

    #[test]
    fn fills_inclusive_boxes_in_order() {
        let scene = build(
            r#"
seed = 9
chunk_size = 4

[[fill]]
block = "glass"
from = [2, 0, 2]
to = [-1, 1, 0]

[[fill]]
block = "air"
from = [0, 0, 0]

[[fill]]
block = "stone"
from = [5, 5, 5]
"#,
        )
        .unwrap();
        let reg = fixtures::registry();
        let glass = Block::new(reg.id_by_name("glass").unwrap());
        assert_eq!(scene.seed, 9);
        assert_eq!(scene.grid.block_at(BlockPos::new(-1, 0, 0)), glass);
        assert_eq!(scene.grid.block_at(BlockPos::new(2, 1, 2)), glass);
        assert_eq!(scene.grid.block_at(BlockPos::new(0, 0, 0)), Block::AIR);
        assert_eq!(scene.grid.block_at(BlockPos::new(0, 2, 0)), Block::AIR);
        assert_eq!(scene.grid.block_at(BlockPos::new(5, 5, 5)).id, reg.id_by_name("stone").unwrap());
    }

    #[test]
    fn defaults_and_errors() {
        let empty = build("").unwrap();
        assert_eq!(empty.seed, 0);
        assert!(empty.grid.is_empty());

        let err = build("[[fill]]\nblock = \"marble\"\nfrom = [0, 0, 0]\n").err().unwrap();
        assert!(matches!(err, ConfigError::UnknownBlock(b) if b == "marble"));
        assert!(matches!(build("chunk_size = 0").err(), Some(ConfigError::ChunkSize(0))));
    }
}
