use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::types::MaterialId;

#[derive(Clone, Debug)]
pub struct Material {
    pub id: MaterialId,
    pub key: String,
    pub texture_candidates: Vec<PathBuf>,
    /// Tile layout of the texture as `(columns, rows)`; `(1, 1)` for plain textures.
    pub grid: (u16, u16),
}

impl Material {
    #[inline]
    pub fn tile_count(&self) -> u32 {
        self.grid.0 as u32 * self.grid.1 as u32
    }

    /// Normalized `[u0, v0, u1, v1]` of tile `tile`, counted row-major from the top-left.
    pub fn tile_uv(&self, tile: u32) -> Option<[f32; 4]> {
        if tile >= self.tile_count() {
            return None;
        }
        let cols = self.grid.0 as u32;
        let (col, row) = (tile % cols, tile / cols);
        let tw = 1.0 / self.grid.0 as f32;
        let th = 1.0 / self.grid.1 as f32;
        Some([
            col as f32 * tw,
            row as f32 * th,
            (col + 1) as f32 * tw,
            (row + 1) as f32 * th,
        ])
    }
}

#[derive(Default, Clone, Debug)]
pub struct MaterialCatalog {
    pub materials: Vec<Material>,
    pub by_key: HashMap<String, MaterialId>,
}

impl MaterialCatalog {
    /// Creates a catalog holding only the sentinel material at id 0.
    pub fn new() -> Self {
        Self {
            materials: vec![Material {
                id: MaterialId(0),
                key: String::new(),
                texture_candidates: Vec::new(),
                grid: (1, 1),
            }],
            by_key: HashMap::new(),
        }
    }

    pub fn get_id(&self, key: &str) -> Option<MaterialId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    /// Key of `id`, or `"?"` when unknown. Used for reports and logs.
    pub fn key_of(&self, id: MaterialId) -> &str {
        self.get(id).map(|m| m.key.as_str()).unwrap_or("?")
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        let mut catalog = MaterialCatalog::new();
        let mut entries: Vec<(String, MaterialEntry)> = cfg.materials.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort keys so MaterialId assignment is stable.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, entry) in entries {
            let (paths, grid) = match entry {
                MaterialEntry::Paths(v) => (v, [1, 1]),
                MaterialEntry::Detail { paths, grid } => (paths, grid.unwrap_or([1, 1])),
            };
            if grid[0] == 0 || grid[1] == 0 {
                return Err(format!("material `{key}` has an empty tile grid {grid:?}").into());
            }
            let id = MaterialId(catalog.materials.len() as u16);
            catalog.by_key.insert(key.clone(), id);
            catalog.materials.push(Material {
                id,
                key,
                texture_candidates: paths.into_iter().map(PathBuf::from).collect(),
                grid: (grid[0], grid[1]),
            });
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

// --- Config ---

#[derive(Deserialize)]
pub struct MaterialsConfig {
    pub materials: HashMap<String, MaterialEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum MaterialEntry {
    // Simple: material = ["assets/blocks/foo.png", ...]
    Paths(Vec<String>),
    // Detailed: material = { paths = ["..."], grid = [5, 1] }
    Detail {
        paths: Vec<String>,
        grid: Option<[u16; 2]>,
    },
}
