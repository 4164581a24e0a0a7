//! Chunk meshing: runs each block's model into per-material buffers.

use std::sync::Arc;

use ctm_blocks::BlockRegistry;
use ctm_blocks::types::{BlockId, MaterialId};
use ctm_chunk::{BlockView, ChunkCoord, ChunkGrid};
use ctm_geom::BlockPos;
use hashbrown::HashMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::emit::MeshSink;
use crate::mesh_build::MeshBuild;
use crate::model::BakedModel;

/// Baked models by block id.
#[derive(Clone, Default)]
pub struct ModelSet {
    by_block: HashMap<BlockId, Arc<dyn BakedModel>>,
}

impl ModelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, block: BlockId, model: Arc<dyn BakedModel>) {
        self.by_block.insert(block, model);
    }

    pub fn get(&self, block: BlockId) -> Option<&Arc<dyn BakedModel>> {
        self.by_block.get(&block)
    }

    pub fn len(&self) -> usize {
        self.by_block.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_block.is_empty()
    }
}

pub struct ChunkMesh {
    pub coord: ChunkCoord,
    pub parts: HashMap<MaterialId, MeshBuild>,
    pub quads: usize,
    pub culled: usize,
    /// Non-air blocks without a model.
    pub skipped: usize,
}

impl ChunkMesh {
    pub fn vertex_count(&self) -> usize {
        self.parts.values().map(MeshBuild::vertex_count).sum()
    }
}

/// Stable per-position seed, so repeated meshing picks the same random sprites.
#[inline]
pub fn position_seed(seed: u64, pos: BlockPos) -> u64 {
    let mut h = (pos.x as i64 as u64).wrapping_mul(0x2FC2_0F)
        ^ (pos.z as i64 as u64).wrapping_mul(0x6EBF_A9)
        ^ (pos.y as i64 as u64);
    h = h.wrapping_mul(h.wrapping_mul(0x285B_825).wrapping_add(11));
    (h >> 16) ^ seed
}

/// Meshes one chunk of `grid`. Neighbor lookups cross chunk borders freely.
pub fn build_chunk_mesh(
    grid: &ChunkGrid,
    coord: ChunkCoord,
    reg: &BlockRegistry,
    models: &ModelSet,
    seed: u64,
) -> Option<ChunkMesh> {
    let buf = grid.chunk(coord)?;
    let mut parts: HashMap<MaterialId, MeshBuild> = HashMap::new();
    let (mut quads, mut culled, mut skipped) = (0, 0, 0);
    for (pos, block) in buf.iter_world() {
        let Some(model) = models.get(block.id) else {
            log::trace!("no model for {} at {}", reg.name_of(block.id), pos);
            skipped += 1;
            continue;
        };
        let mut rng = StdRng::seed_from_u64(position_seed(seed, pos));
        let mut sink = MeshSink::new(&mut parts, pos.corner(), |face| {
            reg.is_solid(grid.block_at(pos.offset(face)))
        });
        model.emit_block_quads(grid, block, pos, &mut rng, &mut sink);
        quads += sink.emitted;
        culled += sink.culled;
    }
    log::debug!(
        "chunk ({}, {}, {}): {} quads, {} culled, {} unmodelled",
        coord.cx,
        coord.cy,
        coord.cz,
        quads,
        culled,
        skipped
    );
    Some(ChunkMesh {
        coord,
        parts,
        quads,
        culled,
        skipped,
    })
}

/// Meshes every chunk of `grid` in parallel, in coordinate order.
pub fn build_grid_meshes(
    grid: &ChunkGrid,
    reg: &BlockRegistry,
    models: &ModelSet,
    seed: u64,
) -> Vec<ChunkMesh> {
    grid.coords()
        .into_par_iter()
        .filter_map(|coord| build_chunk_mesh(grid, coord, reg, models, seed))
        .collect()
}
