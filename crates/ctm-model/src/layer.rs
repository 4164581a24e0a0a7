use ctm_blocks::types::{Block, ItemStack};
use ctm_chunk::BlockView;
use ctm_geom::{BlockPos, Face};
use rand::RngCore;

use crate::ct::FaceConnections;
use crate::quad::QuadSink;

/// One independently emitting part of a layered model.
pub trait BakedModelLayer: Send + Sync {
    fn emit_block_quads(
        &self,
        view: &dyn BlockView,
        block: Block,
        pos: BlockPos,
        rng: &mut dyn RngCore,
        sink: &mut dyn QuadSink,
    );

    fn emit_item_quads(&self, stack: &ItemStack, rng: &mut dyn RngCore, sink: &mut dyn QuadSink);

    /// Quadrant states of face `normal`, for layers that connect to neighbors.
    fn connections(
        &self,
        _view: &dyn BlockView,
        _block: Block,
        _pos: BlockPos,
        _normal: Face,
    ) -> Option<FaceConnections> {
        None
    }
}
