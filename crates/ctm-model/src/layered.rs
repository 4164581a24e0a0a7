use ctm_blocks::types::{Block, ItemStack};
use ctm_chunk::BlockView;
use ctm_geom::{BlockPos, Face};
use rand::RngCore;

use crate::layer::BakedModelLayer;
use crate::model::{BakedModel, ModelTransformation};
use crate::quad::{Quad, QuadSink};
use crate::sprite::Sprite;

/// A model made of layers emitted in order, later layers drawing over earlier ones.
pub struct BakedLayeredModel {
    transformation: ModelTransformation,
    particle: Option<Sprite>,
    layers: Vec<Box<dyn BakedModelLayer>>,
    side_lit: bool,
    ambient_occlusion: bool,
}

impl BakedLayeredModel {
    pub fn new(
        transformation: ModelTransformation,
        particle: Option<Sprite>,
        layers: Vec<Box<dyn BakedModelLayer>>,
        side_lit: bool,
    ) -> Self {
        Self {
            transformation,
            particle,
            layers,
            side_lit,
            ambient_occlusion: true,
        }
    }

    pub fn with_ambient_occlusion(mut self, ambient_occlusion: bool) -> Self {
        self.ambient_occlusion = ambient_occlusion;
        self
    }

    pub fn layers(&self) -> &[Box<dyn BakedModelLayer>] {
        &self.layers
    }
}

impl BakedModel for BakedLayeredModel {
    /// Layered models have no static quads; everything goes through the emitters.
    fn quads(&self, _block: Option<Block>, _face: Option<Face>, _rng: &mut dyn RngCore) -> Vec<Quad> {
        Vec::new()
    }

    fn is_vanilla_adapter(&self) -> bool {
        false
    }

    fn emit_block_quads(
        &self,
        view: &dyn BlockView,
        block: Block,
        pos: BlockPos,
        rng: &mut dyn RngCore,
        sink: &mut dyn QuadSink,
    ) {
        for layer in &self.layers {
            layer.emit_block_quads(view, block, pos, rng, sink);
        }
    }

    fn emit_item_quads(&self, stack: &ItemStack, rng: &mut dyn RngCore, sink: &mut dyn QuadSink) {
        for layer in &self.layers {
            layer.emit_item_quads(stack, rng, sink);
        }
    }

    fn use_ambient_occlusion(&self) -> bool {
        self.ambient_occlusion
    }

    fn has_depth(&self) -> bool {
        false
    }

    fn is_side_lit(&self) -> bool {
        self.side_lit
    }

    fn is_builtin(&self) -> bool {
        false
    }

    fn particle_sprite(&self) -> Option<Sprite> {
        self.particle
    }

    fn transformation(&self) -> &ModelTransformation {
        &self.transformation
    }
}
