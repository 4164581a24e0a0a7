use ctm_blocks::types::{Block, ItemStack};
use ctm_chunk::BlockView;
use ctm_geom::{BlockPos, Face};
use rand::RngCore;

use crate::cube::emit_cube;
use crate::layer::BakedModelLayer;
use crate::quad::{QuadSink, RenderMaterial};
use crate::sprite::{BakedSpriteSupplier, Sprite, SpriteContext};

/// A layer drawing one fixed sprite per face, with no connection logic.
#[derive(Clone, Debug)]
pub struct BakedCubeLayer {
    sprites: [Option<BakedSpriteSupplier>; 6],
    material: RenderMaterial,
    depth: f32,
    cull_faces: bool,
    tint_index: i32,
}

impl BakedCubeLayer {
    pub fn new(
        sprites: [Option<BakedSpriteSupplier>; 6],
        material: RenderMaterial,
        depth: f32,
        cull_faces: bool,
        tint_index: i32,
    ) -> Self {
        Self {
            sprites,
            material,
            depth,
            cull_faces,
            tint_index,
        }
    }

    fn emit_with(
        &self,
        sink: &mut dyn QuadSink,
        mut pick: impl FnMut(Face, &BakedSpriteSupplier) -> Option<Sprite>,
    ) {
        let mut sprites = [None; 6];
        for face in Face::ALL {
            let i = face.index();
            sprites[i] = self.sprites[i].as_ref().and_then(|s| pick(face, s));
        }
        emit_cube(
            sink,
            self.cull_faces,
            self.depth,
            self.material,
            &sprites,
            &[self.tint_index; 6],
        );
    }
}

impl BakedModelLayer for BakedCubeLayer {
    fn emit_block_quads(
        &self,
        view: &dyn BlockView,
        block: Block,
        pos: BlockPos,
        rng: &mut dyn RngCore,
        sink: &mut dyn QuadSink,
    ) {
        self.emit_with(sink, |normal, s| {
            let ctx = SpriteContext {
                view,
                block,
                pos,
                normal,
            };
            s.block_sprite(&ctx, rng)
        });
    }

    fn emit_item_quads(&self, stack: &ItemStack, rng: &mut dyn RngCore, sink: &mut dyn QuadSink) {
        self.emit_with(sink, |_, s| s.item_sprite(stack, rng));
    }
}
