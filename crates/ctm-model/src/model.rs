//! The baked model contract and per-context display transforms.

use ctm_blocks::types::{Block, ItemStack};
use ctm_chunk::BlockView;
use ctm_geom::{BlockPos, Face, Vec3};
use rand::RngCore;

use crate::quad::{Quad, QuadSink};
use crate::sprite::Sprite;

/// Where an item model is being displayed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DisplayContext {
    ThirdPersonLeftHand = 0,
    ThirdPersonRightHand = 1,
    FirstPersonLeftHand = 2,
    FirstPersonRightHand = 3,
    Head = 4,
    Gui = 5,
    Ground = 6,
    Fixed = 7,
}

impl DisplayContext {
    pub const ALL: [DisplayContext; 8] = [
        DisplayContext::ThirdPersonLeftHand,
        DisplayContext::ThirdPersonRightHand,
        DisplayContext::FirstPersonLeftHand,
        DisplayContext::FirstPersonRightHand,
        DisplayContext::Head,
        DisplayContext::Gui,
        DisplayContext::Ground,
        DisplayContext::Fixed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DisplayContext::ThirdPersonLeftHand => "thirdperson_lefthand",
            DisplayContext::ThirdPersonRightHand => "thirdperson_righthand",
            DisplayContext::FirstPersonLeftHand => "firstperson_lefthand",
            DisplayContext::FirstPersonRightHand => "firstperson_righthand",
            DisplayContext::Head => "head",
            DisplayContext::Gui => "gui",
            DisplayContext::Ground => "ground",
            DisplayContext::Fixed => "fixed",
        }
    }

    pub fn from_name(s: &str) -> Option<DisplayContext> {
        Self::ALL.into_iter().find(|c| c.name() == s)
    }
}

/// Rotation (degrees, XYZ order), translation and scale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transformation {
    pub rotation: Vec3,
    pub translation: Vec3,
    pub scale: Vec3,
}

impl Transformation {
    pub const IDENTITY: Transformation = Transformation {
        rotation: Vec3::ZERO,
        translation: Vec3::ZERO,
        scale: Vec3::ONE,
    };
}

impl Default for Transformation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Display transform for each [`DisplayContext`]; identity unless set.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ModelTransformation {
    by_context: [Transformation; 8],
}

impl ModelTransformation {
    pub const NONE: ModelTransformation = ModelTransformation {
        by_context: [Transformation::IDENTITY; 8],
    };

    #[inline]
    pub fn get(&self, ctx: DisplayContext) -> &Transformation {
        &self.by_context[ctx as usize]
    }

    pub fn with(mut self, ctx: DisplayContext, t: Transformation) -> Self {
        self.by_context[ctx as usize] = t;
        self
    }
}

/// A model ready for emission.
///
/// Plain models only implement [`BakedModel::quads`]; the default emitters
/// forward those quads, tagging the per-face lists with their cull face.
/// Models with their own emitters return `false` from
/// [`BakedModel::is_vanilla_adapter`].
pub trait BakedModel: Send + Sync {
    /// Static quads for `face`, or unculled ones for `None`.
    fn quads(&self, block: Option<Block>, face: Option<Face>, rng: &mut dyn RngCore) -> Vec<Quad>;

    fn is_vanilla_adapter(&self) -> bool {
        true
    }

    fn emit_block_quads(
        &self,
        _view: &dyn BlockView,
        block: Block,
        _pos: BlockPos,
        rng: &mut dyn RngCore,
        sink: &mut dyn QuadSink,
    ) {
        for face in Face::ALL {
            for q in self.quads(Some(block), Some(face), rng) {
                sink.emit(q.with_cull_face(Some(face)));
            }
        }
        for q in self.quads(Some(block), None, rng) {
            sink.emit(q);
        }
    }

    fn emit_item_quads(&self, _stack: &ItemStack, rng: &mut dyn RngCore, sink: &mut dyn QuadSink) {
        for face in Face::ALL.map(Some).into_iter().chain([None]) {
            for q in self.quads(None, face, rng) {
                sink.emit(q);
            }
        }
    }

    fn use_ambient_occlusion(&self) -> bool;
    fn has_depth(&self) -> bool;
    fn is_side_lit(&self) -> bool;

    fn is_builtin(&self) -> bool {
        false
    }

    fn particle_sprite(&self) -> Option<Sprite>;
    fn transformation(&self) -> &ModelTransformation;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_roundtrip() {
        for c in DisplayContext::ALL {
            assert_eq!(DisplayContext::from_name(c.name()), Some(c));
        }
        assert_eq!(DisplayContext::from_name("hat"), None);
    }

    #[test]
    fn transformation_defaults_to_identity() {
        let t = ModelTransformation::default();
        assert_eq!(t, ModelTransformation::NONE);
        let gui = Transformation {
            rotation: Vec3::new(30.0, 225.0, 0.0),
            translation: Vec3::ZERO,
            scale: Vec3::new(0.625, 0.625, 0.625),
        };
        let t = t.with(DisplayContext::Gui, gui);
        assert_eq!(*t.get(DisplayContext::Gui), gui);
        assert_eq!(*t.get(DisplayContext::Head), Transformation::IDENTITY);
    }
}
