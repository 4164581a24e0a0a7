//! Emitted quads and the sinks that receive them.

use ctm_geom::{Face, Vec3};

use crate::constants::{NO_TINT, WHITE};
use crate::sprite::Sprite;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Whatever the block's default layer is.
    #[default]
    Default,
    Solid,
    Cutout,
    Translucent,
}

impl BlendMode {
    pub fn from_name(s: &str) -> Option<BlendMode> {
        match s {
            "default" => Some(BlendMode::Default),
            "solid" => Some(BlendMode::Solid),
            "cutout" => Some(BlendMode::Cutout),
            "translucent" => Some(BlendMode::Translucent),
            _ => None,
        }
    }
}

/// Opaque render parameters attached to every quad of a layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderMaterial {
    pub blend: BlendMode,
    pub disable_ao: bool,
    pub emissive: bool,
}

/// One textured quad in block-local space (the block occupies `[0, 1]^3`).
///
/// Vertices run counterclockwise seen from outside: top-left, bottom-left,
/// bottom-right, top-right in the face's texture frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quad {
    pub pos: [Vec3; 4],
    pub uv: [(f32, f32); 4],
    pub nominal_face: Face,
    pub cull_face: Option<Face>,
    pub tint_index: i32,
    pub color: [u8; 4],
    pub material: RenderMaterial,
    pub sprite: Sprite,
}

impl Quad {
    /// Untinted white quad with the default material and no cull face.
    pub fn new(pos: [Vec3; 4], uv: [(f32, f32); 4], nominal_face: Face, sprite: Sprite) -> Self {
        Self {
            pos,
            uv,
            nominal_face,
            cull_face: None,
            tint_index: NO_TINT,
            color: WHITE,
            material: RenderMaterial::default(),
            sprite,
        }
    }

    #[inline]
    pub fn with_cull_face(mut self, cull_face: Option<Face>) -> Self {
        self.cull_face = cull_face;
        self
    }

    #[inline]
    pub fn with_tint(mut self, tint_index: i32) -> Self {
        self.tint_index = tint_index;
        self
    }

    #[inline]
    pub fn with_color(mut self, color: [u8; 4]) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn with_material(mut self, material: RenderMaterial) -> Self {
        self.material = material;
        self
    }

    /// Smallest and largest corner of the quad's bounding box.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut lo = self.pos[0];
        let mut hi = self.pos[0];
        for p in &self.pos[1..] {
            lo = Vec3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z));
            hi = Vec3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z));
        }
        (lo, hi)
    }

    /// Distance of the quad's plane below the block surface on its nominal face.
    pub fn inset(&self) -> f32 {
        let n = self.nominal_face.normal();
        0.5 - (self.pos[0] - Vec3::HALF).dot(n)
    }
}

/// Receiver of emitted quads.
pub trait QuadSink {
    fn emit(&mut self, quad: Quad);
}

impl QuadSink for Vec<Quad> {
    #[inline]
    fn emit(&mut self, quad: Quad) {
        self.push(quad);
    }
}

impl<S: QuadSink + ?Sized> QuadSink for &mut S {
    #[inline]
    fn emit(&mut self, quad: Quad) {
        (**self).emit(quad);
    }
}
