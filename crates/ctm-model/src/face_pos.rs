use ctm_geom::{Face, Vec3};

use crate::quad::Quad;
use crate::sprite::Sprite;
use crate::texdir::face_point;

/// Quarter-turn rotation applied to a quad's texture coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum UvRotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl UvRotation {
    /// Rotates normalized `(s, t)` about the texture center.
    #[inline]
    pub fn apply(self, (s, t): (f32, f32)) -> (f32, f32) {
        match self {
            UvRotation::None => (s, t),
            UvRotation::Cw90 => (1.0 - t, s),
            UvRotation::Cw180 => (1.0 - s, 1.0 - t),
            UvRotation::Cw270 => (t, 1.0 - s),
        }
    }
}

/// A rectangle on a face in the face's texture frame, inset by `depth`.
///
/// `(u0, v0)` is the bottom-left corner and `(u1, v1)` the top-right, both in
/// `[0, 1]`. Depth 0 is the block surface; depth 0.5 the block center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FacePos {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
    pub depth: f32,
}

impl FacePos {
    pub const FULL: FacePos = FacePos::new(0.0, 0.0, 1.0, 1.0, 0.0);

    #[inline]
    pub const fn new(u0: f32, v0: f32, u1: f32, v1: f32, depth: f32) -> Self {
        Self {
            u0,
            v0,
            u1,
            v1,
            depth,
        }
    }

    /// Face-local corners in vertex order: top-left, bottom-left, bottom-right, top-right.
    #[inline]
    fn corners(&self) -> [(f32, f32); 4] {
        [
            (self.u0, self.v1),
            (self.u0, self.v0),
            (self.u1, self.v0),
            (self.u1, self.v1),
        ]
    }

    pub fn positions(&self, normal: Face) -> [Vec3; 4] {
        self.corners()
            .map(|(u, v)| face_point(normal, u, v, self.depth))
    }

    /// Texture coordinates within the unit square, `t` growing downwards.
    pub fn normalized_uvs(&self, rotation: UvRotation) -> [(f32, f32); 4] {
        self.corners().map(|(u, v)| rotation.apply((u, 1.0 - v)))
    }

    /// Builds the quad for `normal`, sampling `sprite` with the same sub-rectangle.
    pub fn to_quad(&self, normal: Face, rotation: UvRotation, sprite: Sprite) -> Quad {
        let uv = self
            .normalized_uvs(rotation)
            .map(|(s, t)| sprite.uv.lerp(s, t));
        Quad::new(self.positions(normal), uv, normal, sprite)
    }
}
