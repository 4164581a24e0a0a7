//! Local texture frame of each block face.
//!
//! Every face is viewed from outside the block. "Up" is +Y on the four side
//! faces, north on the top face and south on the bottom face; "left" and
//! "right" follow from the viewer's orientation, so `right x up == normal`.

use ctm_geom::{Face, Vec3};

/// Direction within a face's texture frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TexDir {
    Up,
    Down,
    Left,
    Right,
}

impl TexDir {
    pub const ALL: [TexDir; 4] = [TexDir::Up, TexDir::Down, TexDir::Left, TexDir::Right];

    /// Block-space direction this texture direction points at on face `normal`.
    #[inline]
    pub fn resolve(self, normal: Face) -> Face {
        match self {
            TexDir::Up => tex_up(normal),
            TexDir::Down => tex_down(normal),
            TexDir::Left => tex_left(normal),
            TexDir::Right => tex_right(normal),
        }
    }
}

#[inline]
pub fn tex_up(normal: Face) -> Face {
    match normal {
        Face::NegY => Face::PosZ,
        Face::PosY => Face::NegZ,
        _ => Face::PosY,
    }
}

#[inline]
pub fn tex_down(normal: Face) -> Face {
    tex_up(normal).opposite()
}

#[inline]
pub fn tex_left(normal: Face) -> Face {
    match normal {
        Face::NegY | Face::PosY => Face::NegX,
        Face::NegZ => Face::PosX,
        Face::PosZ => Face::NegX,
        Face::NegX => Face::NegZ,
        Face::PosX => Face::PosZ,
    }
}

#[inline]
pub fn tex_right(normal: Face) -> Face {
    tex_left(normal).opposite()
}

/// Maps face-local `(u, v)` in `[0, 1]` and an inward `depth` to block-local space.
///
/// `u` grows to the right and `v` grows up; depth 0 lies on the block surface.
#[inline]
pub fn face_point(normal: Face, u: f32, v: f32, depth: f32) -> Vec3 {
    Vec3::HALF
        + tex_right(normal).normal() * (u - 0.5)
        + tex_up(normal).normal() * (v - 0.5)
        + normal.normal() * (0.5 - depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-6
    }

    #[test]
    fn frame_is_right_handed_around_the_normal() {
        for n in Face::ALL {
            let right = tex_right(n).normal();
            let up = tex_up(n).normal();
            assert!(close(right.cross(up), n.normal()), "face {n}");
            assert_eq!(right.dot(n.normal()), 0.0);
            assert_eq!(up.dot(n.normal()), 0.0);
        }
    }

    #[test]
    fn opposite_directions_are_opposite_faces() {
        for n in Face::ALL {
            assert_eq!(tex_left(n), tex_right(n).opposite());
            assert_eq!(tex_down(n), tex_up(n).opposite());
            let dirs: Vec<Face> = TexDir::ALL.iter().map(|d| d.resolve(n)).collect();
            assert!(!dirs.contains(&n) && !dirs.contains(&n.opposite()));
        }
    }

    #[test]
    fn known_frames() {
        assert_eq!(tex_up(Face::PosY), Face::NegZ);
        assert_eq!(tex_left(Face::PosY), Face::NegX);
        assert_eq!(tex_up(Face::NegY), Face::PosZ);
        assert_eq!(tex_left(Face::NegZ), Face::PosX);
        assert_eq!(tex_left(Face::PosZ), Face::NegX);
        assert_eq!(tex_left(Face::NegX), Face::NegZ);
        assert_eq!(tex_left(Face::PosX), Face::PosZ);
        assert_eq!(tex_up(Face::PosX), Face::PosY);
    }

    #[test]
    fn face_point_lands_on_the_face_plane() {
        // Top face, bottom-left corner seen from above is the south-west corner.
        assert!(close(face_point(Face::PosY, 0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0)));
        assert!(close(face_point(Face::PosY, 1.0, 1.0, 0.25), Vec3::new(1.0, 0.75, 0.0)));
        // North face is seen from -Z, so its left edge is the east side.
        assert!(close(face_point(Face::NegZ, 0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(face_point(Face::NegX, 0.0, 1.0, 0.5), Vec3::new(0.5, 1.0, 0.0)));
    }
}
