use ctm_geom::Face;

use crate::face_pos::{FacePos, UvRotation};
use crate::quad::{QuadSink, RenderMaterial};
use crate::sprite::Sprite;

/// Emits the six faces of a cube inset by `depth` on every side.
///
/// Faces whose sprite is `None` are skipped. With `cull_faces` each quad is
/// culled against the neighbor on its own side.
pub fn emit_cube(
    sink: &mut dyn QuadSink,
    cull_faces: bool,
    depth: f32,
    material: RenderMaterial,
    sprites: &[Option<Sprite>; 6],
    tints: &[i32; 6],
) {
    let rect = FacePos::new(depth, depth, 1.0 - depth, 1.0 - depth, depth);
    for face in Face::ALL {
        let Some(sprite) = sprites[face.index()] else {
            continue;
        };
        let quad = rect
            .to_quad(face, UvRotation::None, sprite)
            .with_tint(tints[face.index()])
            .with_material(material)
            .with_cull_face(cull_faces.then_some(face));
        sink.emit(quad);
    }
}
