use ctm_blocks::types::MaterialId;
use ctm_geom::{Face, Vec3};
use hashbrown::HashMap;

use crate::mesh_build::MeshBuild;
use crate::quad::{Quad, QuadSink};

// Per-material mesh buffers, keyed by the sprite's material.
pub trait BuildSink {
    fn get_build_mut(&mut self, mid: MaterialId) -> &mut MeshBuild;
}

impl BuildSink for HashMap<MaterialId, MeshBuild> {
    #[inline]
    fn get_build_mut(&mut self, mid: MaterialId) -> &mut MeshBuild {
        self.entry(mid).or_default()
    }
}

/// Quad sink that writes into mesh buffers, offset to `origin`.
///
/// Quads with a cull face are dropped when `occluded(face)` says the
/// neighbor on that side hides them.
pub struct MeshSink<'a, B: BuildSink, O: Fn(Face) -> bool> {
    builds: &'a mut B,
    origin: Vec3,
    occluded: O,
    pub emitted: usize,
    pub culled: usize,
}

impl<'a, B: BuildSink, O: Fn(Face) -> bool> MeshSink<'a, B, O> {
    pub fn new(builds: &'a mut B, origin: Vec3, occluded: O) -> Self {
        Self {
            builds,
            origin,
            occluded,
            emitted: 0,
            culled: 0,
        }
    }
}

impl<B: BuildSink, O: Fn(Face) -> bool> QuadSink for MeshSink<'_, B, O> {
    fn emit(&mut self, quad: Quad) {
        if let Some(face) = quad.cull_face {
            if (self.occluded)(face) {
                self.culled += 1;
                return;
            }
        }
        let [a, b, c, d] = quad.pos.map(|p| p + self.origin);
        let mb = self.builds.get_build_mut(quad.sprite.material);
        mb.add_quad_uv(a, b, c, d, quad.nominal_face.normal(), quad.uv, quad.color);
        self.emitted += 1;
    }
}
