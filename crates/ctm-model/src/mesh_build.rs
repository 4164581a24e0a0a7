use ctm_geom::Vec3;

/// Interleaved triangle buffers for one material.
#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub idx: Vec<u32>,
    pub col: Vec<u8>,
}

impl MeshBuild {
    /// Appends a quad (two triangles) with explicit per-vertex UVs.
    ///
    /// Vertex order is fixed up so both triangles face along `n`.
    pub fn add_quad_uv(
        &mut self,
        a: Vec3,
        b: Vec3,
        c: Vec3,
        d: Vec3,
        n: Vec3,
        mut uvs: [(f32, f32); 4],
        rgba: [u8; 4],
    ) {
        let base = self.vertex_count() as u32;
        let mut vs = [a, b, c, d];
        let cross = (vs[1] - vs[0]).cross(vs[2] - vs[0]);
        if cross.dot(n) < 0.0 {
            vs.swap(1, 3);
            uvs.swap(1, 3);
        }
        for i in 0..4 {
            self.pos.extend_from_slice(&[vs[i].x, vs[i].y, vs[i].z]);
            self.norm.extend_from_slice(&[n.x, n.y, n.z]);
            self.uv.extend_from_slice(&[uvs[i].0, uvs[i].1]);
            self.col.extend_from_slice(&rgba);
        }
        self.idx
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.idx.len() / 6
    }
}
