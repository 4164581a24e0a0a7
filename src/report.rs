//! Plain-text reports printed by the CLI.

use std::fmt::Write;

use ctm_blocks::BlockRegistry;
use ctm_model::{ChunkMesh, FaceConnections, Quad, Quadrant, QuadrantState};

fn state_name(s: QuadrantState) -> &'static str {
    match s {
        QuadrantState::ExteriorCorner => "corner",
        QuadrantState::HorizontalEdge => "h-edge",
        QuadrantState::VerticalEdge => "v-edge",
        QuadrantState::InteriorCorner => "inner",
        QuadrantState::NoBorder => "full",
    }
}

/// One line per quadrant state, e.g. `0x924 [BL full, BR full, ...]`.
pub fn connections(c: &FaceConnections) -> String {
    let parts: Vec<String> = Quadrant::ALL
        .iter()
        .map(|q| {
            let tag = match q {
                Quadrant::BottomLeft => "BL",
                Quadrant::BottomRight => "BR",
                Quadrant::TopLeft => "TL",
                Quadrant::TopRight => "TR",
            };
            format!("{tag} {}", state_name(c.state(*q)))
        })
        .collect();
    format!("{:#05x} [{}]", c.mask(), parts.join(", "))
}

pub fn quad(q: &Quad, reg: &BlockRegistry) -> String {
    let (lo, hi) = q.bounds();
    let cull = q.cull_face.map_or("-", |f| f.name());
    format!(
        "{:<5} {:<12} inset {:.3} box ({:.3}, {:.3}, {:.3})..({:.3}, {:.3}, {:.3}) uv ({:.3}, {:.3})..({:.3}, {:.3}) cull {} tint {}",
        q.nominal_face.name(),
        reg.materials.key_of(q.sprite.material),
        q.inset(),
        lo.x,
        lo.y,
        lo.z,
        hi.x,
        hi.y,
        hi.z,
        q.sprite.uv.u0,
        q.sprite.uv.v0,
        q.sprite.uv.u1,
        q.sprite.uv.v1,
        cull,
        q.tint_index
    )
}

pub fn mesh_summary(meshes: &[ChunkMesh], reg: &BlockRegistry) -> String {
    let mut out = String::new();
    let (mut quads, mut culled, mut verts) = (0, 0, 0);
    for m in meshes {
        let _ = write!(
            out,
            "chunk ({}, {}, {}): {} quads, {} culled, {} unmodelled",
            m.coord.cx, m.coord.cy, m.coord.cz, m.quads, m.culled, m.skipped
        );
        let mut parts: Vec<_> = m.parts.iter().collect();
        parts.sort_by_key(|(mid, _)| **mid);
        for (mid, part) in parts {
            let _ = write!(out, " | {} x{}", reg.materials.key_of(*mid), part.quad_count());
        }
        out.push('\n');
        quads += m.quads;
        culled += m.culled;
        verts += m.vertex_count();
    }
    let _ = writeln!(
        out,
        "total: {} chunks, {} quads, {} culled, {} vertices",
        meshes.len(),
        quads,
        culled,
        verts
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connections_list_every_quadrant() {
        let c = FaceConnections::from_mask(0b100_011_001_000).unwrap();
        assert_eq!(
            connections(&c),
            "0x8c8 [BL corner, BR h-edge, TL inner, TR full]"
        );
    }

    #[test]
    fn empty_summary_still_totals() {
        let reg = BlockRegistry::new();
        assert_eq!(
            mesh_summary(&[], &reg),
            "total: 0 chunks, 0 quads, 0 culled, 0 vertices\n"
        );
    }
}
