use std::collections::HashSet;

use ctm_blocks::types::{Block, MaterialId};
use ctm_chunk::BlockView;
use ctm_geom::{BlockPos, Face};
use ctm_model::{
    BakedCtLayer, BakedSpriteSupplier, Connector, FaceConnections, Quadrant, QuadrantState,
    RenderMaterial, Sprite, TexDir,
};
use proptest::prelude::*;

struct Cells(HashSet<BlockPos>);

impl BlockView for Cells {
    fn block_at(&self, pos: BlockPos) -> Block {
        if self.0.contains(&pos) { Block::new(1) } else { Block::AIR }
    }
}

/// Origin plus whichever of the surrounding 5x5x5 cells `bits` selects.
fn cells(bits: &[bool]) -> Cells {
    let mut set = HashSet::from([BlockPos::ORIGIN]);
    let mut i = 0;
    for x in -2..=2 {
        for y in -2..=2 {
            for z in -2..=2 {
                if bits[i] {
                    set.insert(BlockPos::new(x, y, z));
                }
                i += 1;
            }
        }
    }
    Cells(set)
}

fn layer(interior_border: bool) -> BakedCtLayer {
    BakedCtLayer::new(
        vec![Some(BakedSpriteSupplier::Fixed(Sprite::full(MaterialId(1)))); 5],
        RenderMaterial::default(),
        0.0,
        false,
        interior_border,
        -1,
        Connector::default(),
    )
}

fn face_strategy() -> impl Strategy<Value = Face> {
    (0usize..6).prop_map(Face::from_index)
}

fn has(view: &Cells, p: BlockPos) -> bool {
    view.0.contains(&p)
}

proptest! {
    #[test]
    fn states_match_direct_neighbor_reads(bits in prop::collection::vec(any::<bool>(), 125), normal in face_strategy()) {
        let view = cells(&bits);
        let conns = layer(false).face_connections(&view, Block::new(1), BlockPos::ORIGIN, normal);
        for q in Quadrant::ALL {
            let hp = BlockPos::ORIGIN.offset(q.horizontal().resolve(normal));
            let vp = BlockPos::ORIGIN.offset(q.vertical().resolve(normal));
            let dp = vp.offset(q.horizontal().resolve(normal));
            let want = QuadrantState::resolve(has(&view, hp), has(&view, vp), has(&view, dp), true);
            prop_assert_eq!(conns.state(q), want);
        }
    }

    #[test]
    fn interior_border_only_removes_connections(bits in prop::collection::vec(any::<bool>(), 125), normal in face_strategy()) {
        let view = cells(&bits);
        let open = layer(false).face_connections(&view, Block::new(1), BlockPos::ORIGIN, normal);
        let bordered = layer(true).face_connections(&view, Block::new(1), BlockPos::ORIGIN, normal);
        let edges = |s: QuadrantState| match s {
            QuadrantState::ExteriorCorner => (false, false),
            QuadrantState::HorizontalEdge => (true, false),
            QuadrantState::VerticalEdge => (false, true),
            QuadrantState::InteriorCorner | QuadrantState::NoBorder => (true, true),
        };
        for q in Quadrant::ALL {
            let (oh, ov) = edges(open.state(q));
            let (bh, bv) = edges(bordered.state(q));
            prop_assert!(oh || !bh);
            prop_assert!(ov || !bv);
            if bordered.state(q) == QuadrantState::NoBorder {
                prop_assert_eq!(open.state(q), QuadrantState::NoBorder);
            }
        }
        // With nothing in front of the face, the border changes nothing.
        let front = BlockPos::ORIGIN.offset(normal);
        let front_clear = TexDir::ALL.iter().all(|d| !has(&view, front.offset(d.resolve(normal))))
            && Quadrant::ALL.iter().all(|q| {
                let d = front
                    .offset(q.vertical().resolve(normal))
                    .offset(q.horizontal().resolve(normal));
                !has(&view, d)
            });
        if front_clear {
            prop_assert_eq!(open, bordered);
        }
    }

    #[test]
    fn packed_mask_roundtrips(bits in prop::collection::vec(any::<bool>(), 125), normal in face_strategy()) {
        let view = cells(&bits);
        let conns = layer(true).face_connections(&view, Block::new(1), BlockPos::ORIGIN, normal);
        prop_assert!(conns.mask() < 1 << 12);
        prop_assert_eq!(FaceConnections::from_mask(conns.mask()), Some(conns));
    }
}
