//! Connection predicates deciding whether two blocks visually join.

use std::fmt;
use std::sync::Arc;

use ctm_blocks::tags::{RenderTags, TagId};
use ctm_blocks::types::Block;
use ctm_chunk::BlockView;
use ctm_geom::{BlockPos, Face};

/// Decides whether the block at `pos` joins the block at `other_pos`.
///
/// `normal` is the face currently being rendered. Implementations must be
/// pure for a given world snapshot and safe to call from many threads.
pub trait ModelConnector: Send + Sync {
    fn can_connect(
        &self,
        view: &dyn BlockView,
        pos: BlockPos,
        other_pos: BlockPos,
        normal: Face,
        block: Block,
        other: Block,
    ) -> bool;
}

impl<F> ModelConnector for F
where
    F: Fn(&dyn BlockView, BlockPos, BlockPos, Face, Block, Block) -> bool + Send + Sync,
{
    #[inline]
    fn can_connect(
        &self,
        view: &dyn BlockView,
        pos: BlockPos,
        other_pos: BlockPos,
        normal: Face,
        block: Block,
        other: Block,
    ) -> bool {
        self(view, pos, other_pos, normal, block, other)
    }
}

/// Connects to any block carrying a render tag.
#[derive(Clone, Debug)]
pub struct RenderTagConnector {
    pub tag: TagId,
    tags: Arc<RenderTags>,
}

impl RenderTagConnector {
    pub fn new(tag: TagId, tags: Arc<RenderTags>) -> Self {
        Self { tag, tags }
    }
}

impl ModelConnector for RenderTagConnector {
    #[inline]
    fn can_connect(
        &self,
        _view: &dyn BlockView,
        _pos: BlockPos,
        _other_pos: BlockPos,
        _normal: Face,
        _block: Block,
        other: Block,
    ) -> bool {
        self.tags.is_in_tag(self.tag, other.id)
    }
}

/// Connects to blocks of the same type, whatever their state.
#[derive(Copy, Clone, Debug, Default)]
pub struct SameBlockConnector;

impl ModelConnector for SameBlockConnector {
    #[inline]
    fn can_connect(
        &self,
        _view: &dyn BlockView,
        _pos: BlockPos,
        _other_pos: BlockPos,
        _normal: Face,
        block: Block,
        other: Block,
    ) -> bool {
        block.id == other.id
    }
}

/// The connector a layer was baked with.
#[derive(Clone)]
pub enum Connector {
    RenderTag(RenderTagConnector),
    SameBlock(SameBlockConnector),
    Custom(Arc<dyn ModelConnector>),
}

impl Connector {
    pub fn custom(c: impl ModelConnector + 'static) -> Self {
        Connector::Custom(Arc::new(c))
    }
}

impl Default for Connector {
    fn default() -> Self {
        Connector::SameBlock(SameBlockConnector)
    }
}

impl fmt::Debug for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connector::RenderTag(c) => f.debug_tuple("RenderTag").field(&c.tag).finish(),
            Connector::SameBlock(_) => f.write_str("SameBlock"),
            Connector::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl ModelConnector for Connector {
    #[inline]
    fn can_connect(
        &self,
        view: &dyn BlockView,
        pos: BlockPos,
        other_pos: BlockPos,
        normal: Face,
        block: Block,
        other: Block,
    ) -> bool {
        match self {
            Connector::RenderTag(c) => c.can_connect(view, pos, other_pos, normal, block, other),
            Connector::SameBlock(c) => c.can_connect(view, pos, other_pos, normal, block, other),
            Connector::Custom(c) => c.can_connect(view, pos, other_pos, normal, block, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;
    impl BlockView for Empty {
        fn block_at(&self, _pos: BlockPos) -> Block {
            Block::AIR
        }
    }

    fn check(c: &dyn ModelConnector, block: Block, other: Block) -> bool {
        let p = BlockPos::ORIGIN;
        c.can_connect(&Empty, p, p.offset(Face::PosX), Face::PosY, block, other)
    }

    #[test]
    fn same_block_ignores_state() {
        let c = Connector::default();
        let a = Block { id: 3, state: 0 };
        let b = Block { id: 3, state: 5 };
        assert!(check(&c, a, b));
        assert!(!check(&c, a, Block::new(4)));
        assert!(!check(&c, a, Block::AIR));
    }

    #[test]
    fn render_tag_checks_only_the_other_block() {
        let mut tags = RenderTags::new();
        let glass = tags.insert("glass", 5);
        tags.insert("glass", 6);
        let c = Connector::RenderTag(RenderTagConnector::new(glass, Arc::new(tags)));
        assert!(check(&c, Block::new(1), Block::new(6)));
        assert!(!check(&c, Block::new(5), Block::new(7)));
    }

    #[test]
    fn closures_are_connectors() {
        let c = Connector::custom(
            |_: &dyn BlockView, _: BlockPos, other_pos: BlockPos, _: Face, _: Block, _: Block| {
                other_pos.x > 0
            },
        );
        assert!(check(&c, Block::AIR, Block::AIR));
        assert_eq!(format!("{c:?}"), "Custom(..)");
    }
}
