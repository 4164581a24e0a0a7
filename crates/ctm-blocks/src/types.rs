use serde::{Deserialize, Serialize};

// Compact voxel representation used at runtime
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub state: BlockState,
}

pub type BlockId = u16;
pub type BlockState = u16;

impl Block {
    pub const AIR: Block = Block { id: 0, state: 0 };

    #[inline]
    pub const fn new(id: BlockId) -> Block {
        Block { id, state: 0 }
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self.id == Block::AIR.id
    }
}

/// Index into the material catalog; one texture (or tile sheet) per material.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct MaterialId(pub u16);

/// A stack of block items, as rendered in inventories and item frames.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ItemStack {
    pub block: Block,
    pub count: u8,
}

impl ItemStack {
    pub fn of(block: Block) -> ItemStack {
        ItemStack { block, count: 1 }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.block.is_air()
    }
}
