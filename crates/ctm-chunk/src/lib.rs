//! Chunk buffers and the world query used by model connectors.
#![forbid(unsafe_code)]

use ctm_blocks::types::Block;
use ctm_geom::BlockPos;
use hashbrown::HashMap;

/// Read access to the blocks of a world.
///
/// Positions outside loaded data must read as [`Block::AIR`] rather than fail;
/// connectors then simply see a non-connecting neighbor.
pub trait BlockView {
    fn block_at(&self, pos: BlockPos) -> Block;
}

impl<T: BlockView + ?Sized> BlockView for &T {
    #[inline]
    fn block_at(&self, pos: BlockPos) -> Block {
        (**self).block_at(pos)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }
}

#[derive(Clone, Debug)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    pub blocks: Vec<Block>,
}

impl ChunkBuf {
    pub fn new_air(coord: ChunkCoord, sx: usize, sy: usize, sz: usize) -> Self {
        Self::from_blocks_local(coord, sx, sy, sz, Vec::new())
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.sz + z) * self.sx + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[self.idx(x, y, z)]
    }

    #[inline]
    pub fn base(&self) -> BlockPos {
        BlockPos::new(
            self.coord.cx * self.sx as i32,
            self.coord.cy * self.sy as i32,
            self.coord.cz * self.sz as i32,
        )
    }

    #[inline]
    pub fn contains_world(&self, p: BlockPos) -> bool {
        let b = self.base();
        p.x >= b.x
            && p.x < b.x + self.sx as i32
            && p.y >= b.y
            && p.y < b.y + self.sy as i32
            && p.z >= b.z
            && p.z < b.z + self.sz as i32
    }

    #[inline]
    pub fn get_world(&self, p: BlockPos) -> Option<Block> {
        if !self.contains_world(p) {
            return None;
        }
        let b = self.base();
        Some(self.get_local(
            (p.x - b.x) as usize,
            (p.y - b.y) as usize,
            (p.z - b.z) as usize,
        ))
    }

    /// Writes `block` at world position `p`; returns false when `p` lies outside this chunk.
    pub fn set_world(&mut self, p: BlockPos, block: Block) -> bool {
        if !self.contains_world(p) {
            return false;
        }
        let b = self.base();
        let i = self.idx(
            (p.x - b.x) as usize,
            (p.y - b.y) as usize,
            (p.z - b.z) as usize,
        );
        self.blocks[i] = block;
        true
    }

    pub fn from_blocks_local(
        coord: ChunkCoord,
        sx: usize,
        sy: usize,
        sz: usize,
        blocks: Vec<Block>,
    ) -> Self {
        let mut b = blocks;
        let expect = sx * sy * sz;
        if b.len() != expect {
            b.resize(expect, Block::AIR);
        }
        ChunkBuf {
            coord,
            sx,
            sy,
            sz,
            blocks: b,
        }
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| *b != Block::AIR)
    }

    /// Iterates non-air blocks with their world positions.
    pub fn iter_world(&self) -> impl Iterator<Item = (BlockPos, Block)> + '_ {
        let base = self.base();
        (0..self.sy).flat_map(move |y| {
            (0..self.sz).flat_map(move |z| {
                (0..self.sx).filter_map(move |x| {
                    let b = self.get_local(x, y, z);
                    (!b.is_air())
                        .then(|| (base.offset_by(x as i32, y as i32, z as i32), b))
                })
            })
        })
    }
}

impl BlockView for ChunkBuf {
    #[inline]
    fn block_at(&self, pos: BlockPos) -> Block {
        self.get_world(pos).unwrap_or(Block::AIR)
    }
}

/// Sparse set of equally sized chunks; unloaded chunks read as air.
#[derive(Clone, Debug)]
pub struct ChunkGrid {
    pub chunk_size: usize,
    chunks: HashMap<ChunkCoord, ChunkBuf>,
}

impl ChunkGrid {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            chunks: HashMap::new(),
        }
    }

    #[inline]
    pub fn coord_of(&self, p: BlockPos) -> ChunkCoord {
        let s = self.chunk_size as i32;
        ChunkCoord::new(p.x.div_euclid(s), p.y.div_euclid(s), p.z.div_euclid(s))
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&ChunkBuf> {
        self.chunks.get(&coord)
    }

    pub fn set(&mut self, p: BlockPos, block: Block) {
        let coord = self.coord_of(p);
        let s = self.chunk_size;
        let chunk = self
            .chunks
            .entry(coord)
            .or_insert_with(|| ChunkBuf::new_air(coord, s, s, s));
        chunk.set_world(p, block);
    }

    /// Loaded chunk coordinates in sorted order.
    pub fn coords(&self) -> Vec<ChunkCoord> {
        let mut v: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        v.sort();
        v
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl BlockView for ChunkGrid {
    #[inline]
    fn block_at(&self, pos: BlockPos) -> Block {
        self.chunks
            .get(&self.coord_of(pos))
            .and_then(|c| c.get_world(pos))
            .unwrap_or(Block::AIR)
    }
}
