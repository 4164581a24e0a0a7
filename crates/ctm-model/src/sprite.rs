//! Baked sprites and the suppliers that pick one per quad.

use std::fmt;
use std::sync::Arc;

use ctm_blocks::types::{Block, ItemStack, MaterialId};
use ctm_chunk::BlockView;
use ctm_geom::{BlockPos, Face};
use rand::{Rng, RngCore};

/// Sub-rectangle of a material texture, in normalized texture coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl UvRect {
    pub const FULL: UvRect = UvRect::new(0.0, 0.0, 1.0, 1.0);

    #[inline]
    pub const fn new(u0: f32, v0: f32, u1: f32, v1: f32) -> Self {
        Self { u0, v0, u1, v1 }
    }

    /// Maps `(s, t)` in `[0, 1]` into this rectangle.
    #[inline]
    pub fn lerp(&self, s: f32, t: f32) -> (f32, f32) {
        (
            self.u0 + s * (self.u1 - self.u0),
            self.v0 + t * (self.v1 - self.v0),
        )
    }
}

impl From<[f32; 4]> for UvRect {
    fn from(r: [f32; 4]) -> Self {
        UvRect::new(r[0], r[1], r[2], r[3])
    }
}

/// A resolved texture region: which material it lives in and where.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub material: MaterialId,
    pub uv: UvRect,
}

impl Sprite {
    #[inline]
    pub const fn new(material: MaterialId, uv: UvRect) -> Self {
        Self { material, uv }
    }

    #[inline]
    pub const fn full(material: MaterialId) -> Self {
        Self::new(material, UvRect::FULL)
    }
}

/// Weighted random choice between sprites. Weights are positive.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedSprites {
    entries: Vec<(Sprite, u32)>,
    total: u32,
}

impl WeightedSprites {
    /// Returns `None` when there is nothing to pick from.
    pub fn new(entries: Vec<(Sprite, u32)>) -> Option<Self> {
        let entries: Vec<(Sprite, u32)> = entries.into_iter().filter(|(_, w)| *w > 0).collect();
        let total = entries
            .iter()
            .try_fold(0u32, |acc, (_, w)| acc.checked_add(*w))?;
        if total == 0 {
            return None;
        }
        Some(Self { entries, total })
    }

    pub fn entries(&self) -> &[(Sprite, u32)] {
        &self.entries
    }

    pub fn pick(&self, rng: &mut dyn RngCore) -> Sprite {
        let mut roll = rng.random_range(0..self.total);
        for (sprite, weight) in &self.entries {
            if roll < *weight {
                return *sprite;
            }
            roll -= weight;
        }
        // Unreachable while `total` is the sum of the weights.
        self.entries[self.entries.len() - 1].0
    }
}

/// The block face a sprite is being resolved for.
#[derive(Copy, Clone)]
pub struct SpriteContext<'a> {
    pub view: &'a dyn BlockView,
    pub block: Block,
    pub pos: BlockPos,
    pub normal: Face,
}

/// Sprite source that can look at the world around the block.
pub trait SpriteSupplier: Send + Sync {
    fn block_sprite(&self, ctx: &SpriteContext<'_>, rng: &mut dyn RngCore) -> Option<Sprite>;

    fn item_sprite(&self, stack: &ItemStack, rng: &mut dyn RngCore) -> Option<Sprite>;
}

/// Supplies the sprite for one slot of a layer's sprite table.
#[derive(Clone)]
pub enum BakedSpriteSupplier {
    Fixed(Sprite),
    Weighted(WeightedSprites),
    Custom(Arc<dyn SpriteSupplier>),
}

impl BakedSpriteSupplier {
    pub fn custom(s: impl SpriteSupplier + 'static) -> Self {
        BakedSpriteSupplier::Custom(Arc::new(s))
    }

    /// Sprite for a block face quad.
    #[inline]
    pub fn block_sprite(&self, ctx: &SpriteContext<'_>, rng: &mut dyn RngCore) -> Option<Sprite> {
        match self {
            BakedSpriteSupplier::Fixed(s) => Some(*s),
            BakedSpriteSupplier::Weighted(w) => Some(w.pick(rng)),
            BakedSpriteSupplier::Custom(c) => c.block_sprite(ctx, rng),
        }
    }

    /// Sprite for an item render. Empty stacks get none.
    #[inline]
    pub fn item_sprite(&self, stack: &ItemStack, rng: &mut dyn RngCore) -> Option<Sprite> {
        if stack.is_empty() {
            return None;
        }
        match self {
            BakedSpriteSupplier::Fixed(s) => Some(*s),
            BakedSpriteSupplier::Weighted(w) => Some(w.pick(rng)),
            BakedSpriteSupplier::Custom(c) => c.item_sprite(stack, rng),
        }
    }
}

impl From<Sprite> for BakedSpriteSupplier {
    fn from(s: Sprite) -> Self {
        BakedSpriteSupplier::Fixed(s)
    }
}

impl PartialEq for BakedSpriteSupplier {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (BakedSpriteSupplier::Fixed(a), BakedSpriteSupplier::Fixed(b)) => a == b,
            (BakedSpriteSupplier::Weighted(a), BakedSpriteSupplier::Weighted(b)) => a == b,
            (BakedSpriteSupplier::Custom(a), BakedSpriteSupplier::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for BakedSpriteSupplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BakedSpriteSupplier::Fixed(s) => f.debug_tuple("Fixed").field(s).finish(),
            BakedSpriteSupplier::Weighted(w) => f.debug_tuple("Weighted").field(w).finish(),
            BakedSpriteSupplier::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sprite(m: u16) -> Sprite {
        Sprite::full(MaterialId(m))
    }

    #[test]
    fn zero_weights_are_dropped() {
        assert!(WeightedSprites::new(vec![]).is_none());
        assert!(WeightedSprites::new(vec![(sprite(1), 0)]).is_none());
        let w = WeightedSprites::new(vec![(sprite(1), 0), (sprite(2), 3)]).unwrap();
        assert_eq!(w.entries().len(), 1);
    }

    #[test]
    fn weighted_pick_only_returns_listed_sprites() {
        let w = WeightedSprites::new(vec![(sprite(1), 1), (sprite(2), 5)]).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let mut seen = [0u32; 3];
        for _ in 0..600 {
            seen[w.pick(&mut rng).material.0 as usize] += 1;
        }
        assert_eq!(seen[0], 0);
        assert!(seen[1] > 0 && seen[2] > seen[1]);
    }

    #[test]
    fn empty_stack_has_no_item_sprite() {
        let s = BakedSpriteSupplier::from(sprite(4));
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(s.item_sprite(&ItemStack::of(Block::AIR), &mut rng), None);
        assert_eq!(s.item_sprite(&ItemStack::of(Block::new(2)), &mut rng), Some(sprite(4)));
        let ctx = SpriteContext {
            view: &Empty,
            block: Block::new(2),
            pos: BlockPos::ORIGIN,
            normal: Face::PosY,
        };
        assert_eq!(s.block_sprite(&ctx, &mut rng), Some(sprite(4)));
    }

    struct Empty;

    impl BlockView for Empty {
        fn block_at(&self, _pos: BlockPos) -> Block {
            Block::AIR
        }
    }

    /// Picks by face on blocks, and a fixed sprite for items.
    struct ByFace;

    impl SpriteSupplier for ByFace {
        fn block_sprite(&self, ctx: &SpriteContext<'_>, _rng: &mut dyn RngCore) -> Option<Sprite> {
            (ctx.normal != Face::NegY).then(|| sprite(20 + ctx.normal.index() as u16))
        }

        fn item_sprite(&self, _stack: &ItemStack, _rng: &mut dyn RngCore) -> Option<Sprite> {
            Some(sprite(30))
        }
    }

    #[test]
    fn custom_suppliers_see_the_block_face() {
        let s = BakedSpriteSupplier::custom(ByFace);
        let mut rng = StdRng::seed_from_u64(0);
        let ctx = |normal| SpriteContext {
            view: &Empty,
            block: Block::new(2),
            pos: BlockPos::new(1, 2, 3),
            normal,
        };
        assert_eq!(s.block_sprite(&ctx(Face::PosX), &mut rng), Some(sprite(22)));
        assert_eq!(s.block_sprite(&ctx(Face::NegY), &mut rng), None);
        assert_eq!(s.item_sprite(&ItemStack::of(Block::new(2)), &mut rng), Some(sprite(30)));
        // Empty stacks are filtered before the custom supplier runs.
        assert_eq!(s.item_sprite(&ItemStack::of(Block::AIR), &mut rng), None);
        assert_eq!(s.clone(), s);
        assert_ne!(s, BakedSpriteSupplier::custom(ByFace));
    }

    #[test]
    fn lerp_maps_into_the_rect() {
        let r = UvRect::new(0.5, 0.25, 0.75, 0.5);
        assert_eq!(r.lerp(0.0, 0.0), (0.5, 0.25));
        assert_eq!(r.lerp(1.0, 1.0), (0.75, 0.5));
    }
}
