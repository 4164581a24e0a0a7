//! Connected-texture layer.
//!
//! Every face is split into four quadrants. Each quadrant looks at the
//! horizontal and vertical neighbor on its side of the face (and, with corner
//! sprites available, the diagonal one) and picks one of five border states,
//! which indexes the layer's sprite table.

use ctm_blocks::types::{Block, ItemStack};
use ctm_chunk::BlockView;
use ctm_geom::{BlockPos, Face};
use rand::RngCore;

use crate::connector::{Connector, ModelConnector};
use crate::constants::{EDGE_ONLY_TABLE_LEN, MAX_FACE_DEPTH, WHITE};
use crate::cube::emit_cube;
use crate::face_pos::{FacePos, UvRotation};
use crate::layer::BakedModelLayer;
use crate::quad::{QuadSink, RenderMaterial};
use crate::sprite::{BakedSpriteSupplier, SpriteContext};
use crate::texdir::TexDir;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    BottomLeft = 0,
    BottomRight = 1,
    TopLeft = 2,
    TopRight = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
        Quadrant::TopLeft,
        Quadrant::TopRight,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Side whose neighbor forms this quadrant's horizontal border.
    #[inline]
    pub fn horizontal(self) -> TexDir {
        match self {
            Quadrant::BottomLeft | Quadrant::TopLeft => TexDir::Left,
            Quadrant::BottomRight | Quadrant::TopRight => TexDir::Right,
        }
    }

    /// Side whose neighbor forms this quadrant's vertical border.
    #[inline]
    pub fn vertical(self) -> TexDir {
        match self {
            Quadrant::BottomLeft | Quadrant::BottomRight => TexDir::Down,
            Quadrant::TopLeft | Quadrant::TopRight => TexDir::Up,
        }
    }

    /// Bit offset of this quadrant's 3-bit state in a packed face mask.
    #[inline]
    pub fn shift(self) -> u32 {
        self.index() as u32 * 3
    }
}

/// Border state of one quadrant. The discriminant is the sprite table index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum QuadrantState {
    /// Neither side connects: outer corner of the border.
    ExteriorCorner = 0,
    /// Only the horizontal neighbor connects.
    HorizontalEdge = 1,
    /// Only the vertical neighbor connects.
    VerticalEdge = 2,
    /// Both sides connect but the diagonal does not (or is not checked).
    InteriorCorner = 3,
    /// Both sides and the diagonal connect.
    NoBorder = 4,
}

impl QuadrantState {
    pub const ALL: [QuadrantState; 5] = [
        QuadrantState::ExteriorCorner,
        QuadrantState::HorizontalEdge,
        QuadrantState::VerticalEdge,
        QuadrantState::InteriorCorner,
        QuadrantState::NoBorder,
    ];

    /// Merges the neighbor flags of one quadrant.
    ///
    /// `corner` only counts when both edges connect and corner detection is on.
    #[inline]
    pub fn resolve(horizontal: bool, vertical: bool, corner: bool, corners: bool) -> Self {
        match (horizontal, vertical) {
            (false, false) => QuadrantState::ExteriorCorner,
            (true, false) => QuadrantState::HorizontalEdge,
            (false, true) => QuadrantState::VerticalEdge,
            (true, true) if corners && corner => QuadrantState::NoBorder,
            (true, true) => QuadrantState::InteriorCorner,
        }
    }

    #[inline]
    pub fn sprite_index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_bits(bits: u16) -> Option<Self> {
        Self::ALL.get(bits as usize).copied()
    }
}

/// Resolved states of the four quadrants of one face.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FaceConnections {
    pub states: [QuadrantState; 4],
}

impl FaceConnections {
    #[inline]
    pub fn state(&self, q: Quadrant) -> QuadrantState {
        self.states[q.index()]
    }

    /// Packs the four states into 12 bits, three per quadrant.
    pub fn mask(&self) -> u16 {
        Quadrant::ALL
            .iter()
            .fold(0u16, |m, q| m | ((self.state(*q) as u16) << q.shift()))
    }

    pub fn from_mask(mask: u16) -> Option<Self> {
        let mut states = [QuadrantState::ExteriorCorner; 4];
        for q in Quadrant::ALL {
            states[q.index()] = QuadrantState::from_bits((mask >> q.shift()) & 0b111)?;
        }
        Some(Self { states })
    }
}

/// The four quadrant rectangles of a face inset by `depth`.
///
/// Quadrants shrink from the outer edges toward the face center as `depth`
/// grows, so adjacent inset faces meet at the block edge. The plane depth is
/// capped at [`MAX_FACE_DEPTH`].
pub fn quadrant_rects(depth: f32) -> [FacePos; 4] {
    let dc = depth.clamp(0.0, MAX_FACE_DEPTH);
    let dm = depth.min(MAX_FACE_DEPTH);
    [
        FacePos::new(dc, dc, 0.5, 0.5, dm),
        FacePos::new(0.5, dc, 1.0 - dc, 0.5, dm),
        FacePos::new(dc, 0.5, 0.5, 1.0 - dc, dm),
        FacePos::new(0.5, 0.5, 1.0 - dc, 1.0 - dc, dm),
    ]
}

/// A baked connected-texture layer.
///
/// The sprite table is indexed by [`QuadrantState`]; slot 0 also serves item
/// renders. Tables with more than four entries enable diagonal checks.
#[derive(Clone, Debug)]
pub struct BakedCtLayer {
    sprites: Vec<Option<BakedSpriteSupplier>>,
    material: RenderMaterial,
    depth: f32,
    cull_faces: bool,
    interior_border: bool,
    tint_index: i32,
    connector: Connector,
    corners: [FacePos; 4],
    corners_enabled: bool,
}

impl BakedCtLayer {
    pub fn new(
        sprites: Vec<Option<BakedSpriteSupplier>>,
        material: RenderMaterial,
        depth: f32,
        cull_faces: bool,
        interior_border: bool,
        tint_index: i32,
        connector: Connector,
    ) -> Self {
        let corners_enabled = sprites.len() > EDGE_ONLY_TABLE_LEN;
        Self {
            sprites,
            material,
            depth,
            cull_faces,
            interior_border,
            tint_index,
            connector,
            corners: quadrant_rects(depth),
            corners_enabled,
        }
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn corners_enabled(&self) -> bool {
        self.corners_enabled
    }

    pub fn quadrant_rect(&self, q: Quadrant) -> FacePos {
        self.corners[q.index()]
    }

    pub fn sprites(&self) -> &[Option<BakedSpriteSupplier>] {
        &self.sprites
    }

    /// Neighbor test against `offset_pos`. With an interior border, the block
    /// in front of the neighbor (outward along `normal`) must not connect.
    fn connects(
        &self,
        view: &dyn BlockView,
        block: Block,
        pos: BlockPos,
        normal: Face,
        offset_pos: BlockPos,
    ) -> bool {
        let other = view.block_at(offset_pos);
        if !self
            .connector
            .can_connect(view, pos, offset_pos, normal, block, other)
        {
            return false;
        }
        if !self.interior_border {
            return true;
        }
        let out_pos = offset_pos.offset(normal);
        let out = view.block_at(out_pos);
        !self
            .connector
            .can_connect(view, pos, out_pos, normal, block, out)
    }

    /// Quadrant states of face `normal` for `block` at `pos`.
    pub fn face_connections(
        &self,
        view: &dyn BlockView,
        block: Block,
        pos: BlockPos,
        normal: Face,
    ) -> FaceConnections {
        let step = |dir: TexDir| pos.offset(dir.resolve(normal));
        let mut sides = [false; 4];
        for (i, dir) in TexDir::ALL.iter().enumerate() {
            sides[i] = self.connects(view, block, pos, normal, step(*dir));
        }
        let side = |dir: TexDir| match dir {
            TexDir::Up => sides[0],
            TexDir::Down => sides[1],
            TexDir::Left => sides[2],
            TexDir::Right => sides[3],
        };

        let mut states = [QuadrantState::ExteriorCorner; 4];
        for q in Quadrant::ALL {
            let h = side(q.horizontal());
            let v = side(q.vertical());
            let corner = self.corners_enabled && h && v && {
                let diag = step(q.vertical()).offset(q.horizontal().resolve(normal));
                self.connects(view, block, pos, normal, diag)
            };
            states[q.index()] = QuadrantState::resolve(h, v, corner, self.corners_enabled);
        }
        FaceConnections { states }
    }
}

impl BakedModelLayer for BakedCtLayer {
    fn emit_block_quads(
        &self,
        view: &dyn BlockView,
        block: Block,
        pos: BlockPos,
        rng: &mut dyn RngCore,
        sink: &mut dyn QuadSink,
    ) {
        for normal in Face::ALL {
            let connections = self.face_connections(view, block, pos, normal);
            let ctx = SpriteContext {
                view,
                block,
                pos,
                normal,
            };
            for q in Quadrant::ALL {
                let index = connections.state(q).sprite_index();
                let Some(supplier) = self.sprites.get(index).and_then(Option::as_ref) else {
                    continue;
                };
                let Some(sprite) = supplier.block_sprite(&ctx, rng) else {
                    continue;
                };
                let quad = self.corners[q.index()]
                    .to_quad(normal, UvRotation::None, sprite)
                    .with_tint(self.tint_index)
                    .with_color(WHITE)
                    .with_material(self.material)
                    .with_cull_face(self.cull_faces.then_some(normal));
                sink.emit(quad);
            }
        }
    }

    fn connections(
        &self,
        view: &dyn BlockView,
        block: Block,
        pos: BlockPos,
        normal: Face,
    ) -> Option<FaceConnections> {
        Some(self.face_connections(view, block, pos, normal))
    }

    fn emit_item_quads(&self, stack: &ItemStack, rng: &mut dyn RngCore, sink: &mut dyn QuadSink) {
        let sprite = self
            .sprites
            .first()
            .and_then(Option::as_ref)
            .and_then(|s| s.item_sprite(stack, rng));
        if sprite.is_none() {
            return;
        }
        emit_cube(
            sink,
            self.cull_faces,
            self.depth,
            self.material,
            &[sprite; 6],
            &[self.tint_index; 6],
        );
    }
}
