use crate::Vec3;

/// Axis-aligned face of a unit block, named by its outward normal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    /// All six faces in index order.
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a face index `[0..6)` back into a `Face` value.
    /// Falls back to `PosY` for out-of-range indices.
    #[inline]
    pub fn from_index(i: usize) -> Face {
        match i {
            0 => Face::PosY,
            1 => Face::NegY,
            2 => Face::PosX,
            3 => Face::NegX,
            4 => Face::PosZ,
            5 => Face::NegZ,
            _ => Face::PosY,
        }
    }

    #[inline]
    pub fn opposite(self) -> Face {
        match self {
            Face::PosY => Face::NegY,
            Face::NegY => Face::PosY,
            Face::PosX => Face::NegX,
            Face::NegX => Face::PosX,
            Face::PosZ => Face::NegZ,
            Face::NegZ => Face::PosZ,
        }
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
        }
    }

    /// Returns the unit-normal vector for this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        let (dx, dy, dz) = self.delta();
        Vec3::new(dx as f32, dy as f32, dz as f32)
    }

    /// Lowercase name used in logs and config files (`up`, `down`, `east`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Face::PosY => "up",
            Face::NegY => "down",
            Face::PosX => "east",
            Face::NegX => "west",
            Face::PosZ => "south",
            Face::NegZ => "north",
        }
    }

    pub fn from_name(s: &str) -> Option<Face> {
        Face::ALL.into_iter().find(|f| f.name() == s)
    }
}

impl core::fmt::Display for Face {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
