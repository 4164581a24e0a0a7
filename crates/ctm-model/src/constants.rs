//! Shared constants for ctm-model.

/// Deepest inset, in block units, at which CT quadrants are rendered.
pub const MAX_FACE_DEPTH: f32 = 0.5;

/// Sprite tables longer than this carry dedicated fully-connected sprites,
/// which turns on diagonal (full corner) detection.
pub const EDGE_ONLY_TABLE_LEN: usize = 4;

/// Tint index meaning "no tint".
pub const NO_TINT: i32 = -1;

// Colors
pub const OPAQUE_ALPHA: u8 = 255;
pub const WHITE: [u8; 4] = [255, 255, 255, OPAQUE_ALPHA];
