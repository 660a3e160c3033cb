//! Geometry primitives used across trellis.
//!
//! Everything here works in floating point "real" pixels. Layout code rounds
//! to integer pixels where it places children; the types themselves never do.

/// Error types for geometry operations.
mod error;
/// Nine-patch region splitting.
mod frame;
/// Rectangle operations.
mod rect;
/// Per-side quantities such as borders and paddings.
mod sides;
/// Two-component vector.
mod vec2;

pub use error::{Error, Result};
pub use frame::Frame;
pub use rect::Rect;
pub use sides::Sides;
pub use vec2::Vec2;

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const ALL: [Self; 2] = [Self::X, Self::Y];

    /// The perpendicular axis.
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Index of the axis in `[x, y]` storage.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }
}
