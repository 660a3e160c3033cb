use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Sub};

use super::Axis;

/// A pair of real values, used for positions, sizes and measure quota.
///
/// In a quotum a negative component means "unconstrained on this axis".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// Construct a vector from components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The zero vector.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// A vector with both components set to `v`.
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v)
    }

    /// Build a vector from a value on `axis` and a value on the other axis.
    pub fn from_axes(axis: Axis, along: f32, across: f32) -> Self {
        match axis {
            Axis::X => Self::new(along, across),
            Axis::Y => Self::new(across, along),
        }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Component-wise minimum.
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Clamp both components from below at zero.
    pub fn clamp_bottom(self) -> Self {
        self.max(Self::zero())
    }

    /// True if neither component is negative.
    pub fn is_positive_or_zero(&self) -> bool {
        self.x >= 0.0 && self.y >= 0.0
    }

    /// Round both components to the nearest integer.
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }
}

impl Index<Axis> for Vec2 {
    type Output = f32;

    fn index(&self, axis: Axis) -> &f32 {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

impl IndexMut<Axis> for Vec2 {
    fn index_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

impl From<(f32, f32)> for Vec2 {
    #[inline]
    fn from(v: (f32, f32)) -> Self {
        Self::new(v.0, v.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes() {
        let mut v = Vec2::from_axes(Axis::Y, 3.0, 4.0);
        assert_eq!(v, Vec2::new(4.0, 3.0));
        v[Axis::X] = 10.0;
        assert_eq!(v[Axis::X], 10.0);
        assert_eq!(v[Axis::Y], 3.0);
    }

    #[test]
    fn clamp_and_round() {
        assert_eq!(Vec2::new(-1.0, 2.0).clamp_bottom(), Vec2::new(0.0, 2.0));
        assert!(!Vec2::new(-1.0, 2.0).is_positive_or_zero());
        assert_eq!(Vec2::new(1.4, 1.6).round(), Vec2::new(1.0, 2.0));
    }
}
