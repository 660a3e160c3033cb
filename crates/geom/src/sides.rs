use super::{Error, Result};

/// A quantity for each side of a rectangle: borders, paddings, insets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sides {
    /// Left side.
    pub left: f32,
    /// Top side.
    pub top: f32,
    /// Right side.
    pub right: f32,
    /// Bottom side.
    pub bottom: f32,
}

impl Sides {
    /// Construct sides in left, top, right, bottom order.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Construct sides, rejecting negative or non-finite values.
    pub fn try_new(left: f32, top: f32, right: f32, bottom: f32) -> Result<Self> {
        let s = Self::new(left, top, right, bottom);
        if [left, top, right, bottom].iter().all(|v| v.is_finite() && *v >= 0.0) {
            Ok(s)
        } else {
            Err(Error::Invalid(format!("sides {s:?}")))
        }
    }

    /// The same value on every side.
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Left plus right.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top plus bottom.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_sides() {
        assert_eq!(Sides::try_new(1.0, 2.0, 3.0, 4.0), Ok(Sides::new(1.0, 2.0, 3.0, 4.0)));
        assert!(Sides::try_new(-1.0, 0.0, 0.0, 0.0).is_err());
        assert!(Sides::try_new(0.0, f32::NAN, 0.0, 0.0).is_err());
        assert_eq!(Sides::splat(2.0).horizontal(), 4.0);
    }
}
