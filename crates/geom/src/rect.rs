use super::{Sides, Vec2};

/// An axis-aligned rectangle: a position and a size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub pos: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Rect {
    /// Construct a rectangle from its corner and dimensions.
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// A zero-sized rectangle at the origin.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge.
    pub fn x2(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Bottom edge.
    pub fn y2(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Does the rectangle contain the point? Right and bottom edges are exclusive.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.pos.x && p.x < self.x2() && p.y >= self.pos.y && p.y < self.y2()
    }

    /// The overlapping area of two rectangles, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x1 = self.pos.x.max(other.pos.x);
        let y1 = self.pos.y.max(other.pos.y);
        let x2 = self.x2().min(other.x2());
        let y2 = self.y2().min(other.y2());
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Self::new(x1, y1, x2 - x1, y2 - y1))
    }

    /// The same rectangle moved by an offset.
    pub fn shift(&self, by: Vec2) -> Self {
        Self {
            pos: self.pos + by,
            size: self.size,
        }
    }

    /// Shrink by per-side insets, clamping the size at zero.
    pub fn inset(&self, s: Sides) -> Self {
        Self {
            pos: self.pos + Vec2::new(s.left, s.top),
            size: (self.size - Vec2::new(s.horizontal(), s.vertical())).clamp_bottom(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(a.intersect(&Rect::new(10.0, 0.0, 1.0, 1.0)), None);
    }

    #[test]
    fn contains_and_inset() {
        let r = Rect::new(2.0, 2.0, 4.0, 4.0);
        assert!(r.contains(Vec2::new(2.0, 5.9)));
        assert!(!r.contains(Vec2::new(6.0, 3.0)));
        assert_eq!(r.inset(Sides::splat(3.0)).size, Vec2::zero());
    }
}
