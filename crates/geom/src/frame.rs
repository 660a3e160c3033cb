use super::{Rect, Sides};

/// The nine regions of a rectangle split by per-side borders: four fixed
/// corners, four stretchable edges and a stretchable middle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// The top edge, not including corners
    pub top: Rect,
    /// The bottom edge, not including corners
    pub bottom: Rect,
    /// The left edge, not including corners
    pub left: Rect,
    /// The right edge, not including corners
    pub right: Rect,
    /// The top left corner
    pub topleft: Rect,
    /// The top right corner
    pub topright: Rect,
    /// The bottom left corner
    pub bottomleft: Rect,
    /// The bottom right corner
    pub bottomright: Rect,
    /// The stretchable middle
    pub middle: Rect,
    /// The original outer rect
    outer_rect: Rect,
}

impl Default for Frame {
    fn default() -> Self {
        Self::zero()
    }
}

impl Frame {
    /// Split a rectangle by the given borders. If the rect is too small to
    /// hold the borders, every region is zero-sized and only the outer rect is
    /// kept.
    pub fn new(rect: Rect, borders: Sides) -> Self {
        let w = rect.size.x;
        let h = rect.size.y;
        if w < borders.horizontal() || h < borders.vertical() {
            let mut f = Self::zero();
            f.outer_rect = rect;
            return f;
        }
        let x = rect.pos.x;
        let y = rect.pos.y;
        let (l, t, r, b) = (borders.left, borders.top, borders.right, borders.bottom);
        let mw = w - l - r;
        let mh = h - t - b;
        Self {
            top: Rect::new(x + l, y, mw, t),
            bottom: Rect::new(x + l, y + h - b, mw, b),
            left: Rect::new(x, y + t, l, mh),
            right: Rect::new(x + w - r, y + t, r, mh),
            topleft: Rect::new(x, y, l, t),
            topright: Rect::new(x + w - r, y, r, t),
            bottomleft: Rect::new(x, y + h - b, l, b),
            bottomright: Rect::new(x + w - r, y + h - b, r, b),
            middle: Rect::new(x + l, y + t, mw, mh),
            outer_rect: rect,
        }
    }

    /// Get the outer rect of the frame (the original rect passed to Frame::new())
    pub fn outer(&self) -> Rect {
        self.outer_rect
    }

    /// A frame with all regions zero-sized.
    pub fn zero() -> Self {
        Self {
            top: Rect::zero(),
            bottom: Rect::zero(),
            left: Rect::zero(),
            right: Rect::zero(),
            topleft: Rect::zero(),
            topright: Rect::zero(),
            bottomleft: Rect::zero(),
            bottomright: Rect::zero(),
            middle: Rect::zero(),
            outer_rect: Rect::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tframe() {
        let r = Rect::new(10.0, 10.0, 10.0, 10.0);
        let f = Frame::new(r, Sides::new(1.0, 2.0, 1.0, 2.0));
        assert_eq!(f.top, Rect::new(11.0, 10.0, 8.0, 2.0));
        assert_eq!(f.bottom, Rect::new(11.0, 18.0, 8.0, 2.0));
        assert_eq!(f.left, Rect::new(10.0, 12.0, 1.0, 6.0));
        assert_eq!(f.right, Rect::new(19.0, 12.0, 1.0, 6.0));
        assert_eq!(f.bottomright, Rect::new(19.0, 18.0, 1.0, 2.0));
        assert_eq!(f.middle, Rect::new(11.0, 12.0, 8.0, 6.0));
        assert_eq!(f.outer(), r);
    }

    #[test]
    fn too_small() {
        let r = Rect::new(0.0, 0.0, 3.0, 3.0);
        let f = Frame::new(r, Sides::splat(2.0));
        assert_eq!(f.outer(), r);
        assert_eq!(f.middle, Rect::zero());
    }
}
