//! Widgets and helpers for tests.

use std::{cell::RefCell, rc::Rc};

pub use crate::core::clock::ManualClock;
use crate::{
    core::context::{LayoutCx, MeasureCx},
    error::Result,
    geom::{Axis, Vec2},
    widget::Widget,
};

/// Natural size on unconstrained axes, the quotum on constrained ones.
fn leaf_measure(natural: Vec2, quotum: Vec2) -> Vec2 {
    let mut out = natural;
    for axis in Axis::ALL {
        if quotum[axis] >= 0.0 {
            out[axis] = quotum[axis];
        }
    }
    out
}

/// A leaf with a fixed natural size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leaf {
    /// Natural size.
    pub size: Vec2,
}

impl Leaf {
    /// A leaf that wants `w` by `h`.
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            size: Vec2::new(w, h),
        }
    }
}

impl Widget for Leaf {
    fn measure(&self, quotum: Vec2, _cx: &MeasureCx<'_>) -> Result<Vec2> {
        Ok(leaf_measure(self.size, quotum))
    }
}

/// Hook calls recorded by a [`Probe`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProbeLog {
    /// Number of `lay_out` calls.
    pub layouts: usize,
    /// Sizes passed to `on_resize`.
    pub resizes: Vec<Vec2>,
    /// Number of `on_show` calls.
    pub shows: usize,
    /// Number of `on_hide` calls.
    pub hides: usize,
    /// Values passed to `on_enable_change`.
    pub enabled: Vec<bool>,
}

/// A leaf that records every hook call into a shared log.
#[derive(Debug)]
pub struct Probe {
    /// Natural size.
    size: Vec2,
    /// Shared log.
    log: Rc<RefCell<ProbeLog>>,
}

impl Probe {
    /// A zero-sized probe and its log.
    pub fn new() -> (Self, Rc<RefCell<ProbeLog>>) {
        Self::sized(0.0, 0.0)
    }

    /// A probe with a natural size, and its log.
    pub fn sized(w: f32, h: f32) -> (Self, Rc<RefCell<ProbeLog>>) {
        let log = Rc::new(RefCell::new(ProbeLog::default()));
        (
            Self {
                size: Vec2::new(w, h),
                log: log.clone(),
            },
            log,
        )
    }
}

impl Widget for Probe {
    fn measure(&self, quotum: Vec2, _cx: &MeasureCx<'_>) -> Result<Vec2> {
        Ok(leaf_measure(self.size, quotum))
    }

    fn lay_out(&mut self, _cx: &mut LayoutCx<'_>) -> Result<()> {
        self.log.borrow_mut().layouts += 1;
        Ok(())
    }

    fn on_resize(&mut self, size: Vec2) {
        self.log.borrow_mut().resizes.push(size);
    }

    fn on_show(&mut self) {
        self.log.borrow_mut().shows += 1;
    }

    fn on_hide(&mut self) {
        self.log.borrow_mut().hides += 1;
    }

    fn on_enable_change(&mut self, enabled: bool) {
        self.log.borrow_mut().enabled.push(enabled);
    }
}
