use std::{cell::Cell, rc::Rc, time::Instant};

/// Source of monotonic millisecond ticks. Values wrap around at `u32::MAX`.
pub trait Clock {
    /// Current tick count in milliseconds.
    fn now_ms(&self) -> u32;
}

/// Milliseconds elapsed since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    /// Reference point.
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// A clock starting at zero now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u32 {
        // Truncation is the wrap-around.
        self.start.elapsed().as_millis() as u32
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    /// Current time.
    now: Rc<Cell<u32>>,
}

impl ManualClock {
    /// A clock at `now`.
    pub fn new(now: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    /// Jump to a time. Jumping backwards simulates a wrap-around.
    pub fn set(&self, now: u32) {
        self.now.set(now);
    }

    /// Move forward by `ms`, wrapping.
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}
