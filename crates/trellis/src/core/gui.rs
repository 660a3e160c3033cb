use std::rc::Rc;

use tracing::debug;

use crate::{
    core::{
        clock::{Clock, SystemClock},
        config::Config,
        handoff::{UiQueue, UiSender},
        tree::Tree,
        updater::Updater,
    },
    error::Result,
    geom::Vec2,
};

/// The host context: the widget tree, the scheduler, the UI task queue and
/// the configuration they were built from.
///
/// A host calls [`Gui::frame`] once per iteration of its loop, then renders
/// the resolved rectangles and sleeps for at most the returned hint.
pub struct Gui {
    /// Widget tree.
    pub tree: Tree,
    /// Timer scheduler.
    pub updater: Updater,
    /// Tasks posted from other threads.
    queue: UiQueue,
    /// Configuration.
    config: Config,
}

impl Gui {
    /// A host on the system clock.
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Rc::new(SystemClock::new()))
    }

    /// A host on a custom clock.
    pub fn with_clock(config: Config, clock: Rc<dyn Clock>) -> Self {
        Self {
            tree: Tree::with_units(config.units),
            updater: Updater::with_min_sleep(clock, config.updater.min_sleep_ms),
            queue: UiQueue::new(),
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A handle for posting work to the UI thread.
    pub fn sender(&self) -> UiSender {
        self.queue.sender()
    }

    /// Resize the root to the viewport.
    pub fn set_viewport(&mut self, size: Vec2) -> Result<()> {
        debug!(?size, "viewport");
        self.tree.set_viewport(size)
    }

    /// Run one iteration: posted tasks, due timers, then layout of whatever
    /// they invalidated. Returns how long the host may sleep, or `None` if
    /// no timer is scheduled. Time spent on tasks and layout after the timers
    /// fired is taken off the hint.
    pub fn frame(&mut self) -> Result<Option<u32>> {
        self.queue.drain(&mut self.tree)?;
        let sleep = self.updater.update();
        let fired_at = self.updater.now();
        self.queue.drain(&mut self.tree)?;
        self.tree.lay_out_dirty()?;
        let spent = self.updater.now().wrapping_sub(fired_at);
        Ok(sleep.map(|s| shorten(s, spent, self.config.updater.min_sleep_ms)))
    }
}

/// Take `spent` off a sleep hint. A hint that is still positive never drops
/// below `min_sleep`.
fn shorten(sleep: u32, spent: u32, min_sleep: u32) -> u32 {
    if spent >= sleep {
        0
    } else {
        (sleep - spent).max(min_sleep)
    }
}
