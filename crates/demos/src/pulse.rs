use std::{cell::RefCell, rc::Rc, thread, time::Duration};

use trellis::{
    Clock, Config, Gui, ManualClock, NodeId, SystemClock, Tree, UiSender, Updatable, UpdateCx,
    error::Result,
    geom::Vec2,
    layout::{Dim, Lp},
    widgets::{Blank, Container},
};

/// Grows a bar to `peak` pixels and back, `cycles` times.
struct Pulse {
    /// The bar.
    bar: NodeId,
    /// Current width.
    width: f32,
    /// Pixels per millisecond, signed.
    speed: f32,
    /// Turning point.
    peak: f32,
    /// Cycles left.
    cycles: u32,
    /// UI queue handle.
    ui: UiSender,
}

impl Updatable for Pulse {
    fn update(&mut self, dt_ms: u32, cx: &mut UpdateCx<'_>) {
        self.width += self.speed * dt_ms as f32;
        if self.width >= self.peak {
            self.width = self.peak;
            self.speed = -self.speed;
        } else if self.width <= 0.0 {
            self.width = 0.0;
            self.speed = -self.speed;
            self.cycles = self.cycles.saturating_sub(1);
            if self.cycles == 0 {
                cx.stop_self();
            }
        }
        let (bar, w) = (self.bar, self.width.round());
        self.ui
            .run_on_ui(move |t: &mut Tree| t.set_lp(bar, Lp::min().dx(Dim::px(w)).dy(Dim::Max)))
            .ok();
    }
}

/// Run the pulse until it stops, returning the bar width after each frame.
/// With `realtime` the loop sleeps for the hinted time on the system clock;
/// otherwise a manual clock is advanced by the hint.
pub fn run(cycles: u32, period_ms: u32, realtime: bool) -> Result<Vec<f32>> {
    let manual = ManualClock::new(0);
    let clock: Rc<dyn Clock> = if realtime {
        Rc::new(SystemClock::new())
    } else {
        Rc::new(manual.clone())
    };
    let mut gui = Gui::with_clock(Config::default(), clock);
    let root = gui.tree.root_id();
    let row = gui.tree.add_child(root, Container::row(), Lp::fill())?;
    let bar = gui.tree.add_child(row, Blank, Lp::min().dy(Dim::Max))?;
    gui.set_viewport(Vec2::new(200.0, 20.0))?;

    let pulse = Rc::new(RefCell::new(Pulse {
        bar: bar.id(),
        width: 0.0,
        speed: 0.5,
        peak: 100.0,
        cycles,
        ui: gui.sender(),
    }));
    gui.updater.start(&pulse, period_ms)?;

    let mut widths = Vec::new();
    while let Some(ms) = gui.frame()? {
        widths.push(gui.tree.rect(bar)?.size.x);
        if realtime {
            thread::sleep(Duration::from_millis(u64::from(ms)));
        } else {
            manual.advance(ms);
        }
    }
    widths.push(gui.tree.rect(bar)?.size.x);
    Ok(widths)
}
