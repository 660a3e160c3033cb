//! Integration tests for the frame loop: timers, UI hand-off and relayout.

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc, thread};

    use trellis::{
        Config, Gui, ManualClock, NodeId, Tree, Updatable, UpdateCx, UiSender,
        error::{Error, Result},
        geom::Vec2,
        layout::{Dim, Lp},
        widgets::{Blank, Container, MinProxy},
    };

    /// Slides a node to the right by one pixel per elapsed millisecond and
    /// stops itself once it reaches `until`.
    struct Slide {
        /// Node being moved.
        node: NodeId,
        /// Current x.
        x: f32,
        /// Final x.
        until: f32,
        /// Elapsed times seen.
        ticks: Vec<u32>,
        /// UI queue handle.
        ui: UiSender,
    }

    impl Updatable for Slide {
        fn update(&mut self, dt_ms: u32, cx: &mut UpdateCx<'_>) {
            self.ticks.push(dt_ms);
            self.x = (self.x + dt_ms as f32).min(self.until);
            if self.x >= self.until {
                cx.stop_self();
            }
            let (node, x) = (self.node, self.x);
            self.ui
                .run_on_ui(move |t: &mut Tree| t.move_to(node, Vec2::new(x, 0.0)))
                .ok();
        }
    }

    fn gui() -> (Gui, ManualClock) {
        let clock = ManualClock::new(1_000);
        (Gui::with_clock(Config::default(), Rc::new(clock.clone())), clock)
    }

    #[test]
    fn animation_runs_to_completion() -> Result<()> {
        let (mut gui, clock) = gui();
        let root = gui.tree.root_id();
        let area = gui.tree.add_child(root, Container::trivial(), Lp::fill())?;
        let dot = gui.tree.add_child(area, Blank, Lp::px(4.0, 4.0))?;
        gui.set_viewport(Vec2::new(100.0, 100.0))?;

        let slide = Rc::new(RefCell::new(Slide {
            node: dot.id(),
            x: 0.0,
            until: 40.0,
            ticks: Vec::new(),
            ui: gui.sender(),
        }));
        gui.updater.start(&slide, 16)?;
        assert_eq!(
            gui.updater.start(&slide, 16),
            Err(Error::AlreadyUpdating)
        );

        let mut hint = gui.frame()?;
        assert_eq!(hint, Some(16));
        while let Some(ms) = hint {
            clock.advance(ms);
            hint = gui.frame()?;
        }
        assert_eq!(slide.borrow().ticks, vec![16, 16, 16]);
        assert!(!gui.updater.is_updating(&slide));
        assert_eq!(gui.tree.rect(dot)?.pos, Vec2::new(40.0, 0.0));
        assert_eq!(gui.tree.rect(dot)?.size, Vec2::new(4.0, 4.0));
        Ok(())
    }

    #[test]
    fn dropped_animation_is_forgotten() -> Result<()> {
        let (mut gui, clock) = gui();
        let root = gui.tree.root_id();
        let dot = gui.tree.add_child(root, Blank, Lp::px(1.0, 1.0))?;
        let slide = Rc::new(RefCell::new(Slide {
            node: dot.id(),
            x: 0.0,
            until: 1_000.0,
            ticks: Vec::new(),
            ui: gui.sender(),
        }));
        gui.updater.start(&slide, 10)?;
        gui.frame()?;
        drop(slide);
        clock.advance(10);
        assert_eq!(gui.frame()?, None);
        assert!(gui.updater.is_empty());
        Ok(())
    }

    #[test]
    fn tasks_from_worker_threads_relayout() -> Result<()> {
        let (mut gui, _clock) = gui();
        let root = gui.tree.root_id();
        let col = gui.tree.add_child(root, Container::column(), Lp::fill())?.id();
        gui.set_viewport(Vec2::new(50.0, 50.0))?;
        let ui = gui.sender();
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let ui = ui.clone();
                thread::spawn(move || {
                    ui.run_on_ui(move |t: &mut Tree| {
                        t.add_child(col, Blank, Lp::min().dx(Dim::Max).dy(Dim::px(5.0)))?;
                        Ok(())
                    })
                })
            })
            .collect();
        for w in workers {
            w.join()
                .map_err(|_| Error::Internal("worker panicked".into()))??;
        }
        assert_eq!(gui.frame()?, None);
        let rows = gui.tree.children_of(col).to_vec();
        assert_eq!(rows.len(), 4);
        let last = gui.tree.rect(rows[3])?;
        assert_eq!(last.pos, Vec2::new(0.0, 15.0));
        assert_eq!(last.size, Vec2::new(50.0, 5.0));
        Ok(())
    }

    #[test]
    fn min_proxy_follows_target() -> Result<()> {
        let (mut gui, _clock) = gui();
        let tree = &mut gui.tree;
        let root = tree.root_id();
        let panel = tree.add_child(root, Container::row(), Lp::fill())?;
        tree.set_name(panel, "panel")?;
        let target = tree.add_child(panel, Container::column(), Lp::min())?;
        tree.set_name(target, "ok")?;
        tree.add_child(target, Blank, Lp::px(30.0, 12.0))?;
        let proxy = tree.add_child(panel, MinProxy::new(["ok"]).with_root("panel"), Lp::min())?;
        let lost = tree.add_child(panel, MinProxy::new(["nope"]), Lp::min())?;

        assert_eq!(tree.measure(proxy, Vec2::splat(-1.0))?, Vec2::new(30.0, 12.0));
        tree.add_child(target, Blank, Lp::px(10.0, 3.0))?;
        assert_eq!(tree.measure(proxy, Vec2::splat(-1.0))?, Vec2::new(30.0, 15.0));
        assert!(matches!(
            tree.measure(lost, Vec2::splat(-1.0)),
            Err(Error::Structure(_))
        ));
        Ok(())
    }
}
