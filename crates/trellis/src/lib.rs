//! Trellis: a retained-mode widget tree core.
//!
//! Trellis keeps a tree of widgets in an arena, negotiates their sizes with a
//! two-pass measure/lay-out protocol, and drives timed updates from a single
//! scheduler. Rendering, input and windowing are left to the host, which
//! walks the resolved rectangles after each frame.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Gui`] - Host context: the tree, the scheduler and the UI task queue
//! - [`Tree`] - The widget arena and layout driver
//! - [`Widget`] - The trait implemented by all widgets
//! - [`Inflater`] - Builds widget subtrees from description data
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Vec2, Rect, Sides, Frame)
//! - [`layout`] - Layout parameters and container strategies
//! - [`widgets`] - Built-in widget implementations

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

// Public modules
pub mod layout;
pub mod logging;
pub mod widget;
pub mod widgets;

pub use geom;

#[cfg(any(test, feature = "testing"))]
pub use core::testing;
pub use core::{
    Clock, Config, Desc, Gui, Inflater, LayoutCx, LpDesc, ManualClock, MeasureCx, Node, NodeId,
    Props, SystemClock, Target, Tree, TypedId, UiQueue, UiSender, UiTask, Updatable, UpdateCx,
    Updater, UpdaterConfig,
};
pub use core::{clock, config, dump, error, handoff, inflate, updater};

pub use error::{Error, Result};
pub use widget::{Role, RoleKind, Widget};
