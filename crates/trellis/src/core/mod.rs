//! Core types: the node arena, layout contexts, scheduling and host glue.

/// Clock sources for the scheduler.
pub mod clock;
/// Host configuration.
pub mod config;
/// Contexts handed to widget hooks.
pub mod context;
/// Debug dump utilities.
pub mod dump;
/// Core error types.
pub mod error;
/// Host context driving one frame at a time.
pub mod gui;
/// Cross-thread hand-off to the UI thread.
pub mod handoff;
/// Node ID types.
pub mod id;
/// Widget trees from description data.
pub mod inflate;
/// Node data stored in the arena.
pub mod node;
/// Testing utilities.
#[cfg(any(test, feature = "testing"))]
pub mod testing;
/// The widget tree arena and layout driver.
pub mod tree;
/// Timer-driven update scheduling.
pub mod updater;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, UpdaterConfig};
pub use context::{LayoutCx, MeasureCx};
pub use gui::Gui;
pub use handoff::{UiQueue, UiSender, UiTask};
pub use id::{NodeId, TypedId};
pub use inflate::{Desc, Inflater, LpDesc, Props};
pub use node::Node;
pub use tree::Tree;
pub use updater::{Target, Updatable, UpdateCx, Updater};
