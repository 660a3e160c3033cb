use std::{io, result::Result as StdResult, sync::mpsc};

use thiserror::Error;

use crate::{core::id::NodeId, geom};

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
///
/// Most variants are contract violations: a malformed layout, a child the
/// parent cannot hold, a double start. They abort the call that raised them
/// and are meant to surface a bug in the calling code.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    #[error("layout: {0}")]
    /// Layout parameters a container cannot honour.
    Layout(String),
    #[error("structure: {0}")]
    /// A child of the wrong kind, or a widget where a specific one was expected.
    Structure(String),
    #[error("updatable is already being updated")]
    /// `start()` on a target that is already scheduled.
    AlreadyUpdating,
    #[error("page index {index} out of range for a book of {len} pages")]
    /// Navigation to a page that does not exist.
    PageIndex {
        /// Requested index.
        index: usize,
        /// Number of pages in the book.
        len: usize,
    },
    #[error("node not found: {0:?}")]
    /// A handle that no longer resolves.
    NodeNotFound(NodeId),
    #[error("node already attached: {0:?}")]
    /// Attaching a node that already has a parent.
    AlreadyAttached(NodeId),
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    /// Attaching a node under itself or one of its descendants.
    WouldCreateCycle {
        /// Prospective parent.
        parent: NodeId,
        /// Prospective child.
        child: NodeId,
    },
    #[error("widget is already borrowed: {0:?}")]
    /// A widget was reached while its own hook is running.
    ReentrantWidgetBorrow(NodeId),
    #[error("invalid operation: {0}")]
    /// Operation not permitted in the current state.
    InvalidOperation(String),
    #[error("inflate: {0}")]
    /// Description tree could not be turned into widgets.
    Inflate(String),
    #[error("config: {0}")]
    /// Invalid configuration.
    Config(String),
    #[error("runloop: {0}")]
    /// UI thread hand-off failure.
    RunLoop(String),
    #[error("geometry: {0}")]
    /// Geometry failure.
    Geometry(String),
    #[error("internal: {0}")]
    /// Internal error.
    Internal(String),
}

impl<T> From<mpsc::SendError<T>> for Error {
    fn from(e: mpsc::SendError<T>) -> Self {
        Self::RunLoop(e.to_string())
    }
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Internal(e.to_string())
    }
}
