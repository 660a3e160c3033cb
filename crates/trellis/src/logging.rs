//! Log output for hosts, demos and tests.

use std::io;

use tracing::Level;
use tracing_subscriber::fmt;

use crate::error::{Error, Result};

/// Install a compact stderr subscriber showing events at `level` and above.
/// Fails if a global subscriber is already set.
pub fn init(level: Level) -> Result<()> {
    let format = fmt::format()
        .with_level(true)
        .with_target(true)
        .without_time()
        .compact();
    fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .event_format(format)
        .try_init()
        .map_err(|e| Error::Internal(format!("logging: {e}")))
}

/// Like [`init`], but writes through the test harness's captured output and
/// ignores an already installed subscriber.
pub fn init_for_tests(level: Level) {
    fmt()
        .with_max_level(level)
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}
