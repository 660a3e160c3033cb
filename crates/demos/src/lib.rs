//! Headless scenarios exercising trellis end to end.

/// Tabbed book built from a description.
pub mod bookgym;
/// Virtualized list scrolling.
pub mod listgym;
/// Timer-driven animation through the frame loop.
pub mod pulse;
