use std::{error::Error as StdError, fmt, result::Result as StdResult};

/// Geometry error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A quantity that must be finite and non-negative was not.
    Invalid(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(s) => write!(f, "invalid geometry: {s}"),
        }
    }
}

impl StdError for Error {}

/// Result alias for geometry operations.
pub type Result<T> = StdResult<T, Error>;
