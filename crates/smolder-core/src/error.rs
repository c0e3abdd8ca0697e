//! Error types for grid construction.

use std::error::Error;
use std::fmt;

/// Errors from [`Grid`](crate::Grid) construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Width or height is zero.
    EmptyGrid,
    /// The supplied cell buffer does not match `width * height`.
    CellCountMismatch {
        /// `width * height` of the requested grid.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid dimensions must be nonzero"),
            Self::CellCountMismatch { expected, actual } => {
                write!(f, "expected {expected} cells, got {actual}")
            }
        }
    }
}

impl Error for GridError {}
