//! Error types for raster decode and encode.

use std::fmt;
use std::path::PathBuf;

/// Errors from reading or writing raster images.
#[derive(Debug)]
pub enum RasterError {
    /// The input image could not be opened or decoded.
    Open {
        /// Path of the offending file.
        path: PathBuf,
        /// The underlying image error.
        source: image::ImageError,
    },
    /// The output image could not be encoded or written.
    Save {
        /// Path of the offending file.
        path: PathBuf,
        /// The underlying image error.
        source: image::ImageError,
    },
    /// The input image has zero pixels.
    EmptyImage {
        /// Path of the offending file, when known.
        path: PathBuf,
    },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "{} - {source}", path.display())
            }
            Self::Save { path, source } => {
                write!(f, "{} - {source}", path.display())
            }
            Self::EmptyImage { path } => {
                write!(f, "{} - image has no pixels", path.display())
            }
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Save { source, .. } => Some(source),
            Self::EmptyImage { .. } => None,
        }
    }
}
