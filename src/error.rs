//! Error types for overlay geometry and picture creation.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the pure geometry helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A corner index outside `0..4` was used to look up a corner.
    #[error("invalid corner index {0} (expected 0..=3)")]
    InvalidCornerIndex(usize),
    /// A line projection was requested for coincident endpoints.
    #[error("segment endpoints coincide")]
    DegenerateSegment,
}

/// Failures while turning a picked file into picture metadata.
#[derive(Debug, Error)]
pub enum ImageInputError {
    #[error("unsupported image type: {0}")]
    Unsupported(PathBuf),
    #[error("failed to read image dimensions from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
