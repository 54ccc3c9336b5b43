use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single strip run.
#[derive(Debug, Error)]
pub enum StripError {
    /// Input missing, unreadable, or not a recognized image format.
    #[error("failed to load image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Output could not be written (missing directory, permissions, disk full).
    #[error("failed to save PNG {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unexpected failure while processing pixels: {0}")]
    Unexpected(String),
}
