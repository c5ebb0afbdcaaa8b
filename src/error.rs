use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while saving or loading the canvas
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write image {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unsupported image format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Result type for file operations
pub type SketchResult<T> = Result<T, SketchError>;
