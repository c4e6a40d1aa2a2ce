//! Error types for image loading, transforms and persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while touching up an asset.
#[derive(Debug, Error)]
pub enum TouchupError {
    #[error("failed to decode `{path}`")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode `{path}` as PNG")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error when writing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid crop rectangle: {0}")]
    InvalidRect(String),

    #[error("icon name `{0}` is listed more than once")]
    DuplicateIcon(String),

    // NOTE: only raised when the caller did not opt in with `--in-place`
    #[error("refusing to overwrite input `{0}` (pass --in-place to allow)")]
    WouldOverwrite(PathBuf),
}
