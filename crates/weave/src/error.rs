//! Manifest loading errors

use std::path::PathBuf;

/// A declaration manifest could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The file could not be read.
    #[error("failed to read manifest '{}': {source}", path.display())]
    Io {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file extension is neither `.json` nor `.toml`.
    #[error("unsupported manifest format '{}': expected .json or .toml", path.display())]
    UnsupportedFormat {
        /// Manifest path.
        path: PathBuf,
    },

    /// Invalid JSON manifest.
    #[error("invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid TOML manifest.
    #[error("invalid TOML manifest: {0}")]
    Toml(#[from] toml::de::Error),
}
