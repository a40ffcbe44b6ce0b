//! Manifest store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or writing manifests.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Filesystem error.
    #[error("manifest io error: {0}")]
    Io(#[from] std::io::Error),

    /// The file exists but does not parse as a manifest.
    #[error("malformed manifest at {path}: {message}")]
    Malformed {
        /// Path of the offending file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// Serialization error.
    #[error("manifest serialization error: {0}")]
    Serialization(String),

    /// The manifest was written by a newer format version.
    #[error("unsupported manifest version {found} (latest supported is {supported})")]
    UnsupportedVersion {
        /// Version recorded in the file.
        found: u32,
        /// Latest version this build understands.
        supported: u32,
    },
}
