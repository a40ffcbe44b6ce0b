//! Migration engine error types.

use thiserror::Error;

use crate::manifest::ManifestError;

/// Coarse error kinds surfaced at the outer API boundary.
///
/// The caller owns the mapping to transport status codes; the engine only
/// distinguishes policy failures from infrastructure failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A migration-policy failure the caller should surface verbatim so
    /// a human can correct and resubmit.
    MigrationIssues,
    /// Infrastructure failure in the manifest store or persistence client.
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MigrationIssues => write!(f, "MIGRATION_ISSUES"),
            ErrorKind::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Errors raised by the migration engine.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// The manifest on disk was captured for a different microservice.
    #[error("manifest belongs to microservice {manifest_service_id}, not {service_id}")]
    ManifestMismatch {
        /// Service id recorded in the manifest.
        manifest_service_id: String,
        /// Service id of the current run.
        service_id: String,
    },

    /// A fixable issue arrived without the field's metadata record id.
    #[error("fixable issue for {model}.{field} is missing its field id")]
    MissingFieldId {
        /// Model name.
        model: String,
        /// Field name.
        field: String,
    },

    /// The manifest could not be loaded.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The injected persistence client failed.
    #[error("persistence error: {message}")]
    Persistence {
        /// Client diagnostic.
        message: String,
    },
}

impl MigrationError {
    /// The coarse kind for boundary mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MigrationError::ManifestMismatch { .. } | MigrationError::MissingFieldId { .. } => {
                ErrorKind::MigrationIssues
            }
            MigrationError::Manifest(_) | MigrationError::Persistence { .. } => ErrorKind::Internal,
        }
    }
}
