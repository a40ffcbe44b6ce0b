//! Remodel Core - model catalog, generation manifests, and the migration
//! risk engine.
//!
//! This crate decides whether regenerating a microservice's backend from
//! its current model definitions is safe, given the shapes recorded at
//! the last successful generation.

pub mod catalog;
pub mod manifest;
pub mod migration;

pub use catalog::{FieldDef, FieldType, Microservice, ModelDef};
pub use manifest::{
    generate_model_checksum, FieldSnapshot, FileManifestStore, Manifest, ManifestError,
    ManifestStore, ModelSnapshot, MANIFEST_VERSION,
};
pub use migration::{
    classify_change, conversion_risk, diff_against, expected_confirmation, is_conversion_safe,
    validate_explicit_confirmations, AppliedFix, ConversionRisk, DiffEngine, ErrorKind,
    FieldMetadataStore, FieldMetadataTx, FieldRecord, FixApplier, FixKind, FixOutcome,
    MemoryFieldStore, MigrationError, MigrationIssues, MigrationReport, MissingConfirmation,
    RiskCategory,
};
