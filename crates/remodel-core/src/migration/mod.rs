//! Migration risk engine for Remodel.
//!
//! Before a generated backend is regenerated, this module compares the
//! recorded manifest against the current model definitions and decides
//! whether the regeneration may proceed:
//! - Conversion risk tables for data-type changes
//! - Risk classification of change kinds
//! - Structured issue reports with aggregate flags
//! - Transactional auto-fixes for healable changes
//! - Explicit-confirmation validation for confirmable blocking changes
//!
//! # Risk categories
//!
//! | Category | Meaning | Examples |
//! |----------|---------|----------|
//! | **AUTO_FIXABLE** | Healed by the engine before generation | New required field on an existing model |
//! | **CONFIRM_TO_PROCEED** | Proceeds with explicit acknowledgment | Narrowing type changes |
//! | **BLOCKING** | Stops generation | Dropped models or fields, incompatible type changes |
//!
//! The optional-to-required transition is classified BLOCKING but is
//! resolvable with an exact confirmation literal; it is the only blocking
//! kind with an override path.
//!
//! # Example
//!
//! ```ignore
//! use remodel_core::manifest::FileManifestStore;
//! use remodel_core::migration::{validate_explicit_confirmations, DiffEngine};
//!
//! let engine = DiffEngine::new(FileManifestStore::new());
//! let report = engine.analyze(&service, &manifest_path, &models)?;
//!
//! if report.has_dangerous_changes {
//!     let missing = validate_explicit_confirmations(&report, &confirmations);
//!     if !missing.is_empty() {
//!         // Surface the expected literals and stop.
//!     }
//! }
//! ```

pub mod classifier;
pub mod confirmation;
pub mod conversion;
pub mod diff;
pub mod error;
pub mod fixer;
pub mod report;

// Re-export main types

// Conversion types
pub use conversion::{conversion_risk, is_conversion_safe, ConversionRisk};

// Classifier types
pub use classifier::{classify_change, kind, RiskCategory};

// Report types
pub use report::{
    FieldRemovalIssue, IssueSeverity, IssueSummary, MigrationIssues, MigrationReport,
    ModelRemovalIssue, OptionalToRequiredIssue, RequiredFieldIssue, SafeChange, TypeChangeIssue,
    NEW_REQUIRED_FIELD_ISSUE,
};

// Error types
pub use error::{ErrorKind, MigrationError};

// Diff types
pub use diff::{diff_against, DiffEngine};

// Fixer types
pub use fixer::{
    AppliedFix, FieldMetadataStore, FieldMetadataTx, FieldRecord, FixApplier, FixKind, FixOutcome,
    MemoryFieldStore, MemoryTx,
};

// Confirmation types
pub use confirmation::{expected_confirmation, validate_explicit_confirmations, MissingConfirmation};
