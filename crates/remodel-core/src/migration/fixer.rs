//! Auto-fix application for migration reports.
//!
//! The one auto-fixable change is a new required field on an existing
//! model: existing rows have no value for it, so the remedy is forcing
//! the field optional in the platform's metadata. All fixes from one
//! report apply inside a single transaction.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::MigrationError;
use super::report::MigrationReport;

/// Transactional access to field metadata records.
///
/// Implementations wrap the platform's persistence client. The engine
/// never commits partial batches: every update for one report goes
/// through one transaction.
pub trait FieldMetadataStore {
    /// Transaction type produced by this store.
    type Tx: FieldMetadataTx;

    /// Open a new transaction.
    fn begin(&self) -> Result<Self::Tx, MigrationError>;
}

/// A single open transaction over field metadata.
///
/// Dropping a transaction without committing abandons every queued
/// update.
pub trait FieldMetadataTx {
    /// Queue setting `optional = true` on the field record with this id.
    fn set_field_optional(&mut self, field_id: &str) -> Result<(), MigrationError>;

    /// Commit all queued updates atomically.
    fn commit(self) -> Result<(), MigrationError>;
}

/// The fix applied to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixKind {
    /// The field's metadata record was updated to `optional = true`.
    MadeOptional,
}

/// Record of one applied fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFix {
    /// Metadata record id of the fixed field.
    pub field_id: String,
    /// Fix that was applied.
    pub fix: FixKind,
    /// Model the field belongs to.
    pub model: String,
    /// Field name.
    pub field: String,
}

/// Outcome of applying the auto-fixable subset of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixOutcome {
    /// Fixes applied, in report order.
    pub applied_fixes: Vec<AppliedFix>,
    /// Whether the batch committed.
    pub success: bool,
}

/// Applies the auto-fixable subset of a migration report.
pub struct FixApplier<P: FieldMetadataStore> {
    persistence: P,
}

impl<P: FieldMetadataStore> FixApplier<P> {
    /// Create a fix applier over the given persistence client.
    pub fn new(persistence: P) -> Self {
        Self { persistence }
    }

    /// Apply every auto-fixable issue in `report` in one transaction.
    ///
    /// An empty fixable set returns immediately without opening a
    /// transaction. A fixable entry without a field id is an upstream
    /// defect and fails the whole batch before any update is issued.
    pub fn apply(&self, report: &MigrationReport) -> Result<FixOutcome, MigrationError> {
        let fixable = &report.issues.required_field_on_existing_model;
        if fixable.is_empty() {
            debug!("no fixable issues; skipping transaction");
            return Ok(FixOutcome {
                applied_fixes: Vec::new(),
                success: true,
            });
        }

        // Validate the whole batch before touching persistence.
        let mut pending = Vec::with_capacity(fixable.len());
        for issue in fixable {
            let field_id = issue
                .field_id
                .as_deref()
                .ok_or_else(|| MigrationError::MissingFieldId {
                    model: issue.model.clone(),
                    field: issue.field.clone(),
                })?;
            pending.push((field_id, issue));
        }

        let mut tx = self.persistence.begin()?;
        let mut applied_fixes = Vec::with_capacity(pending.len());
        for (field_id, issue) in pending {
            tx.set_field_optional(field_id)?;
            applied_fixes.push(AppliedFix {
                field_id: field_id.to_string(),
                fix: FixKind::MadeOptional,
                model: issue.model.clone(),
                field: issue.field.clone(),
            });
        }
        tx.commit()?;

        info!(fixes = applied_fixes.len(), "migration fixes applied");

        Ok(FixOutcome {
            applied_fixes,
            success: true,
        })
    }
}

/// A field metadata record held by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    /// Model the field belongs to.
    pub model: String,
    /// Field name.
    pub name: String,
    /// Whether the field is optional.
    pub optional: bool,
}

/// In-memory field metadata store.
///
/// Reference implementation of the persistence contract, used in tests
/// and dry runs. Updates queued in a transaction become visible only on
/// commit, and a commit naming an unknown record fails wholesale without
/// applying anything.
#[derive(Debug, Clone, Default)]
pub struct MemoryFieldStore {
    records: Arc<Mutex<HashMap<String, FieldRecord>>>,
}

impl MemoryFieldStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field record keyed by its metadata id.
    pub fn insert(&self, field_id: impl Into<String>, record: FieldRecord) {
        self.records.lock().insert(field_id.into(), record);
    }

    /// Fetch a copy of a field record by id.
    pub fn get(&self, field_id: &str) -> Option<FieldRecord> {
        self.records.lock().get(field_id).cloned()
    }
}

impl FieldMetadataStore for MemoryFieldStore {
    type Tx = MemoryTx;

    fn begin(&self) -> Result<MemoryTx, MigrationError> {
        Ok(MemoryTx {
            records: Arc::clone(&self.records),
            updates: Vec::new(),
        })
    }
}

/// Open transaction over [`MemoryFieldStore`].
pub struct MemoryTx {
    records: Arc<Mutex<HashMap<String, FieldRecord>>>,
    updates: Vec<String>,
}

impl FieldMetadataTx for MemoryTx {
    fn set_field_optional(&mut self, field_id: &str) -> Result<(), MigrationError> {
        self.updates.push(field_id.to_string());
        Ok(())
    }

    fn commit(self) -> Result<(), MigrationError> {
        let mut records = self.records.lock();

        // All-or-nothing: verify every id before the first write.
        for field_id in &self.updates {
            if !records.contains_key(field_id) {
                return Err(MigrationError::Persistence {
                    message: format!("unknown field record: {field_id}"),
                });
            }
        }

        for field_id in &self.updates {
            if let Some(record) = records.get_mut(field_id) {
                record.optional = true;
            }
        }
        Ok(())
    }
}
