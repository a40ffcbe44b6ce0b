//! Manifest types - the recorded model shapes of a prior generation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::checksum::generate_model_checksum;
use crate::catalog::{FieldDef, FieldType, ModelDef};

/// Current manifest format version.
pub const MANIFEST_VERSION: u32 = 1;

/// The model shapes recorded after the last successful generation.
///
/// The generation pipeline writes a manifest wholesale once a build
/// succeeds; the risk engine only ever reads it. Models and fields are
/// keyed by name in sorted maps so the serialized form is stable across
/// runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest format version.
    pub version: u32,
    /// Id of the microservice this manifest was captured for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microservice_id: Option<String>,
    /// Model snapshots keyed by model name.
    pub models: BTreeMap<String, ModelSnapshot>,
}

/// Recorded shape of a single model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    /// Stable checksum of the model's shape.
    pub checksum: String,
    /// Field snapshots keyed by field name.
    pub fields: BTreeMap<String, FieldSnapshot>,
}

/// Recorded shape of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    /// Metadata record id, when the writing pipeline recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Field data type.
    pub data_type: FieldType,
    /// Whether the field was optional.
    pub optional: bool,
}

impl Manifest {
    /// Capture a manifest from the current model definitions.
    pub fn capture(microservice_id: impl Into<String>, models: &[ModelDef]) -> Self {
        Self {
            version: MANIFEST_VERSION,
            microservice_id: Some(microservice_id.into()),
            models: models
                .iter()
                .map(|model| (model.name.clone(), ModelSnapshot::of(model)))
                .collect(),
        }
    }

    /// Get the snapshot of a model by name.
    pub fn get_model(&self, name: &str) -> Option<&ModelSnapshot> {
        self.models.get(name)
    }
}

impl ModelSnapshot {
    /// Snapshot a model definition.
    pub fn of(model: &ModelDef) -> Self {
        Self {
            checksum: generate_model_checksum(model),
            fields: model
                .fields
                .iter()
                .map(|field| (field.name.clone(), FieldSnapshot::of(field)))
                .collect(),
        }
    }

    /// Check whether a model still has the recorded shape.
    ///
    /// Compares checksums only, so an unchanged model costs one hash and
    /// no field walk.
    pub fn matches(&self, model: &ModelDef) -> bool {
        self.checksum == generate_model_checksum(model)
    }

    /// Get the snapshot of a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldSnapshot> {
        self.fields.get(name)
    }
}

impl FieldSnapshot {
    /// Snapshot a field definition.
    pub fn of(field: &FieldDef) -> Self {
        Self {
            id: Some(field.id.clone()),
            data_type: field.data_type,
            optional: field.optional,
        }
    }
}
