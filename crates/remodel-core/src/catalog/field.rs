//! Field definitions for models.

use super::types::FieldType;
use serde::{Deserialize, Serialize};

/// A field definition within a model.
///
/// The `id` is the field's metadata record key in the platform database,
/// distinct from its display `name`. Auto-fixes address fields by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Metadata record id.
    pub id: String,
    /// Field name.
    pub name: String,
    /// Field data type.
    pub data_type: FieldType,
    /// Whether the field may be left unset.
    pub optional: bool,
}

impl FieldDef {
    /// Create a new required field.
    pub fn new(id: impl Into<String>, name: impl Into<String>, data_type: FieldType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data_type,
            optional: false,
        }
    }

    /// Create an optional field.
    pub fn optional(id: impl Into<String>, name: impl Into<String>, data_type: FieldType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data_type,
            optional: true,
        }
    }

    /// Return this field with a different data type.
    pub fn with_type(mut self, data_type: FieldType) -> Self {
        self.data_type = data_type;
        self
    }

    /// Return this field marked required.
    pub fn required(mut self) -> Self {
        self.optional = false;
        self
    }
}
