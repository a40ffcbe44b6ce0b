//! Model definitions and the microservice that owns them.

use super::field::FieldDef;
use serde::{Deserialize, Serialize};

/// A model definition (one generated table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDef {
    /// Metadata record id.
    pub id: String,
    /// Model name (unique within a microservice).
    pub name: String,
    /// Field definitions.
    pub fields: Vec<FieldDef>,
}

impl ModelDef {
    /// Create a new model definition with no fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field to the model.
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Add multiple fields.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldDef>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Remove a field by name, returning it if present.
    pub fn remove_field(&mut self, name: &str) -> Option<FieldDef> {
        let index = self.fields.iter().position(|f| f.name == name)?;
        Some(self.fields.remove(index))
    }
}

/// The microservice whose models are being regenerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Microservice {
    /// Metadata record id.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Microservice {
    /// Create a new microservice handle.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
