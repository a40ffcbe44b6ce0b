//! Model catalog for Remodel.
//!
//! The catalog holds the in-memory shape of a microservice's models as the
//! generation pipeline sees them: typed fields, optionality, and the
//! metadata record ids that tie each definition back to the platform
//! database.

mod field;
mod model;
mod types;

pub use field::FieldDef;
pub use model::{Microservice, ModelDef};
pub use types::FieldType;
