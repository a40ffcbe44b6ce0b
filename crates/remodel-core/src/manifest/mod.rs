//! Generation manifests.
//!
//! A manifest records the shape of every model at the last successful
//! generation: per-field types and optionality plus a per-model checksum.
//! The migration risk engine diffs current definitions against it to
//! decide whether a regeneration is safe. Manifests are written by the
//! generation pipeline and never by the engine.

mod checksum;
mod error;
mod snapshot;
mod store;

pub use checksum::generate_model_checksum;
pub use error::ManifestError;
pub use snapshot::{FieldSnapshot, Manifest, ModelSnapshot, MANIFEST_VERSION};
pub use store::{FileManifestStore, ManifestStore};
