//! Stable checksums over model shapes.

use crate::catalog::ModelDef;

/// Compute a stable checksum of a model's shape.
///
/// The hash covers the model name plus each field's name, data type, and
/// optionality, with fields sorted by name. Metadata record ids are
/// excluded, so re-importing the same models under fresh ids keeps their
/// checksums. Two models hash equal exactly when a regeneration would
/// treat them as the same shape.
pub fn generate_model_checksum(model: &ModelDef) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(model.name.as_bytes());
    hasher.update(&[0]);

    let mut fields: Vec<_> = model.fields.iter().collect();
    fields.sort_by(|a, b| a.name.cmp(&b.name));

    // NUL separators keep adjacent names from running together.
    for field in fields {
        hasher.update(field.name.as_bytes());
        hasher.update(&[0]);
        hasher.update(field.data_type.as_str().as_bytes());
        hasher.update(&[0]);
        hasher.update(&[field.optional as u8]);
    }

    hasher.finalize().to_hex().to_string()
}
