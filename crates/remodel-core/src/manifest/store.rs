//! Manifest persistence.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use super::error::ManifestError;
use super::snapshot::{Manifest, MANIFEST_VERSION};

/// Read access to the manifest of a prior generation.
///
/// The risk engine's view of manifests is read-only by construction.
/// Rewriting the manifest after a successful generation belongs to the
/// generation pipeline, which holds the concrete store.
pub trait ManifestStore {
    /// Load the manifest at `path`.
    ///
    /// `Ok(None)` means no manifest exists there, which callers treat as
    /// a first generation.
    fn load(&self, path: &Path) -> Result<Option<Manifest>, ManifestError>;
}

/// File-backed manifest store using pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileManifestStore;

impl FileManifestStore {
    /// Create a new file-backed store.
    pub fn new() -> Self {
        Self
    }

    /// Write a manifest to `path`, replacing any previous content.
    ///
    /// Parent directories are created as needed.
    pub fn save(&self, path: &Path, manifest: &Manifest) -> Result<(), ManifestError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut json = serde_json::to_vec_pretty(manifest)
            .map_err(|e| ManifestError::Serialization(e.to_string()))?;
        json.push(b'\n');
        fs::write(path, json)?;

        debug!(path = %path.display(), models = manifest.models.len(), "manifest written");
        Ok(())
    }
}

impl ManifestStore for FileManifestStore {
    fn load(&self, path: &Path) -> Result<Option<Manifest>, ManifestError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no manifest on disk");
                return Ok(None);
            }
            Err(e) => return Err(ManifestError::Io(e)),
        };

        let manifest: Manifest =
            serde_json::from_slice(&bytes).map_err(|e| ManifestError::Malformed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if manifest.version > MANIFEST_VERSION {
            return Err(ManifestError::UnsupportedVersion {
                found: manifest.version,
                supported: MANIFEST_VERSION,
            });
        }

        Ok(Some(manifest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FieldDef, FieldType, ModelDef};

    fn sample_manifest() -> Manifest {
        let models = vec![ModelDef::new("mdl_1", "User")
            .with_field(FieldDef::new("fld_1", "email", FieldType::Email))];
        Manifest::capture("svc_1", &models)
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let store = FileManifestStore::new();

        store.save(&path, &sample_manifest()).unwrap();
        let loaded = store.load(&path).unwrap().unwrap();

        assert_eq!(loaded, sample_manifest());
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileManifestStore::new();

        let loaded = store.load(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeply/manifest.json");
        let store = FileManifestStore::new();

        store.save(&path, &sample_manifest()).unwrap();
        assert!(store.load(&path).unwrap().is_some());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, b"not json at all").unwrap();

        let err = FileManifestStore::new().load(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Malformed { .. }));
    }

    #[test]
    fn test_load_rejects_future_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, br#"{"version":99,"models":{}}"#).unwrap();

        let err = FileManifestStore::new().load(&path).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::UnsupportedVersion { found: 99, .. }
        ));
    }

    #[test]
    fn test_save_overwrites_previous_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let store = FileManifestStore::new();

        store.save(&path, &sample_manifest()).unwrap();

        let updated = Manifest::capture("svc_1", &[]);
        store.save(&path, &updated).unwrap();

        let loaded = store.load(&path).unwrap().unwrap();
        assert!(loaded.models.is_empty());
    }
}
