//! Manifest diffing algorithm.
//!
//! Compares current model definitions against the recorded manifest and
//! files every difference into a [`MigrationReport`].

use std::path::Path;

use tracing::{debug, info, warn};

use super::conversion::{conversion_risk, ConversionRisk};
use super::error::MigrationError;
use super::report::{
    FieldRemovalIssue, MigrationIssues, MigrationReport, ModelRemovalIssue,
    OptionalToRequiredIssue, RequiredFieldIssue, SafeChange, TypeChangeIssue,
};
use crate::catalog::{FieldDef, FieldType, Microservice, ModelDef};
use crate::manifest::{Manifest, ManifestStore, ModelSnapshot};

/// Compares current model definitions against the recorded manifest.
///
/// The store is injected so callers can swap the file-backed manifest
/// source for anything that satisfies [`ManifestStore`].
pub struct DiffEngine<M: ManifestStore> {
    manifests: M,
}

impl<M: ManifestStore> DiffEngine<M> {
    /// Create a diff engine over the given manifest store.
    pub fn new(manifests: M) -> Self {
        Self { manifests }
    }

    /// Analyze migration issues for a regeneration of `service`.
    ///
    /// A missing manifest is the bootstrap case and yields an empty
    /// first-generation report. A manifest captured for a different
    /// service fails loudly instead of producing a bogus diff.
    pub fn analyze(
        &self,
        service: &Microservice,
        manifest_path: &Path,
        models: &[ModelDef],
    ) -> Result<MigrationReport, MigrationError> {
        debug!(
            service_id = %service.id,
            models = models.len(),
            "analyzing model changes against manifest"
        );

        let Some(manifest) = self.manifests.load(manifest_path)? else {
            debug!(service_id = %service.id, "no manifest recorded; first generation");
            return Ok(MigrationReport::first_generation());
        };

        if let Some(manifest_service_id) = &manifest.microservice_id {
            if *manifest_service_id != service.id {
                return Err(MigrationError::ManifestMismatch {
                    manifest_service_id: manifest_service_id.clone(),
                    service_id: service.id.clone(),
                });
            }
        }

        let report = diff_against(&manifest, models);

        if report.has_dangerous_changes {
            warn!(
                service_id = %service.id,
                dangerous = report.summary.dangerous_count,
                "dangerous model changes detected"
            );
        } else if report.has_issues {
            info!(
                service_id = %service.id,
                total = report.summary.total_issues,
                fixable = report.issues.required_field_on_existing_model.len(),
                "model changes detected"
            );
        }

        Ok(report)
    }
}

/// Diff current models against an already-loaded manifest.
///
/// Pure data transform; manifest loading and the service identity check
/// live in [`DiffEngine::analyze`].
pub fn diff_against(manifest: &Manifest, models: &[ModelDef]) -> MigrationReport {
    let mut issues = MigrationIssues::default();

    for model in models {
        match manifest.get_model(&model.name) {
            // Added models
            None => issues.safe_changes.push(SafeChange::new_model(&model.name)),
            // Models in both: diff fields
            Some(snapshot) => diff_fields(model, snapshot, &mut issues),
        }
    }

    // Removed models. The generator never drops tables on regeneration,
    // so these are informational only.
    for name in manifest.models.keys() {
        if !models.iter().any(|model| model.name == *name) {
            issues.model_removals.push(ModelRemovalIssue::new(name));
        }
    }

    MigrationReport::from_issues(issues)
}

fn diff_fields(model: &ModelDef, snapshot: &ModelSnapshot, issues: &mut MigrationIssues) {
    for field in &model.fields {
        match snapshot.get_field(&field.name) {
            None => {
                // Existing rows have no value for a new required field;
                // new optional fields need nothing.
                if !field.optional {
                    issues
                        .required_field_on_existing_model
                        .push(RequiredFieldIssue::new(
                            &model.name,
                            &field.name,
                            Some(field.id.clone()),
                        ));
                }
            }
            Some(prior) => {
                if prior.data_type != field.data_type {
                    file_type_change(model, field, prior.data_type, issues);
                }
                if prior.optional && !field.optional {
                    issues.optional_to_required.push(OptionalToRequiredIssue::new(
                        &field.id,
                        &model.name,
                        &field.name,
                    ));
                }
            }
        }
    }

    // Removed fields
    for (name, prior) in &snapshot.fields {
        if model.get_field(name).is_none() {
            issues
                .field_removals
                .push(FieldRemovalIssue::new(&model.name, name, prior.id.clone()));
        }
    }
}

fn file_type_change(
    model: &ModelDef,
    field: &FieldDef,
    from_type: FieldType,
    issues: &mut MigrationIssues,
) {
    match conversion_risk(from_type, field.data_type) {
        ConversionRisk::Safe => issues.safe_changes.push(SafeChange::type_change(
            &model.name,
            &field.name,
            from_type,
            field.data_type,
        )),
        risk => issues.type_changes.push(TypeChangeIssue::new(
            &field.id,
            &model.name,
            &field.name,
            from_type,
            field.data_type,
            risk,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestError;

    fn service() -> Microservice {
        Microservice::new("svc_1", "crm")
    }

    fn user_model() -> ModelDef {
        ModelDef::new("mdl_1", "User")
            .with_field(FieldDef::new("fld_1", "email", FieldType::Email))
            .with_field(FieldDef::optional("fld_2", "nickname", FieldType::String))
    }

    fn manifest_of(models: &[ModelDef]) -> Manifest {
        Manifest::capture("svc_1", models)
    }

    /// Store that serves a fixed manifest without touching the filesystem.
    struct FixedStore(Option<Manifest>);

    impl ManifestStore for FixedStore {
        fn load(&self, _path: &Path) -> Result<Option<Manifest>, ManifestError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_unchanged_models_produce_clean_report() {
        let models = vec![user_model()];
        let report = diff_against(&manifest_of(&models), &models);

        assert!(!report.has_issues);
        assert!(!report.has_dangerous_changes);
        assert!(report.issues.is_empty());
        assert_eq!(report.summary.total_issues, 0);
    }

    #[test]
    fn test_missing_manifest_is_first_generation() {
        let engine = DiffEngine::new(FixedStore(None));
        let report = engine
            .analyze(&service(), Path::new("manifest.json"), &[user_model()])
            .unwrap();

        assert!(report.is_first_generation);
        assert!(!report.has_issues);
    }

    #[test]
    fn test_service_mismatch_fails_loudly() {
        let manifest = Manifest::capture("svc_other", &[user_model()]);
        let engine = DiffEngine::new(FixedStore(Some(manifest)));

        let err = engine
            .analyze(&service(), Path::new("manifest.json"), &[user_model()])
            .unwrap_err();

        assert!(matches!(err, MigrationError::ManifestMismatch { .. }));
        assert_eq!(err.kind(), crate::migration::ErrorKind::MigrationIssues);
    }

    #[test]
    fn test_manifest_without_service_id_is_accepted() {
        let mut manifest = manifest_of(&[user_model()]);
        manifest.microservice_id = None;
        let engine = DiffEngine::new(FixedStore(Some(manifest)));

        let report = engine
            .analyze(&service(), Path::new("manifest.json"), &[user_model()])
            .unwrap();
        assert!(!report.has_issues);
    }

    #[test]
    fn test_new_model_is_one_safe_change() {
        let manifest = manifest_of(&[user_model()]);
        let employee = ModelDef::new("mdl_2", "Employee")
            .with_field(FieldDef::new("fld_3", "name", FieldType::String));

        let report = diff_against(&manifest, &[user_model(), employee]);

        assert_eq!(report.issues.safe_changes.len(), 1);
        assert_eq!(report.issues.safe_changes[0].kind, "new_model");
        assert_eq!(report.issues.safe_changes[0].model, "Employee");
        assert!(!report.has_non_safe_issues);
    }

    #[test]
    fn test_new_required_field_is_fixable_not_dangerous() {
        let manifest = manifest_of(&[user_model()]);
        let grown = user_model().with_field(FieldDef::new("f2", "middle_name", FieldType::String));

        let report = diff_against(&manifest, &[grown]);

        assert_eq!(report.issues.required_field_on_existing_model.len(), 1);
        let issue = &report.issues.required_field_on_existing_model[0];
        assert_eq!(issue.field, "middle_name");
        assert_eq!(issue.field_id.as_deref(), Some("f2"));
        assert!(report.has_fixable_changes);
        assert!(!report.has_dangerous_changes);
        assert!(!report.has_non_safe_issues);
    }

    #[test]
    fn test_new_optional_field_files_nothing() {
        let manifest = manifest_of(&[user_model()]);
        let grown =
            user_model().with_field(FieldDef::optional("f3", "middle_name", FieldType::String));

        let report = diff_against(&manifest, &[grown]);

        assert!(!report.has_issues);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_removed_field_is_info_only() {
        let manifest = manifest_of(&[user_model().with_field(FieldDef::new(
            "fld_legacy",
            "legacy_code",
            FieldType::String,
        ))]);

        let report = diff_against(&manifest, &[user_model()]);

        assert_eq!(report.issues.field_removals.len(), 1);
        let removal = &report.issues.field_removals[0];
        assert_eq!(removal.field, "legacy_code");
        assert_eq!(removal.field_id.as_deref(), Some("fld_legacy"));
        assert_eq!(report.summary.info_count, 1);
        assert!(!report.has_non_safe_issues);
        assert!(!report.has_dangerous_changes);
    }

    #[test]
    fn test_removed_model_is_info_only() {
        let department = ModelDef::new("mdl_9", "Department")
            .with_field(FieldDef::new("fld_9", "name", FieldType::String));
        let manifest = manifest_of(&[user_model(), department]);

        let report = diff_against(&manifest, &[user_model()]);

        assert_eq!(report.issues.model_removals.len(), 1);
        assert_eq!(report.issues.model_removals[0].model, "Department");
        assert_eq!(report.summary.info_count, 1);
        assert!(!report.has_dangerous_changes);
    }

    #[test]
    fn test_safe_type_change_lands_in_safe_changes() {
        let before = ModelDef::new("mdl_1", "User")
            .with_field(FieldDef::new("fld_1", "age", FieldType::Int));
        let after = ModelDef::new("mdl_1", "User")
            .with_field(FieldDef::new("fld_1", "age", FieldType::BigInt));

        let report = diff_against(&manifest_of(&[before]), &[after]);

        assert_eq!(report.issues.safe_changes.len(), 1);
        let change = &report.issues.safe_changes[0];
        assert_eq!(change.kind, "type_change_safe");
        assert_eq!(change.from_type, Some(FieldType::Int));
        assert_eq!(change.to_type, Some(FieldType::BigInt));
        assert!(report.issues.type_changes.is_empty());
        assert!(!report.has_non_safe_issues);
    }

    #[test]
    fn test_warning_type_change_needs_confirmation_but_not_dangerous() {
        let before = ModelDef::new("mdl_1", "User")
            .with_field(FieldDef::new("fld_1", "count", FieldType::BigInt));
        let after = ModelDef::new("mdl_1", "User")
            .with_field(FieldDef::new("fld_1", "count", FieldType::Int));

        let report = diff_against(&manifest_of(&[before]), &[after]);

        assert_eq!(report.issues.type_changes.len(), 1);
        let change = &report.issues.type_changes[0];
        assert_eq!(change.kind, "type_change_widening");
        assert!(!change.is_blocking());
        assert!(report.has_issues);
        assert!(!report.has_dangerous_changes);
    }

    #[test]
    fn test_blocking_type_change_is_dangerous() {
        let before = ModelDef::new("mdl_1", "User")
            .with_field(FieldDef::new("fld_1", "name", FieldType::String));
        let after = ModelDef::new("mdl_1", "User")
            .with_field(FieldDef::new("fld_1", "name", FieldType::Int));

        let report = diff_against(&manifest_of(&[before]), &[after]);

        assert_eq!(report.issues.type_changes.len(), 1);
        assert!(report.issues.type_changes[0].is_blocking());
        assert!(report.has_dangerous_changes);
        assert!(report.has_non_safe_issues);
        assert_eq!(report.summary.dangerous_count, 1);
    }

    #[test]
    fn test_optional_to_required_transition_is_dangerous() {
        let before = ModelDef::new("mdl_1", "Employee")
            .with_field(FieldDef::optional("f2", "middle_name", FieldType::String));
        let after = ModelDef::new("mdl_1", "Employee")
            .with_field(FieldDef::new("f2", "middle_name", FieldType::String));

        let report = diff_against(&manifest_of(&[before]), &[after]);

        assert_eq!(report.issues.optional_to_required.len(), 1);
        let issue = &report.issues.optional_to_required[0];
        assert_eq!(issue.field_id, "f2");
        assert_eq!(issue.model, "Employee");
        assert_eq!(issue.field, "middle_name");
        assert!(report.has_dangerous_changes);
    }

    #[test]
    fn test_required_to_optional_files_nothing() {
        let before = ModelDef::new("mdl_1", "Employee")
            .with_field(FieldDef::new("f2", "middle_name", FieldType::String));
        let after = ModelDef::new("mdl_1", "Employee")
            .with_field(FieldDef::optional("f2", "middle_name", FieldType::String));

        let report = diff_against(&manifest_of(&[before]), &[after]);

        assert!(!report.has_issues);
        assert!(report.issues.optional_to_required.is_empty());
    }

    #[test]
    fn test_type_change_and_optionality_change_both_file() {
        let before = ModelDef::new("mdl_1", "User")
            .with_field(FieldDef::optional("fld_1", "code", FieldType::BigInt));
        let after = ModelDef::new("mdl_1", "User")
            .with_field(FieldDef::new("fld_1", "code", FieldType::Int));

        let report = diff_against(&manifest_of(&[before]), &[after]);

        assert_eq!(report.issues.type_changes.len(), 1);
        assert_eq!(report.issues.optional_to_required.len(), 1);
        assert_eq!(report.summary.total_issues, 2);
    }

    #[test]
    fn test_mixed_changes_aggregate_correctly() {
        let department = ModelDef::new("mdl_9", "Department")
            .with_field(FieldDef::new("fld_9", "name", FieldType::String));
        let manifest = manifest_of(&[user_model(), department]);

        let employee = ModelDef::new("mdl_2", "Employee")
            .with_field(FieldDef::new("fld_3", "name", FieldType::String));
        let grown = user_model().with_field(FieldDef::new("f2", "middle_name", FieldType::String));

        let report = diff_against(&manifest, &[grown, employee]);

        assert_eq!(report.issues.safe_changes.len(), 1);
        assert_eq!(report.issues.required_field_on_existing_model.len(), 1);
        assert_eq!(report.issues.model_removals.len(), 1);
        assert_eq!(report.summary.total_issues, 3);
        assert_eq!(report.summary.safe_count, 1);
        assert_eq!(report.summary.info_count, 1);
        assert!(report.has_fixable_changes);
        assert!(!report.has_dangerous_changes);
    }
}
