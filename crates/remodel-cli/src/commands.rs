//! Subcommand implementations.

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use tracing::debug;

use remodel_core::catalog::{Microservice, ModelDef};
use remodel_core::manifest::{FileManifestStore, Manifest};
use remodel_core::migration::{validate_explicit_confirmations, DiffEngine};

use crate::formatter::Formatter;

/// Outcome of the check subcommand.
#[derive(Debug)]
pub struct CheckResult {
    /// Rendered report plus any missing-confirmation section.
    pub output: String,
    /// False when dangerous changes remain unconfirmed.
    pub proceed: bool,
}

/// Diff the current models against the manifest and render the verdict.
pub fn check(
    models_path: &Path,
    manifest_path: &Path,
    service_id: &str,
    confirmation_args: &[String],
    formatter: &dyn Formatter,
) -> Result<CheckResult, Box<dyn Error>> {
    let models = load_models(models_path)?;
    let confirmations = parse_confirmations(confirmation_args)?;
    let service = Microservice::new(service_id, service_id);

    let engine = DiffEngine::new(FileManifestStore::new());
    let report = engine
        .analyze(&service, manifest_path, &models)
        .map_err(|e| format!("{}: {}", e.kind(), e))?;

    let missing = validate_explicit_confirmations(&report, &confirmations);
    let blocking_type_changes = report
        .issues
        .type_changes
        .iter()
        .any(|change| change.is_blocking());

    let mut output = formatter.format_report(&report);
    if !missing.is_empty() {
        output.push_str("\n\n");
        output.push_str(&formatter.format_missing_confirmations(&missing));
    }

    // Blocking type changes have no confirmation path at all.
    let proceed = missing.is_empty() && !blocking_type_changes;
    Ok(CheckResult { output, proceed })
}

/// Capture the current models into the manifest file.
pub fn snapshot(
    models_path: &Path,
    manifest_path: &Path,
    service_id: &str,
    formatter: &dyn Formatter,
) -> Result<String, Box<dyn Error>> {
    let models = load_models(models_path)?;
    let manifest = Manifest::capture(service_id, &models);
    FileManifestStore::new().save(manifest_path, &manifest)?;

    Ok(formatter.format_message(&format!(
        "manifest written: {} model(s) -> {}",
        manifest.models.len(),
        manifest_path.display()
    )))
}

/// Print the checksum of every model in the input file.
pub fn checksum(models_path: &Path, formatter: &dyn Formatter) -> Result<String, Box<dyn Error>> {
    let models = load_models(models_path)?;
    let checksums: Vec<(String, String)> = models
        .iter()
        .map(|model| {
            (
                model.name.clone(),
                remodel_core::generate_model_checksum(model),
            )
        })
        .collect();

    Ok(formatter.format_checksums(&checksums))
}

/// Load model definitions from a JSON file.
fn load_models(path: &Path) -> Result<Vec<ModelDef>, Box<dyn Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("error reading '{}': {}", path.display(), e))?;
    let models: Vec<ModelDef> = serde_json::from_str(&content)
        .map_err(|e| format!("error parsing models in '{}': {}", path.display(), e))?;

    debug!(path = %path.display(), models = models.len(), "model definitions loaded");
    Ok(models)
}

/// Parse repeated `FIELD_ID=LITERAL` confirmation flags.
fn parse_confirmations(args: &[String]) -> Result<HashMap<String, String>, Box<dyn Error>> {
    let mut confirmations = HashMap::new();
    for arg in args {
        let Some((field_id, literal)) = arg.split_once('=') else {
            return Err(format!("invalid --confirm '{arg}': expected FIELD_ID=LITERAL").into());
        };
        confirmations.insert(field_id.to_string(), literal.to_string());
    }
    Ok(confirmations)
}
