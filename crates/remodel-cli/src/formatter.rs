//! Output formatters for migration reports.

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use remodel_core::migration::{MigrationReport, MissingConfirmation};

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter: Send + Sync {
    /// Format a migration report.
    fn format_report(&self, report: &MigrationReport) -> String;

    /// Format the confirmations a caller still has to supply.
    fn format_missing_confirmations(&self, missing: &[MissingConfirmation]) -> String;

    /// Format per-model checksums.
    fn format_checksums(&self, checksums: &[(String, String)]) -> String;

    /// Format a simple message.
    fn format_message(&self, message: &str) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_report(&self, report: &MigrationReport) -> String {
        if report.is_first_generation {
            return "First generation: no manifest recorded, nothing to compare".to_string();
        }
        if !report.has_issues {
            return "No model changes detected".to_string();
        }

        let mut table = Table::new();
        table.set_header(vec!["Severity", "Change", "Model", "Field", "Detail"]);

        for change in &report.issues.safe_changes {
            table.add_row(vec![
                Cell::new("safe"),
                Cell::new(&change.kind),
                Cell::new(&change.model),
                Cell::new(change.field.as_deref().unwrap_or("-")),
                Cell::new(type_change_detail(change.from_type, change.to_type)),
            ]);
        }

        for issue in &report.issues.required_field_on_existing_model {
            table.add_row(vec![
                Cell::new("error"),
                Cell::new("new_required_field"),
                Cell::new(&issue.model),
                Cell::new(&issue.field),
                Cell::new("auto-fix: field forced optional"),
            ]);
        }

        for issue in &report.issues.field_removals {
            table.add_row(vec![
                Cell::new("info"),
                Cell::new("field_removed"),
                Cell::new(&issue.model),
                Cell::new(&issue.field),
                Cell::new("not applied on regeneration"),
            ]);
        }

        for issue in &report.issues.model_removals {
            table.add_row(vec![
                Cell::new("info"),
                Cell::new("model_removed"),
                Cell::new(&issue.model),
                Cell::new("-"),
                Cell::new("not applied on regeneration"),
            ]);
        }

        for issue in &report.issues.optional_to_required {
            table.add_row(vec![
                Cell::new("blocking"),
                Cell::new("optional_to_required"),
                Cell::new(&issue.model),
                Cell::new(&issue.field),
                Cell::new("confirm to proceed"),
            ]);
        }

        for change in &report.issues.type_changes {
            table.add_row(vec![
                Cell::new(change.risk.to_string()),
                Cell::new(&change.kind),
                Cell::new(&change.model),
                Cell::new(&change.field),
                Cell::new(format!("{} -> {}", change.from_type, change.to_type)),
            ]);
        }

        format!(
            "{}\n{} issue(s): {} safe, {} dangerous, {} info",
            table,
            report.summary.total_issues,
            report.summary.safe_count,
            report.summary.dangerous_count,
            report.summary.info_count
        )
    }

    fn format_missing_confirmations(&self, missing: &[MissingConfirmation]) -> String {
        let mut output = String::from("Missing confirmations:\n");
        for entry in missing {
            output.push_str(&format!(
                "  {}.{} (field {}) requires: {}\n",
                entry.model, entry.field, entry.field_id, entry.expected_confirmation
            ));
        }
        output.push_str("Re-run with --confirm <FIELD_ID>='<literal>' to proceed");
        output
    }

    fn format_checksums(&self, checksums: &[(String, String)]) -> String {
        let mut table = Table::new();
        table.set_header(vec!["Model", "Checksum"]);

        for (model, checksum) in checksums {
            table.add_row(vec![model, checksum]);
        }

        table.to_string()
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_report(&self, report: &MigrationReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_missing_confirmations(&self, missing: &[MissingConfirmation]) -> String {
        serde_json::to_string_pretty(&serde_json::json!({
            "missing_confirmations": missing
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }

    fn format_checksums(&self, checksums: &[(String, String)]) -> String {
        let mut obj = serde_json::Map::new();
        for (model, checksum) in checksums {
            obj.insert(
                model.clone(),
                serde_json::Value::String(checksum.clone()),
            );
        }
        serde_json::to_string_pretty(&serde_json::Value::Object(obj))
            .unwrap_or_else(|_| "{}".to_string())
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({
            "message": message
        })
        .to_string()
    }
}

fn type_change_detail(
    from_type: Option<remodel_core::catalog::FieldType>,
    to_type: Option<remodel_core::catalog::FieldType>,
) -> String {
    match (from_type, to_type) {
        (Some(from), Some(to)) => format!("{from} -> {to}"),
        _ => "-".to_string(),
    }
}
