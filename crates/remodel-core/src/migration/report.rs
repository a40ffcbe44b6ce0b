//! Migration report types.
//!
//! The report is the diff engine's output: every detected change filed
//! into one of six issue lists, with aggregate flags the caller gates on.
//! Reports are transient request-scoped values and are never persisted.

use serde::{Deserialize, Serialize};

use super::classifier::{classify_change, kind, RiskCategory};
use super::conversion::ConversionRisk;
use crate::catalog::FieldType;

/// Issue label for a new required field on an existing model.
pub const NEW_REQUIRED_FIELD_ISSUE: &str = "New required field";

/// Severity attached to informational and fixable issue entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    /// Surfaced for awareness only.
    Info,
    /// Requires handling before generation completes.
    Error,
}

/// A change the regeneration absorbs without risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeChange {
    /// Change-kind label (`new_model` or `type_change_safe`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Model name.
    pub model: String,
    /// Field name, for field-level changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Prior data type, for type changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_type: Option<FieldType>,
    /// New data type, for type changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_type: Option<FieldType>,
}

impl SafeChange {
    /// A model added since the last generation.
    pub fn new_model(model: impl Into<String>) -> Self {
        Self {
            kind: kind::NEW_MODEL.to_string(),
            model: model.into(),
            field: None,
            from_type: None,
            to_type: None,
        }
    }

    /// A lossless field type change.
    pub fn type_change(
        model: impl Into<String>,
        field: impl Into<String>,
        from_type: FieldType,
        to_type: FieldType,
    ) -> Self {
        Self {
            kind: kind::TYPE_CHANGE_SAFE.to_string(),
            model: model.into(),
            field: Some(field.into()),
            from_type: Some(from_type),
            to_type: Some(to_type),
        }
    }
}

/// A new required field on a model that already has rows.
///
/// Auto-fixable: the remedy is forcing the field optional, not blocking
/// the generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredFieldIssue {
    /// Field name.
    pub field: String,
    /// Model name.
    pub model: String,
    /// Metadata record id of the field. Absence is an upstream defect
    /// that the fix applier surfaces as an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
    /// Human-readable issue label.
    pub issue: String,
    /// Always [`IssueSeverity::Error`].
    pub severity: IssueSeverity,
}

impl RequiredFieldIssue {
    /// File a new required-field issue.
    pub fn new(
        model: impl Into<String>,
        field: impl Into<String>,
        field_id: Option<String>,
    ) -> Self {
        Self {
            field: field.into(),
            model: model.into(),
            field_id,
            issue: NEW_REQUIRED_FIELD_ISSUE.to_string(),
            severity: IssueSeverity::Error,
        }
    }
}

/// A field recorded in the manifest that is gone from its model.
///
/// Informational only: the generator never drops columns on
/// regeneration, so nothing needs confirming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRemovalIssue {
    /// Field name.
    pub field: String,
    /// Model name.
    pub model: String,
    /// Metadata record id, when the manifest recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
    /// Always [`IssueSeverity::Info`].
    pub severity: IssueSeverity,
}

impl FieldRemovalIssue {
    /// File a field removal.
    pub fn new(model: impl Into<String>, field: impl Into<String>, field_id: Option<String>) -> Self {
        Self {
            field: field.into(),
            model: model.into(),
            field_id,
            severity: IssueSeverity::Info,
        }
    }
}

/// A model recorded in the manifest that is gone from the current set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRemovalIssue {
    /// Model name.
    pub model: String,
    /// Always [`IssueSeverity::Info`].
    pub severity: IssueSeverity,
}

impl ModelRemovalIssue {
    /// File a model removal.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            severity: IssueSeverity::Info,
        }
    }
}

/// A previously optional field that became required.
///
/// Blocking, but resolvable: the caller can supply the exact confirmation
/// literal to proceed. The only blocking kind with an override path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalToRequiredIssue {
    /// Metadata record id of the field.
    pub field_id: String,
    /// Model name.
    pub model: String,
    /// Field name.
    pub field: String,
}

impl OptionalToRequiredIssue {
    /// File an optional-to-required transition.
    pub fn new(
        field_id: impl Into<String>,
        model: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            model: model.into(),
            field: field.into(),
        }
    }
}

/// A field type change that is not lossless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeChangeIssue {
    /// Metadata record id of the field.
    pub field_id: String,
    /// Model name.
    pub model: String,
    /// Field name.
    pub field: String,
    /// Prior data type.
    pub from_type: FieldType,
    /// New data type.
    pub to_type: FieldType,
    /// Change-kind label derived from the conversion risk.
    #[serde(rename = "type")]
    pub kind: String,
    /// Conversion risk tier.
    pub risk: ConversionRisk,
}

impl TypeChangeIssue {
    /// File a type change at the given risk tier.
    pub fn new(
        field_id: impl Into<String>,
        model: impl Into<String>,
        field: impl Into<String>,
        from_type: FieldType,
        to_type: FieldType,
        risk: ConversionRisk,
    ) -> Self {
        let kind = match risk {
            ConversionRisk::Safe => kind::TYPE_CHANGE_SAFE,
            ConversionRisk::Warning => kind::TYPE_CHANGE_WIDENING,
            ConversionRisk::Blocking => kind::TYPE_CHANGE_BLOCKING,
        };
        Self {
            field_id: field_id.into(),
            model: model.into(),
            field: field.into(),
            from_type,
            to_type,
            kind: kind.to_string(),
            risk,
        }
    }

    /// Risk category of this change, from the classifier taxonomy.
    pub fn category(&self) -> Option<RiskCategory> {
        classify_change(&self.kind)
    }

    /// Whether this change blocks the generation outright.
    pub fn is_blocking(&self) -> bool {
        self.risk == ConversionRisk::Blocking
    }
}

/// Every issue detected by one diff run, filed by kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MigrationIssues {
    /// Changes absorbed without risk.
    pub safe_changes: Vec<SafeChange>,
    /// New required fields on existing models (auto-fixable).
    pub required_field_on_existing_model: Vec<RequiredFieldIssue>,
    /// Fields removed since the last generation (informational).
    pub field_removals: Vec<FieldRemovalIssue>,
    /// Models removed since the last generation (informational).
    pub model_removals: Vec<ModelRemovalIssue>,
    /// Optional fields that became required (blocking, confirmable).
    pub optional_to_required: Vec<OptionalToRequiredIssue>,
    /// Lossy or incompatible type changes.
    pub type_changes: Vec<TypeChangeIssue>,
}

impl MigrationIssues {
    /// True when every issue list is empty.
    pub fn is_empty(&self) -> bool {
        self.safe_changes.is_empty()
            && self.required_field_on_existing_model.is_empty()
            && self.field_removals.is_empty()
            && self.model_removals.is_empty()
            && self.optional_to_required.is_empty()
            && self.type_changes.is_empty()
    }

    /// Total number of filed issues across all lists.
    pub fn total(&self) -> usize {
        self.safe_changes.len()
            + self.required_field_on_existing_model.len()
            + self.field_removals.len()
            + self.model_removals.len()
            + self.optional_to_required.len()
            + self.type_changes.len()
    }

    /// Number of issues in blocking-classified lists.
    pub fn blocking_count(&self) -> usize {
        self.optional_to_required.len()
            + self
                .type_changes
                .iter()
                .filter(|change| change.is_blocking())
                .count()
    }

    /// True when any blocking-classified list is non-empty.
    pub fn has_blocking(&self) -> bool {
        self.blocking_count() > 0
    }
}

/// Aggregate counts over one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssueSummary {
    /// Sum of all issue list lengths.
    pub total_issues: usize,
    /// Number of safe changes.
    pub safe_count: usize,
    /// Number of issues in blocking-classified lists.
    pub dangerous_count: usize,
    /// Number of informational removal entries.
    pub info_count: usize,
}

/// The diff engine's verdict on one regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    /// True when no manifest existed, so there was nothing to compare.
    pub is_first_generation: bool,
    /// True when any issue list is non-empty.
    pub has_issues: bool,
    /// True when any blocking-classified list is non-empty. Fixable and
    /// informational issues never set this.
    pub has_non_safe_issues: bool,
    /// Identical to `has_non_safe_issues`; kept as a separate flag
    /// because callers gate on both names.
    pub has_dangerous_changes: bool,
    /// True when auto-fixable issues are present.
    pub has_fixable_changes: bool,
    /// The filed issues.
    pub issues: MigrationIssues,
    /// Aggregate counts.
    pub summary: IssueSummary,
}

impl MigrationReport {
    /// Report for a service with no recorded manifest.
    pub fn first_generation() -> Self {
        Self {
            is_first_generation: true,
            has_issues: false,
            has_non_safe_issues: false,
            has_dangerous_changes: false,
            has_fixable_changes: false,
            issues: MigrationIssues::default(),
            summary: IssueSummary::default(),
        }
    }

    /// Build a report from filed issues, deriving flags and summary.
    pub fn from_issues(issues: MigrationIssues) -> Self {
        let has_dangerous_changes = issues.has_blocking();
        let summary = IssueSummary {
            total_issues: issues.total(),
            safe_count: issues.safe_changes.len(),
            dangerous_count: issues.blocking_count(),
            info_count: issues.field_removals.len() + issues.model_removals.len(),
        };

        Self {
            is_first_generation: false,
            has_issues: !issues.is_empty(),
            has_non_safe_issues: has_dangerous_changes,
            has_dangerous_changes,
            has_fixable_changes: !issues.required_field_on_existing_model.is_empty(),
            issues,
            summary,
        }
    }
}
