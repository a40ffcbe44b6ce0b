//! Explicit-confirmation validation for confirmable blocking changes.
//!
//! Only the optional-to-required transition is "blocking pending
//! acknowledgment". Field and model removals are informational and never
//! inspected here; incompatible type changes have no override at all.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::report::MigrationReport;

/// Build the confirmation literal required to make `field` on `model`
/// required.
///
/// Exact case, quoting, and spacing are part of the contract; callers
/// must send the literal back verbatim.
pub fn expected_confirmation(model: &str, field: &str) -> String {
    format!("REQUIRE \"{model}\".\"{field}\"")
}

/// A required confirmation the caller has not supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingConfirmation {
    /// Metadata record id of the affected field.
    pub field_id: String,
    /// Model name.
    pub model: String,
    /// Field name.
    pub field: String,
    /// The literal the caller must supply.
    pub expected_confirmation: String,
}

/// Check that every optional-to-required transition in `report` carries
/// its exact confirmation literal, keyed by field id.
///
/// Returns the unsatisfied entries; empty means the report may proceed.
/// Pure function over the report, never fails.
pub fn validate_explicit_confirmations(
    report: &MigrationReport,
    confirmations: &HashMap<String, String>,
) -> Vec<MissingConfirmation> {
    let mut missing = Vec::new();

    for issue in &report.issues.optional_to_required {
        let expected = expected_confirmation(&issue.model, &issue.field);
        let satisfied = confirmations
            .get(&issue.field_id)
            .is_some_and(|supplied| *supplied == expected);
        if !satisfied {
            missing.push(MissingConfirmation {
                field_id: issue.field_id.clone(),
                model: issue.model.clone(),
                field: issue.field.clone(),
                expected_confirmation: expected,
            });
        }
    }

    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::report::{
        FieldRemovalIssue, MigrationIssues, ModelRemovalIssue, OptionalToRequiredIssue,
    };

    fn report_with(issues: MigrationIssues) -> MigrationReport {
        MigrationReport::from_issues(issues)
    }

    #[test]
    fn test_expected_literal_is_exact() {
        assert_eq!(
            expected_confirmation("Employee", "middleName"),
            "REQUIRE \"Employee\".\"middleName\""
        );
    }

    #[test]
    fn test_exact_confirmation_satisfies() {
        let report = report_with(MigrationIssues {
            optional_to_required: vec![OptionalToRequiredIssue::new("f2", "Employee", "middleName")],
            ..Default::default()
        });
        let confirmations = HashMap::from([(
            "f2".to_string(),
            "REQUIRE \"Employee\".\"middleName\"".to_string(),
        )]);

        let missing = validate_explicit_confirmations(&report, &confirmations);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_absent_confirmation_is_reported() {
        let report = report_with(MigrationIssues {
            optional_to_required: vec![OptionalToRequiredIssue::new("f2", "Employee", "middleName")],
            ..Default::default()
        });

        let missing = validate_explicit_confirmations(&report, &HashMap::new());

        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].field_id, "f2");
        assert_eq!(
            missing[0].expected_confirmation,
            "REQUIRE \"Employee\".\"middleName\""
        );
    }

    #[test]
    fn test_near_miss_confirmations_do_not_satisfy() {
        let report = report_with(MigrationIssues {
            optional_to_required: vec![OptionalToRequiredIssue::new("f2", "Employee", "middleName")],
            ..Default::default()
        });

        for wrong in [
            "REQUIRE \"employee\".\"middleName\"",
            "REQUIRE \"Employee\".\"middlename\"",
            "REQUIRE \"Employee\".\"middleName\" ",
            "REQUIRE  \"Employee\".\"middleName\"",
            "require \"Employee\".\"middleName\"",
            "REQUIRE Employee.middleName",
        ] {
            let confirmations = HashMap::from([("f2".to_string(), wrong.to_string())]);
            let missing = validate_explicit_confirmations(&report, &confirmations);
            assert_eq!(missing.len(), 1, "{wrong:?} should not satisfy");
        }
    }

    #[test]
    fn test_confirmation_keyed_by_other_field_does_not_satisfy() {
        let report = report_with(MigrationIssues {
            optional_to_required: vec![OptionalToRequiredIssue::new("f2", "Employee", "middleName")],
            ..Default::default()
        });
        let confirmations = HashMap::from([(
            "f9".to_string(),
            "REQUIRE \"Employee\".\"middleName\"".to_string(),
        )]);

        let missing = validate_explicit_confirmations(&report, &confirmations);
        assert_eq!(missing.len(), 1);
    }

    #[test]
    fn test_removals_never_need_confirmation() {
        let report = report_with(MigrationIssues {
            field_removals: vec![FieldRemovalIssue::new("User", "legacy_code", None)],
            model_removals: vec![ModelRemovalIssue::new("Department")],
            ..Default::default()
        });

        let missing = validate_explicit_confirmations(&report, &HashMap::new());
        assert!(missing.is_empty());
    }

    #[test]
    fn test_partial_confirmations_report_only_unsatisfied() {
        let report = report_with(MigrationIssues {
            optional_to_required: vec![
                OptionalToRequiredIssue::new("f2", "Employee", "middleName"),
                OptionalToRequiredIssue::new("f3", "Employee", "badge"),
            ],
            ..Default::default()
        });
        let confirmations = HashMap::from([(
            "f2".to_string(),
            "REQUIRE \"Employee\".\"middleName\"".to_string(),
        )]);

        let missing = validate_explicit_confirmations(&report, &confirmations);

        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].field_id, "f3");
        assert_eq!(
            missing[0].expected_confirmation,
            "REQUIRE \"Employee\".\"badge\""
        );
    }
}
