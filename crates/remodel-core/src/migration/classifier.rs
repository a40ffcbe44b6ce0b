//! Risk classification for schema change kinds.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Change-kind labels produced by the diff engine.
///
/// The labels are stable strings because they travel through reports and
/// into generation logs.
pub mod kind {
    /// A model absent from the manifest was added.
    pub const NEW_MODEL: &str = "new_model";
    /// A required field was added to a model that already has rows.
    pub const NEW_REQUIRED_FIELD: &str = "new_required_field";
    /// A field's type changed losslessly.
    pub const TYPE_CHANGE_SAFE: &str = "type_change_safe";
    /// A field's type changed with tolerable loss.
    pub const TYPE_CHANGE_WIDENING: &str = "type_change_widening";
    /// A field's type changed incompatibly.
    pub const TYPE_CHANGE_BLOCKING: &str = "type_change_blocking";
    /// A model present in the manifest is gone from the current set.
    pub const DROP_TABLE: &str = "drop_table";
    /// A field present in the manifest is gone from its model.
    pub const DROP_COLUMN: &str = "drop_column";
    /// A previously optional field became required.
    pub const OPTIONAL_TO_REQUIRED: &str = "optional_to_required";
}

/// How a detected change gates the regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCategory {
    /// The engine heals the change itself before generation proceeds.
    AutoFixable,
    /// Proceeds only with an explicit per-field confirmation.
    ConfirmToProceed,
    /// Stops generation; there is no override.
    Blocking,
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskCategory::AutoFixable => write!(f, "AUTO_FIXABLE"),
            RiskCategory::ConfirmToProceed => write!(f, "CONFIRM_TO_PROCEED"),
            RiskCategory::Blocking => write!(f, "BLOCKING"),
        }
    }
}

static AUTO_FIXABLE: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from([kind::NEW_REQUIRED_FIELD]));

static CONFIRM_TO_PROCEED: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from([kind::TYPE_CHANGE_WIDENING]));

static BLOCKING: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        kind::DROP_TABLE,
        kind::DROP_COLUMN,
        kind::OPTIONAL_TO_REQUIRED,
        kind::TYPE_CHANGE_BLOCKING,
    ])
});

/// Map a change-kind label to its risk category.
///
/// Returns `None` for labels outside the taxonomy. Callers decide the
/// fail-safe policy for unknown kinds; the classifier never guesses.
pub fn classify_change(kind: &str) -> Option<RiskCategory> {
    if AUTO_FIXABLE.contains(kind) {
        Some(RiskCategory::AutoFixable)
    } else if CONFIRM_TO_PROCEED.contains(kind) {
        Some(RiskCategory::ConfirmToProceed)
    } else if BLOCKING.contains(kind) {
        Some(RiskCategory::Blocking)
    } else {
        None
    }
}
