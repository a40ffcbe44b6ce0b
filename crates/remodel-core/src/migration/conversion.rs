//! Type-conversion risk tables.
//!
//! Lookup tables describing which data-type changes a regeneration can
//! apply without losing data, which are lossy but tolerable, and which
//! are disallowed outright. The tables are built once on first use and
//! never mutated.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::catalog::FieldType;

/// Risk tier of converting a field from one data type to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionRisk {
    /// Lossless; the regeneration applies it silently.
    Safe,
    /// Lossy but tolerable (narrowing numerics, loosened constraints).
    Warning,
    /// Disallowed without a manual data migration.
    Blocking,
}

impl std::fmt::Display for ConversionRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionRisk::Safe => write!(f, "safe"),
            ConversionRisk::Warning => write!(f, "warning"),
            ConversionRisk::Blocking => write!(f, "blocking"),
        }
    }
}

/// Conversions that preserve every stored value.
static SAFE_CONVERSIONS: LazyLock<HashMap<FieldType, HashSet<FieldType>>> = LazyLock::new(|| {
    use FieldType::*;

    let mut table = HashMap::new();
    table.insert(Int, HashSet::from([BigInt, Decimal, Float, String]));
    table.insert(Float, HashSet::from([Decimal, String]));
    table.insert(Boolean, HashSet::from([String]));
    table.insert(
        Text,
        HashSet::from([Phone, Url, Slug, Email, IpAddress, String]),
    );
    table.insert(
        String,
        HashSet::from([Phone, Url, Slug, Email, IpAddress, Text]),
    );

    // Constrained strings convert freely among themselves and to String.
    // Only the validation constraint changes, never the stored bytes.
    for from in FieldType::CONSTRAINED_STRINGS {
        let mut targets: HashSet<FieldType> = FieldType::CONSTRAINED_STRINGS
            .into_iter()
            .filter(|to| *to != from)
            .collect();
        targets.insert(String);
        table.insert(from, targets);
    }

    table
});

/// Conversions that can truncate or lose precision but stay representable.
static WARNING_CONVERSIONS: LazyLock<HashMap<FieldType, HashSet<FieldType>>> =
    LazyLock::new(|| {
        use FieldType::*;

        let mut table = HashMap::new();
        table.insert(Decimal, HashSet::from([Float]));
        table.insert(BigInt, HashSet::from([Int]));
        // Text -> String also appears in the safe table, which wins on
        // lookup; the entry here is kept for the declared policy.
        table.insert(Text, HashSet::from([String]));
        table
    });

/// Check whether converting `from` to `to` preserves data.
///
/// Identity is always safe.
pub fn is_conversion_safe(from: FieldType, to: FieldType) -> bool {
    from == to
        || SAFE_CONVERSIONS
            .get(&from)
            .is_some_and(|targets| targets.contains(&to))
}

/// Risk tier for converting `from` to `to`.
///
/// The safe table is consulted first, then the warning table; any pair
/// listed in neither is blocking.
pub fn conversion_risk(from: FieldType, to: FieldType) -> ConversionRisk {
    if is_conversion_safe(from, to) {
        ConversionRisk::Safe
    } else if WARNING_CONVERSIONS
        .get(&from)
        .is_some_and(|targets| targets.contains(&to))
    {
        ConversionRisk::Warning
    } else {
        ConversionRisk::Blocking
    }
}
