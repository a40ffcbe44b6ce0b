//! Core type definitions for the catalog.

use serde::{Deserialize, Serialize};

/// Semantic data types a model field can declare.
///
/// The constrained string types (`Phone`, `Url`, `Slug`, `Email`,
/// `IpAddress`) share a string column representation and differ only in
/// the validation the generated backend applies on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    BigInt,
    /// Fixed-precision decimal.
    Decimal,
    /// 64-bit floating point.
    Float,
    /// Boolean value.
    Boolean,
    /// UTF-8 string.
    String,
    /// Long-form text.
    Text,
    /// Phone number.
    Phone,
    /// URL.
    Url,
    /// URL-safe slug.
    Slug,
    /// Email address.
    Email,
    /// IPv4 or IPv6 address.
    IpAddress,
    /// Calendar date.
    Date,
    /// Date and time with offset.
    DateTime,
    /// Arbitrary JSON document.
    Json,
}

impl FieldType {
    /// Every declarable field type.
    pub const ALL: [FieldType; 15] = [
        FieldType::Int,
        FieldType::BigInt,
        FieldType::Decimal,
        FieldType::Float,
        FieldType::Boolean,
        FieldType::String,
        FieldType::Text,
        FieldType::Phone,
        FieldType::Url,
        FieldType::Slug,
        FieldType::Email,
        FieldType::IpAddress,
        FieldType::Date,
        FieldType::DateTime,
        FieldType::Json,
    ];

    /// The validated string types that share a column representation.
    pub const CONSTRAINED_STRINGS: [FieldType; 5] = [
        FieldType::Phone,
        FieldType::Url,
        FieldType::Slug,
        FieldType::Email,
        FieldType::IpAddress,
    ];

    /// Check if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldType::Int | FieldType::BigInt | FieldType::Decimal | FieldType::Float
        )
    }

    /// Check if this type is stored as a string column.
    pub fn is_string_like(&self) -> bool {
        matches!(self, FieldType::String | FieldType::Text) || self.is_constrained_string()
    }

    /// Check if this type is a validated string type.
    pub fn is_constrained_string(&self) -> bool {
        Self::CONSTRAINED_STRINGS.contains(self)
    }

    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Int => "int",
            FieldType::BigInt => "big_int",
            FieldType::Decimal => "decimal",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::String => "string",
            FieldType::Text => "text",
            FieldType::Phone => "phone",
            FieldType::Url => "url",
            FieldType::Slug => "slug",
            FieldType::Email => "email",
            FieldType::IpAddress => "ip_address",
            FieldType::Date => "date",
            FieldType::DateTime => "date_time",
            FieldType::Json => "json",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
