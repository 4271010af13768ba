//! Warehouse column schema: target types, modes and the native type mapping
//!
//! Native SQL types are resolved against an ordered rule table. The first
//! target type with a matching rule wins, so the order of [`TYPE_RULES`]
//! is significant: `CHAR`/`TEXT` are tested before the integer patterns,
//! and only exact spellings reach the temporal types.

use crate::error::{DdlParseError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Closed set of target column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetType {
    String,
    Integer,
    Float,
    Date,
    Time,
    DateTime,
    Timestamp,
    Boolean,
}

impl TargetType {
    /// Schema spelling of the type
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::DateTime => "DATETIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Boolean => "BOOLEAN",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column mode derived from nullability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetMode {
    Required,
    Nullable,
}

impl TargetMode {
    /// `REQUIRED` for not-null columns, `NULLABLE` otherwise
    #[must_use]
    pub fn from_not_null(not_null: bool) -> Self {
        if not_null { Self::Required } else { Self::Nullable }
    }

    /// Schema spelling of the mode
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "REQUIRED",
            Self::Nullable => "NULLABLE",
        }
    }
}

impl fmt::Display for TargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of the target schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetField {
    /// Column name after case conversion
    pub name: String,

    /// Target column type
    #[serde(rename = "type")]
    pub field_type: TargetType,

    /// Target column mode
    pub mode: TargetMode,
}

/// A single match condition against a canonical native type
enum TypeRule {
    /// Whole type string equals the value
    Exact(&'static str),
    /// Pattern found anywhere in the type string
    Contains(&'static LazyLock<Regex>),
}

impl TypeRule {
    fn matches(&self, data_type: &str) -> bool {
        match self {
            Self::Exact(name) => data_type == *name,
            Self::Contains(pattern) => pattern.is_match(data_type),
        }
    }
}

static STRING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("CHAR|TEXT").expect("valid string type pattern"));
static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("INT|SERIAL|YEAR").expect("valid integer type pattern"));
static FLOAT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("FLOAT|DOUBLE").expect("valid float type pattern"));
static BOOLEAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("BOOL").expect("valid boolean type pattern"));

/// Ordered mapping from target type to its match rules
static TYPE_RULES: &[(TargetType, &[TypeRule])] = &[
    (TargetType::String, &[TypeRule::Contains(&STRING_PATTERN)]),
    (TargetType::Integer, &[TypeRule::Contains(&INTEGER_PATTERN)]),
    (
        TargetType::Float,
        &[
            TypeRule::Contains(&FLOAT_PATTERN),
            TypeRule::Exact("REAL"),
            TypeRule::Exact("MONEY"),
        ],
    ),
    (TargetType::Date, &[TypeRule::Exact("DATE")]),
    (
        TargetType::Time,
        &[TypeRule::Exact("TIME"), TypeRule::Exact("TIME WITHOUT TIME ZONE")],
    ),
    (
        TargetType::DateTime,
        &[
            TypeRule::Exact("DATETIME"),
            TypeRule::Exact("TIMESTAMP"),
            TypeRule::Exact("TIMESTAMP WITHOUT TIME ZONE"),
        ],
    ),
    (
        TargetType::Timestamp,
        &[
            TypeRule::Exact("TIMESTAMPTZ"),
            TypeRule::Exact("TIMESTAMP WITH TIME ZONE"),
        ],
    ),
    (TargetType::Boolean, &[TypeRule::Contains(&BOOLEAN_PATTERN)]),
];

/// Resolve a canonical native type to its target type
///
/// Fixed-point `NUMERIC`/`DECIMAL` fall back to `INTEGER` without a scale
/// and `FLOAT` with one.
///
/// # Errors
///
/// Returns [`DdlParseError::UnknownTypeError`] when no rule matches.
pub fn resolve_target_type(data_type: &str, scale: Option<u32>) -> Result<TargetType> {
    let matched = TYPE_RULES.iter().find_map(|(target, rules)| {
        rules
            .iter()
            .any(|rule| rule.matches(data_type))
            .then_some(*target)
    });

    match matched {
        Some(target) => Ok(target),
        None if matches!(data_type, "NUMERIC" | "DECIMAL") => Ok(if scale.is_none() {
            TargetType::Integer
        } else {
            TargetType::Float
        }),
        None => Err(DdlParseError::unknown_type(data_type)),
    }
}
