//! Column definition model

use crate::error::Result;
use crate::naming::NameCase;
use crate::target::{TargetField, TargetMode, TargetType, resolve_target_type};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::{debug, warn};

static NOT_NULL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("NOT NULL|PRIMARY KEY").expect("valid not-null pattern"));
static PRIMARY_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("PRIMARY KEY").expect("valid primary key pattern"));
static UNIQUE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("UNIQUE").expect("valid unique pattern"));
static SIZE_SPEC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*,*\s*(\d*)").expect("valid size spec pattern"));

/// A single column of a parsed table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    name: String,
    data_type: String,
    length: Option<u32>,
    scale: Option<u32>,
    not_null: bool,
    primary_key: bool,
    unique: bool,
}

impl Column {
    /// Create a column from its name and type tokens
    ///
    /// `type_tokens[0]` is the base type; see [`Column::set_data_type`].
    pub fn new<S: AsRef<str>>(name: impl Into<String>, type_tokens: &[S]) -> Self {
        let mut column = Self {
            name: name.into(),
            data_type: String::new(),
            length: None,
            scale: None,
            not_null: false,
            primary_key: false,
            unique: false,
        };
        column.set_data_type(type_tokens);
        column
    }

    /// Column name as declared
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the column
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Column name converted to `name_case`
    #[must_use]
    pub fn name_with_case(&self, name_case: NameCase) -> String {
        name_case.apply(&self.name).into_owned()
    }

    /// Canonical upper-cased native type, e.g. `DOUBLE PRECISION`
    #[must_use]
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    /// Declared length, or numeric precision
    #[must_use]
    pub fn length(&self) -> Option<u32> {
        self.length
    }

    /// Numeric precision; same value as [`Column::length`]
    #[must_use]
    pub fn precision(&self) -> Option<u32> {
        self.length
    }

    /// Non-zero fractional digit count of a fixed-point type
    #[must_use]
    pub fn scale(&self) -> Option<u32> {
        self.scale
    }

    /// Resolve the native type from its tokens
    ///
    /// The first token is upper-cased into the base type. Each following
    /// token is either a size spec (`10` or `10,2`), which sets length and
    /// scale, or a qualifier that is appended to the base type. A scale of
    /// zero is stored as absent.
    pub fn set_data_type<S: AsRef<str>>(&mut self, type_tokens: &[S]) {
        self.length = None;
        self.scale = None;

        let mut tokens = type_tokens.iter().map(AsRef::as_ref);
        self.data_type = tokens.next().unwrap_or_default().trim().to_uppercase();

        for token in tokens {
            if let Some(captures) = SIZE_SPEC_PATTERN.captures(token) {
                self.length = parse_size(&captures[1]);
                self.scale = match &captures[2] {
                    "" => None,
                    digits => parse_size(digits).filter(|scale| *scale != 0),
                };
            } else {
                let qualifier = token.trim().to_uppercase();
                if !qualifier.is_empty() {
                    self.data_type.push(' ');
                    self.data_type.push_str(&qualifier);
                }
            }
        }
    }

    /// Canonical constraint text rebuilt from the flags
    ///
    /// `PRIMARY KEY` or `NOT NULL`, followed by `UNIQUE`, space-joined.
    #[must_use]
    pub fn constraint(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if self.not_null {
            parts.push(if self.primary_key { "PRIMARY KEY" } else { "NOT NULL" });
        }
        if self.unique {
            parts.push("UNIQUE");
        }
        parts.join(" ")
    }

    /// Set the constraint flags from free-form column constraint text
    ///
    /// Detection is keyword based on the upper-cased text. Each keyword
    /// matches anywhere, including inside a default value.
    pub fn set_constraint(&mut self, constraint: Option<&str>) {
        let text = constraint.map(str::to_uppercase).unwrap_or_default();
        self.not_null = NOT_NULL_PATTERN.is_match(&text);
        self.primary_key = PRIMARY_KEY_PATTERN.is_match(&text);
        self.unique = UNIQUE_PATTERN.is_match(&text);
    }

    /// Set the constraint flags and return the column
    #[must_use]
    pub fn with_constraint(mut self, constraint: &str) -> Self {
        self.set_constraint(Some(constraint));
        self
    }

    #[must_use]
    pub fn not_null(&self) -> bool {
        self.not_null
    }

    /// Clearing not-null also clears primary key
    pub fn set_not_null(&mut self, flag: bool) {
        self.not_null = flag;
        if !flag {
            self.primary_key = false;
        }
    }

    #[must_use]
    pub fn primary_key(&self) -> bool {
        self.primary_key
    }

    /// Setting primary key also sets not-null
    pub fn set_primary_key(&mut self, flag: bool) {
        self.primary_key = flag;
        if flag {
            self.not_null = true;
        }
    }

    #[must_use]
    pub fn unique(&self) -> bool {
        self.unique
    }

    pub fn set_unique(&mut self, flag: bool) {
        self.unique = flag;
    }

    /// Target schema type of this column
    ///
    /// # Errors
    ///
    /// Returns an unknown type error when the native type has no mapping.
    pub fn target_type(&self) -> Result<TargetType> {
        resolve_target_type(&self.data_type, self.scale).inspect_err(|err| {
            debug!(column = %self.name, error = %err, "no target type for column");
        })
    }

    /// `REQUIRED` when not-null, otherwise `NULLABLE`
    #[must_use]
    pub fn target_mode(&self) -> TargetMode {
        TargetMode::from_not_null(self.not_null)
    }

    /// Target schema field for this column
    ///
    /// # Errors
    ///
    /// Returns an unknown type error when the native type has no mapping.
    pub fn to_target_field(&self, name_case: NameCase) -> Result<TargetField> {
        Ok(TargetField {
            name: self.name_with_case(name_case),
            field_type: self.target_type()?,
            mode: self.target_mode(),
        })
    }

    /// Target schema field serialized as a JSON object
    ///
    /// # Errors
    ///
    /// Returns an unknown type error when the native type has no mapping.
    pub fn to_target_field_json(&self, name_case: NameCase) -> Result<String> {
        Ok(serde_json::to_string(&self.to_target_field(name_case)?)?)
    }
}

fn parse_size(digits: &str) -> Option<u32> {
    digits
        .parse()
        .inspect_err(|_| warn!(size = digits, "declared size out of range, ignoring"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DdlParseError;

    #[test]
    fn test_base_type_upper_cased() {
        let column = Column::new("name", &["varchar"]);
        assert_eq!(column.data_type(), "VARCHAR");
        assert_eq!(column.length(), None);
        assert_eq!(column.scale(), None);
    }

    #[test]
    fn test_length_and_scale() {
        let column = Column::new("price", &["numeric", "10,2"]);
        assert_eq!(column.data_type(), "NUMERIC");
        assert_eq!(column.length(), Some(10));
        assert_eq!(column.precision(), Some(10));
        assert_eq!(column.scale(), Some(2));

        let column = Column::new("amount", &["NUMERIC", "10 , 0"]);
        assert_eq!(column.length(), Some(10));
        assert_eq!(column.scale(), None);

        let column = Column::new("code", &["CHAR", "3"]);
        assert_eq!(column.length(), Some(3));
        assert_eq!(column.scale(), None);
    }

    #[test]
    fn test_qualifier_appended() {
        let column = Column::new("created", &["timestamp", "with time zone"]);
        assert_eq!(column.data_type(), "TIMESTAMP WITH TIME ZONE");
        assert_eq!(column.length(), None);

        let column = Column::new("body", &["VARCHAR", "MAX"]);
        assert_eq!(column.data_type(), "VARCHAR MAX");
    }

    #[test]
    fn test_qualifier_and_size() {
        let column = Column::new("created", &["TIMESTAMP", "3", "WITH TIME ZONE"]);
        assert_eq!(column.data_type(), "TIMESTAMP WITH TIME ZONE");
        assert_eq!(column.length(), Some(3));
    }

    #[test]
    fn test_oversized_length_dropped() {
        let column = Column::new("blob", &["VARCHAR", "99999999999"]);
        assert_eq!(column.data_type(), "VARCHAR");
        assert_eq!(column.length(), None);
    }

    #[test]
    fn test_constraint_detection() {
        let column = Column::new("id", &["INT"]).with_constraint("primary key");
        assert!(column.not_null());
        assert!(column.primary_key());
        assert!(!column.unique());
        assert_eq!(column.constraint(), "PRIMARY KEY");

        let column = Column::new("email", &["VARCHAR"]).with_constraint("NOT NULL UNIQUE");
        assert!(column.not_null());
        assert!(!column.primary_key());
        assert!(column.unique());
        assert_eq!(column.constraint(), "NOT NULL UNIQUE");

        let column = Column::new("note", &["TEXT"]).with_constraint("DEFAULT ''");
        assert_eq!(column.constraint(), "");
    }

    #[test]
    fn test_constraint_over_match() {
        // keywords inside a default value still set the flag
        let column = Column::new("kind", &["VARCHAR"]).with_constraint("DEFAULT 'unique'");
        assert!(column.unique());
    }

    #[test]
    fn test_clear_constraint() {
        let mut column = Column::new("id", &["INT"]).with_constraint("PRIMARY KEY UNIQUE");
        column.set_constraint(None);
        assert!(!column.not_null());
        assert!(!column.primary_key());
        assert!(!column.unique());
    }

    #[test]
    fn test_primary_key_implies_not_null() {
        let mut column = Column::new("id", &["INT"]);
        column.set_primary_key(true);
        assert!(column.not_null());

        column.set_not_null(false);
        assert!(!column.primary_key());
    }

    #[test]
    fn test_target_projection() {
        assert_eq!(Column::new("a", &["CHAR", "10"]).target_type().unwrap(), TargetType::String);
        assert_eq!(Column::new("a", &["INT"]).target_type().unwrap(), TargetType::Integer);
        assert_eq!(Column::new("a", &["DOUBLE"]).target_type().unwrap(), TargetType::Float);
        assert_eq!(
            Column::new("a", &["NUMERIC", "10,0"]).target_type().unwrap(),
            TargetType::Integer
        );
        assert_eq!(
            Column::new("a", &["NUMERIC", "10,2"]).target_type().unwrap(),
            TargetType::Float
        );
        assert!(matches!(
            Column::new("a", &["GEOMETRY"]).target_type(),
            Err(DdlParseError::UnknownTypeError { .. })
        ));
    }

    #[test]
    fn test_target_field() {
        let column = Column::new("UserId", &["BIGINT"]).with_constraint("NOT NULL");
        let field = column.to_target_field(NameCase::Upper).unwrap();
        assert_eq!(field.name, "USERID");
        assert_eq!(field.field_type, TargetType::Integer);
        assert_eq!(field.mode, TargetMode::Required);

        assert_eq!(
            column.to_target_field_json(NameCase::Original).unwrap(),
            r#"{"name":"UserId","type":"INTEGER","mode":"REQUIRED"}"#
        );
    }
}
