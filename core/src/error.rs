//! Error types for DDL parsing and schema projection

use thiserror::Error;

/// Main error type for DDL parsing operations
#[derive(Error, Debug)]
pub enum DdlParseError {
    /// Missing or invalid configuration, including DDL that was never supplied
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// DDL text does not match the `CREATE TABLE` grammar
    #[error("Syntax error at line {line}, column {column}: {message}")]
    SyntaxError {
        /// Error message
        message: String,
        /// 1-based line where the grammar stopped
        line: usize,
        /// 1-based column where the grammar stopped
        column: usize,
    },

    /// Two columns of one table share a case-folded name
    #[error("Duplicate column name: '{column}'")]
    DuplicateColumn {
        /// Column name as written in the second definition
        column: String,
    },

    /// A table-level constraint names a column that is not defined
    #[error("Column not found: '{column}'")]
    ReferenceError {
        /// Column name as written in the constraint clause
        column: String,
        /// Constraint type that referenced the column
        constraint: Option<String>,
    },

    /// A column's native type has no target schema equivalent
    #[error("Unknown data type : '{data_type}'")]
    UnknownTypeError {
        /// Canonical upper-cased native type
        data_type: String,
    },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for DDL parsing operations
pub type Result<T> = std::result::Result<T, DdlParseError>;

impl DdlParseError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a new syntax error at a line and column
    #[must_use]
    pub fn syntax(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::SyntaxError {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create a syntax error positioned at `remaining`, a suffix of `source`
    #[must_use]
    pub fn syntax_at(message: impl Into<String>, source: &str, remaining: &str) -> Self {
        let offset = source.len().saturating_sub(remaining.len());
        let (line, column) = line_column(source, offset);
        Self::syntax(message, line, column)
    }

    /// Create a new duplicate column error
    #[must_use]
    pub fn duplicate_column(column: impl Into<String>) -> Self {
        Self::DuplicateColumn {
            column: column.into(),
        }
    }

    /// Whether this error means the DDL text itself is malformed
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::SyntaxError { .. } | Self::DuplicateColumn { .. })
    }

    /// Create a new reference error
    #[must_use]
    pub fn reference(column: impl Into<String>) -> Self {
        Self::ReferenceError {
            column: column.into(),
            constraint: None,
        }
    }

    /// Create a new reference error naming the referencing constraint
    #[must_use]
    pub fn reference_in(column: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self::ReferenceError {
            column: column.into(),
            constraint: Some(constraint.into()),
        }
    }

    /// Create a new unknown type error
    #[must_use]
    pub fn unknown_type(data_type: impl Into<String>) -> Self {
        Self::UnknownTypeError {
            data_type: data_type.into(),
        }
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError(message.into())
    }
}

/// 1-based line and column of a byte offset
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let consumed = &source[..offset];
    let line = consumed.matches('\n').count() + 1;
    let line_start = consumed.rfind('\n').map_or(0, |pos| pos + 1);
    let column = consumed[line_start..].chars().count() + 1;
    (line, column)
}

impl From<serde_json::Error> for DdlParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for DdlParseError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
