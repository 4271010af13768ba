//! Parse tree of a `CREATE TABLE` statement

use std::fmt;

/// The first `CREATE TABLE` statement of a DDL text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTable {
    /// `TEMP` / `TEMPORARY` marker present
    pub temporary: bool,
    /// `IF NOT EXISTS` present
    pub if_not_exists: bool,
    /// Schema qualifier of the table name
    pub schema: Option<String>,
    /// Table name without quotes
    pub name: String,
    /// Body elements in source order
    pub elements: Vec<BodyElement>,
}

/// One comma-separated element of the table body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyElement {
    Column(ColumnClause),
    Constraint(ConstraintClause),
    /// Index, foreign key or check clause; carries no column schema
    Suppressed(SuppressedClause),
}

/// `<name> <type-tokens> [constraint text]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnClause {
    pub name: String,
    /// Base type followed by qualifier keywords and the raw size spec
    pub type_tokens: Vec<String>,
    /// Trailing text after the type, if any
    pub constraint: Option<String>,
}

/// `[CONSTRAINT <name>] <kind> [<index name>] (<col>, ...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintClause {
    pub name: Option<String>,
    pub kind: ConstraintKind,
    pub index_name: Option<String>,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    /// `UNIQUE KEY` or `UNIQUE INDEX`
    UniqueKey,
    NotNull,
}

impl ConstraintKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY KEY",
            Self::Unique => "UNIQUE",
            Self::UniqueKey => "UNIQUE KEY",
            Self::NotNull => "NOT NULL",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuppressedClause {
    /// `KEY`, `INDEX`, `FULLTEXT` or `SPATIAL` index declaration
    Index,
    ForeignKey,
    Check,
}
