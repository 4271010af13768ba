//! Parser driver: runs the grammar and populates a [`Table`]

use crate::config::DdlParseConfig;
use crate::error::{DdlParseError, Result};
use crate::grammar::{self, BodyElement, ConstraintClause, ConstraintKind, CreateTable};
use crate::naming::NameCase;
use crate::schema::Table;
use tracing::{debug, trace};

/// DDL parser holding the source text and configuration
///
/// Each call to [`DdlParse::parse`] builds a fresh [`Table`]; nothing is
/// carried over between calls.
#[derive(Debug, Clone, Default)]
pub struct DdlParse {
    ddl: Option<String>,
    config: DdlParseConfig,
}

impl DdlParse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser for `ddl`
    pub fn with_ddl(ddl: impl Into<String>) -> Self {
        Self {
            ddl: Some(ddl.into()),
            ..Self::default()
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: DdlParseConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn ddl(&self) -> Option<&str> {
        self.ddl.as_deref()
    }

    pub fn set_ddl(&mut self, ddl: impl Into<String>) {
        self.ddl = Some(ddl.into());
    }

    #[must_use]
    pub fn config(&self) -> &DdlParseConfig {
        &self.config
    }

    /// Name case used for target schema projection
    #[must_use]
    pub fn name_case(&self) -> NameCase {
        self.config.name_case
    }

    /// Parse the stored DDL text
    ///
    /// # Errors
    ///
    /// - [`DdlParseError::ConfigError`] if no DDL text is set or it is blank
    /// - [`DdlParseError::SyntaxError`] or [`DdlParseError::DuplicateColumn`]
    ///   if the text is malformed
    /// - [`DdlParseError::ReferenceError`] if a table constraint names an
    ///   unknown column
    pub fn parse(&self) -> Result<Table> {
        let ddl = self
            .ddl
            .as_deref()
            .filter(|ddl| !ddl.trim().is_empty())
            .ok_or_else(|| DdlParseError::config("DDL is not specified"))?;

        debug!(length = ddl.len(), "parsing DDL");
        let statement = grammar::parse_create_table(ddl)?;
        let table = self.build_table(statement)?;
        debug!(
            table = table.name(),
            columns = table.columns().len(),
            "parsed table"
        );
        Ok(table)
    }

    /// Store `ddl` and parse it
    ///
    /// # Errors
    ///
    /// See [`DdlParse::parse`].
    pub fn parse_ddl(&mut self, ddl: impl Into<String>) -> Result<Table> {
        self.set_ddl(ddl);
        self.parse()
    }

    fn build_table(&self, statement: CreateTable) -> Result<Table> {
        let mut table = Table::new(statement.name);
        table.set_schema(statement.schema);
        table.set_temporary(statement.temporary);

        let mut deferred = Vec::new();
        for element in statement.elements {
            match element {
                BodyElement::Column(clause) => {
                    trace!(column = %clause.name, "adding column");
                    table.columns_mut().append(
                        &clause.name,
                        &clause.type_tokens,
                        clause.constraint.as_deref(),
                    )?;
                }
                BodyElement::Constraint(clause) if self.config.resolve_forward_references => {
                    deferred.push(clause);
                }
                BodyElement::Constraint(clause) => apply_constraint(&mut table, &clause)?,
                BodyElement::Suppressed(kind) => {
                    trace!(?kind, "skipping clause without column schema");
                }
            }
        }

        for clause in &deferred {
            apply_constraint(&mut table, clause)?;
        }

        Ok(table)
    }
}

/// Apply a table-level constraint to the columns it names
fn apply_constraint(table: &mut Table, clause: &ConstraintClause) -> Result<()> {
    trace!(
        kind = %clause.kind,
        name = clause.name.as_deref(),
        columns = ?clause.columns,
        "applying table constraint"
    );

    for name in &clause.columns {
        let column = table
            .columns_mut()
            .get_mut(name)
            .ok_or_else(|| DdlParseError::reference_in(name, clause.kind.as_str()))?;

        match clause.kind {
            ConstraintKind::PrimaryKey => {
                column.set_not_null(true);
                column.set_primary_key(true);
            }
            ConstraintKind::Unique | ConstraintKind::UniqueKey => column.set_unique(true),
            ConstraintKind::NotNull => column.set_not_null(true),
        }
    }
    Ok(())
}

/// Parse `ddl` with the default configuration
///
/// # Errors
///
/// See [`DdlParse::parse`].
pub fn parse(ddl: &str) -> Result<Table> {
    DdlParse::with_ddl(ddl).parse()
}
