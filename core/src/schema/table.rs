//! Table definition model

use crate::error::Result;
use crate::naming::NameCase;
use crate::schema::columns::ColumnCollection;
use crate::target::TargetField;
use serde::Serialize;

/// A parsed `CREATE TABLE` definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    schema: Option<String>,
    name: String,
    is_temporary: bool,
    columns: ColumnCollection,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Schema qualifier, if the DDL qualified the table name
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn set_schema(&mut self, schema: Option<String>) {
        self.schema = schema;
    }

    /// Schema qualifier converted to `name_case`
    #[must_use]
    pub fn schema_with_case(&self, name_case: NameCase) -> Option<String> {
        self.schema
            .as_deref()
            .map(|schema| name_case.apply(schema).into_owned())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Table name converted to `name_case`
    #[must_use]
    pub fn name_with_case(&self, name_case: NameCase) -> String {
        name_case.apply(&self.name).into_owned()
    }

    /// Whether the table was declared `TEMP` or `TEMPORARY`
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        self.is_temporary
    }

    pub fn set_temporary(&mut self, flag: bool) {
        self.is_temporary = flag;
    }

    #[must_use]
    pub fn columns(&self) -> &ColumnCollection {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut ColumnCollection {
        &mut self.columns
    }

    /// Target schema fields, one per column in declaration order
    ///
    /// # Errors
    ///
    /// Returns the first column's unknown type error; no partial list is produced.
    pub fn to_target_fields(&self, name_case: NameCase) -> Result<Vec<TargetField>> {
        self.columns
            .iter()
            .map(|column| column.to_target_field(name_case))
            .collect()
    }

    /// Target schema fields serialized as a JSON array
    ///
    /// # Errors
    ///
    /// Returns the first column's unknown type error.
    pub fn to_target_fields_json(&self, name_case: NameCase) -> Result<String> {
        Ok(serde_json::to_string(&self.to_target_fields(name_case)?)?)
    }
}
