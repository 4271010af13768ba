//! Ordered, case-insensitive column collection
//!
//! SQL identifiers are case-insensitive, so columns are keyed by their
//! lower-cased name while keeping declaration order for output.

use crate::error::{DdlParseError, Result};
use crate::schema::column::Column;
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Serialize, Serializer};
use std::ops::Index;

/// Columns of one table in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnCollection {
    columns: IndexMap<String, Column>,
}

fn fold_key(name: &str) -> String {
    name.to_lowercase()
}

impl ColumnCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new column built from its name, type tokens and constraint text
    ///
    /// # Errors
    ///
    /// Returns a duplicate column error if a column with the same case-folded name exists.
    pub fn append<S: AsRef<str>>(
        &mut self,
        name: &str,
        type_tokens: &[S],
        constraint: Option<&str>,
    ) -> Result<&mut Column> {
        let mut column = Column::new(name, type_tokens);
        if constraint.is_some() {
            column.set_constraint(constraint);
        }
        self.insert(column)
    }

    /// Insert an already built column
    ///
    /// # Errors
    ///
    /// Returns a duplicate column error if a column with the same case-folded name exists.
    pub fn insert(&mut self, column: Column) -> Result<&mut Column> {
        match self.columns.entry(fold_key(column.name())) {
            Entry::Occupied(_) => Err(DdlParseError::duplicate_column(column.name())),
            Entry::Vacant(entry) => Ok(entry.insert(column)),
        }
    }

    /// Look up a column by name, ignoring case
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.get(&fold_key(name))
    }

    /// Look up a column for modification by name, ignoring case
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.get_mut(&fold_key(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(&fold_key(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Declared column names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.values().map(Column::name)
    }
}

impl Index<&str> for ColumnCollection {
    type Output = Column;

    /// # Panics
    ///
    /// Panics if no column has this name.
    fn index(&self, name: &str) -> &Column {
        match self.get(name) {
            Some(column) => column,
            None => panic!("no column named '{name}'"),
        }
    }
}

impl<'a> IntoIterator for &'a ColumnCollection {
    type Item = &'a Column;
    type IntoIter = indexmap::map::Values<'a, String, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.values()
    }
}

impl Serialize for ColumnCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.columns.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        let mut columns = ColumnCollection::new();
        columns.append("UserId", &["INT"], None).unwrap();

        assert!(columns.contains("userid"));
        assert_eq!(columns.get("USERID").unwrap().name(), "UserId");
        assert_eq!(columns["userId"].data_type(), "INT");
    }

    #[test]
    fn test_insertion_order() {
        let mut columns = ColumnCollection::new();
        for name in ["zeta", "Alpha", "mid"] {
            columns.append(name, &["TEXT"], None).unwrap();
        }
        assert_eq!(columns.names().collect::<Vec<_>>(), vec!["zeta", "Alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut columns = ColumnCollection::new();
        columns.append("id", &["INT"], None).unwrap();
        let err = columns.append("ID", &["BIGINT"], None).unwrap_err();
        assert!(matches!(err, DdlParseError::DuplicateColumn { .. }));
        assert!(err.is_syntax());
        assert_eq!(columns.len(), 1);
        assert_eq!(columns["id"].data_type(), "INT");
    }

    #[test]
    fn test_append_with_constraint() {
        let mut columns = ColumnCollection::new();
        let column = columns.append("id", &["INT"], Some("NOT NULL")).unwrap();
        assert!(column.not_null());
    }

    #[test]
    fn test_back_patch() {
        let mut columns = ColumnCollection::new();
        columns.append("Email", &["VARCHAR", "255"], None).unwrap();
        columns.get_mut("EMAIL").unwrap().set_unique(true);
        assert!(columns["email"].unique());
    }

    #[test]
    #[should_panic(expected = "no column named 'missing'")]
    fn test_index_missing_panics() {
        let columns = ColumnCollection::new();
        let _ = &columns["missing"];
    }
}
