//! # DDL Parse
//!
//! Parse `CREATE TABLE` DDL into a table model and project it onto a
//! warehouse column schema.
//!
//! The DDL text goes through a nom grammar into a small parse tree, which
//! the parser driver turns into a [`Table`]. Each [`Column`] resolves its
//! native type to a [`TargetType`] and its nullability to a [`TargetMode`].
//!
//! ```
//! use ddlparse::{NameCase, parse};
//!
//! let table = parse("CREATE TABLE users (UserId INT PRIMARY KEY, name VARCHAR(20))")?;
//! assert_eq!(table.columns()["userid"].data_type(), "INT");
//!
//! let json = table.to_target_fields_json(NameCase::Lower)?;
//! assert_eq!(
//!     json,
//!     r#"[{"name":"userid","type":"INTEGER","mode":"REQUIRED"},{"name":"name","type":"STRING","mode":"NULLABLE"}]"#
//! );
//! # Ok::<(), ddlparse::DdlParseError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Error types for parsing and projection
pub mod error;

/// Output name case conversion
pub mod naming;

/// Parser configuration
pub mod config;

/// Target schema types and native type mapping
pub mod target;

/// Table, column and column collection models
pub mod schema;

/// `CREATE TABLE` grammar and parse tree
pub mod grammar;

/// Parser driver
pub mod parser;

// Re-export commonly used types
pub use config::DdlParseConfig;
pub use error::{DdlParseError, Result};
pub use naming::NameCase;
pub use parser::{DdlParse, parse};
pub use schema::{Column, ColumnCollection, Table};
pub use target::{TargetField, TargetMode, TargetType};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::DdlParseConfig;
    pub use crate::error::{DdlParseError, Result};
    pub use crate::naming::NameCase;
    pub use crate::parser::{DdlParse, parse};
    pub use crate::schema::{Column, ColumnCollection, Table};
    pub use crate::target::{TargetField, TargetMode, TargetType};
}
