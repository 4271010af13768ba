//! Table, column and column collection models

pub mod column;
pub mod columns;
pub mod table;

pub use column::Column;
pub use columns::ColumnCollection;
pub use table::Table;
