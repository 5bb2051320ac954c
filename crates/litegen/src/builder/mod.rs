//! Structured SQL builders.
//!
//! Lightweight, SQLite-only, parameter-safe statement assembly.
//!
//! ## Design
//!
//! - SQL is still explicit (strings), but common patterns are structured.
//! - Table and column names are validated identifiers; values are always bound.
//! - UPDATE requires SET. DELETE without conditions clears the table.
//! - Placeholders are `?`, one per bound value, in render order.

pub mod create;
pub mod delete;
pub mod insert;
pub mod select;
pub mod shorthand;
pub mod traits;
pub mod update;
pub mod where_builder;

pub use create::{
    AUTO_INCREMENT, BLOB, ColumnDef, ColumnFragment, ColumnType, CreateTableBuilder, INTEGER,
    PRIMARY_KEY, TEXT,
};
pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::QueryBuilder;
pub use shorthand::{
    count, create_table, delete, delete_where, drop_table, exists, get, get_column, insert,
    insert_pairs, select, table_exists, update, update_where,
};
pub use traits::{MutationBuilder, SqlBuilder};
pub use update::UpdateBuilder;
pub use where_builder::WhereBuilder;
