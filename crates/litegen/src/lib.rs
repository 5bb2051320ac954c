//! # litegen
//!
//! SQL statement generation over an embedded SQLite store.
//!
//! ## Features
//!
//! - **Compact call sites**: tables, column descriptors, condition triples and
//!   flat name/value lists in, SQL text plus ordered binds out
//! - **Bound values only**: every value goes through a `?` placeholder; table
//!   and column names are validated identifiers; operators are a closed set
//! - **Explicit errors**: every operation returns [`LiteResult`]; storage
//!   faults are logged through `tracing` before they are returned
//! - **Thin storage handle**: [`Database`] opens a file under a per-user or
//!   system data directory and runs statements through `rusqlite`
//!
//! ## Statements
//!
//! ```
//! use litegen::{conditions, create_table, columns, select, INTEGER, PRIMARY_KEY, TEXT};
//!
//! let create = create_table("t", &columns!["id", INTEGER, PRIMARY_KEY, "val", TEXT]).unwrap();
//! assert_eq!(create.sql(), "CREATE TABLE t (id INTEGER PRIMARY KEY, val TEXT)");
//!
//! let conds = conditions![("id", ">", 1), ("id", "<", 3)].unwrap();
//! let query = select("t", &["id", "val"], &conds).unwrap();
//! assert_eq!(query.sql(), "SELECT id, val FROM t WHERE id>? AND id<?");
//! assert_eq!(query.binds().len(), 2);
//! ```
//!
//! ## Builders
//!
//! ```
//! use litegen::{Database, MutationBuilder, SqlBuilder, UpdateBuilder};
//!
//! let db = Database::open_in_memory().unwrap();
//! db.execute_batch("CREATE TABLE t (id INTEGER, val TEXT); INSERT INTO t VALUES (1, 'a');")
//!     .unwrap();
//!
//! let mut update = UpdateBuilder::new("t");
//! update.set("val", "b").and_eq("id", 1);
//! assert_eq!(update.execute(&db).unwrap(), 1);
//! ```

pub mod builder;
pub mod client;
pub mod condition;
pub mod config;
pub mod database;
pub mod error;
pub mod ident;
pub mod log;
pub mod path;
pub mod row;
pub mod sql;
pub mod statement;
pub mod value;

pub use builder::{
    AUTO_INCREMENT, BLOB, ColumnDef, ColumnFragment, ColumnType, CreateTableBuilder,
    DeleteBuilder, INTEGER, InsertBuilder, MutationBuilder, PRIMARY_KEY, QueryBuilder,
    SqlBuilder, TEXT, UpdateBuilder, WhereBuilder, count, create_table, delete, delete_where,
    drop_table, exists, get, get_column, insert, insert_pairs, select, table_exists, update,
    update_where,
};
pub use client::Executor;
pub use condition::{Condition, Op};
pub use config::{DatabaseConfig, LogConfig, OpenMode};
pub use database::Database;
pub use error::{LiteError, LiteResult};
pub use ident::Ident;
pub use log::SqlLogger;
pub use path::{DEFAULT_DB_NAME, DbLocation, FixedDir, PathResolver, SystemPaths};
pub use row::{FromRecord, Record};
pub use sql::{Sql, sql};
pub use statement::Statement;
pub use value::Value;
