//! Storage handle over a SQLite database file.
//!
//! [`Database`] owns one `rusqlite::Connection` and runs generated
//! statements through it. Every statement is logged before it runs; every
//! failure (bad input, closed handle, storage fault) is logged at `ERROR`
//! and then returned to the caller.

use crate::builder::{ColumnFragment, shorthand};
use crate::client::{Executor, query_with_columns};
use crate::condition::{Condition, IntoOp};
use crate::config::{DatabaseConfig, OpenMode};
use crate::error::{LiteError, LiteResult};
use crate::log::SqlLogger;
use crate::path::{DbLocation, PathResolver};
use crate::row::Record;
use crate::statement::Statement;
use crate::value::Value;
use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets::UTF8_FULL};
use rusqlite::Connection;
use std::io::Write;
use std::path::{Path, PathBuf};

/// An open (or closed) SQLite database.
///
/// # Example
///
/// ```
/// use litegen::{Database, columns, values, INTEGER, PRIMARY_KEY, TEXT};
///
/// let db = Database::open_in_memory().unwrap();
/// db.create_table("t", &columns!["id", INTEGER, PRIMARY_KEY, "val", TEXT]).unwrap();
/// db.insert("t", &values!["id", "val", 1, "a"]).unwrap();
///
/// let rows = db.get("t", "id", 1).unwrap();
/// assert_eq!(rows[0].try_get::<String>("val").unwrap(), "a");
/// ```
#[derive(Debug)]
pub struct Database {
    conn: Option<Connection>,
    location: Option<DbLocation>,
    logger: SqlLogger,
}

impl Database {
    /// Open the database described by `config`; see
    /// [`DatabaseConfig::location`] for how the file is found.
    pub fn open(config: &DatabaseConfig) -> LiteResult<Self> {
        config.validate()?;
        let logger = SqlLogger::from_config(&config.log)?;
        Self::open_location(config.location()?, &config.mode, logger)
    }

    /// Open with an explicit default-directory resolver.
    pub fn open_with(config: &DatabaseConfig, resolver: &dyn PathResolver) -> LiteResult<Self> {
        config.validate()?;
        let logger = SqlLogger::from_config(&config.log)?;
        let location = DbLocation::resolve(&config.name, resolver)?;
        Self::open_location(location, &config.mode, logger)
    }

    /// Open a database file with default flags, creating it if needed.
    pub fn open_path(path: impl AsRef<Path>) -> LiteResult<Self> {
        let location = DbLocation::from_path(path)?;
        Self::open_location(location, &OpenMode::default(), SqlLogger::default())
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> LiteResult<Self> {
        let conn = Connection::open_in_memory().map_err(|source| LiteError::Open {
            path: ":memory:".to_string(),
            source,
        })?;
        Ok(Self {
            conn: Some(conn),
            location: None,
            logger: SqlLogger::default(),
        })
    }

    fn open_location(location: DbLocation, mode: &OpenMode, logger: SqlLogger) -> LiteResult<Self> {
        if mode.create {
            location.create_dir()?;
        }
        let path = location.full_path();
        let conn = Connection::open_with_flags(&path, mode.to_flags()).map_err(|source| {
            let err = LiteError::Open {
                path: path.display().to_string(),
                source,
            };
            logger.log_failure("open", &err);
            err
        })?;
        tracing::info!(target: "litegen", path = %path.display(), "opened database");
        Ok(Self {
            conn: Some(conn),
            location: Some(location),
            logger,
        })
    }

    /// Replace the statement logger.
    pub fn with_logger(mut self, logger: SqlLogger) -> Self {
        self.logger = logger;
        self
    }

    /// File name including the extension, `:memory:` for in-memory databases.
    pub fn name(&self) -> &str {
        self.location
            .as_ref()
            .map_or(":memory:", |location| location.name())
    }

    pub fn dir_path(&self) -> Option<&Path> {
        self.location.as_ref().map(DbLocation::dir)
    }

    pub fn full_path(&self) -> Option<PathBuf> {
        self.location.as_ref().map(DbLocation::full_path)
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Release the connection. Later operations fail with
    /// [`LiteError::NotConnected`]; closing twice is a no-op.
    pub fn close(&mut self) -> LiteResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        conn.close().map_err(|(conn, err)| {
            self.conn = Some(conn);
            let err = LiteError::from_sqlite_error(err);
            self.logger.log_failure("close", &err);
            err
        })
    }

    fn conn(&self, op: &str) -> LiteResult<&Connection> {
        self.conn.as_ref().ok_or_else(|| {
            let err = LiteError::NotConnected(format!("{op}: database handle is closed"));
            self.logger.log_failure(op, &err);
            err
        })
    }

    /// Log a failed result, then hand it back unchanged.
    fn logged<T>(&self, op: &str, result: LiteResult<T>) -> LiteResult<T> {
        if let Err(err) = &result {
            self.logger.log_failure(op, err);
        }
        result
    }

    fn run<T>(
        &self,
        op: &str,
        stmt: &Statement,
        f: impl FnOnce(&Connection, &Statement) -> LiteResult<T>,
    ) -> LiteResult<T> {
        let conn = self.conn(op)?;
        self.logger.log_statement(op, stmt);
        self.logged(op, f(conn, stmt))
    }

    fn execute_op(&self, op: &str, stmt: LiteResult<Statement>) -> LiteResult<usize> {
        self.conn(op)?;
        let stmt = self.logged(op, stmt)?;
        self.run(op, &stmt, |conn, stmt| Executor::execute(conn, stmt))
    }

    fn query_op(&self, op: &str, stmt: LiteResult<Statement>) -> LiteResult<Vec<Record>> {
        self.conn(op)?;
        let stmt = self.logged(op, stmt)?;
        self.run(op, &stmt, |conn, stmt| Executor::query(conn, stmt))
    }

    fn scalar_op(&self, op: &str, stmt: LiteResult<Statement>) -> LiteResult<i64> {
        self.conn(op)?;
        let stmt = self.logged(op, stmt)?;
        self.run(op, &stmt, |conn, stmt| {
            let value = conn.query_scalar(stmt)?;
            value.as_i64().ok_or_else(|| {
                LiteError::decode("0", format!("expected INTEGER, got {}", value.type_name()))
            })
        })
    }

    // ==================== Raw SQL ====================

    /// Run one or more `;`-separated statements without binds.
    pub fn execute_batch(&self, sql: &str) -> LiteResult<()> {
        let stmt = Statement::raw(sql);
        self.run("execute_batch", &stmt, |conn, stmt| {
            conn.execute_batch(stmt.sql())
                .map_err(LiteError::from_sqlite_error)
        })
    }

    /// Run a raw query without binds.
    pub fn query_sql(&self, sql: &str) -> LiteResult<Vec<Record>> {
        self.query_op("query_sql", Ok(Statement::raw(sql)))
    }

    // ==================== Schema ====================

    pub fn create_table(&self, table: &str, fragments: &[ColumnFragment]) -> LiteResult<usize> {
        self.execute_op("create", shorthand::create_table(table, fragments))
    }

    pub fn drop_table(&self, table: impl AsRef<str>) -> LiteResult<usize> {
        self.execute_op("drop", shorthand::drop_table(table))
    }

    // ==================== Writes ====================

    /// Insert one row from `names..., values...`.
    pub fn insert(&self, table: &str, flat: &[Value]) -> LiteResult<usize> {
        self.execute_op("insert", shorthand::insert(table, flat))
    }

    pub fn insert_pairs<I, N, V>(&self, table: &str, pairs: I) -> LiteResult<usize>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<Value>,
    {
        self.execute_op("insert", shorthand::insert_pairs(table, pairs))
    }

    pub fn delete<O: IntoOp, V: Into<Value>>(
        &self,
        table: &str,
        column: &str,
        op: O,
        value: V,
    ) -> LiteResult<usize> {
        self.execute_op("delete", shorthand::delete(table, column, op, value))
    }

    pub fn delete_where(&self, table: &str, conditions: &[Condition]) -> LiteResult<usize> {
        self.execute_op("delete", shorthand::delete_where(table, conditions))
    }

    /// Update rows where `cond_col = cond_val` from `name, value, ...` pairs.
    pub fn update<V: Into<Value>>(
        &self,
        table: &str,
        flat: &[Value],
        cond_col: &str,
        cond_val: V,
    ) -> LiteResult<usize> {
        self.execute_op("update", shorthand::update(table, flat, cond_col, cond_val))
    }

    pub fn update_where(
        &self,
        table: &str,
        conditions: &[Condition],
        flat: &[Value],
    ) -> LiteResult<usize> {
        self.execute_op("update", shorthand::update_where(table, conditions, flat))
    }

    // ==================== Reads ====================

    pub fn select(
        &self,
        table: &str,
        columns: &[&str],
        conditions: &[Condition],
    ) -> LiteResult<Vec<Record>> {
        self.query_op("select", shorthand::select(table, columns, conditions))
    }

    pub fn get<V: Into<Value>>(
        &self,
        table: &str,
        cond_col: &str,
        cond_val: V,
    ) -> LiteResult<Vec<Record>> {
        self.query_op("get", shorthand::get(table, cond_col, cond_val))
    }

    pub fn get_column<V: Into<Value>>(
        &self,
        table: &str,
        column: &str,
        cond_col: &str,
        cond_val: V,
    ) -> LiteResult<Vec<Record>> {
        self.query_op(
            "get_column",
            shorthand::get_column(table, column, cond_col, cond_val),
        )
    }

    /// Whether any row has `column = value`.
    pub fn exists<V: Into<Value>>(&self, table: &str, column: &str, value: V) -> LiteResult<bool> {
        Ok(self.scalar_op("exists", shorthand::exists(table, column, value))? != 0)
    }

    pub fn count(&self, table: &str) -> LiteResult<i64> {
        self.scalar_op("count", shorthand::count(table))
    }

    pub fn table_exists(&self, table: &str) -> LiteResult<bool> {
        Ok(self.scalar_op("table_exists", shorthand::table_exists(table))? > 0)
    }

    pub fn table_empty(&self, table: &str) -> LiteResult<bool> {
        Ok(self.count(table)? == 0)
    }

    /// Write every row of `table` to `out` as a text table.
    pub fn dump_table(&self, table: &str, out: &mut impl Write) -> LiteResult<()> {
        self.conn("dump")?;
        let stmt = self.logged("dump", shorthand::select(table, &[], &[]))?;
        let (columns, rows) = self.run("dump", &stmt, query_with_columns)?;

        let mut rendered = Table::new();
        rendered
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                columns
                    .iter()
                    .map(|c| Cell::new(c).add_attribute(Attribute::Bold)),
            );
        for row in &rows {
            rendered.add_row(row.values().iter().map(|v| Cell::new(v.to_string())));
        }

        let written = writeln!(out, "{table} ({} rows)", rows.len())
            .and_then(|()| writeln!(out, "{rendered}"));
        self.logged("dump", written.map_err(LiteError::from))
    }
}

impl Executor for Database {
    fn execute(&self, stmt: &Statement) -> LiteResult<usize> {
        self.run("execute", stmt, |conn, stmt| Executor::execute(conn, stmt))
    }

    fn query(&self, stmt: &Statement) -> LiteResult<Vec<Record>> {
        self.run("query", stmt, |conn, stmt| Executor::query(conn, stmt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{INTEGER, PRIMARY_KEY, TEXT};
    use crate::{columns, values};

    fn sample() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.create_table("t", &columns!["id", INTEGER, PRIMARY_KEY, "val", TEXT])
            .unwrap();
        db.insert("t", &values!["id", "val", 1, "a"]).unwrap();
        db.insert("t", &values!["id", "val", 2, "b"]).unwrap();
        db
    }

    #[test]
    fn closed_handle_reports_not_connected() {
        let mut db = sample();
        db.close().unwrap();
        assert!(!db.is_open());
        assert!(matches!(db.count("t"), Err(LiteError::NotConnected(_))));
        assert!(matches!(
            db.insert("t", &values!["id", 3]),
            Err(LiteError::NotConnected(_))
        ));
        db.close().unwrap();
    }

    #[test]
    fn closed_handle_wins_over_bad_input() {
        let mut db = sample();
        db.close().unwrap();
        let err = db.insert("t", &values!["id", "val", 1]).unwrap_err();
        assert!(matches!(err, LiteError::NotConnected(_)));
        assert!(matches!(
            db.select("t", &["bad col"], &[]),
            Err(LiteError::NotConnected(_))
        ));
        assert!(matches!(db.exists("", "val", 1), Err(LiteError::NotConnected(_))));
        let mut out = Vec::new();
        assert!(matches!(
            db.dump_table("t", &mut out),
            Err(LiteError::NotConnected(_))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn input_errors_do_not_reach_storage() {
        let db = sample();
        let err = db.insert("t", &values!["id", "val", 3]).unwrap_err();
        assert!(err.is_input_error());
        assert_eq!(db.count("t").unwrap(), 2);
    }

    #[test]
    fn existence_checks() {
        let db = sample();
        assert!(db.exists("t", "val", "a").unwrap());
        assert!(!db.exists("t", "val", "it's").unwrap());
        assert!(db.table_exists("t").unwrap());
        assert!(!db.table_exists("missing").unwrap());
        assert!(!db.table_empty("t").unwrap());
    }

    #[test]
    fn dump_lists_header_and_rows() {
        let db = sample();
        let mut out = Vec::new();
        db.dump_table("t", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("t (2 rows)"));
        assert!(text.contains("id"));
        assert!(text.contains("val"));
        assert!(text.contains('b'));
    }

    #[test]
    fn dump_of_empty_table_keeps_header() {
        let db = sample();
        db.delete_where("t", &[]).unwrap();
        let mut out = Vec::new();
        db.dump_table("t", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("t (0 rows)"));
        assert!(text.contains("val"));
    }

    #[test]
    fn with_logger_replaces_default() {
        let db = Database::open_in_memory()
            .unwrap()
            .with_logger(SqlLogger::new().level(tracing::Level::TRACE).no_truncate());
        assert_eq!(db.logger.level, tracing::Level::TRACE);
        assert_eq!(db.logger.max_sql_length, None);
        db.execute_batch("CREATE TABLE t (id INTEGER)").unwrap();
        assert!(db.table_empty("t").unwrap());
    }

    #[test]
    fn in_memory_accessors() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.name(), ":memory:");
        assert!(db.dir_path().is_none());
        assert!(db.full_path().is_none());
    }
}
