//! Executor trait: the storage-engine seam builders run through.

use crate::error::{LiteError, LiteResult};
use crate::row::{FromRecord, Record};
use crate::statement::Statement;
use crate::value::Value;
use std::sync::Arc;

/// Anything that can prepare a [`Statement`], bind its values by position
/// and step through the results.
///
/// Implemented for a bare [`rusqlite::Connection`] and for
/// [`crate::Database`], which adds logging and handle checks on top.
pub trait Executor {
    /// Execute a statement and return the number of affected rows.
    fn execute(&self, stmt: &Statement) -> LiteResult<usize>;

    /// Execute a statement and collect all rows.
    fn query(&self, stmt: &Statement) -> LiteResult<Vec<Record>>;

    /// Execute a statement and return the first row, if any.
    fn query_opt(&self, stmt: &Statement) -> LiteResult<Option<Record>> {
        Ok(self.query(stmt)?.into_iter().next())
    }

    /// Execute a statement and return the first column of the first row.
    fn query_scalar(&self, stmt: &Statement) -> LiteResult<Value> {
        let row = self
            .query_opt(stmt)?
            .ok_or_else(|| LiteError::decode("0", "query returned no rows"))?;
        row.get_index(0)
            .cloned()
            .ok_or_else(|| LiteError::decode("0", "query returned no columns"))
    }

    /// Execute a statement and map every row to `T`.
    fn query_as<T: FromRecord>(&self, stmt: &Statement) -> LiteResult<Vec<T>> {
        self.query(stmt)?.iter().map(T::from_record).collect()
    }
}

impl Executor for rusqlite::Connection {
    fn execute(&self, stmt: &Statement) -> LiteResult<usize> {
        let mut prepared = self
            .prepare(stmt.sql())
            .map_err(LiteError::from_sqlite_error)?;
        prepared
            .execute(rusqlite::params_from_iter(stmt.binds()))
            .map_err(LiteError::from_sqlite_error)
    }

    fn query(&self, stmt: &Statement) -> LiteResult<Vec<Record>> {
        query_with_columns(self, stmt).map(|(_, rows)| rows)
    }
}

/// Run a query and also return its column names, which are known even when
/// no row comes back.
pub(crate) fn query_with_columns(
    conn: &rusqlite::Connection,
    stmt: &Statement,
) -> LiteResult<(Arc<[String]>, Vec<Record>)> {
    let mut prepared = conn
        .prepare(stmt.sql())
        .map_err(LiteError::from_sqlite_error)?;
    let columns: Arc<[String]> = prepared
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows = prepared
        .query(rusqlite::params_from_iter(stmt.binds()))
        .map_err(LiteError::from_sqlite_error)?;

    let mut out = Vec::new();
    while let Some(row) = rows.next().map_err(LiteError::from_sqlite_error)? {
        out.push(Record::from_sqlite_row(&columns, row)?);
    }
    Ok((columns, out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn connection_executes_and_queries() {
        let conn = Connection::open_in_memory().unwrap();
        Executor::execute(&conn, &Statement::raw("CREATE TABLE t (id INTEGER, val TEXT)")).unwrap();

        let insert = Statement::new(
            "INSERT INTO t (id, val) VALUES (?, ?)".to_string(),
            vec![Value::from(1), Value::from("a")],
        );
        assert_eq!(Executor::execute(&conn, &insert).unwrap(), 1);

        let rows = Executor::query(&conn, &Statement::raw("SELECT id, val FROM t")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].columns(), &["id".to_string(), "val".to_string()]);
        assert_eq!(rows[0].get("val"), Some(&Value::from("a")));
    }

    #[test]
    fn scalar_on_empty_result_is_an_error() {
        let conn = Connection::open_in_memory().unwrap();
        let stmt = Statement::raw("SELECT 1 WHERE 0");
        assert!(conn.query_scalar(&stmt).is_err());
        assert_eq!(
            conn.query_scalar(&Statement::raw("SELECT 5")).unwrap(),
            Value::Integer(5)
        );
    }
}
