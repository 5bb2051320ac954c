//! One-call statement generators.
//!
//! Each function validates its input, assembles SQL through the matching
//! structured builder and returns a [`Statement`]. Nothing is executed and no
//! state survives the call.
//!
//! ```
//! use litegen::{insert, values};
//!
//! let stmt = insert("t", &values!["id", "val", 1, "a"]).unwrap();
//! assert_eq!(stmt.sql(), "INSERT INTO t (id, val) VALUES (?, ?)");
//! assert_eq!(stmt.binds(), values![1, "a"].as_slice());
//! ```

use super::create::{ColumnFragment, CreateTableBuilder};
use super::delete::DeleteBuilder;
use super::insert::InsertBuilder;
use super::select::QueryBuilder;
use super::traits::SqlBuilder;
use super::update::UpdateBuilder;
use crate::condition::{Condition, IntoOp};
use crate::error::{LiteError, LiteResult};
use crate::ident::Ident;
use crate::sql::Sql;
use crate::statement::Statement;
use crate::value::Value;

fn column_name(value: &Value) -> LiteResult<&str> {
    value.as_str().ok_or_else(|| {
        LiteError::validation(format!(
            "expected a column name, got {} value '{}'",
            value.type_name(),
            value
        ))
    })
}

/// Split `name1, name2, ..., value1, value2, ...` into pairs.
fn split_halves(flat: &[Value]) -> LiteResult<Vec<(&str, &Value)>> {
    if flat.len() % 2 != 0 {
        return Err(LiteError::OddArguments(flat.len()));
    }
    let (names, values) = flat.split_at(flat.len() / 2);
    names
        .iter()
        .zip(values)
        .map(|(name, value)| Ok((column_name(name)?, value)))
        .collect()
}

/// Split `name1, value1, name2, value2, ...` into pairs.
fn split_interleaved(flat: &[Value]) -> LiteResult<Vec<(&str, &Value)>> {
    if flat.len() % 2 != 0 {
        return Err(LiteError::OddArguments(flat.len()));
    }
    flat.chunks_exact(2)
        .map(|pair| Ok((column_name(&pair[0])?, &pair[1])))
        .collect()
}

/// `CREATE TABLE <table> (<columns>)` from a flat list of names and type tags.
pub fn create_table(table: &str, fragments: &[ColumnFragment]) -> LiteResult<Statement> {
    if fragments.is_empty() {
        return Err(LiteError::validation(format!(
            "CREATE TABLE {table}: no columns given"
        )));
    }
    CreateTableBuilder::from_fragments(table, fragments)?.build()
}

/// `DROP TABLE IF EXISTS <table>`.
pub fn drop_table(table: impl AsRef<str>) -> LiteResult<Statement> {
    let table = Ident::parse(table.as_ref())?;
    Ok(Statement::raw(format!("DROP TABLE IF EXISTS {table}")))
}

/// `INSERT INTO <table> (<names>) VALUES (?, ...)`.
///
/// `flat` holds every column name first, then every value in the same order.
pub fn insert(table: &str, flat: &[Value]) -> LiteResult<Statement> {
    if flat.is_empty() {
        return Err(LiteError::validation(format!(
            "INSERT INTO {table}: no columns given"
        )));
    }
    let mut builder = InsertBuilder::new(table);
    for (name, value) in split_halves(flat)? {
        builder.set(name, value.clone());
    }
    builder.build()
}

/// Paired form of [`insert`].
pub fn insert_pairs<I, N, V>(table: &str, pairs: I) -> LiteResult<Statement>
where
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: Into<Value>,
{
    let mut builder = InsertBuilder::new(table);
    for (name, value) in pairs {
        builder.set(name.as_ref(), value);
    }
    if builder.column_count() == 0 {
        return Err(LiteError::validation(format!(
            "INSERT INTO {table}: no columns given"
        )));
    }
    builder.build()
}

/// `DELETE FROM <table> WHERE <column><op>?`.
pub fn delete<O, V>(table: &str, column: &str, op: O, value: V) -> LiteResult<Statement>
where
    O: IntoOp,
    V: Into<Value>,
{
    DeleteBuilder::new(table)
        .and_condition(Condition::new(column, op, value)?)
        .build()
}

/// `DELETE FROM <table> WHERE c1<op>? AND ...`; no conditions clears the table.
pub fn delete_where(table: &str, conditions: &[Condition]) -> LiteResult<Statement> {
    DeleteBuilder::new(table).and_conditions(conditions).build()
}

/// `UPDATE <table> SET a=?, b=? WHERE <cond_col>=?`.
///
/// `flat` interleaves names and values: `name, value, name, value, ...`.
pub fn update<V: Into<Value>>(
    table: &str,
    flat: &[Value],
    cond_col: &str,
    cond_val: V,
) -> LiteResult<Statement> {
    let condition = Condition::eq(cond_col, cond_val)?;
    update_where(table, &[condition], flat)
}

/// `UPDATE <table> SET a=?, b=? WHERE c1<op>? AND ...`.
pub fn update_where(
    table: &str,
    conditions: &[Condition],
    flat: &[Value],
) -> LiteResult<Statement> {
    let mut builder = UpdateBuilder::new(table);
    for (name, value) in split_interleaved(flat)? {
        builder.set(name, value.clone());
    }
    builder.and_conditions(conditions).build()
}

/// `SELECT <columns> FROM <table> [WHERE ...]`; no columns selects `*`.
pub fn select(table: &str, columns: &[&str], conditions: &[Condition]) -> LiteResult<Statement> {
    QueryBuilder::new(table)
        .select_cols(columns)
        .and_conditions(conditions)
        .build()
}

/// `SELECT * FROM <table> WHERE <cond_col>=?`.
pub fn get<V: Into<Value>>(table: &str, cond_col: &str, cond_val: V) -> LiteResult<Statement> {
    select(table, &[], &[Condition::eq(cond_col, cond_val)?])
}

/// `SELECT <column> FROM <table> WHERE <cond_col>=?`.
pub fn get_column<V: Into<Value>>(
    table: &str,
    column: &str,
    cond_col: &str,
    cond_val: V,
) -> LiteResult<Statement> {
    select(table, &[column], &[Condition::eq(cond_col, cond_val)?])
}

/// `SELECT EXISTS(SELECT 1 FROM <table> WHERE <column>=? LIMIT 1)`.
pub fn exists<V: Into<Value>>(table: &str, column: &str, value: V) -> LiteResult<Statement> {
    let table = Ident::parse(table)?;
    let condition = Condition::eq(column, value)?;

    let mut sql = Sql::new(format!("SELECT EXISTS(SELECT 1 FROM {table}"));
    sql.push_where_and(std::slice::from_ref(&condition))
        .push(" LIMIT 1)");
    Ok(sql.into_statement())
}

/// `SELECT COUNT(*) FROM <table>`.
pub fn count(table: &str) -> LiteResult<Statement> {
    let builder = QueryBuilder::new(table);
    builder.validate()?;
    Ok(builder.render_count().into_statement())
}

/// `SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?`.
pub fn table_exists(table: &str) -> LiteResult<Statement> {
    let table = Ident::parse(table)?;
    let mut sql = Sql::new("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=");
    sql.push_bind(table.as_str());
    Ok(sql.into_statement())
}
