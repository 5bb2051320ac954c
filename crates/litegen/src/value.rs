//! Tagged value variant used for bind slots and result columns.

use crate::error::{LiteError, LiteResult};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single SQLite value.
///
/// Call sites rarely build this directly; every supported Rust type converts
/// into it with `From`, so flat argument lists can be written as
/// `values!["id", "val", 1, "a"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// SQLite storage class name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
            Value::Blob(_) => "BLOB",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(s) => f.write_str(s),
            Value::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

// ==================== Conversions into Value ====================

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Integer(i64::from(v))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, bool);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Real(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// ==================== Conversions out of Value ====================

fn mismatch(expected: &str, got: &Value) -> LiteError {
    LiteError::decode(
        "?",
        format!("expected {expected}, got {}", got.type_name()),
    )
}

impl TryFrom<Value> for i64 {
    type Error = LiteError;

    fn try_from(v: Value) -> LiteResult<Self> {
        v.as_i64().ok_or_else(|| mismatch("INTEGER", &v))
    }
}

impl TryFrom<Value> for i32 {
    type Error = LiteError;

    fn try_from(v: Value) -> LiteResult<Self> {
        let wide = i64::try_from(v)?;
        i32::try_from(wide)
            .map_err(|_| LiteError::decode("?", format!("integer {wide} out of range for i32")))
    }
}

impl TryFrom<Value> for bool {
    type Error = LiteError;

    fn try_from(v: Value) -> LiteResult<Self> {
        Ok(i64::try_from(v)? != 0)
    }
}

impl TryFrom<Value> for f64 {
    type Error = LiteError;

    fn try_from(v: Value) -> LiteResult<Self> {
        v.as_f64().ok_or_else(|| mismatch("REAL", &v))
    }
}

impl TryFrom<Value> for String {
    type Error = LiteError;

    fn try_from(v: Value) -> LiteResult<Self> {
        match v {
            Value::Text(s) => Ok(s),
            other => Err(mismatch("TEXT", &other)),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = LiteError;

    fn try_from(v: Value) -> LiteResult<Self> {
        match v {
            Value::Blob(b) => Ok(b),
            other => Err(mismatch("BLOB", &other)),
        }
    }
}

// ==================== rusqlite integration ====================

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            Value::Null => ValueRef::Null,
            Value::Integer(i) => ValueRef::Integer(*i),
            Value::Real(r) => ValueRef::Real(*r),
            Value::Text(s) => ValueRef::Text(s.as_bytes()),
            Value::Blob(b) => ValueRef::Blob(b),
        };
        Ok(ToSqlOutput::Borrowed(value))
    }
}

impl FromSql for Value {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(r) => Value::Real(r),
            ValueRef::Text(t) => Value::Text(
                std::str::from_utf8(t)
                    .map_err(|e| FromSqlError::Other(Box::new(e)))?
                    .to_string(),
            ),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        })
    }
}

/// Build a `Vec<Value>` from heterogeneous literals.
///
/// ```
/// use litegen::{values, Value};
///
/// let args = values!["id", "val", 1, "a"];
/// assert_eq!(args[2], Value::Integer(1));
/// ```
#[macro_export]
macro_rules! values {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($v:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($v)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_storage_class() {
        assert_eq!(Value::from(7_i32), Value::Integer(7));
        assert_eq!(Value::from(true), Value::Integer(1));
        assert_eq!(Value::from(1.5), Value::Real(1.5));
        assert_eq!(Value::from("a"), Value::Text("a".into()));
        assert_eq!(Value::from('c'), Value::Text("c".into()));
        assert_eq!(Value::from(vec![1_u8, 2]), Value::Blob(vec![1, 2]));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn values_macro_keeps_order() {
        let v = values!["id", "val", 1, "a"];
        assert_eq!(
            v,
            vec![
                Value::Text("id".into()),
                Value::Text("val".into()),
                Value::Integer(1),
                Value::Text("a".into()),
            ]
        );
        assert!(values![].is_empty());
    }

    #[test]
    fn try_from_reports_mismatch() {
        assert_eq!(i64::try_from(Value::Integer(3)).unwrap(), 3);
        assert!(String::try_from(Value::Integer(3)).is_err());
        assert!(i32::try_from(Value::Integer(i64::MAX)).is_err());
        assert_eq!(f64::try_from(Value::Integer(2)).unwrap(), 2.0);
    }

    #[test]
    fn borrowed_accessors_match_variant() {
        let blob = Value::from(vec![0u8, 1, 2]);
        assert_eq!(blob.as_blob(), Some(&[0u8, 1, 2][..]));
        assert_eq!(blob.as_str(), None);
        assert_eq!(Value::from("x").as_blob(), None);
        assert_eq!(Value::from("x").as_str(), Some("x"));
    }

    #[test]
    fn sqlite_round_trip_through_connection() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let got: Value = conn
            .query_row("SELECT ?1", [Value::from("hello")], |row| row.get(0))
            .unwrap();
        assert_eq!(got, Value::Text("hello".into()));

        let got: Value = conn
            .query_row("SELECT ?1", [Value::Null], |row| row.get(0))
            .unwrap();
        assert!(got.is_null());
    }
}
