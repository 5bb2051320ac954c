//! Result rows and row mapping.

use crate::error::{LiteError, LiteResult};
use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;

/// One result row: column names (shared by all rows of a result set) and
/// their values, in SELECT order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Record {
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Read the current row of a rusqlite cursor.
    pub(crate) fn from_sqlite_row(
        columns: &Arc<[String]>,
        row: &rusqlite::Row<'_>,
    ) -> LiteResult<Self> {
        let mut values = Vec::with_capacity(columns.len());
        for idx in 0..columns.len() {
            let value: Value = row
                .get(idx)
                .map_err(|e| LiteError::decode(columns[idx].as_str(), e.to_string()))?;
            values.push(value);
        }
        Ok(Self::new(Arc::clone(columns), values))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a column by name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| &self.values[idx])
    }

    /// Value of a column by index.
    pub fn get_index(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    /// Typed value of a column by name.
    pub fn try_get<T>(&self, column: &str) -> LiteResult<T>
    where
        T: TryFrom<Value, Error = LiteError>,
    {
        let value = self
            .get(column)
            .ok_or_else(|| LiteError::decode(column, "no such column in result"))?;
        T::try_from(value.clone()).map_err(|e| match e {
            LiteError::Decode { message, .. } => LiteError::decode(column, message),
            other => other,
        })
    }

    /// Typed optional value: SQL `NULL` maps to `None`.
    pub fn try_get_opt<T>(&self, column: &str) -> LiteResult<Option<T>>
    where
        T: TryFrom<Value, Error = LiteError>,
    {
        match self.get(column) {
            Some(Value::Null) => Ok(None),
            _ => self.try_get(column).map(Some),
        }
    }

    /// Iterate `(column, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Trait for types that can be built from a [`Record`].
pub trait FromRecord: Sized {
    fn from_record(record: &Record) -> LiteResult<Self>;
}

impl FromRecord for Record {
    fn from_record(record: &Record) -> LiteResult<Self> {
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        let columns: Arc<[String]> = vec!["id".to_string(), "val".to_string()].into();
        Record::new(columns, vec![Value::Integer(1), Value::Null])
    }

    #[test]
    fn lookup_by_name_and_index() {
        let r = record();
        assert_eq!(r.get("id"), Some(&Value::Integer(1)));
        assert_eq!(r.get_index(1), Some(&Value::Null));
        assert!(r.get("missing").is_none());
    }

    #[test]
    fn typed_access() {
        let r = record();
        assert_eq!(r.try_get::<i64>("id").unwrap(), 1);
        assert_eq!(r.try_get_opt::<String>("val").unwrap(), None);
        let err = r.try_get::<String>("id").unwrap_err();
        assert!(matches!(err, LiteError::Decode { ref column, .. } if column == "id"));
    }

    #[test]
    fn serializes_as_ordered_object() {
        let json = serde_json::to_string(&record()).unwrap();
        assert_eq!(json, r#"{"id":1,"val":null}"#);
    }
}
