use crate::value::Value;
use std::fmt;

/// A generated statement: SQL text plus its ordered bind values.
///
/// Bind slot `n` (1-based, as SQLite counts `?` placeholders) holds
/// `binds()[n - 1]`. A statement is immutable once built and is not cached;
/// every builder call produces a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    binds: Vec<Value>,
}

impl Statement {
    pub(crate) fn new(sql: String, binds: Vec<Value>) -> Self {
        Self { sql, binds }
    }

    /// A statement with no bind slots.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql.into(), Vec::new())
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn binds(&self) -> &[Value] {
        &self.binds
    }

    /// `(position, value)` pairs, positions starting at 1.
    pub fn bind_slots(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.binds.iter().enumerate().map(|(i, v)| (i + 1, v))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

impl AsRef<str> for Statement {
    fn as_ref(&self) -> &str {
        &self.sql
    }
}
