//! SQL-first dynamic builder.
//!
//! `Sql` stores SQL pieces and bind values separately and renders one `?`
//! placeholder per bound value, so bind slot `n` always lines up with the
//! `n`-th value. Every builder in [`crate::builder`] renders through it.
//!
//! # Example
//!
//! ```
//! use litegen::sql;
//!
//! let mut q = sql("SELECT id FROM users WHERE age > ");
//! q.push_bind(30).push(" AND name = ").push_bind("bob");
//!
//! assert_eq!(q.to_sql(), "SELECT id FROM users WHERE age > ? AND name = ?");
//! assert_eq!(q.binds().len(), 2);
//! ```

use crate::condition::Condition;
use crate::error::LiteResult;
use crate::ident::Ident;
use crate::statement::Statement;
use crate::value::Value;

#[derive(Debug, Clone)]
enum SqlPart {
    Raw(String),
    Param,
}

/// A SQL-first, parameter-safe dynamic SQL builder.
#[derive(Debug, Clone)]
pub struct Sql {
    parts: Vec<SqlPart>,
    binds: Vec<Value>,
}

/// Start building a SQL statement.
pub fn sql(initial_sql: impl Into<String>) -> Sql {
    Sql::new(initial_sql)
}

impl Sql {
    /// Create a new builder with an initial SQL fragment.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            parts: vec![SqlPart::Raw(initial_sql.into())],
            binds: Vec::new(),
        }
    }

    /// Create an empty builder.
    pub fn empty() -> Self {
        Self {
            parts: Vec::new(),
            binds: Vec::new(),
        }
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(SqlPart::Raw(sql.to_string())),
        }
        self
    }

    /// Append a parameter placeholder and bind its value.
    pub fn push_bind(&mut self, value: impl Into<Value>) -> &mut Self {
        self.parts.push(SqlPart::Param);
        self.binds.push(value.into());
        self
    }

    /// Append a comma-separated list of placeholders and bind all values.
    pub fn push_bind_list<T: Into<Value>>(
        &mut self,
        values: impl IntoIterator<Item = T>,
    ) -> &mut Self {
        for (i, v) in values.into_iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_bind(v);
        }
        self
    }

    /// Append a validated SQL identifier (table/column name).
    pub fn push_ident(&mut self, ident: &str) -> LiteResult<&mut Self> {
        let ident = Ident::parse(ident)?;
        Ok(self.push(ident.as_str()))
    }

    /// Append another `Sql` fragment, consuming it.
    pub fn push_sql(&mut self, mut other: Sql) -> &mut Self {
        for part in other.parts.drain(..) {
            match part {
                SqlPart::Raw(s) => {
                    self.push(&s);
                }
                SqlPart::Param => self.parts.push(SqlPart::Param),
            }
        }
        self.binds.append(&mut other.binds);
        self
    }

    /// Append a [`Condition`] as `column<op>?`.
    pub fn push_condition(&mut self, condition: &Condition) -> &mut Self {
        condition.append_to_sql(self);
        self
    }

    /// Append multiple [`Condition`]s joined by `AND`.
    ///
    /// If `conditions` is empty, this is a no-op.
    pub fn push_conditions_and(&mut self, conditions: &[Condition]) -> &mut Self {
        for (i, cond) in conditions.iter().enumerate() {
            if i > 0 {
                self.push(" AND ");
            }
            self.push_condition(cond);
        }
        self
    }

    /// Append a ` WHERE ...` clause composed of [`Condition`]s joined by `AND`.
    ///
    /// If `conditions` is empty, this is a no-op.
    pub fn push_where_and(&mut self, conditions: &[Condition]) -> &mut Self {
        if conditions.is_empty() {
            return self;
        }
        self.push(" WHERE ");
        self.push_conditions_and(conditions)
    }

    /// Render SQL with `?` placeholders.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => out.push_str(s),
                SqlPart::Param => out.push('?'),
            }
        }
        out
    }

    /// Bound values in placeholder order.
    pub fn binds(&self) -> &[Value] {
        &self.binds
    }

    /// Number of `?` placeholders pushed through [`Sql::push_bind`].
    pub fn placeholder_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, SqlPart::Param))
            .count()
    }

    /// Freeze into an immutable [`Statement`].
    pub fn into_statement(self) -> Statement {
        let sql = self.to_sql();
        Statement::new(sql, self.binds)
    }
}

impl From<Sql> for Statement {
    fn from(sql: Sql) -> Self {
        sql.into_statement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;

    #[test]
    fn builds_placeholders_in_order() {
        let mut q = sql("SELECT * FROM users WHERE a = ");
        q.push_bind(1).push(" AND b = ").push_bind("x");

        assert_eq!(q.to_sql(), "SELECT * FROM users WHERE a = ? AND b = ?");
        assert_eq!(q.binds(), &[Value::Integer(1), Value::Text("x".into())]);
    }

    #[test]
    fn can_compose_fragments() {
        let mut w = Sql::empty();
        w.push(" WHERE id = ").push_bind(42);

        let mut q = sql("SELECT * FROM users");
        q.push_sql(w);

        assert_eq!(q.to_sql(), "SELECT * FROM users WHERE id = ?");
        assert_eq!(q.placeholder_count(), 1);
        assert_eq!(q.binds().len(), 1);
    }

    #[test]
    fn bind_list_renders_commas() {
        let mut q = sql("VALUES (");
        q.push_bind_list(vec![1, 2, 3]).push(")");
        assert_eq!(q.to_sql(), "VALUES (?, ?, ?)");
        assert_eq!(q.binds().len(), 3);
    }

    #[test]
    fn push_ident_rejects_unsafe() {
        let mut q = Sql::empty();
        assert!(q.push_ident("users").is_ok());
        assert!(q.push_ident("users; drop table users; --").is_err());
        assert!(q.push_ident("1users").is_err());
        assert_eq!(q.to_sql(), "users");
    }

    #[test]
    fn where_and_keeps_input_order() {
        let conds = vec![
            Condition::new("c", ">", 3).unwrap(),
            Condition::new("a", "=", 1).unwrap(),
            Condition::new("b", "<", 2).unwrap(),
        ];
        let mut q = sql("SELECT * FROM t");
        q.push_where_and(&conds);
        assert_eq!(q.to_sql(), "SELECT * FROM t WHERE c>? AND a=? AND b<?");
        assert_eq!(
            q.binds(),
            &[Value::Integer(3), Value::Integer(1), Value::Integer(2)]
        );
    }

    #[test]
    fn empty_where_is_noop() {
        let mut q = sql("SELECT * FROM t");
        q.push_where_and(&[]);
        assert_eq!(q.to_sql(), "SELECT * FROM t");
    }
}
