//! Shared WHERE clause builder for SELECT, UPDATE, DELETE.

use crate::condition::{Condition, IntoOp, Op};
use crate::ident::IntoIdent;
use crate::sql::Sql;
use crate::value::Value;

/// Reusable WHERE clause builder.
///
/// Conditions are kept in insertion order and always joined with `AND`.
/// Invalid column names or operators are recorded and reported by
/// `validate()` on the owning builder, so call chains stay fluent.
#[derive(Debug, Clone, Default)]
pub struct WhereBuilder {
    conditions: Vec<Condition>,
    build_error: Option<String>,
}

impl WhereBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already validated condition list.
    pub fn from_conditions(conditions: &[Condition]) -> Self {
        Self {
            conditions: conditions.to_vec(),
            build_error: None,
        }
    }

    /// Check if any conditions have been added.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Get the build error, if any.
    pub fn build_error(&self) -> Option<&str> {
        self.build_error.as_deref()
    }

    /// Append ` WHERE c1<op>? AND ...` to `sql` (no-op when empty).
    pub fn append_to(&self, sql: &mut Sql) {
        sql.push_where_and(&self.conditions);
    }

    /// Add an already built condition.
    pub fn and_condition(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    /// Add AND `column <op> value`.
    pub fn and<I, O, V>(&mut self, col: I, op: O, val: V)
    where
        I: IntoIdent,
        O: IntoOp,
        V: Into<Value>,
    {
        match Condition::new(col, op, val) {
            Ok(cond) => self.conditions.push(cond),
            Err(e) => {
                if self.build_error.is_none() {
                    self.build_error = Some(e.to_string());
                }
            }
        }
    }

    /// Add AND equality condition.
    pub fn and_eq<V: Into<Value>>(&mut self, col: &str, val: V) {
        self.and(col, Op::Eq, val);
    }

    /// Add AND not-equal condition.
    pub fn and_ne<V: Into<Value>>(&mut self, col: &str, val: V) {
        self.and(col, Op::Ne, val);
    }

    /// Add AND > condition.
    pub fn and_gt<V: Into<Value>>(&mut self, col: &str, val: V) {
        self.and(col, Op::Gt, val);
    }

    /// Add AND >= condition.
    pub fn and_gte<V: Into<Value>>(&mut self, col: &str, val: V) {
        self.and(col, Op::Gte, val);
    }

    /// Add AND < condition.
    pub fn and_lt<V: Into<Value>>(&mut self, col: &str, val: V) {
        self.and(col, Op::Lt, val);
    }

    /// Add AND <= condition.
    pub fn and_lte<V: Into<Value>>(&mut self, col: &str, val: V) {
        self.and(col, Op::Lte, val);
    }

    /// Add AND LIKE condition.
    pub fn and_like<V: Into<Value>>(&mut self, col: &str, val: V) {
        self.and(col, Op::Like, val);
    }
}

/// Delegate the `and_*` condition methods to a `where_builder` field.
macro_rules! impl_where_methods {
    ($builder:ty) => {
        impl $builder {
            /// Add AND `column <op> value`.
            pub fn and_where<I, O, V>(&mut self, col: I, op: O, val: V) -> &mut Self
            where
                I: $crate::ident::IntoIdent,
                O: $crate::condition::IntoOp,
                V: Into<$crate::value::Value>,
            {
                self.where_builder.and(col, op, val);
                self
            }

            /// Add an already built condition.
            pub fn and_condition(&mut self, condition: $crate::condition::Condition) -> &mut Self {
                self.where_builder.and_condition(condition);
                self
            }

            /// Add every condition of a list, in order.
            pub fn and_conditions(
                &mut self,
                conditions: &[$crate::condition::Condition],
            ) -> &mut Self {
                for condition in conditions {
                    self.where_builder.and_condition(condition.clone());
                }
                self
            }

            pub fn and_eq<V: Into<$crate::value::Value>>(
                &mut self,
                col: &str,
                val: V,
            ) -> &mut Self {
                self.where_builder.and_eq(col, val);
                self
            }

            pub fn and_ne<V: Into<$crate::value::Value>>(
                &mut self,
                col: &str,
                val: V,
            ) -> &mut Self {
                self.where_builder.and_ne(col, val);
                self
            }

            pub fn and_gt<V: Into<$crate::value::Value>>(
                &mut self,
                col: &str,
                val: V,
            ) -> &mut Self {
                self.where_builder.and_gt(col, val);
                self
            }

            pub fn and_gte<V: Into<$crate::value::Value>>(
                &mut self,
                col: &str,
                val: V,
            ) -> &mut Self {
                self.where_builder.and_gte(col, val);
                self
            }

            pub fn and_lt<V: Into<$crate::value::Value>>(
                &mut self,
                col: &str,
                val: V,
            ) -> &mut Self {
                self.where_builder.and_lt(col, val);
                self
            }

            pub fn and_lte<V: Into<$crate::value::Value>>(
                &mut self,
                col: &str,
                val: V,
            ) -> &mut Self {
                self.where_builder.and_lte(col, val);
                self
            }

            pub fn and_like<V: Into<$crate::value::Value>>(
                &mut self,
                col: &str,
                val: V,
            ) -> &mut Self {
                self.where_builder.and_like(col, val);
                self
            }
        }
    };
}

pub(crate) use impl_where_methods;
