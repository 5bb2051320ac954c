//! WHERE clause condition types.
//!
//! This module provides [`Op`] (operator) and [`Condition`] primitives. A
//! condition is a `(column, operator, value)` triple; lists of conditions are
//! always joined with `AND`, in input order.

use crate::error::{LiteError, LiteResult};
use crate::ident::{Ident, IntoIdent};
use crate::sql::Sql;
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// Comparison operator for a [`Condition`].
///
/// Operators arrive as caller text (`"="`, `">="`, ...) and are parsed into
/// this closed set, so nothing outside it is ever spliced into SQL.
///
/// # Example
/// ```
/// use litegen::Op;
///
/// assert_eq!("<>".parse::<Op>().unwrap(), Op::Ne);
/// assert!("; DROP".parse::<Op>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// column = value
    Eq,
    /// column != value
    Ne,
    /// column > value
    Gt,
    /// column >= value
    Gte,
    /// column < value
    Lt,
    /// column <= value
    Lte,
    /// column LIKE pattern
    Like,
}

impl Op {
    /// SQL text for the operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Like => " LIKE ",
        }
    }
}

impl FromStr for Op {
    type Err = LiteError;

    fn from_str(s: &str) -> LiteResult<Self> {
        match s.trim() {
            "=" | "==" => Ok(Op::Eq),
            "!=" | "<>" => Ok(Op::Ne),
            ">" => Ok(Op::Gt),
            ">=" => Ok(Op::Gte),
            "<" => Ok(Op::Lt),
            "<=" => Ok(Op::Lte),
            t if t.eq_ignore_ascii_case("like") => Ok(Op::Like),
            _ => Err(LiteError::UnknownOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql().trim())
    }
}

/// Convert an input into an [`Op`].
pub trait IntoOp {
    fn into_op(self) -> LiteResult<Op>;
}

impl IntoOp for Op {
    fn into_op(self) -> LiteResult<Op> {
        Ok(self)
    }
}

impl IntoOp for &str {
    fn into_op(self) -> LiteResult<Op> {
        self.parse()
    }
}

impl IntoOp for char {
    fn into_op(self) -> LiteResult<Op> {
        self.encode_utf8(&mut [0; 4]).parse()
    }
}

/// One `column <op> ?` term of a WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    column: Ident,
    op: Op,
    value: Value,
}

impl Condition {
    /// Create a condition from a column, an operator (text or [`Op`]) and a value.
    pub fn new<I, O, V>(column: I, op: O, value: V) -> LiteResult<Self>
    where
        I: IntoIdent,
        O: IntoOp,
        V: Into<Value>,
    {
        Ok(Self {
            column: column.into_ident()?,
            op: op.into_op()?,
            value: value.into(),
        })
    }

    pub fn column(&self) -> &Ident {
        &self.column
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Render as `column<op>?` and bind the value.
    pub(crate) fn append_to_sql(&self, sql: &mut Sql) {
        sql.push(self.column.as_str());
        sql.push(self.op.as_sql());
        sql.push_bind(self.value.clone());
    }

    // ==================== Convenience constructors ====================

    /// column = value
    pub fn eq<I: IntoIdent, V: Into<Value>>(column: I, value: V) -> LiteResult<Self> {
        Self::new(column, Op::Eq, value)
    }

    /// column != value
    pub fn ne<I: IntoIdent, V: Into<Value>>(column: I, value: V) -> LiteResult<Self> {
        Self::new(column, Op::Ne, value)
    }

    /// column > value
    pub fn gt<I: IntoIdent, V: Into<Value>>(column: I, value: V) -> LiteResult<Self> {
        Self::new(column, Op::Gt, value)
    }

    /// column >= value
    pub fn gte<I: IntoIdent, V: Into<Value>>(column: I, value: V) -> LiteResult<Self> {
        Self::new(column, Op::Gte, value)
    }

    /// column < value
    pub fn lt<I: IntoIdent, V: Into<Value>>(column: I, value: V) -> LiteResult<Self> {
        Self::new(column, Op::Lt, value)
    }

    /// column <= value
    pub fn lte<I: IntoIdent, V: Into<Value>>(column: I, value: V) -> LiteResult<Self> {
        Self::new(column, Op::Lte, value)
    }

    /// column LIKE pattern
    pub fn like<I: IntoIdent, V: Into<Value>>(column: I, pattern: V) -> LiteResult<Self> {
        Self::new(column, Op::Like, pattern)
    }
}

impl<I, O, V> TryFrom<(I, O, V)> for Condition
where
    I: IntoIdent,
    O: IntoOp,
    V: Into<Value>,
{
    type Error = LiteError;

    fn try_from((column, op, value): (I, O, V)) -> LiteResult<Self> {
        Self::new(column, op, value)
    }
}

/// Build a `Vec<Condition>` from `(column, op, value)` triples.
///
/// Fails on the first invalid column name or operator.
///
/// ```
/// use litegen::conditions;
///
/// let conds = conditions![("id", ">", 1), ("id", "<", 3)].unwrap();
/// assert_eq!(conds.len(), 2);
/// ```
#[macro_export]
macro_rules! conditions {
    () => {
        $crate::LiteResult::<::std::vec::Vec<$crate::Condition>>::Ok(::std::vec::Vec::new())
    };
    ($(($col:expr, $op:expr, $val:expr)),+ $(,)?) => {
        (|| -> $crate::LiteResult<::std::vec::Vec<$crate::Condition>> {
            ::std::result::Result::Ok(::std::vec![
                $($crate::Condition::new($col, $op, $val)?),+
            ])
        })()
    };
}
