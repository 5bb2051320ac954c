use super::traits::SqlBuilder;
use super::where_builder::{WhereBuilder, impl_where_methods};
use crate::client::Executor;
use crate::error::{LiteError, LiteResult};
use crate::ident::Ident;
use crate::sql::Sql;

/// Structured SELECT query builder.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    /// Main table
    table: String,
    /// SELECT columns (default ["*"])
    select_cols: Vec<String>,
    /// WHERE conditions
    where_builder: WhereBuilder,
}

impl QueryBuilder {
    /// Create a new query builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            select_cols: vec!["*".to_string()],
            where_builder: WhereBuilder::new(),
        }
    }

    /// Set SELECT columns. An empty list keeps `*`.
    pub fn select_cols<S: AsRef<str>>(&mut self, cols: &[S]) -> &mut Self {
        self.select_cols = if cols.is_empty() {
            vec!["*".to_string()]
        } else {
            cols.iter().map(|s| s.as_ref().to_string()).collect()
        };
        self
    }

    /// Append one SELECT column.
    pub fn add_select(&mut self, col: &str) -> &mut Self {
        if self.select_cols.len() == 1 && self.select_cols[0] == "*" {
            self.select_cols[0] = col.to_string();
        } else {
            self.select_cols.push(col.to_string());
        }
        self
    }

    fn head(&self, projection: &str) -> Sql {
        let mut sql = Sql::new(format!("SELECT {} FROM {}", projection, self.table));
        self.where_builder.append_to(&mut sql);
        sql
    }

    /// `SELECT COUNT(*)` with the same WHERE clause.
    pub fn render_count(&self) -> Sql {
        self.head("COUNT(*)")
    }

    /// Build COUNT SQL explicitly.
    pub fn to_count_sql(&self) -> String {
        self.render_count().to_sql()
    }

    /// Execute COUNT query.
    pub fn count(&self, conn: &impl Executor) -> LiteResult<i64> {
        self.validate()?;
        let value = conn.query_scalar(&self.render_count().into_statement())?;
        value.as_i64().ok_or_else(|| {
            LiteError::decode(
                "COUNT(*)",
                format!("expected INTEGER, got {}", value.type_name()),
            )
        })
    }
}

impl_where_methods!(QueryBuilder);

impl SqlBuilder for QueryBuilder {
    fn render(&self) -> Sql {
        self.head(&self.select_cols.join(", "))
    }

    fn validate(&self) -> LiteResult<()> {
        Ident::parse(&self.table)?;
        for col in &self.select_cols {
            if col != "*" {
                Ident::parse(col)?;
            }
        }
        if let Some(err) = self.where_builder.build_error() {
            return Err(LiteError::validation(format!("QueryBuilder: {err}")));
        }
        Ok(())
    }
}
