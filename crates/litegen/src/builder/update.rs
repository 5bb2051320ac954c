use super::traits::{MutationBuilder, SqlBuilder};
use super::where_builder::{WhereBuilder, impl_where_methods};
use crate::error::{LiteError, LiteResult};
use crate::ident::Ident;
use crate::sql::Sql;
use crate::value::Value;

/// UPDATE builder.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    /// Table name
    table: String,
    /// SET clauses (column, value)
    set_fields: Vec<(String, Value)>,
    /// WHERE conditions
    where_builder: WhereBuilder,
}

impl UpdateBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            set_fields: Vec::new(),
            where_builder: WhereBuilder::new(),
        }
    }

    /// Set a column.
    pub fn set<V: Into<Value>>(&mut self, column: &str, value: V) -> &mut Self {
        self.set_fields.push((column.to_string(), value.into()));
        self
    }

    /// Set an optional column (None => skip).
    pub fn set_opt<V: Into<Value>>(&mut self, column: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.set(column, v);
        }
        self
    }
}

impl_where_methods!(UpdateBuilder);

impl SqlBuilder for UpdateBuilder {
    fn render(&self) -> Sql {
        let mut sql = Sql::new(format!("UPDATE {} SET ", self.table));
        for (i, (column, value)) in self.set_fields.iter().enumerate() {
            if i > 0 {
                sql.push(", ");
            }
            sql.push(column).push("=").push_bind(value.clone());
        }
        self.where_builder.append_to(&mut sql);
        sql
    }

    fn validate(&self) -> LiteResult<()> {
        Ident::parse(&self.table)?;
        if self.set_fields.is_empty() {
            return Err(LiteError::validation(
                "UpdateBuilder: SET clause cannot be empty",
            ));
        }
        for (column, _) in &self.set_fields {
            Ident::parse(column)?;
        }
        if let Some(err) = self.where_builder.build_error() {
            return Err(LiteError::validation(format!("UpdateBuilder: {err}")));
        }
        Ok(())
    }
}

impl MutationBuilder for UpdateBuilder {}
