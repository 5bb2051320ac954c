use super::traits::{MutationBuilder, SqlBuilder};
use crate::error::LiteResult;
use crate::ident::Ident;
use crate::sql::Sql;
use crate::value::Value;

/// INSERT builder.
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    /// Table name
    table: String,
    /// Column names
    columns: Vec<String>,
    /// Values, one per column
    values: Vec<Value>,
}

impl InsertBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Set a column value.
    pub fn set<V: Into<Value>>(&mut self, column: &str, value: V) -> &mut Self {
        self.columns.push(column.to_string());
        self.values.push(value.into());
        self
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt<V: Into<Value>>(&mut self, column: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.set(column, v);
        }
        self
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl SqlBuilder for InsertBuilder {
    fn render(&self) -> Sql {
        if self.columns.is_empty() {
            return Sql::new(format!("INSERT INTO {} DEFAULT VALUES", self.table));
        }

        let mut sql = Sql::new(format!(
            "INSERT INTO {} ({}) VALUES (",
            self.table,
            self.columns.join(", ")
        ));
        sql.push_bind_list(self.values.iter().cloned()).push(")");
        sql
    }

    fn validate(&self) -> LiteResult<()> {
        Ident::parse(&self.table)?;
        for column in &self.columns {
            Ident::parse(column)?;
        }
        Ok(())
    }
}

impl MutationBuilder for InsertBuilder {}
