use super::traits::{MutationBuilder, SqlBuilder};
use super::where_builder::{WhereBuilder, impl_where_methods};
use crate::error::{LiteError, LiteResult};
use crate::ident::Ident;
use crate::sql::Sql;

/// DELETE builder.
///
/// Without conditions this renders a plain `DELETE FROM <table>` and clears
/// the whole table.
#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    table: String,
    where_builder: WhereBuilder,
}

impl DeleteBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            where_builder: WhereBuilder::new(),
        }
    }
}

impl_where_methods!(DeleteBuilder);

impl SqlBuilder for DeleteBuilder {
    fn render(&self) -> Sql {
        let mut sql = Sql::new(format!("DELETE FROM {}", self.table));
        self.where_builder.append_to(&mut sql);
        sql
    }

    fn validate(&self) -> LiteResult<()> {
        Ident::parse(&self.table)?;
        if let Some(err) = self.where_builder.build_error() {
            return Err(LiteError::validation(format!("DeleteBuilder: {err}")));
        }
        Ok(())
    }
}

impl MutationBuilder for DeleteBuilder {}
