use crate::client::Executor;
use crate::error::LiteResult;
use crate::row::{FromRecord, Record};
use crate::sql::Sql;
use crate::statement::Statement;
use crate::value::Value;

/// Base trait for SQL builders.
pub trait SqlBuilder {
    /// Render SQL text and binds without validation.
    fn render(&self) -> Sql;

    /// Build the SQL string.
    fn build_sql(&self) -> String {
        self.render().to_sql()
    }

    /// Bind values in placeholder order.
    fn binds(&self) -> Vec<Value> {
        self.render().binds().to_vec()
    }

    /// Debug helper.
    fn to_sql(&self) -> String {
        self.build_sql()
    }

    /// Validate builder state.
    fn validate(&self) -> LiteResult<()> {
        Ok(())
    }

    /// Validate and freeze into a [`Statement`].
    fn build(&self) -> LiteResult<Statement> {
        self.validate()?;
        Ok(self.render().into_statement())
    }

    /// Execute query and return all rows.
    fn query(&self, conn: &impl Executor) -> LiteResult<Vec<Record>> {
        conn.query(&self.build()?)
    }

    /// Execute query and return at most one row.
    fn query_opt(&self, conn: &impl Executor) -> LiteResult<Option<Record>> {
        conn.query_opt(&self.build()?)
    }

    /// Execute query and map all rows to `T`.
    fn query_as<T: FromRecord>(&self, conn: &impl Executor) -> LiteResult<Vec<T>> {
        conn.query_as(&self.build()?)
    }
}

/// Trait for mutation builders (CREATE/INSERT/UPDATE/DELETE).
pub trait MutationBuilder: SqlBuilder {
    /// Execute and return affected row count.
    fn execute(&self, conn: &impl Executor) -> LiteResult<usize> {
        conn.execute(&self.build()?)
    }
}
