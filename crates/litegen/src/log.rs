//! `tracing`-based SQL and failure logging.
//!
//! Statements are emitted under the `litegen.sql` target at a configurable
//! level; failures are emitted at `ERROR` under the `litegen` target right
//! before the error is returned to the caller.

use crate::config::LogConfig;
use crate::error::{LiteError, LiteResult};
use crate::statement::Statement;
use tracing::Level;

/// Truncate at a char boundary at or below `max_bytes`.
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// Emits executed SQL and storage failures through `tracing`.
#[derive(Debug, Clone)]
pub struct SqlLogger {
    /// Tracing event level for statements.
    pub level: Level,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for SqlLogger {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl SqlLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the `[log]` section of a [`crate::DatabaseConfig`].
    ///
    /// A `max_sql_length` of 0 disables truncation.
    pub fn from_config(config: &LogConfig) -> LiteResult<Self> {
        let level = config
            .level
            .parse::<Level>()
            .map_err(|_| LiteError::Config(format!("unknown log level '{}'", config.level)))?;
        Ok(Self {
            level,
            max_sql_length: config.max_sql_length.filter(|max| *max > 0),
        })
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub(crate) fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }

    /// Log a statement about to run.
    pub fn log_statement(&self, op: &str, stmt: &Statement) {
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let sql = self.truncate_sql(stmt.sql());
        emit_at_level!(
            self.level,
            target: "litegen.sql",
            op,
            param_count = stmt.binds().len(),
            sql = %sql,
        );
    }

    /// Log a failed operation.
    pub fn log_failure(&self, op: &str, err: &LiteError) {
        tracing::error!(target: "litegen", op, error = %err, "database operation failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate_sql_bytes("héllo", 2), "h");
        assert_eq!(truncate_sql_bytes("abc", 10), "abc");

        let logger = SqlLogger::new().max_sql_length(6);
        assert_eq!(logger.truncate_sql("SELECT * FROM t"), "SELECT...");
        assert_eq!(logger.no_truncate().truncate_sql("SELECT * FROM t"), "SELECT * FROM t");
    }

    #[test]
    fn from_config_parses_level() {
        let config = LogConfig {
            level: "info".to_string(),
            max_sql_length: Some(0),
        };
        let logger = SqlLogger::from_config(&config).unwrap();
        assert_eq!(logger.level, Level::INFO);
        assert_eq!(logger.max_sql_length, None);

        let bad = LogConfig {
            level: "loud".to_string(),
            max_sql_length: None,
        };
        assert!(matches!(SqlLogger::from_config(&bad), Err(LiteError::Config(_))));
    }
}
