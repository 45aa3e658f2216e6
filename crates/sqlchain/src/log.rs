//! `tracing` output for executed statements.

use crate::statement::StatementKind;
use tracing::Level;

/// Controls how [`ExecutingStatement::run`](crate::ExecutingStatement::run) reports
/// the SQL it sends to the backend.
///
/// Events are emitted on the `sqlchain.sql` target before the backend call;
/// failures are reported at WARN regardless of `level`.
#[derive(Debug, Clone)]
pub struct StatementLog {
    /// Tracing event level to emit at.
    pub level: Level,
    /// Truncate long SQL strings (in bytes, on a char boundary). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for StatementLog {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl StatementLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub(crate) fn display_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_at_boundary(sql, max)),
            _ => sql.to_string(),
        }
    }

    pub(crate) fn executing(&self, kind: Option<StatementKind>, sql: &str) {
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

        let sql = self.display_sql(sql);
        emit_at_level!(
            self.level,
            target: "sqlchain.sql",
            kind = ?kind,
            sql = %sql,
            "executing statement"
        );
    }

    pub(crate) fn failed(&self, kind: Option<StatementKind>, sql: &str, error: &dyn std::error::Error) {
        tracing::warn!(
            target: "sqlchain.sql",
            kind = ?kind,
            sql = %self.display_sql(sql),
            error = %error,
            "statement failed"
        );
    }
}

fn truncate_at_boundary(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
