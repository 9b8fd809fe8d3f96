//! SQL execution against the shared connection.

use super::connection::ConnectionManager;
use super::driver::SqlValue;
use crate::constants::LOG_QUERY_TRUNCATE_LENGTH;
use crate::error::ServerError;
use std::sync::Arc;
use tracing::debug;

/// Executes caller-supplied SQL and fetches complete result sets.
///
/// The SQL is handed to the driver verbatim; no validation, rewriting or
/// row limiting happens here. Either the full result set comes back or the
/// error does.
pub struct QueryExecutor {
    manager: Arc<ConnectionManager>,
}

impl QueryExecutor {
    /// Create a new query executor.
    pub fn new(manager: Arc<ConnectionManager>) -> Self {
        Self { manager }
    }

    /// Execute a statement and return every resulting row.
    ///
    /// The cursor is released when the guard drops, on success and on every
    /// failure path.
    pub async fn execute(&self, sql: &str) -> Result<Vec<Vec<SqlValue>>, ServerError> {
        debug!(
            "Executing query: {}",
            truncate_for_log(sql, LOG_QUERY_TRUNCATE_LENGTH)
        );

        let mut cursor = self.manager.acquire().await?;
        cursor.execute(sql, &[]).await?;
        let rows = cursor.fetch_all().await?;

        debug!("Query completed: {} rows", rows.len());
        Ok(rows)
    }
}

/// Truncate a string for logging purposes.
pub(crate) fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short", 10), "short");
        assert_eq!(truncate_for_log("this is a long string", 10), "this is a ...");
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        // Must cut on character boundaries, not bytes.
        assert_eq!(truncate_for_log("sélect été", 4), "séle...");
    }
}
