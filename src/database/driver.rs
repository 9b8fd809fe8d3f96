//! Driver trait seam.
//!
//! Connection establishment, authentication, network I/O and SQL execution
//! all live behind these traits. The server core only ever sees a
//! [`Connection`] handing out short-lived [`Cursor`]s, which keeps every
//! handler testable against a fake and keeps the real driver swappable.

use crate::error::ServerError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single cell value as returned by the driver.
///
/// Values are untyped at this layer; serialization is untagged so a result
/// row renders as a plain JSON array (`[1, "a", null]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

/// A bound statement parameter.
///
/// Catalog queries only ever bind text (user and table names), but the
/// binding goes through the driver rather than string concatenation.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
}

impl SqlParam {
    /// Create a text parameter.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// The parameter's value as text.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(value) => value,
        }
    }
}

/// The single long-lived database connection.
///
/// Created once at startup and never re-established; a lost connection is
/// fatal for all subsequent operations until process restart.
pub trait Connection: Send + Sync {
    /// Open a new cursor on this connection.
    ///
    /// Fails if the connection is no longer usable.
    fn open_cursor(&self) -> Result<Box<dyn Cursor>, ServerError>;
}

/// A short-lived handle used to execute exactly one statement and fetch its
/// results. Dropping the cursor releases it.
#[async_trait]
pub trait Cursor: Send {
    /// Execute a statement, binding `params` in positional order.
    async fn execute(&mut self, sql: &str, params: &[SqlParam]) -> Result<(), ServerError>;

    /// Fetch the complete result set of the previously executed statement.
    async fn fetch_all(&mut self) -> Result<Vec<Vec<SqlValue>>, ServerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_value_serializes_untagged() {
        let row = vec![
            SqlValue::Int(1),
            SqlValue::Text("a".to_string()),
            SqlValue::Null,
            SqlValue::Bool(true),
            SqlValue::Float(2.5),
        ];
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json, serde_json::json!([1, "a", null, true, 2.5]));
    }

    #[test]
    fn test_sql_param_text() {
        let param = SqlParam::text("ALICE");
        assert_eq!(param.as_text(), "ALICE");
    }
}
