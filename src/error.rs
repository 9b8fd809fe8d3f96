//! Error types for the Teradata MCP Server.
//!
//! Database failures are carried verbatim so the host can diagnose the root
//! cause; nothing is reworded or swallowed on the way out.

use rmcp::model::ErrorCode;
use rmcp::ErrorData;
use thiserror::Error;

/// Domain-specific errors for the Teradata MCP Server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error (bad or missing connection URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Resource URI that does not end in the schema marker, or cannot be
    /// parsed at all
    #[error("Invalid resource URI: {0}")]
    InvalidResourceUri(String),

    /// Tool invocation naming anything other than `query`
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Failure raised by the database while executing a statement or
    /// catalog query. The message is the driver's, verbatim.
    #[error("{0}")]
    Database(String),

    /// Result serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create an invalid-resource-URI error.
    pub fn invalid_uri(uri: impl Into<String>) -> Self {
        Self::InvalidResourceUri(uri.into())
    }

    /// Create an unknown-tool error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a database error carrying the driver's message.
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}

/// Convert `ServerError` to rmcp's `ErrorData` for protocol responses.
///
/// Caller-contract violations map to invalid-params/method-not-found so the
/// host can tell its own mistakes apart from database failures.
impl From<ServerError> for ErrorData {
    fn from(e: ServerError) -> Self {
        match e {
            ServerError::Config(msg) => ErrorData::invalid_request(msg, None),
            ServerError::InvalidResourceUri(_) => ErrorData::invalid_params(e.to_string(), None),
            ServerError::UnknownTool(name) => ErrorData::new(
                ErrorCode::METHOD_NOT_FOUND,
                format!("Unknown tool: {name}"),
                None,
            ),
            ServerError::Connection(msg) => ErrorData::internal_error(msg, None),
            ServerError::Database(msg) => ErrorData::internal_error(msg, None),
            ServerError::Serialization(err) => ErrorData::internal_error(err.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_keeps_driver_message() {
        let err = ServerError::database("[Teradata Database] [Error 3706] Syntax error");
        assert_eq!(
            err.to_string(),
            "[Teradata Database] [Error 3706] Syntax error"
        );
    }

    #[test]
    fn test_unknown_tool_maps_to_method_not_found() {
        let data: ErrorData = ServerError::unknown_tool("delete_everything").into();
        assert_eq!(data.code, ErrorCode::METHOD_NOT_FOUND);
        assert!(data.message.contains("delete_everything"));
    }

    #[test]
    fn test_invalid_uri_maps_to_invalid_params() {
        let data: ErrorData = ServerError::invalid_uri("teradata://host/Orders/rows").into();
        assert_eq!(data.code, ErrorCode::INVALID_PARAMS);
    }
}
