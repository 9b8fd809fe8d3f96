//! The `query` tool: arbitrary SQL execution.
//!
//! This is the server's single tool. The advertised description says
//! "read-only", faithfully reproducing the upstream contract, but nothing
//! here enforces it: the SQL string goes to the database verbatim and the
//! database's own permissions are the only guard. See DESIGN.md.

use crate::constants::{LOG_QUERY_TRUNCATE_LENGTH, QUERY_TOOL_NAME};
use crate::database::query::truncate_for_log;
use crate::error::ServerError;
use crate::server::TeradataMcpServer;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Build the tool listing: exactly one descriptor.
pub fn build_tool_list() -> Vec<Tool> {
    vec![Tool::new(
        QUERY_TOOL_NAME,
        "Run a read-only SQL query",
        query_input_schema(),
    )]
}

/// Dispatch a tool invocation.
///
/// Anything other than `query` is rejected before the connection is
/// touched.
pub async fn call_tool(
    server: &TeradataMcpServer,
    name: &str,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, ServerError> {
    if name != QUERY_TOOL_NAME {
        return Err(ServerError::unknown_tool(name));
    }

    let arguments = arguments.unwrap_or_default();
    let sql = match arguments.get("sql").and_then(|v| v.as_str()) {
        Some(sql) => sql,
        None => {
            return Ok(CallToolResult::error(vec![Content::text(
                "Missing required argument: sql",
            )]))
        }
    };

    debug!(
        "Tool {QUERY_TOOL_NAME} invoked: {}",
        truncate_for_log(sql, LOG_QUERY_TRUNCATE_LENGTH)
    );

    match run_query(server, sql).await {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) => {
            warn!("Query execution failed: {e}");
            // The driver's message goes back to the caller verbatim.
            Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
        }
    }
}

/// Execute the SQL and serialize the full result set as a JSON array of
/// row arrays.
async fn run_query(server: &TeradataMcpServer, sql: &str) -> Result<String, ServerError> {
    let rows = server.executor().execute(sql).await?;
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Input schema: one object with a single string property.
fn query_input_schema() -> Arc<JsonObject> {
    let schema = json!({
        "type": "object",
        "properties": {
            "sql": { "type": "string" }
        },
        "required": ["sql"]
    });
    Arc::new(schema.as_object().cloned().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_list_has_single_query_tool() {
        let tools = build_tool_list();
        assert_eq!(tools.len(), 1);

        let tool = &tools[0];
        assert_eq!(tool.name, QUERY_TOOL_NAME);
        assert_eq!(tool.description.as_deref(), Some("Run a read-only SQL query"));

        let schema = serde_json::to_value(tool.input_schema.as_ref()).unwrap();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["sql"]["type"], "string");
    }

    #[test]
    fn test_query_schema_mentions_no_other_properties() {
        let schema = query_input_schema();
        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 1);
    }
}
