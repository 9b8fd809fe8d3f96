//! Centralized constants for the Teradata MCP Server.

/// URI scheme under which table schemas are published as resources.
///
/// The connection URL's scheme is rewritten to this one when building
/// resource URIs, so a server connected to `my-td-host` exposes
/// `teradata://my-td-host/<TableName>/schema`.
pub const RESOURCE_SCHEME: &str = "teradata";

/// Trailing path segment that marks a resource URI as a schema read.
pub const SCHEMA_PATH: &str = "schema";

/// MIME type attached to every resource and resource content block.
pub const JSON_MIME_TYPE: &str = "application/json";

/// Name of the single tool this server advertises.
pub const QUERY_TOOL_NAME: &str = "query";

/// Default truncation length for SQL in log output.
pub const LOG_QUERY_TRUNCATE_LENGTH: usize = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_marker_is_single_segment() {
        assert!(!SCHEMA_PATH.contains('/'));
        assert!(!SCHEMA_PATH.is_empty());
    }
}
