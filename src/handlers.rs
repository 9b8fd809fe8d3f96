//! ServerHandler implementation for the Teradata MCP Server.
//!
//! This module implements the rmcp `ServerHandler` trait which defines how
//! the server responds to MCP protocol requests. The handlers are thin
//! wrappers; the actual work lives in [`crate::resources`] and
//! [`crate::tools`] so it stays testable without a protocol context.

use crate::resources::{build_resource_list, build_resource_templates, read_resource};
use crate::server::TeradataMcpServer;
use crate::tools::{build_tool_list, call_tool};
use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, ListResourceTemplatesResult,
    ListResourcesResult, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
    ReadResourceRequestParam, ReadResourceResult, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::ErrorData;
use tracing::info;

impl ServerHandler for TeradataMcpServer {
    /// Server identification - called during initialization handshake.
    fn get_info(&self) -> ServerInfo {
        info!("MCP client requesting server info");

        ServerInfo {
            protocol_version: ProtocolVersion::default(),

            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),

            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                title: Some("Teradata MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },

            instructions: Some(build_instructions(self)),

            ..Default::default()
        }
    }

    /// List table schemas as resources.
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let resources = build_resource_list(self).await.map_err(ErrorData::from)?;

        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    /// List resource templates for dynamic resources.
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, ErrorData> {
        Ok(ListResourceTemplatesResult {
            resource_templates: build_resource_templates(self),
            next_cursor: None,
            meta: None,
        })
    }

    /// Read one table's schema.
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        read_resource(self, &request.uri)
            .await
            .map_err(ErrorData::from)
    }

    /// List available tools.
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: build_tool_list(),
            next_cursor: None,
            meta: None,
        })
    }

    /// Invoke a tool.
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        call_tool(self, &request.name, request.arguments)
            .await
            .map_err(ErrorData::from)
    }
}

/// Build server instructions based on current state.
fn build_instructions(server: &TeradataMcpServer) -> String {
    format!(
        "# Teradata MCP Server\n\n\
         Connected to Teradata system `{}`.\n\n\
         - Resources list the tables and views in the current user's default \
         database; reading one returns its column schema as JSON.\n\
         - The `query` tool runs SQL against the system and returns the full \
         result set as a JSON array of row arrays.\n",
        server.config().database.host
    )
}
