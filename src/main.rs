//! Teradata MCP Server entry point.
//!
//! This binary starts the MCP server using stdio transport for integration
//! with Claude Desktop and other MCP clients. The database connection URL
//! comes from the first command-line argument (or `DATABASE_URI`); a
//! missing URL or a failed connection is fatal before any request is
//! served.

use anyhow::Result;
use rmcp::ServiceExt;
use teradata_mcp_server::config::obfuscate_password;
use teradata_mcp_server::{Config, TeradataMcpServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is reserved for JSON-RPC)
    init_logging();

    let version = env!("CARGO_PKG_VERSION");
    eprintln!("Teradata MCP Server v{version} starting...");
    eprintln!("Transport: stdio");

    // Load configuration from the connection URL
    let config = Config::from_env_args()?;
    eprintln!(
        "Connecting to {} as {}",
        config.database.host, config.database.username
    );

    // Establish the single process-lifetime connection
    let server = TeradataMcpServer::connect(config).inspect_err(|e| {
        eprintln!("Fatal: {}", obfuscate_password(&e.to_string()));
    })?;
    eprintln!("Server initialized. Ready to accept requests...");

    // Start serving on stdio transport
    let transport = rmcp::transport::stdio();
    let service = server.serve(transport).await?;

    tokio::select! {
        quit_reason = service.waiting() => {
            match quit_reason {
                Ok(reason) => eprintln!("Service stopped: {reason:?}"),
                Err(e) => eprintln!("Service error: {e}"),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Shutdown signal received");
        }
    }

    Ok(())
}

/// Initialize tracing subscriber with stderr output.
///
/// Logs MUST go to stderr because stdout is used for JSON-RPC communication.
fn init_logging() {
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn,teradata_mcp_server=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
