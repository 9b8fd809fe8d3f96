//! MCP server struct definition and initialization.

use crate::config::Config;
use crate::database::{CatalogQueries, Connection, ConnectionManager, QueryExecutor};
#[cfg(feature = "odbc")]
use crate::error::ServerError;
use std::sync::Arc;

/// The Teradata MCP Server instance.
///
/// Cloned per request; the inner state is shared via `Arc`. The connection
/// is injected explicitly rather than living in a global so tests can
/// substitute a fake driver.
#[derive(Clone)]
pub struct TeradataMcpServer {
    /// Owner of the single database connection.
    pub(crate) manager: Arc<ConnectionManager>,

    /// Catalog lookups for resource enumeration and schema reads.
    pub(crate) catalog: Arc<CatalogQueries>,

    /// Executor for the `query` tool.
    pub(crate) executor: Arc<QueryExecutor>,

    /// Configuration.
    pub(crate) config: Arc<Config>,
}

impl TeradataMcpServer {
    /// Create a server around an established connection.
    pub fn new(config: Config, conn: Arc<dyn Connection>) -> Self {
        let manager = Arc::new(ConnectionManager::new(conn));
        let catalog = Arc::new(CatalogQueries::new(Arc::clone(&manager)));
        let executor = Arc::new(QueryExecutor::new(Arc::clone(&manager)));

        Self {
            manager,
            catalog,
            executor,
            config: Arc::new(config),
        }
    }

    /// Create a server connected through the ODBC backend.
    ///
    /// Connection establishment happens exactly once here; a failure is
    /// fatal to the whole process.
    #[cfg(feature = "odbc")]
    pub fn connect(config: Config) -> Result<Self, ServerError> {
        let conn = crate::database::odbc::OdbcConnection::connect(&config.database)?;
        Ok(Self::new(config, Arc::new(conn)))
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a reference to the connection manager.
    pub fn manager(&self) -> &ConnectionManager {
        &self.manager
    }

    /// Get a reference to the catalog queries.
    pub fn catalog(&self) -> &CatalogQueries {
        &self.catalog
    }

    /// Get a reference to the query executor.
    pub fn executor(&self) -> &QueryExecutor {
        &self.executor
    }
}
