//! Database access layer.
//!
//! The Teradata driver itself is an external collaborator consumed through
//! the [`driver`] trait seam; everything in this module is driver-agnostic
//! except the optional ODBC backend.

pub mod catalog;
pub mod connection;
pub mod driver;
#[cfg(feature = "odbc")]
pub mod odbc;
pub mod query;
pub mod types;

pub use catalog::{CatalogQueries, ColumnDescriptor};
pub use connection::{ConnectionManager, CursorGuard};
pub use driver::{Connection, Cursor, SqlParam, SqlValue};
pub use query::QueryExecutor;
