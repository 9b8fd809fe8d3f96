//! # Teradata MCP Server
//!
//! A Model Context Protocol (MCP) server for Teradata.
//!
//! This crate provides:
//! - **Resources**: the tables and views in the connected user's default
//!   database, each readable as a JSON column schema
//! - **Tools**: a single `query` tool executing arbitrary SQL
//!
//! ## Architecture
//!
//! One connection is established at startup and owned for the life of the
//! process; every handler borrows a short-lived cursor from it. The driver
//! itself sits behind the [`database::driver`] trait seam, with an ODBC
//! backend available behind the `odbc` feature.

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod handlers;
pub mod resources;
pub mod server;
pub mod tools;

pub use config::Config;
pub use error::ServerError;
pub use server::TeradataMcpServer;
