//! ODBC backend for the driver seam.
//!
//! Teradata ships an ODBC driver for every platform it supports, so the
//! production [`Connection`] implementation goes through `odbc-api`. ODBC
//! calls are blocking; each statement runs on the blocking thread pool and
//! the whole result set is collected before control returns to the
//! executor.

use super::driver::{Connection, Cursor, SqlParam, SqlValue};
use crate::config::DatabaseConfig;
use crate::error::ServerError;
use async_trait::async_trait;
use odbc_api::parameter::InputParameter;
use odbc_api::{ConnectionOptions, DataType, Environment, IntoParameter};
// Bring the cursor and metadata methods into scope without clashing with
// the crate's own `Cursor` trait.
use odbc_api::{Cursor as _, ResultSetMetadata as _};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::info;

static ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

fn environment() -> Result<&'static Environment, ServerError> {
    if let Some(env) = ENVIRONMENT.get() {
        return Ok(env);
    }
    let env = Environment::new()
        .map_err(|e| ServerError::connection(format!("Failed to create ODBC environment: {e}")))?;
    Ok(ENVIRONMENT.get_or_init(|| env))
}

/// The single ODBC connection to the Teradata system.
///
/// ODBC connections are `Send` but not `Sync`, so the handle lives behind a
/// mutex; the [`ConnectionManager`](super::ConnectionManager) serializes
/// cursor use above this anyway.
pub struct OdbcConnection {
    conn: Arc<Mutex<odbc_api::Connection<'static>>>,
}

impl OdbcConnection {
    /// Establish the connection described by `config`.
    pub fn connect(config: &DatabaseConfig) -> Result<Self, ServerError> {
        let conn = environment()?
            .connect_with_connection_string(
                &Self::connection_string(config),
                ConnectionOptions::default(),
            )
            .map_err(|e| ServerError::connection(e.to_string()))?;

        info!("Connected to Teradata system {}", config.host);
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn connection_string(config: &DatabaseConfig) -> String {
        // Braces keep values containing semicolons intact in ODBC
        // connection strings.
        format!(
            "DRIVER={{Teradata ODBC Driver}};DBCNAME={{{}}};UID={{{}}};PWD={{{}}};",
            config.host, config.username, config.password
        )
    }
}

impl Connection for OdbcConnection {
    fn open_cursor(&self) -> Result<Box<dyn Cursor>, ServerError> {
        Ok(Box::new(OdbcCursor {
            conn: Arc::clone(&self.conn),
            rows: None,
        }))
    }
}

/// Cursor over the shared ODBC connection.
///
/// The result set is drained inside `execute` while the statement handle is
/// still alive; `fetch_all` hands the collected rows out.
struct OdbcCursor {
    conn: Arc<Mutex<odbc_api::Connection<'static>>>,
    rows: Option<Vec<Vec<SqlValue>>>,
}

#[async_trait]
impl Cursor for OdbcCursor {
    async fn execute(&mut self, sql: &str, params: &[SqlParam]) -> Result<(), ServerError> {
        let conn = Arc::clone(&self.conn);
        let sql = sql.to_string();
        let params: Vec<String> = params.iter().map(|p| p.as_text().to_string()).collect();

        let rows = tokio::task::spawn_blocking(move || run_statement(&conn, &sql, params))
            .await
            .map_err(|e| ServerError::connection(format!("Driver task failed: {e}")))??;

        self.rows = Some(rows);
        Ok(())
    }

    async fn fetch_all(&mut self) -> Result<Vec<Vec<SqlValue>>, ServerError> {
        Ok(self.rows.take().unwrap_or_default())
    }
}

fn run_statement(
    conn: &Mutex<odbc_api::Connection<'static>>,
    sql: &str,
    params: Vec<String>,
) -> Result<Vec<Vec<SqlValue>>, ServerError> {
    let conn = conn
        .lock()
        .map_err(|_| ServerError::connection("Connection mutex poisoned"))?;

    let bound: Vec<Box<dyn InputParameter>> = params
        .into_iter()
        .map(|p| Box::new(p.into_parameter()) as Box<dyn InputParameter>)
        .collect();

    let maybe_cursor = conn
        .execute(sql, &bound[..])
        .map_err(|e| ServerError::database(e.to_string()))?;

    let mut rows = Vec::new();
    let Some(mut cursor) = maybe_cursor else {
        // Statement produced no result set (DDL/DML); nothing to fetch.
        return Ok(rows);
    };

    let col_count = cursor
        .num_result_cols()
        .map_err(|e| ServerError::database(e.to_string()))? as u16;

    let col_types: Vec<DataType> = (1..=col_count)
        .map(|idx| cursor.col_data_type(idx))
        .collect::<Result<_, _>>()
        .map_err(|e| ServerError::database(e.to_string()))?;

    while let Some(mut row) = cursor
        .next_row()
        .map_err(|e| ServerError::database(e.to_string()))?
    {
        let mut out = Vec::with_capacity(col_count as usize);
        for (idx, data_type) in (1..=col_count).zip(&col_types) {
            out.push(read_cell(&mut row, idx, data_type)?);
        }
        rows.push(out);
    }

    Ok(rows)
}

/// Read one cell, preserving integer/float/boolean types where the column
/// metadata makes them unambiguous; everything else is fetched as text.
fn read_cell(
    row: &mut odbc_api::CursorRow<'_>,
    idx: u16,
    data_type: &DataType,
) -> Result<SqlValue, ServerError> {
    let map_err = |e: odbc_api::Error| ServerError::database(e.to_string());

    match data_type {
        DataType::TinyInt | DataType::SmallInt | DataType::Integer | DataType::BigInt => {
            let mut value = odbc_api::Nullable::<i64>::null();
            row.get_data(idx, &mut value).map_err(map_err)?;
            Ok(value.into_opt().map_or(SqlValue::Null, SqlValue::Int))
        }
        DataType::Real | DataType::Double | DataType::Float { .. } => {
            let mut value = odbc_api::Nullable::<f64>::null();
            row.get_data(idx, &mut value).map_err(map_err)?;
            Ok(value.into_opt().map_or(SqlValue::Null, SqlValue::Float))
        }
        DataType::Bit => {
            let mut value = odbc_api::Nullable::<i64>::null();
            row.get_data(idx, &mut value).map_err(map_err)?;
            Ok(value
                .into_opt()
                .map_or(SqlValue::Null, |v| SqlValue::Bool(v != 0)))
        }
        _ => {
            let mut buf = Vec::new();
            let not_null = row.get_text(idx, &mut buf).map_err(map_err)?;
            if not_null {
                Ok(SqlValue::Text(String::from_utf8_lossy(&buf).into_owned()))
            } else {
                Ok(SqlValue::Null)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_string_shape() {
        let config = DatabaseConfig {
            host: "tdhost.example.com".to_string(),
            username: "alice".to_string(),
            password: "s3cret".to_string(),
        };
        let s = OdbcConnection::connection_string(&config);
        assert!(s.contains("DBCNAME={tdhost.example.com}"));
        assert!(s.contains("UID={alice}"));
        assert!(s.contains("PWD={s3cret}"));
    }
}
