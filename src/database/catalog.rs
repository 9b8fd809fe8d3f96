//! Catalog queries against the DBC dictionary views.
//!
//! Both queries here bind their caller-influenced values (user name, table
//! name) as parameters. Identifiers are never spliced into the SQL text,
//! even though the dictionary views would make the injection read-only.

use super::connection::ConnectionManager;
use super::driver::{SqlParam, SqlValue};
use super::types::canonical_type_name;
use crate::error::ServerError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Tables and views visible in the user's default database.
///
/// Other catalog object kinds (macros, procedures, join indexes) are
/// excluded by the `TableKind` filter.
const LIST_TABLES_SQL: &str = r#"
    SELECT tv.TableName
    FROM DBC.TablesV tv
    JOIN DBC.UsersV uv
      ON UPPER(tv.DataBaseName) = UPPER(uv.DefaultDataBase)
    WHERE UPPER(uv.UserName) = UPPER(?)
      AND tv.TableKind IN ('T', 'V')
"#;

/// Column names and vendor type codes for one table.
const TABLE_COLUMNS_SQL: &str = r#"
    SELECT ColumnName, ColumnType
    FROM DBC.ColumnsVX
    WHERE TableName = ?
"#;

/// One column of a table's schema, in the shape the wire contract expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name as reported by the dictionary.
    #[serde(rename = "ColumnName")]
    pub column_name: String,

    /// Canonical SQL type name resolved from the vendor type code.
    #[serde(rename = "CType")]
    pub c_type: String,
}

/// Catalog lookups over the shared connection.
pub struct CatalogQueries {
    manager: Arc<ConnectionManager>,
}

impl CatalogQueries {
    /// Create a new catalog query runner.
    pub fn new(manager: Arc<ConnectionManager>) -> Self {
        Self { manager }
    }

    /// List the tables and views the given user may access in their
    /// default database.
    ///
    /// Fails as a whole on any catalog error; no partial list is returned.
    pub async fn list_tables(&self, user: &str) -> Result<Vec<String>, ServerError> {
        debug!("Listing tables for user {user}");

        let mut cursor = self.manager.acquire().await?;
        cursor
            .execute(LIST_TABLES_SQL, &[SqlParam::text(user)])
            .await?;
        let rows = cursor.fetch_all().await?;

        rows.into_iter()
            .map(|row| match row.into_iter().next() {
                Some(SqlValue::Text(name)) => Ok(name),
                other => Err(ServerError::database(format!(
                    "Catalog query returned unexpected TableName value: {other:?}"
                ))),
            })
            .collect()
    }

    /// Read the column schema of one table.
    ///
    /// Vendor type codes are translated here; an unrecognized code marks
    /// that column as unknown rather than failing the read.
    pub async fn table_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, ServerError> {
        debug!("Reading column schema for table {table}");

        let mut cursor = self.manager.acquire().await?;
        cursor
            .execute(TABLE_COLUMNS_SQL, &[SqlParam::text(table)])
            .await?;
        let rows = cursor.fetch_all().await?;

        rows.into_iter()
            .map(|row| {
                let mut cells = row.into_iter();
                let column_name = match cells.next() {
                    Some(SqlValue::Text(name)) => name,
                    other => {
                        return Err(ServerError::database(format!(
                            "Catalog query returned unexpected ColumnName value: {other:?}"
                        )))
                    }
                };
                // Type codes come back space-padded from the CHAR(2)
                // dictionary column; a NULL code is treated as unknown.
                let code = match cells.next() {
                    Some(SqlValue::Text(code)) => code,
                    _ => String::new(),
                };
                Ok(ColumnDescriptor {
                    column_name,
                    c_type: canonical_type_name(code.trim()).to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_descriptor_wire_shape() {
        let descriptor = ColumnDescriptor {
            column_name: "ID".to_string(),
            c_type: "INTEGER".to_string(),
        };
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"ColumnName": "ID", "CType": "INTEGER"})
        );
    }

    #[test]
    fn test_catalog_sql_is_parameterized() {
        // The caller-influenced values must be bound, never concatenated.
        assert!(LIST_TABLES_SQL.contains("UPPER(?)"));
        assert!(TABLE_COLUMNS_SQL.contains("= ?"));
    }
}
