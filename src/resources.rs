//! MCP Resources: table schemas published from the DBC dictionary.
//!
//! Every table or view in the connected user's default database becomes one
//! resource:
//!
//! - `teradata://<host>/<TableName>/schema` - column names and canonical
//!   types as a JSON array
//!
//! Nothing is cached; each read re-queries the dictionary, so schema
//! changes are visible on the next read.

use crate::constants::{JSON_MIME_TYPE, SCHEMA_PATH};
use crate::error::ServerError;
use crate::server::TeradataMcpServer;
use rmcp::model::{
    AnnotateAble, RawResource, RawResourceTemplate, ReadResourceResult, Resource,
    ResourceContents, ResourceTemplate,
};
use url::Url;

/// Build the resource list from the dictionary.
///
/// A catalog failure fails the whole call; no partial list is returned.
pub async fn build_resource_list(
    server: &TeradataMcpServer,
) -> Result<Vec<Resource>, ServerError> {
    let user = &server.config().database.username;
    let base = server.config().resource_base();

    let tables = server.catalog().list_tables(user).await?;

    Ok(tables
        .into_iter()
        .map(|table| {
            let uri = table_resource_uri(&base, &table);
            create_resource(&uri, &format!("\"{table}\" database schema"))
        })
        .collect())
}

/// Build resource templates for dynamic resources.
pub fn build_resource_templates(server: &TeradataMcpServer) -> Vec<ResourceTemplate> {
    let base = server.config().resource_base();
    vec![create_resource_template(
        &format!("{base}/{{table}}/{SCHEMA_PATH}"),
        "Table schema",
        "Column names and canonical SQL types for one table",
    )]
}

/// Read a resource by URI.
pub async fn read_resource(
    server: &TeradataMcpServer,
    uri: &str,
) -> Result<ReadResourceResult, ServerError> {
    // The URI is validated before any database work happens.
    let table = parse_resource_uri(uri)?;

    let columns = server.catalog().table_columns(&table).await?;
    let text = serde_json::to_string_pretty(&columns)?;

    Ok(ReadResourceResult {
        contents: vec![ResourceContents::TextResourceContents {
            uri: uri.to_string(),
            mime_type: Some(JSON_MIME_TYPE.to_string()),
            text,
            meta: None,
        }],
    })
}

// =========================================================================
// Resource URI construction and parsing
// =========================================================================

/// Build the schema resource URI for one table.
pub fn table_resource_uri(base: &str, table: &str) -> String {
    format!("{base}/{table}/{SCHEMA_PATH}")
}

/// Extract the table name from a schema resource URI.
///
/// The final path segment must be the schema marker and the one before it
/// the table name; anything else is a caller-contract violation and fails
/// before any cursor is opened.
fn parse_resource_uri(uri: &str) -> Result<String, ServerError> {
    let parsed = Url::parse(uri).map_err(|_| ServerError::invalid_uri(uri))?;

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [.., table, marker] if *marker == SCHEMA_PATH => Ok((*table).to_string()),
        _ => Err(ServerError::invalid_uri(uri)),
    }
}

// =========================================================================
// Helpers
// =========================================================================

/// Create a resource definition.
fn create_resource(uri: &str, name: &str) -> Resource {
    let mut resource = RawResource::new(uri, name);
    resource.mime_type = Some(JSON_MIME_TYPE.to_string());
    resource.no_annotation()
}

/// Create a resource template definition.
fn create_resource_template(
    uri_template: &str,
    name: &str,
    description: &str,
) -> ResourceTemplate {
    RawResourceTemplate {
        uri_template: uri_template.to_string(),
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        mime_type: Some(JSON_MIME_TYPE.to_string()),
        icons: None,
    }
    .no_annotation()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_uri_round_trip() {
        for table in ["ORDERS", "Sales_2024", "t"] {
            let uri = table_resource_uri("teradata://tdhost", table);
            assert_eq!(parse_resource_uri(&uri).unwrap(), table);
        }
    }

    #[test]
    fn test_parse_resource_uri() {
        assert_eq!(
            parse_resource_uri("teradata://tdhost/ORDERS/schema").unwrap(),
            "ORDERS"
        );
        // A trailing slash must not change the outcome.
        assert_eq!(
            parse_resource_uri("teradata://tdhost/ORDERS/schema/").unwrap(),
            "ORDERS"
        );
    }

    #[test]
    fn test_parse_rejects_wrong_marker() {
        for uri in [
            "teradata://tdhost/ORDERS/rows",
            "teradata://tdhost/ORDERS",
            "teradata://tdhost/schema/ORDERS",
            "teradata://tdhost/",
            "not a uri",
        ] {
            assert!(parse_resource_uri(uri).is_err(), "uri {uri:?}");
        }
    }

    #[test]
    fn test_create_resource_is_json_tagged() {
        let resource = create_resource(
            "teradata://tdhost/ORDERS/schema",
            "\"ORDERS\" database schema",
        );
        assert_eq!(resource.raw.mime_type.as_deref(), Some(JSON_MIME_TYPE));
        assert_eq!(resource.raw.name, "\"ORDERS\" database schema");
    }
}
