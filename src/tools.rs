use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::db::{self, ConnectionParams, OperationResult};
use crate::error::DispatchError;
use crate::rpc::{CallToolResult, ColumnsArguments, QueryArguments, Tool};

pub const GET_TABLE_COLUMNS: &str = "get_table_columns";
pub const GET_TABLES: &str = "get_tables";
pub const EXECUTE_QUERY: &str = "execute_query";
pub const TEST_CONNECTION: &str = "test_connection";

const CONNECTION_FIELDS: &[&str] = &["host", "user", "password", "database"];
const COLUMNS_FIELDS: &[&str] = &["host", "user", "password", "database", "tableName"];
const QUERY_FIELDS: &[&str] = &["host", "user", "password", "database", "query"];

/// Every tool accepts the connection properties; `extra` adds the
/// tool-specific ones on top.
fn input_schema(extra: Value, required: &[&str]) -> Value {
    let mut properties = json!({
        "host": {"type": "string", "description": "Database host address"},
        "user": {"type": "string", "description": "Database username"},
        "password": {"type": "string", "description": "Database password"},
        "database": {"type": "string", "description": "Database name"},
        "port": {"type": "number", "description": "Database port number, defaults to 3306", "default": 3306}
    });
    if let (Some(base), Some(add)) = (properties.as_object_mut(), extra.as_object()) {
        for (key, value) in add {
            base.insert(key.clone(), value.clone());
        }
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// The fixed tool registry, in registration order.
pub fn descriptors() -> Vec<Tool> {
    vec![
        Tool {
            name: GET_TABLE_COLUMNS.to_string(),
            description: "Get column information for a table: name, type, nullability, \
                          comment, default value and extra attributes"
                .to_string(),
            input_schema: input_schema(
                json!({
                    "tableName": {"type": "string", "description": "Table name"}
                }),
                COLUMNS_FIELDS,
            ),
        },
        Tool {
            name: GET_TABLES.to_string(),
            description: "Get all tables in a database: name, comment, type, engine and \
                          row count"
                .to_string(),
            input_schema: input_schema(json!({}), CONNECTION_FIELDS),
        },
        Tool {
            name: EXECUTE_QUERY.to_string(),
            description: "Execute a custom SQL query with optional bind parameters".to_string(),
            input_schema: input_schema(
                json!({
                    "query": {"type": "string", "description": "SQL query to execute"},
                    "params": {
                        "type": "array",
                        "description": "Optional ordered query parameters",
                        "items": {"type": "string"}
                    }
                }),
                QUERY_FIELDS,
            ),
        },
        Tool {
            name: TEST_CONNECTION.to_string(),
            description: "Test that a database connection can be established".to_string(),
            input_schema: input_schema(json!({}), CONNECTION_FIELDS),
        },
    ]
}

/// One validated tool invocation, ready to execute.
#[derive(Debug)]
pub enum ToolCall {
    GetTableColumns(ColumnsArguments),
    GetTables(ConnectionParams),
    ExecuteQuery(QueryArguments),
    TestConnection(ConnectionParams),
}

impl ToolCall {
    /// Validate the raw arguments for `name`. Deserialization does the
    /// field checking; nothing here touches the database.
    pub fn parse(name: &str, arguments: Value) -> Result<ToolCall, DispatchError> {
        match name {
            GET_TABLE_COLUMNS => Ok(ToolCall::GetTableColumns(parse_arguments(
                name,
                COLUMNS_FIELDS,
                arguments,
            )?)),
            GET_TABLES => Ok(ToolCall::GetTables(parse_arguments(
                name,
                CONNECTION_FIELDS,
                arguments,
            )?)),
            EXECUTE_QUERY => Ok(ToolCall::ExecuteQuery(parse_arguments(
                name,
                QUERY_FIELDS,
                arguments,
            )?)),
            TEST_CONNECTION => Ok(ToolCall::TestConnection(parse_arguments(
                name,
                CONNECTION_FIELDS,
                arguments,
            )?)),
            _ => Err(DispatchError::unknown_tool(name)),
        }
    }

    pub fn tool_name(&self) -> &'static str {
        match self {
            ToolCall::GetTableColumns(_) => GET_TABLE_COLUMNS,
            ToolCall::GetTables(_) => GET_TABLES,
            ToolCall::ExecuteQuery(_) => EXECUTE_QUERY,
            ToolCall::TestConnection(_) => TEST_CONNECTION,
        }
    }
}

fn parse_arguments<T: DeserializeOwned>(
    tool: &str,
    required: &[&str],
    arguments: Value,
) -> Result<T, DispatchError> {
    serde_json::from_value(arguments).map_err(|e| DispatchError::invalid_arguments(tool, required, e))
}

/// Seam between the dispatcher and the database layer. The server hands
/// the dispatcher a real DbExecutor; tests substitute one that records
/// calls instead of connecting anywhere.
pub trait ToolExecutor {
    fn execute(
        &self,
        call: ToolCall,
    ) -> impl std::future::Future<Output = Result<String, DispatchError>> + Send;
}

/// Executor backed by the per-call database operations.
pub struct DbExecutor;

impl ToolExecutor for DbExecutor {
    fn execute(
        &self,
        call: ToolCall,
    ) -> impl std::future::Future<Output = Result<String, DispatchError>> + Send {
        async move {
            match call {
                ToolCall::GetTableColumns(args) => {
                    to_text(&db::get_table_columns(&args.connection, &args.table_name).await)
                }
                ToolCall::GetTables(params) => to_text(&db::get_tables(&params).await),
                ToolCall::ExecuteQuery(args) => to_text(
                    &db::execute_query(&args.connection, &args.query, args.params.as_deref()).await,
                ),
                ToolCall::TestConnection(params) => to_text(&db::test_connection(&params).await),
            }
        }
    }
}

fn to_text<T: Serialize>(result: &OperationResult<T>) -> Result<String, DispatchError> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Route one call: validate, execute, wrap. Failed operations come back
/// as successful envelopes with their success flag down; only validation
/// and serialization failures produce an error-flagged response.
pub async fn dispatch<E: ToolExecutor>(executor: &E, name: &str, arguments: Value) -> CallToolResult {
    let call = match ToolCall::parse(name, arguments) {
        Ok(call) => call,
        Err(e) => return CallToolResult::error(format!("Error: {e}")),
    };
    debug!("Dispatching tool call: {}", call.tool_name());
    match executor.execute(call).await {
        Ok(text) => CallToolResult::text(text),
        Err(e) => CallToolResult::error(format!("Error: {e}")),
    }
}
