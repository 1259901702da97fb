use log::{debug, error, info, warn};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::rpc::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, ServerCapabilities, ServerInfo, Tool,
    ToolCallParams, ToolsCapability, ToolsList,
};
use crate::tools::{self, ToolExecutor};

pub const SERVER_NAME: &str = "database-server";
pub const SERVER_VERSION: &str = "0.1.0";
pub const PROTOCOL_VERSION: &str = "2025-03-26";

/// Serve JSON-RPC over stdio until the client disconnects. The server
/// holds no database state: initialize only reports identity, and each
/// tool call connects with the credentials it carries.
pub async fn run<E: ToolExecutor>(executor: E) -> Result<(), Box<dyn std::error::Error>> {
    let tools = tools::descriptors();

    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    info!("Database MCP server started and ready to accept connections");
    info!("Serving {} tools over stdio", tools.len());
    debug!("Server PID: {}", std::process::id());

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(response) = handle_line(&line, &tools, &executor).await {
                    if let Err(e) = write_response(&mut stdout, &response).await {
                        error!("Failed to write response: {e}");
                    }
                }
            }
            Ok(None) => {
                info!("stdin closed - client disconnected, shutting down server");
                break;
            }
            Err(e) => {
                warn!("Error reading from stdin: {e} (error kind: {:?})", e.kind());
                if e.kind() == std::io::ErrorKind::UnexpectedEof {
                    info!("Unexpected EOF - client may have terminated");
                    break;
                }
                tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            }
        }
    }

    info!("Database MCP server shutdown complete");
    Ok(())
}

/// Handle one raw frame, returning the serialized response when one is
/// owed. Frames are logged by length only: tool call bodies carry
/// database credentials.
async fn handle_line<E: ToolExecutor>(line: &str, tools: &[Tool], executor: &E) -> Option<String> {
    if line.trim().is_empty() {
        return None;
    }

    debug!("Received message (len={})", line.len());
    match serde_json::from_str::<JsonRpcRequest>(line) {
        Ok(request) => {
            debug!("Parsed request: method={}, id={:?}", request.method, request.id);
            // Handle notifications (no response needed)
            if request.method == "notifications/initialized" || request.method == "initialized" {
                debug!("Received initialization notification: {}", request.method);
                return None;
            }

            let response = handle_request(request, tools, executor).await;
            match serde_json::to_string(&response) {
                Ok(text) => Some(text),
                Err(e) => {
                    error!("Failed to serialize response: {e}");
                    let error_response =
                        JsonRpcResponse::error(None, -32603, "Internal error".to_string());
                    serde_json::to_string(&error_response).ok()
                }
            }
        }
        Err(e) => {
            warn!("Failed to parse request: {e}");
            let error_response = JsonRpcResponse::error(None, -32700, "Parse error".to_string());
            serde_json::to_string(&error_response).ok()
        }
    }
}

async fn write_response(
    stdout: &mut tokio::io::Stdout,
    response: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    stdout.write_all(response.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

async fn handle_request<E: ToolExecutor>(
    request: JsonRpcRequest,
    tools: &[Tool],
    executor: &E,
) -> JsonRpcResponse {
    match request.method.as_str() {
        "initialize" => {
            debug!("Handling initialize request");
            JsonRpcResponse::success(
                request.id,
                json!(InitializeResult {
                    protocol_version: PROTOCOL_VERSION.to_string(),
                    capabilities: ServerCapabilities {
                        tools: Some(ToolsCapability { list_changed: true }),
                    },
                    server_info: ServerInfo {
                        name: SERVER_NAME.to_string(),
                        version: SERVER_VERSION.to_string(),
                    },
                }),
            )
        }
        "tools/list" => {
            debug!("Listing available tools");
            JsonRpcResponse::success(
                request.id,
                json!(ToolsList {
                    tools: tools.to_vec()
                }),
            )
        }
        "tools/call" => match request.params {
            Some(params) => match serde_json::from_value::<ToolCallParams>(params) {
                Ok(tool_params) => {
                    debug!("Handling tool call: {}", tool_params.name);
                    let result =
                        tools::dispatch(executor, &tool_params.name, tool_params.arguments).await;
                    JsonRpcResponse::success(request.id, json!(result))
                }
                Err(e) => JsonRpcResponse::error(
                    request.id,
                    -32602,
                    format!("Invalid tool call parameters: {e}"),
                ),
            },
            None => JsonRpcResponse::error(request.id, -32602, "Missing parameters".to_string()),
        },
        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            )
        }
    }
}
