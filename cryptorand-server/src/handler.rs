//! MCP method routing on top of the operation registry.

use std::sync::Arc;
use std::time::Instant;

use cryptorand_core::constants::PROMPT_GENERATE_RANDOM;
use cryptorand_core::prompt::{self, PROMPT_DESCRIPTION};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::rpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use crate::state::AppState;

/// Protocol revision offered when the client does not name one.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const SERVER_NAME: &str = "cryptorand";

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct GetPromptParams {
    name: String,
    #[serde(default)]
    arguments: Option<Map<String, Value>>,
}

/// Turns decoded JSON-RPC messages into responses. Stateless apart from the
/// shared read-only [`AppState`].
pub struct McpHandler {
    state: Arc<AppState>,
}

impl McpHandler {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Handles one undecoded line. Invalid UTF-8 is a parse error.
    pub fn handle_bytes(&self, raw: &[u8]) -> Option<JsonRpcResponse> {
        match std::str::from_utf8(raw) {
            Ok(line) => self.handle_line(line),
            Err(e) => {
                tracing::warn!(error = %e, "message is not valid UTF-8");
                Some(JsonRpcResponse::failure(Value::Null, JsonRpcError::parse_error(e)))
            }
        }
    }

    /// Handles one raw message. Returns `None` for notifications.
    pub fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<Value>(line) {
            Ok(value) => self.handle_value(value),
            Err(e) => {
                tracing::warn!(error = %e, "unparseable message");
                Some(JsonRpcResponse::failure(Value::Null, JsonRpcError::parse_error(e)))
            }
        }
    }

    pub fn handle_value(&self, value: Value) -> Option<JsonRpcResponse> {
        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle(request),
            Err(e) => Some(JsonRpcResponse::failure(id, JsonRpcError::invalid_request(e))),
        }
    }

    pub fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification received");
        }
        let outcome = if request.jsonrpc != JSONRPC_VERSION {
            Err(JsonRpcError::invalid_request(format!(
                "unsupported jsonrpc version '{}'",
                request.jsonrpc
            )))
        } else {
            self.dispatch(&request.method, request.params)
        };

        let Some(id) = request.id else {
            if let Err(e) = outcome {
                tracing::debug!(method = %request.method, error = %e.message, "notification failed");
            }
            return None;
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn dispatch(&self, method: &str, params: Value) -> Result<Value, JsonRpcError> {
        match method {
            "initialize" => Ok(self.initialize(&params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.list_tools()),
            "tools/call" => self.call_tool(params),
            "prompts/list" => Ok(self.list_prompts()),
            "prompts/get" => self.get_prompt(params),
            m if m.starts_with("notifications/") => Ok(Value::Null),
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }

    fn initialize(&self, params: &Value) -> Value {
        let version = params
            .get("protocolVersion")
            .and_then(Value::as_str)
            .unwrap_or(PROTOCOL_VERSION);
        tracing::info!(protocol_version = version, "client initialized");
        json!({
            "protocolVersion": version,
            "capabilities": {
                "tools": { "listChanged": false },
                "prompts": { "listChanged": false },
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .state
            .registry
            .list_operations()
            .iter()
            .map(|spec| {
                json!({
                    "name": spec.name,
                    "description": spec.description,
                    "inputSchema": spec.input_schema(),
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    fn call_tool(&self, params: Value) -> Result<Value, JsonRpcError> {
        let params: CallToolParams =
            serde_json::from_value(params).map_err(JsonRpcError::invalid_params)?;
        let arguments = params.arguments.unwrap_or_default();

        let started = Instant::now();
        let outcome = self
            .state
            .registry
            .invoke(&params.name, &arguments, self.state.rng.as_ref());
        let elapsed_us = started.elapsed().as_micros() as u64;

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(tool = %params.name, error = %e, elapsed_us, "tool call failed");
                return Err(JsonRpcError::from(&e));
            }
        };
        tracing::info!(
            tool = %params.name,
            generated = result.output.len(),
            elapsed_us,
            "tool call completed"
        );

        let text = serde_json::to_string(&result).map_err(JsonRpcError::internal)?;
        let mut body = serde_json::to_value(&result).map_err(JsonRpcError::internal)?;
        if let Value::Object(fields) = &mut body {
            fields.insert("content".into(), json!([{ "type": "text", "text": text }]));
            fields.insert("isError".into(), Value::Bool(false));
        }
        Ok(body)
    }

    fn list_prompts(&self) -> Value {
        json!({
            "prompts": [{
                "name": PROMPT_GENERATE_RANDOM,
                "description": PROMPT_DESCRIPTION,
                "arguments": [
                    {
                        "name": "type",
                        "description": "Type of random value needed (integer, float, uuid, string, bytes, choice, boolean)",
                        "required": false,
                    },
                    {
                        "name": "requirements",
                        "description": "Specific requirements for the random generation",
                        "required": false,
                    },
                ],
            }],
        })
    }

    fn get_prompt(&self, params: Value) -> Result<Value, JsonRpcError> {
        let params: GetPromptParams =
            serde_json::from_value(params).map_err(JsonRpcError::invalid_params)?;
        if params.name != PROMPT_GENERATE_RANDOM {
            return Err(JsonRpcError::invalid_params(format!(
                "Unknown prompt: {}",
                params.name
            )));
        }
        let arguments = params.arguments.unwrap_or_default();
        let text = prompt::generate_random(
            &self.state.registry,
            arguments.get("type").and_then(Value::as_str),
            arguments.get("requirements").and_then(Value::as_str),
        );
        Ok(json!({
            "description": PROMPT_DESCRIPTION,
            "messages": [{
                "role": "user",
                "content": { "type": "text", "text": text },
            }],
        }))
    }
}
