//! JSON-RPC 2.0 envelope types.

use cryptorand_core::error::RandError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

pub const JSONRPC_VERSION: &str = "2.0";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// An inbound request or notification (no `id` member).
///
/// An explicit `"id": null` is kept as `Some(Value::Null)` and answered.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// Only called when the member exists, so `null` stays distinguishable from absent.
fn present_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn parse_error(detail: impl std::fmt::Display) -> Self {
        Self::new(PARSE_ERROR, format!("Parse error: {detail}"))
    }

    pub fn invalid_request(detail: impl std::fmt::Display) -> Self {
        Self::new(INVALID_REQUEST, format!("Invalid request: {detail}"))
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    pub fn invalid_params(detail: impl std::fmt::Display) -> Self {
        Self::new(INVALID_PARAMS, format!("Invalid params: {detail}"))
    }

    pub fn internal(detail: impl std::fmt::Display) -> Self {
        Self::new(INTERNAL_ERROR, format!("Internal error: {detail}"))
    }
}

impl From<&RandError> for JsonRpcError {
    fn from(err: &RandError) -> Self {
        match err {
            RandError::Validation(v) => Self::new(INVALID_PARAMS, v.reason.clone()).with_data(json!({
                "kind": "validation_error",
                "field": v.field,
                "constraint": v.constraint,
                "message": v.reason,
            })),
            RandError::UnknownOperation(name) => Self::new(INVALID_PARAMS, err.to_string())
                .with_data(json!({
                    "kind": "unknown_operation",
                    "field": "name",
                    "message": format!("No tool named '{name}' is registered"),
                })),
            RandError::EntropyUnavailable(detail) => Self::new(INTERNAL_ERROR, err.to_string())
                .with_data(json!({
                    "kind": "entropy_unavailable",
                    "transient": true,
                    "message": detail,
                })),
            RandError::Serialization(detail) => Self::new(INTERNAL_ERROR, err.to_string())
                .with_data(json!({
                    "kind": "serialization_error",
                    "transient": false,
                    "message": detail,
                })),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptorand_core::error::ValidationError;
    use proptest::prelude::*;

    #[test]
    fn test_notification_has_no_id() {
        let req: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).unwrap();
        assert!(req.is_notification());
        assert_eq!(req.params, Value::Null);
    }

    #[test]
    fn test_null_id_is_a_request() {
        let req: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).unwrap();
        assert!(!req.is_notification());
        assert_eq!(req.id, Some(Value::Null));
    }

    #[test]
    fn test_serialization_error_mapping() {
        let rpc = JsonRpcError::from(&RandError::Serialization("oops".into()));
        assert_eq!(rpc.code, INTERNAL_ERROR);
        assert_eq!(rpc.data.unwrap()["transient"], false);
    }

    #[test]
    fn test_success_omits_error() {
        let text = serde_json::to_string(&JsonRpcResponse::success(json!(1), json!({}))).unwrap();
        assert_eq!(text, r#"{"jsonrpc":"2.0","id":1,"result":{}}"#);
    }

    #[test]
    fn test_validation_error_mapping() {
        let err = RandError::Validation(ValidationError::new("count", "Count must be between 1 and 100", "1 <= count <= 100"));
        let rpc = JsonRpcError::from(&err);
        assert_eq!(rpc.code, INVALID_PARAMS);
        assert_eq!(rpc.message, "Count must be between 1 and 100");
        let data = rpc.data.unwrap();
        assert_eq!(data["kind"], "validation_error");
        assert_eq!(data["field"], "count");
    }

    #[test]
    fn test_entropy_error_is_transient() {
        let rpc = JsonRpcError::from(&RandError::EntropyUnavailable("gone".into()));
        assert_eq!(rpc.code, INTERNAL_ERROR);
        assert_eq!(rpc.data.unwrap()["transient"], true);
    }

    proptest! {
        #[test]
        fn fuzz_request_parse_no_panic(input in "\\PC{0,500}") {
            let _ = serde_json::from_str::<JsonRpcRequest>(&input);
        }

        #[test]
        fn fuzz_request_structured(
            id in prop::option::of(0i64..1000),
            method in "[a-z/_]{1,30}",
        ) {
            let json = match id {
                Some(id) => format!(r#"{{"jsonrpc":"2.0","id":{id},"method":"{method}"}}"#),
                None => format!(r#"{{"jsonrpc":"2.0","method":"{method}"}}"#),
            };
            let req: JsonRpcRequest = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(req.is_notification(), id.is_none());
            prop_assert_eq!(req.method, method);
        }
    }
}
