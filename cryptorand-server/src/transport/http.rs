use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{Result, ServerError};
use crate::handler::McpHandler;

/// Build the Axum router: JSON-RPC on `POST /mcp` plus a health check.
pub fn build_router(handler: Arc<McpHandler>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/mcp", axum::routing::post(rpc))
        .route("/health", axum::routing::get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(handler)
}

/// Bind and serve until ctrl-c.
pub async fn serve(handler: Arc<McpHandler>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "HTTP listener bound");

    axum::serve(listener, build_router(handler))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

/// POST /mcp
///
/// One JSON-RPC message per request. Notifications are acknowledged with
/// 202 and an empty body.
async fn rpc(
    State(handler): State<Arc<McpHandler>>,
    body: String,
) -> std::result::Result<Response, ServerError> {
    if body.trim().is_empty() {
        return Err(ServerError::BadRequest("empty request body".to_string()));
    }

    let response = tokio::task::spawn_blocking(move || handler.handle_line(&body))
        .await
        .map_err(|e| ServerError::Internal(format!("request task failed: {e}")))?;

    Ok(match response {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    })
}

/// Simple health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::state::AppState;

    fn router() -> Router {
        build_router(Arc::new(McpHandler::new(Arc::new(AppState::new()))))
    }

    async fn post(body: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method("POST")
            .uri("/mcp")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_tool_call_over_http() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": "abc",
            "method": "tools/call",
            "params": {
                "name": "generate_random_choice",
                "arguments": {"choices": ["a", "b", "c"], "count": 3, "allow_duplicates": false}
            }
        });
        let (status, bytes) = post(&body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let response: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(response["id"], "abc");
        let mut picks: Vec<String> = response["result"]["values"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        picks.sort();
        assert_eq!(picks, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_notification_is_accepted() {
        let (status, bytes) = post(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_empty_body_is_bad_request() {
        let (status, _) = post("  ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
