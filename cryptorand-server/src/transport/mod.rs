//! Ways of getting JSON-RPC messages to the [`McpHandler`](crate::handler::McpHandler).

pub mod http;
pub mod stdio;
