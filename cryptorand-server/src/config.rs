use std::env;
use std::net::SocketAddr;

use clap::ValueEnum;

use crate::error::ServerError;

/// How requests reach the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    /// Newline-delimited JSON-RPC over stdin/stdout.
    Stdio,
    /// JSON-RPC over `POST /mcp`.
    Http,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub transport: TransportKind,
    /// Bind address for the HTTP transport.
    pub http_host: String,
    /// Port for the HTTP transport.
    pub http_port: u16,
    /// Log the startup banner.
    pub show_banner: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `CRYPTORAND_TRANSPORT` (optional, default `stdio`): `stdio` or `http`.
    /// - `CRYPTORAND_HTTP_HOST` (optional, default 127.0.0.1).
    /// - `CRYPTORAND_HTTP_PORT` (optional, default 8080).
    /// - `MCP_NO_BANNER` (optional): `1` suppresses the startup banner.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let transport = get("CRYPTORAND_TRANSPORT")
            .and_then(|s| TransportKind::from_str(s.trim(), true).ok())
            .unwrap_or(TransportKind::Stdio);

        let http_host = get("CRYPTORAND_HTTP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let http_port = get("CRYPTORAND_HTTP_PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);

        let show_banner = get("MCP_NO_BANNER").as_deref() != Some("1");

        Self {
            transport,
            http_host,
            http_port,
            show_banner,
        }
    }

    pub fn http_addr(&self) -> Result<SocketAddr, ServerError> {
        format!("{}:{}", self.http_host, self.http_port)
            .parse()
            .map_err(|e| {
                ServerError::Config(format!(
                    "invalid HTTP bind address {}:{}: {e}",
                    self.http_host, self.http_port
                ))
            })
    }
}
