mod config;
mod error;
mod handler;
mod rpc;
mod state;
mod transport;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::{Config, TransportKind};
use handler::McpHandler;
use state::AppState;

#[derive(Parser)]
#[command(
    name = "cryptorand",
    version,
    about = "Cryptographically secure random value tool server"
)]
struct Cli {
    /// Transport to serve on (overrides CRYPTORAND_TRANSPORT)
    #[arg(long, value_enum)]
    transport: Option<TransportKind>,

    /// HTTP bind host (overrides CRYPTORAND_HTTP_HOST)
    #[arg(long)]
    host: Option<String>,

    /// HTTP port (overrides CRYPTORAND_HTTP_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Suppress the startup banner
    #[arg(long)]
    no_banner: bool,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr: stdout carries protocol traffic in stdio mode.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cryptorand_server=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load .env file if present (non-fatal if missing).
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("no .env file loaded: {e}");
    }

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(transport) = cli.transport {
        config.transport = transport;
    }
    if let Some(host) = cli.host {
        config.http_host = host;
    }
    if let Some(port) = cli.port {
        config.http_port = port;
    }
    if cli.no_banner {
        config.show_banner = false;
    }
    tracing::debug!(?config, "configuration loaded");

    let state = Arc::new(AppState::new());
    tracing::info!(
        tools = state.registry.list_operations().len(),
        "operation registry built"
    );
    let mcp = Arc::new(McpHandler::new(state));

    let result = match config.transport {
        TransportKind::Stdio => {
            if config.show_banner {
                tracing::info!(
                    "{} {} running on stdio",
                    handler::SERVER_NAME,
                    env!("CARGO_PKG_VERSION")
                );
            }
            transport::stdio::run(mcp).await
        }
        TransportKind::Http => match config.http_addr() {
            Ok(addr) => {
                if config.show_banner {
                    tracing::info!(
                        %addr,
                        "{} {} running on http",
                        handler::SERVER_NAME,
                        env!("CARGO_PKG_VERSION")
                    );
                }
                transport::http::serve(mcp, addr).await
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}
