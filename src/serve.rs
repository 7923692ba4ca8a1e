//! Process runtime: tracing, TLS provider and the two MCP transports.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use miette::Diagnostic;
use rmcp::ServiceExt;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Transport};
use crate::mcp::{McpServer, create_mcp_service};
use crate::memos::{MemosClient, MemosError};
use crate::version::BuildInfo;

#[derive(Error, Diagnostic, Debug)]
pub enum ServeError {
    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(memos_mcp::serve::config))]
    Config(#[from] MemosError),

    #[error("I/O error: {0}")]
    #[diagnostic(code(memos_mcp::serve::io))]
    Io(#[from] std::io::Error),

    #[error("MCP session failed: {message}")]
    #[diagnostic(code(memos_mcp::serve::session))]
    Session { message: String },
}

/// Initialize tracing subscriber with env filter.
///
/// Logs go to stderr; stdout belongs to the stdio transport.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memos_mcp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// reqwest is built without a default rustls provider.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Run the MCP server until the client disconnects or Ctrl-C is received.
pub async fn run(config: Config, build: BuildInfo) -> Result<(), ServeError> {
    let client = Arc::new(MemosClient::new(
        &config.base_url,
        config.access_token.clone(),
        config.timeout,
    )?);

    info!(
        base_url = %client.base_url(),
        authenticated = client.has_access_token(),
        "Starting {}",
        build
    );

    match config.transport {
        Transport::Stdio => run_stdio(client, build).await,
        Transport::Http(addr) => run_http(client, build, addr).await,
    }
}

async fn run_stdio(client: Arc<MemosClient>, build: BuildInfo) -> Result<(), ServeError> {
    let service = McpServer::new(client, build)
        .serve(rmcp::transport::io::stdio())
        .await
        .map_err(|e| ServeError::Session {
            message: e.to_string(),
        })?;

    info!("MCP server running on stdio");

    let reason = service.waiting().await.map_err(|e| ServeError::Session {
        message: e.to_string(),
    })?;
    info!(?reason, "MCP session closed");
    Ok(())
}

async fn run_http(
    client: Arc<MemosClient>,
    build: BuildInfo,
    addr: SocketAddr,
) -> Result<(), ServeError> {
    let ct = CancellationToken::new();
    let app = Router::new()
        .nest_service("/mcp", create_mcp_service(client, build, ct.child_token()))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("MCP server listening on http://{}/mcp", listener.local_addr()?);

    let signal = ct.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested");
            signal.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await?;
    Ok(())
}
