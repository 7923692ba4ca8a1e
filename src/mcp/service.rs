//! MCP Streamable HTTP service creation
//!
//! Alternative to the stdio transport: the returned service can be nested
//! into an Axum router.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use super::server::McpServer;
use crate::memos::MemosClient;
use crate::version::BuildInfo;

/// Create MCP Streamable HTTP service
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use memos_mcp::memos::MemosClient;
/// # use memos_mcp::mcp::create_mcp_service;
/// # use memos_mcp::version::BuildInfo;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = MemosClient::new("http://localhost:5230", "", Duration::from_secs(30))?;
/// let ct = CancellationToken::new();
/// let mcp_service = create_mcp_service(client, BuildInfo::current(), ct);
///
/// let app: Router = Router::new().nest_service("/mcp", mcp_service);
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service(
    client: impl Into<Arc<MemosClient>>,
    build: BuildInfo,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer, LocalSessionManager> {
    let client = client.into();

    // New McpServer per session; io::Error matches rmcp's factory signature
    let service_factory = move || -> Result<McpServer, std::io::Error> {
        Ok(McpServer::new(Arc::clone(&client), build))
    };

    let config = StreamableHttpServerConfig::default()
        .with_stateful_mode(true)
        .with_cancellation_token(cancellation_token);

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
