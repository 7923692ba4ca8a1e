//! Model Context Protocol (MCP) server implementation
//!
//! - **server**: `McpServer`, the tool router and `ServerHandler`
//! - **tools**: parameter types and handlers, grouped by entity
//!   (memos, relations, users)
//! - **service**: Streamable HTTP wrapper around `McpServer`
//!
//! The server is served over stdio by default; see `bin/server.rs`.

pub mod server;
mod service;
pub mod tools;


pub use server::McpServer;
pub use service::create_mcp_service;
