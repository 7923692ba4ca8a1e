pub mod config;
pub mod mcp;
pub mod memos;
pub mod serde_utils;
pub mod serve;
pub mod version;
