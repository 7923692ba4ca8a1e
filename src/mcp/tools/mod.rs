//! MCP tool implementations
//!
//! Each module holds the parameter types, result shapes and handler
//! functions for one group of tools. Handlers validate their own required
//! arguments, call the [`MemosClient`](crate::memos::MemosClient), and
//! return a serializable summary; the server turns that into a tool result.

pub mod memos;
pub mod relations;
pub mod users;

#[cfg(test)]
mod memos_test;

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use tracing::error;

use crate::memos::{MemosError, MemosResult, memo_uid};

/// Convert a handler outcome into a tool result.
///
/// Failures become error results carrying the message, never protocol
/// faults, so one failed call cannot end the session.
pub(crate) fn into_tool_result<T: Serialize>(tool: &str, result: MemosResult<T>) -> CallToolResult {
    match result {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(content) => CallToolResult::success(vec![Content::text(content)]),
            Err(e) => {
                error!(tool, error = %e, "failed to encode tool response");
                CallToolResult::error(vec![Content::text(format!("encode response: {e}"))])
            }
        },
        Err(e) => {
            error!(tool, error = %e, validation = e.is_validation(), "tool call failed");
            CallToolResult::error(vec![Content::text(e.to_string())])
        }
    }
}

/// Resolve a `memo_uid` argument, accepting `abc` or `memos/abc`.
///
/// Absent and blank values are both reported as a missing field.
pub(crate) fn required_uid(value: Option<&str>) -> MemosResult<String> {
    let uid = memo_uid(value.unwrap_or_default().trim());
    if uid.trim().is_empty() {
        return Err(MemosError::MissingField { field: "memo_uid" });
    }
    Ok(uid.to_string())
}

/// Treat an explicitly empty string the same as an omitted argument.
pub(crate) fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
