//! Memos client error types.
//!
//! Every failure crossing the remote-call boundary is a `MemosError`.
//! Variants fall into four classes: local validation, transport,
//! remote API rejection and response decoding.

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced by the filter builder, visibility normalizer and API client.
#[derive(Error, Diagnostic, Debug)]
pub enum MemosError {
    #[error("{field} is required")]
    #[diagnostic(code(memos_mcp::validation::missing_field))]
    MissingField { field: &'static str },

    #[error("visibility cannot be empty")]
    #[diagnostic(
        code(memos_mcp::validation::empty_visibility),
        help("Use one of PUBLIC, PROTECTED, PRIVATE")
    )]
    EmptyVisibility,

    #[error("invalid visibility: {value}")]
    #[diagnostic(
        code(memos_mcp::validation::invalid_visibility),
        help("Use one of PUBLIC, PROTECTED, PRIVATE")
    )]
    InvalidVisibility { value: String },

    #[error("at least one field must be provided for update")]
    #[diagnostic(code(memos_mcp::validation::nothing_to_update))]
    NothingToUpdate,

    #[error("{message}")]
    #[diagnostic(
        code(memos_mcp::validation::invalid_base_url),
        help("Pass --base-url or set MEMOS_BASE_URL, e.g. http://localhost:5230")
    )]
    InvalidBaseUrl { message: String },

    #[error("failed to build HTTP client: {source}")]
    #[diagnostic(code(memos_mcp::transport::http_client))]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },

    #[error("request failed: {source}")]
    #[diagnostic(
        code(memos_mcp::transport::request_failed),
        help("Is the memos server reachable? Check --base-url and --timeout.")
    )]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("request cancelled")]
    #[diagnostic(code(memos_mcp::transport::cancelled))]
    Cancelled,

    #[error("{body}")]
    #[diagnostic(code(memos_mcp::remote::api_error))]
    Api { status: u16, body: String },

    #[error("decode {context}: {source}")]
    #[diagnostic(code(memos_mcp::decode))]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("encode request: {source}")]
    #[diagnostic(code(memos_mcp::encode))]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

impl MemosError {
    /// True for failures detected locally, before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MemosError::MissingField { .. }
                | MemosError::EmptyVisibility
                | MemosError::InvalidVisibility { .. }
                | MemosError::NothingToUpdate
                | MemosError::InvalidBaseUrl { .. }
        )
    }

    /// HTTP status of a remote rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            MemosError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for memos operations.
pub type MemosResult<T> = Result<T, MemosError>;
