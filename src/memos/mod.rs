//! Memos REST API access.
//!
//! - **visibility**: canonical visibility tokens
//! - **filter**: typed filter expression builder for list queries
//! - **models**: request/response DTOs
//! - **client**: the HTTP client, sole owner of outbound requests
//! - **error**: `MemosError`, shared by all of the above

pub mod client;
pub mod error;
pub mod filter;
pub mod models;
pub mod visibility;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{DEFAULT_PAGE_SIZE, MemosClient};
pub use error::{MemosError, MemosResult};
pub use filter::{MemoFilter, Predicate, build_memo_filter};
pub use models::{
    CreateMemoRequest, Memo, MemoRelation, NewRelation, RelationType, SearchRequest,
    SearchResponse, UpdateMemoRequest, User, UserStats, memo_uid, user_id,
};
pub use visibility::Visibility;
