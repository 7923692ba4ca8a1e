//! Memo CRUD tools: `memos_search`, `memos_get`, `memos_create`,
//! `memos_update` and `memos_delete`.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use super::{provided, required_uid};
use crate::memos::{
    CreateMemoRequest, Memo, MemosClient, MemosError, MemosResult, SearchRequest,
    UpdateMemoRequest,
};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchMemosParams {
    #[schemars(description = "Text to search for in memo content")]
    pub query: Option<String>,
    #[schemars(description = "Filter by creator user ID")]
    #[serde(default, deserialize_with = "crate::serde_utils::lenient_i64")]
    pub creator_id: Option<i64>,
    #[schemars(description = "Filter by tag name")]
    pub tag: Option<String>,
    #[schemars(description = "Visibility: PUBLIC, PROTECTED, PRIVATE")]
    pub visibility: Option<String>,
    #[schemars(description = "Filter by pinned status")]
    pub pinned: Option<bool>,
    #[schemars(description = "Maximum results to return (default 10)")]
    #[serde(default, deserialize_with = "crate::serde_utils::lenient_i64")]
    pub limit: Option<i64>,
    #[schemars(description = "Results offset (default 0). Ignored when page_token is set.")]
    #[serde(default, deserialize_with = "crate::serde_utils::lenient_i64")]
    pub offset: Option<i64>,
    #[schemars(description = "Page token from a previous response")]
    pub page_token: Option<String>,
    #[schemars(description = "Order by fields, e.g. pinned desc, display_time desc")]
    pub order_by: Option<String>,
    #[schemars(description = "Include deleted memos")]
    pub show_deleted: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetMemoParams {
    #[schemars(required, description = "Memo UID or name (e.g., 'abc123' or 'memos/abc123')")]
    pub memo_uid: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateMemoParams {
    #[schemars(required, description = "Memo content in Markdown")]
    pub content: Option<String>,
    #[schemars(description = "Visibility: PUBLIC, PROTECTED, PRIVATE (default PRIVATE)")]
    pub visibility: Option<String>,
    #[schemars(description = "Whether to pin the memo")]
    pub pinned: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateMemoParams {
    #[schemars(required, description = "Memo UID or name (e.g., 'abc123' or 'memos/abc123')")]
    pub memo_uid: Option<String>,
    #[schemars(description = "New memo content (optional)")]
    pub content: Option<String>,
    #[schemars(description = "Visibility: PUBLIC, PROTECTED, PRIVATE (optional)")]
    pub visibility: Option<String>,
    #[schemars(description = "Whether to pin the memo (optional)")]
    pub pinned: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteMemoParams {
    #[schemars(required, description = "Memo UID or name (e.g., 'abc123' or 'memos/abc123')")]
    pub memo_uid: Option<String>,
    #[schemars(description = "Force delete even if memo has associated data")]
    pub force: Option<bool>,
}

// =============================================================================
// Result Shapes
// =============================================================================

/// Memo fields reported back to the caller. Empty strings are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoSummary {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub creator: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub visibility: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub create_time: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub update_time: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_time: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub snippet: String,
}

impl From<Memo> for MemoSummary {
    fn from(memo: Memo) -> Self {
        Self {
            name: memo.name,
            uid: memo.uid,
            creator: memo.creator,
            content: memo.content,
            visibility: memo.visibility,
            pinned: memo.pinned,
            tags: memo.tags,
            create_time: memo.create_time,
            update_time: memo.update_time,
            display_time: memo.display_time,
            snippet: memo.snippet,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub count: usize,
    pub memos: Vec<MemoSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoResult {
    pub success: bool,
    pub memo: MemoSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub success: bool,
    pub uid: String,
    pub force: bool,
}

impl From<SearchMemosParams> for SearchRequest {
    fn from(params: SearchMemosParams) -> Self {
        Self {
            query: params.query,
            creator_id: params.creator_id,
            tag: params.tag,
            visibility: params.visibility,
            pinned: params.pinned,
            limit: params.limit,
            offset: params.offset,
            page_token: params.page_token,
            order_by: params.order_by,
            show_deleted: params.show_deleted.unwrap_or(false),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn search_memos(
    client: &MemosClient,
    params: SearchMemosParams,
) -> MemosResult<SearchResult> {
    let response = client.search_memos(&params.into()).await?;

    let memos: Vec<MemoSummary> = response.memos.into_iter().map(Into::into).collect();
    Ok(SearchResult {
        count: memos.len(),
        memos,
        next_page_token: response.next_page_token,
    })
}

pub async fn get_memo(client: &MemosClient, params: GetMemoParams) -> MemosResult<MemoSummary> {
    let uid = required_uid(params.memo_uid.as_deref())?;
    client.get_memo(&uid).await.map(Into::into)
}

pub async fn create_memo(client: &MemosClient, params: CreateMemoParams) -> MemosResult<MemoResult> {
    let content = params
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or(MemosError::MissingField { field: "content" })?;

    let memo = client
        .create_memo(&CreateMemoRequest {
            content,
            visibility: provided(params.visibility),
            pinned: params.pinned,
        })
        .await?;

    Ok(MemoResult {
        success: true,
        memo: memo.into(),
    })
}

/// Apply a partial update. Omitted and empty-string arguments are left
/// untouched; only explicitly supplied values are sent.
pub async fn update_memo(client: &MemosClient, params: UpdateMemoParams) -> MemosResult<MemoResult> {
    let uid = required_uid(params.memo_uid.as_deref())?;

    let memo = client
        .update_memo(
            &uid,
            &UpdateMemoRequest {
                content: provided(params.content),
                visibility: provided(params.visibility),
                pinned: params.pinned,
            },
        )
        .await?;

    Ok(MemoResult {
        success: true,
        memo: memo.into(),
    })
}

pub async fn delete_memo(client: &MemosClient, params: DeleteMemoParams) -> MemosResult<DeleteResult> {
    let uid = required_uid(params.memo_uid.as_deref())?;
    let force = params.force.unwrap_or(false);

    client.delete_memo(&uid, force).await?;

    Ok(DeleteResult {
        success: true,
        uid,
        force,
    })
}
