//! Request and response types exchanged with the memos API.
//!
//! Remote payloads are camelCase JSON. Every decoded field has a default so
//! that older or newer servers omitting a field still decode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::visibility::Visibility;

const MEMO_NAME_PREFIX: &str = "memos/";
const USER_NAME_PREFIX: &str = "users/";

/// A memo as returned by the remote service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Memo {
    pub name: String,
    pub uid: String,
    pub creator: String,
    pub content: String,
    pub visibility: String,
    pub pinned: bool,
    #[serde(deserialize_with = "crate::serde_utils::null_as_default")]
    pub tags: Vec<String>,
    pub create_time: String,
    pub update_time: String,
    pub display_time: String,
    pub snippet: String,
}

/// Search criteria plus pagination controls for listing memos.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub creator_id: Option<i64>,
    pub tag: Option<String>,
    pub visibility: Option<String>,
    pub pinned: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub page_token: Option<String>,
    pub order_by: Option<String>,
    pub show_deleted: bool,
}

/// One page of memos.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(deserialize_with = "crate::serde_utils::null_as_default")]
    pub memos: Vec<Memo>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateMemoRequest {
    pub content: String,
    /// Defaults to `PRIVATE` when unset.
    pub visibility: Option<String>,
    pub pinned: Option<bool>,
}

/// Partial update. `None` leaves the field untouched server-side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateMemoRequest {
    pub content: Option<String>,
    pub visibility: Option<String>,
    pub pinned: Option<bool>,
}

impl UpdateMemoRequest {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.visibility.is_none() && self.pinned.is_none()
    }
}

/// Sentinel the API requires in every memo write payload.
pub(crate) const STATE_UNSPECIFIED: &str = "STATE_UNSPECIFIED";

/// Outbound body for `POST /api/v1/memos`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateMemoPayload<'a> {
    pub state: &'static str,
    pub content: &'a str,
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

/// Outbound body for `PATCH /api/v1/memos/{uid}`.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateMemoPayload<'a> {
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub role: String,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: String,
    pub description: String,
    pub state: String,
    pub create_time: String,
    pub update_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemoTypeStats {
    pub link_count: i64,
    pub code_count: i64,
    pub todo_count: i64,
    pub undo_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserStats {
    pub name: String,
    pub memo_display_timestamps: Vec<String>,
    pub memo_type_stats: MemoTypeStats,
    pub tag_count: BTreeMap<String, i64>,
    pub pinned_memos: Vec<String>,
    pub total_memo_count: i64,
}

/// Reference to one end of a relation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelatedMemo {
    pub name: String,
    pub snippet: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemoRelation {
    pub memo: RelatedMemo,
    pub related_memo: RelatedMemo,
    #[serde(rename = "type")]
    pub relation_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct RelationsResponse {
    #[serde(deserialize_with = "crate::serde_utils::null_as_default")]
    pub relations: Vec<MemoRelation>,
}

/// Kind of link between two memos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    Reference,
    Comment,
    TypeUnspecified,
}

/// Relation to write; `related_memo` may be a bare uid or `memos/<uid>`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRelation {
    pub related_memo: String,
    pub relation_type: RelationType,
}

#[derive(Debug, Serialize)]
pub(crate) struct RelationPayload {
    #[serde(rename = "relatedMemo")]
    pub related_memo: String,
    #[serde(rename = "type")]
    pub relation_type: RelationType,
}

#[derive(Debug, Serialize)]
pub(crate) struct SetRelationsPayload {
    pub relations: Vec<RelationPayload>,
}

/// Strip a leading `memos/` so both `abc` and `memos/abc` address the same memo.
pub fn memo_uid(value: &str) -> &str {
    value.strip_prefix(MEMO_NAME_PREFIX).unwrap_or(value)
}

/// Resource name (`memos/<uid>`) for a uid or an already-qualified name.
pub fn memo_name(value: &str) -> String {
    if value.starts_with(MEMO_NAME_PREFIX) {
        value.to_string()
    } else {
        format!("{MEMO_NAME_PREFIX}{value}")
    }
}

/// Strip a leading `users/` from a trimmed user reference.
pub fn user_id(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed.strip_prefix(USER_NAME_PREFIX).unwrap_or(trimmed)
}
