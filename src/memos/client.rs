use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url, header};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::error::{MemosError, MemosResult};
use super::filter::build_memo_filter;
use super::models::{
    CreateMemoPayload, CreateMemoRequest, Memo, MemoRelation, NewRelation, RelationPayload,
    RelationsResponse, STATE_UNSPECIFIED, SearchRequest, SearchResponse, SetRelationsPayload,
    UpdateMemoPayload, UpdateMemoRequest, User, UserStats, memo_name, user_id,
};
use super::visibility::Visibility;

/// Page size used when a search does not ask for a positive limit.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

const API_PREFIX: [&str; 2] = ["api", "v1"];

/// HTTP client for the memos REST API (`/api/v1`).
///
/// Holds only immutable configuration; clones share the connection pool.
#[derive(Clone)]
pub struct MemosClient {
    base_url: String,
    base: Url,
    access_token: String,
    timeout: Duration,
    client: Client,
}

impl MemosClient {
    /// Create a new client.
    ///
    /// The base URL must be non-empty, parse, and carry a scheme. A single
    /// trailing slash is dropped. An empty access token means requests are
    /// sent without credentials.
    pub fn new(
        base_url: &str,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> MemosResult<Self> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(MemosError::InvalidBaseUrl {
                message: "base URL is required".to_string(),
            });
        }
        if !trimmed.contains("://") {
            return Err(MemosError::InvalidBaseUrl {
                message: "base URL must include scheme".to_string(),
            });
        }

        let base_url = trimmed.strip_suffix('/').unwrap_or(trimmed).to_string();
        let base = Url::parse(&base_url).map_err(|e| MemosError::InvalidBaseUrl {
            message: format!("invalid base URL: {e}"),
        })?;
        if base.cannot_be_a_base() {
            return Err(MemosError::InvalidBaseUrl {
                message: "base URL must include scheme".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| MemosError::HttpClient { source })?;

        Ok(Self {
            base_url,
            base,
            access_token: access_token.into(),
            timeout,
            client,
        })
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn has_access_token(&self) -> bool {
        !self.access_token.trim().is_empty()
    }

    /// List memos matching the request, one page at a time.
    pub async fn search_memos(&self, req: &SearchRequest) -> MemosResult<SearchResponse> {
        let params = search_params(req)?;
        let url = self.endpoint(&["memos"])?;
        let request = self.request(Method::GET, url).query(&params);

        let mut response: SearchResponse = self.send_json(request, "search response").await?;
        if response.next_page_token.as_deref() == Some("") {
            response.next_page_token = None;
        }
        Ok(response)
    }

    pub async fn get_memo(&self, uid: &str) -> MemosResult<Memo> {
        require_uid(uid)?;
        let url = self.endpoint(&["memos", uid])?;
        self.send_json(self.request(Method::GET, url), "memo").await
    }

    /// Create a memo. Visibility defaults to `PRIVATE`.
    pub async fn create_memo(&self, req: &CreateMemoRequest) -> MemosResult<Memo> {
        if req.content.trim().is_empty() {
            return Err(MemosError::MissingField { field: "content" });
        }
        let visibility = match req.visibility.as_deref().filter(|v| !v.is_empty()) {
            Some(v) => Visibility::normalize(v)?,
            None => Visibility::Private,
        };

        let payload = CreateMemoPayload {
            state: STATE_UNSPECIFIED,
            content: &req.content,
            visibility,
            pinned: req.pinned,
        };

        let url = self.endpoint(&["memos"])?;
        let request = self.with_body(self.request(Method::POST, url), &payload)?;
        self.send_json(request, "memo").await
    }

    /// Patch only the fields present in `req`.
    pub async fn update_memo(&self, uid: &str, req: &UpdateMemoRequest) -> MemosResult<Memo> {
        require_uid(uid)?;
        if req.is_empty() {
            return Err(MemosError::NothingToUpdate);
        }
        let visibility = req
            .visibility
            .as_deref()
            .map(Visibility::normalize)
            .transpose()?;

        let payload = UpdateMemoPayload {
            state: STATE_UNSPECIFIED,
            content: req.content.as_deref(),
            visibility,
            pinned: req.pinned,
        };

        let url = self.endpoint(&["memos", uid])?;
        let request = self.with_body(self.request(Method::PATCH, url), &payload)?;
        self.send_json(request, "memo").await
    }

    pub async fn delete_memo(&self, uid: &str, force: bool) -> MemosResult<()> {
        require_uid(uid)?;
        let url = self.endpoint(&["memos", uid])?;
        let mut request = self.request(Method::DELETE, url);
        if force {
            request = request.query(&[("force", "true")]);
        }
        self.send(request).await.map(|_| ())
    }

    /// The user the access token belongs to.
    pub async fn current_user(&self) -> MemosResult<User> {
        let url = self.endpoint(&["auth", "me"])?;
        self.send_json(self.request(Method::GET, url), "user").await
    }

    /// Statistics for a user given as `1` or `users/1`.
    pub async fn user_stats(&self, user: &str) -> MemosResult<UserStats> {
        let id = user_id(user);
        if id.is_empty() {
            return Err(MemosError::MissingField { field: "user" });
        }
        let url = self.endpoint(&["users", &format!("{id}:getStats")])?;
        self.send_json(self.request(Method::GET, url), "user stats")
            .await
    }

    pub async fn list_memo_relations(&self, uid: &str) -> MemosResult<Vec<MemoRelation>> {
        require_uid(uid)?;
        let url = self.endpoint(&["memos", uid, "relations"])?;
        let response: RelationsResponse = self
            .send_json(self.request(Method::GET, url), "memo relations")
            .await?;
        Ok(response.relations)
    }

    /// Replace every relation of a memo.
    pub async fn set_memo_relations(&self, uid: &str, relations: &[NewRelation]) -> MemosResult<()> {
        require_uid(uid)?;
        let payload = SetRelationsPayload {
            relations: relations
                .iter()
                .map(|r| RelationPayload {
                    related_memo: memo_name(&r.related_memo),
                    relation_type: r.relation_type,
                })
                .collect(),
        };

        let url = self.endpoint(&["memos", uid, "relations"])?;
        let request = self.with_body(self.request(Method::PATCH, url), &payload)?;
        self.send(request).await.map(|_| ())
    }

    /// Resolve `/api/v1/<segments>` against the base URL, escaping each segment.
    fn endpoint(&self, segments: &[&str]) -> MemosResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| MemosError::InvalidBaseUrl {
                message: "base URL must include scheme".to_string(),
            })?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "memos request");
        let mut request = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        if self.has_access_token() {
            request = request.bearer_auth(&self.access_token);
        }
        request
    }

    fn with_body<T: Serialize>(&self, request: RequestBuilder, body: &T) -> MemosResult<RequestBuilder> {
        let encoded = serde_json::to_vec(body).map_err(|source| MemosError::Encode { source })?;
        Ok(request
            .header(header::CONTENT_TYPE, "application/json")
            .body(encoded))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> MemosResult<T> {
        let body = self.send(request).await?;
        serde_json::from_slice(&body).map_err(|source| MemosError::Decode { context, source })
    }

    /// Send the request and read the whole body before looking at the status.
    async fn send(&self, request: RequestBuilder) -> MemosResult<Vec<u8>> {
        let response = request
            .send()
            .await
            .map_err(|source| MemosError::Transport { source })?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| MemosError::Transport { source })?;
        debug!(status = status.as_u16(), bytes = body.len(), "memos response");

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body).trim().to_string();
            let body = if text.is_empty() {
                format!("memos API error: {status}")
            } else {
                text
            };
            warn!(status = status.as_u16(), %body, "memos API returned an error");
            return Err(MemosError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body.to_vec())
    }
}

/// Query parameters for a list request, in the order they are sent.
///
/// An explicit page token always wins over `offset`; a positive offset is
/// encoded as the service's `offset=<N>` token.
pub(crate) fn search_params(req: &SearchRequest) -> MemosResult<Vec<(&'static str, String)>> {
    let filter = build_memo_filter(req)?;

    let mut params = vec![("pageSize", effective_page_size(req.limit).to_string())];
    if !filter.is_empty() {
        params.push(("filter", filter));
    }
    if let Some(order_by) = req.order_by.as_deref().filter(|o| !o.is_empty()) {
        params.push(("orderBy", order_by.to_string()));
    }
    if req.show_deleted {
        params.push(("showDeleted", "true".to_string()));
    }
    if let Some(token) = req.page_token.as_deref().filter(|t| !t.is_empty()) {
        params.push(("pageToken", token.to_string()));
    } else if let Some(offset) = req.offset.filter(|o| *o > 0) {
        params.push(("pageToken", format!("offset={offset}")));
    }

    Ok(params)
}

pub(crate) fn effective_page_size(limit: Option<i64>) -> i64 {
    limit.filter(|l| *l > 0).unwrap_or(DEFAULT_PAGE_SIZE)
}

fn require_uid(uid: &str) -> MemosResult<()> {
    if uid.trim().is_empty() {
        return Err(MemosError::MissingField { field: "memo_uid" });
    }
    Ok(())
}
