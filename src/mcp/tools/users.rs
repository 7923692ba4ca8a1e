//! User tools: `memos_current_user` and `memos_user_stats`.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use crate::memos::{MemosClient, MemosError, MemosResult, User, UserStats, user_id};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UserStatsParams {
    #[schemars(required, description = "User ID or name (e.g., '1' or 'users/1')")]
    pub user: Option<String>,
}

pub async fn current_user(client: &MemosClient) -> MemosResult<User> {
    client.current_user().await
}

pub async fn user_stats(client: &MemosClient, params: UserStatsParams) -> MemosResult<UserStats> {
    let id = user_id(params.user.as_deref().unwrap_or_default());
    if id.is_empty() {
        return Err(MemosError::MissingField { field: "user" });
    }
    client.user_stats(id).await
}
