//! MCP server implementation
//!
//! Registers the memos tools on a single router. Each tool method decodes
//! its typed parameters, runs the matching handler from [`super::tools`]
//! under the request's cancellation token and returns a tool result.

use std::future::Future;
use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo},
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use tokio_util::sync::CancellationToken;

use super::tools::{
    into_tool_result,
    memos::{
        self, CreateMemoParams, DeleteMemoParams, GetMemoParams, SearchMemosParams,
        UpdateMemoParams,
    },
    relations::{self, ListRelationsParams, SetRelationsParams},
    users::{self, UserStatsParams},
};
use crate::memos::{MemosClient, MemosError, MemosResult};
use crate::version::BuildInfo;

const INSTRUCTIONS: &str = "Memos MCP Server - search, read, create, update and delete memos \
    in a Memos instance. Use memos_search to find memos (pass nextPageToken back as page_token \
    to continue), memos_get for a single memo, memos_create / memos_update / memos_delete to \
    change memos, memos_list_relations / memos_set_relations for links between memos, and \
    memos_current_user / memos_user_stats for account information.";

/// Main MCP server coordinator
///
/// Cloning is cheap: the client is shared and holds no per-call state.
#[derive(Clone)]
pub struct McpServer {
    client: Arc<MemosClient>,
    build: BuildInfo,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    pub fn new(client: impl Into<Arc<MemosClient>>, build: BuildInfo) -> Self {
        Self {
            client: client.into(),
            build,
            tool_router: Self::tool_router(),
        }
    }

    /// Get the tool router for this handler
    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    fn implementation(&self) -> Implementation {
        Implementation::new(self.build.name, self.build.version).with_title("Memos MCP Server")
    }
}

#[tool_router]
impl McpServer {
    #[tool(description = "Search memos with filters and pagination")]
    pub async fn memos_search(
        &self,
        Parameters(params): Parameters<SearchMemosParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result = cancellable(&context.ct, memos::search_memos(&self.client, params)).await;
        Ok(into_tool_result("memos_search", result))
    }

    #[tool(description = "Get a memo by UID")]
    pub async fn memos_get(
        &self,
        Parameters(params): Parameters<GetMemoParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result = cancellable(&context.ct, memos::get_memo(&self.client, params)).await;
        Ok(into_tool_result("memos_get", result))
    }

    #[tool(description = "Create a new memo")]
    pub async fn memos_create(
        &self,
        Parameters(params): Parameters<CreateMemoParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result = cancellable(&context.ct, memos::create_memo(&self.client, params)).await;
        Ok(into_tool_result("memos_create", result))
    }

    #[tool(description = "Update an existing memo. Only the fields provided are changed.")]
    pub async fn memos_update(
        &self,
        Parameters(params): Parameters<UpdateMemoParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result = cancellable(&context.ct, memos::update_memo(&self.client, params)).await;
        Ok(into_tool_result("memos_update", result))
    }

    #[tool(description = "Delete a memo by UID")]
    pub async fn memos_delete(
        &self,
        Parameters(params): Parameters<DeleteMemoParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result = cancellable(&context.ct, memos::delete_memo(&self.client, params)).await;
        Ok(into_tool_result("memos_delete", result))
    }

    #[tool(description = "Get the currently authenticated user")]
    pub async fn memos_current_user(
        &self,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result = cancellable(&context.ct, users::current_user(&self.client)).await;
        Ok(into_tool_result("memos_current_user", result))
    }

    #[tool(description = "Get memo statistics for a user (tag counts, memo type counts, totals)")]
    pub async fn memos_user_stats(
        &self,
        Parameters(params): Parameters<UserStatsParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result = cancellable(&context.ct, users::user_stats(&self.client, params)).await;
        Ok(into_tool_result("memos_user_stats", result))
    }

    #[tool(description = "List the relations (references and comments) of a memo")]
    pub async fn memos_list_relations(
        &self,
        Parameters(params): Parameters<ListRelationsParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result = cancellable(&context.ct, relations::list_relations(&self.client, params)).await;
        Ok(into_tool_result("memos_list_relations", result))
    }

    #[tool(description = "Replace all relations of a memo with the given list")]
    pub async fn memos_set_relations(
        &self,
        Parameters(params): Parameters<SetRelationsParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result = cancellable(&context.ct, relations::set_relations(&self.client, params)).await;
        Ok(into_tool_result("memos_set_relations", result))
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_server_info(self.implementation())
            .with_instructions(INSTRUCTIONS)
    }
}

/// Run `fut` until it finishes or the caller cancels the request.
///
/// On cancellation the future is dropped, which aborts any in-flight HTTP
/// request it owns.
pub(crate) async fn cancellable<T>(
    ct: &CancellationToken,
    fut: impl Future<Output = MemosResult<T>>,
) -> MemosResult<T> {
    tokio::select! {
        biased;
        _ = ct.cancelled() => Err(MemosError::Cancelled),
        result = fut => result,
    }
}
