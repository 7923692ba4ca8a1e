//! Fake memos service for HTTP-level tests.
//!
//! Binds an axum router on an ephemeral port, records every request it sees
//! and answers each one with the same canned status and body.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use reqwest::Url;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::client::MemosClient;

/// Install the ring crypto provider once; reqwest is built without one.
pub(crate) fn init_crypto() {
    crate::serve::install_crypto_provider();
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl RecordedRequest {
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

struct FakeState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub(crate) struct FakeMemos {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl FakeMemos {
    /// Spawn a fake server answering every request with `status` and `body`.
    pub async fn start(status: u16, body: &str) -> Self {
        init_crypto();

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::new(FakeState {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            requests: Arc::clone(&requests),
        });
        let app = Router::new().fallback(record).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            requests,
            handle,
        }
    }

    /// Spawn a fake server answering `200 OK` with `body`.
    pub async fn ok(body: &str) -> Self {
        Self::start(200, body).await
    }

    pub fn client(&self) -> MemosClient {
        self.client_with_token("token")
    }

    pub fn client_with_token(&self, token: &str) -> MemosClient {
        MemosClient::new(&self.url, token, Duration::from_secs(5)).unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The only request received; panics unless exactly one arrived.
    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl Drop for FakeMemos {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let query = Url::parse(&format!("http://fake{}", uri))
        .map(|u| u.query_pairs().into_owned().collect())
        .unwrap_or_default();
    let body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        query,
        headers,
        body,
    });

    (
        state.status,
        [(CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
        .into_response()
}
