//! Mock query service for testing the HTTP lookup client.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{Response, StatusCode};
use axum::routing::get;
use axum::Router;
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A mock response to return.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay_ms: u64,
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay_ms: 0,
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: format!(r#"{{"error": "{}"}}"#, message),
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::json(r#"{"queryresult": {"success": false, "pods": []}}"#)
    }
}

#[derive(Clone)]
struct MockState {
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
}

/// Mock query service.
pub struct MockQueryService {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockQueryService {
    /// Start a new mock service on an ephemeral port.
    pub async fn start() -> Self {
        let state = MockState {
            queries: Arc::new(Mutex::new(Vec::new())),
            responses: Arc::new(Mutex::new(VecDeque::new())),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/v2/query", get(handle_query))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    /// Enqueue a response to be returned for the next query.
    pub async fn enqueue_response(&self, resp: MockResponse) {
        self.state.responses.lock().await.push_back(resp);
    }

    /// Query parameters of every request received so far.
    pub async fn captured_queries(&self) -> Vec<HashMap<String, String>> {
        self.state.queries.lock().await.clone()
    }

    /// Full query endpoint URL.
    pub fn query_url(&self) -> String {
        format!("http://{}/v2/query", self.addr)
    }
}

impl Drop for MockQueryService {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_query(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response<Body> {
    state.queries.lock().await.push(params);

    let mock_resp = state
        .responses
        .lock()
        .await
        .pop_front()
        .unwrap_or_default();

    if mock_resp.delay_ms > 0 {
        tokio::time::sleep(tokio::time::Duration::from_millis(mock_resp.delay_ms)).await;
    }

    Response::builder()
        .status(StatusCode::from_u16(mock_resp.status).unwrap())
        .header("content-type", "application/json")
        .body(Body::from(mock_resp.body))
        .unwrap()
}
