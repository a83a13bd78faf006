//! In-process mock of the pastebin backend.
//!
//! Behaviour is keyed on the request so tests can pick a scenario by input:
//! - `POST /api/pastes` answers `201 {"id":"abc123",...}` unless the content is
//!   one of the `CREATE_*` triggers below.
//! - `GET /api/pastes/{id}` answers a record for any id except the `FETCH_*`
//!   triggers; ids starting with `slow-` are delayed by [`SLOW_RESPONSE_DELAY`].
//! - `GET /api/healthz` answers `200` or an HTML `503` per [`MockState::set_healthy`].
//! - `GET /p/{id}` answers a small HTML viewer page.

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::oneshot;

/// Id returned by every successful create.
pub const CREATED_ID: &str = "abc123";
/// Fixed `created_at` of fetched records.
pub const FIXTURE_CREATED_AT: &str = "2024-05-01T12:30:00Z";

pub const CREATE_HTML: &str = "respond-html";
pub const CREATE_WITHOUT_ID: &str = "respond-without-id";
pub const CREATE_SERVER_ERROR: &str = "respond-500";
pub const CREATE_REJECTED: &str = "respond-400";

pub const FETCH_MISSING: &str = "missing";
pub const FETCH_EMPTY_404: &str = "empty-404";
pub const FETCH_HTML_OK: &str = "html";
pub const FETCH_GATEWAY: &str = "gateway";
pub const FETCH_NOT_A_PASTE: &str = "not-a-paste";
pub const SLOW_PREFIX: &str = "slow-";
pub const SLOW_RESPONSE_DELAY: Duration = Duration::from_millis(300);

/// Content of the record served for `id`.
pub fn fixture_content(id: &str) -> String {
    format!("content of {}", id)
}

/// Requests observed by the mock, shared with the test.
#[derive(Debug, Clone)]
pub struct MockState {
    created: Arc<Mutex<Vec<Value>>>,
    paths: Arc<Mutex<Vec<String>>>,
    healthy: Arc<AtomicBool>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            created: Arc::default(),
            paths: Arc::default(),
            healthy: Arc::new(AtomicBool::new(true)),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockState {
    /// JSON bodies received by `POST /api/pastes`, in arrival order.
    pub fn created_bodies(&self) -> Vec<Value> {
        lock(&self.created).clone()
    }

    /// Raw (still percent-encoded) request paths, in arrival order.
    pub fn paths(&self) -> Vec<String> {
        lock(&self.paths).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.paths).len()
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    fn record_path(&self, uri: &Uri) {
        lock(&self.paths).push(uri.path().to_string());
    }
}

/// Router implementing the mock backend.
pub fn mock_router(state: MockState) -> Router {
    Router::new()
        .route("/api/pastes", axum::routing::post(create_paste))
        .route("/api/pastes/:id", get(get_paste))
        .route("/api/healthz", get(healthz))
        .route("/p/:id", get(view_page))
        .with_state(state)
}

async fn create_paste(
    State(state): State<MockState>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    state.record_path(&uri);
    lock(&state.created).push(body.clone());
    match body.get("content").and_then(Value::as_str).unwrap_or_default() {
        CREATE_HTML => (StatusCode::CREATED, Html("<html>created</html>")).into_response(),
        CREATE_WITHOUT_ID => (StatusCode::CREATED, Json(json!({ "ok": true }))).into_response(),
        CREATE_SERVER_ERROR => {
            (StatusCode::INTERNAL_SERVER_ERROR, "<h1>boom</h1>").into_response()
        }
        CREATE_REJECTED => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "content too large" })),
        )
            .into_response(),
        _ => (
            StatusCode::CREATED,
            Json(json!({
                "id": CREATED_ID,
                "ttl_seconds": body.get("ttl_seconds"),
                "max_views": body.get("max_views"),
            })),
        )
            .into_response(),
    }
}

async fn get_paste(State(state): State<MockState>, uri: Uri, Path(id): Path<String>) -> Response {
    state.record_path(&uri);
    if id.starts_with(SLOW_PREFIX) {
        tokio::time::sleep(SLOW_RESPONSE_DELAY).await;
    }
    match id.as_str() {
        FETCH_MISSING => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Not found" })),
        )
            .into_response(),
        FETCH_EMPTY_404 => StatusCode::NOT_FOUND.into_response(),
        FETCH_HTML_OK => {
            (StatusCode::OK, Html("<!doctype html><p>maintenance</p>")).into_response()
        }
        FETCH_GATEWAY => {
            (StatusCode::BAD_GATEWAY, Html("<h1>502 Bad Gateway</h1>")).into_response()
        }
        FETCH_NOT_A_PASTE => (StatusCode::OK, Json(json!({ "unexpected": true }))).into_response(),
        _ => Json(json!({
            "id": id,
            "content": fixture_content(&id),
            "created_at": FIXTURE_CREATED_AT,
            "ttl_seconds": 3600,
            "max_views": 5,
            "views": 1,
        }))
        .into_response(),
    }
}

async fn healthz(State(state): State<MockState>, uri: Uri) -> Response {
    state.record_path(&uri);
    if state.healthy.load(Ordering::SeqCst) {
        Json(json!({ "status": "ok" })).into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Html("<h1>Service Unavailable</h1>"),
        )
            .into_response()
    }
}

async fn view_page(State(state): State<MockState>, uri: Uri, Path(id): Path<String>) -> Response {
    state.record_path(&uri);
    Html(format!("<main>paste {}</main>", id)).into_response()
}

/// Mock backend served from a background thread with its own runtime.
///
/// Works from both blocking and async tests; dropping it shuts the server down.
pub struct MockBackend {
    addr: SocketAddr,
    state: MockState,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl MockBackend {
    /// Bind `127.0.0.1:0` and start serving.
    ///
    /// # Panics
    /// Panics if the socket or runtime cannot be created.
    pub fn start() -> Self {
        let state = MockState::default();
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind mock backend");
        listener
            .set_nonblocking(true)
            .expect("set mock listener non-blocking");
        let addr = listener.local_addr().expect("mock backend addr");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let router = mock_router(state.clone());

        let thread = thread::Builder::new()
            .name("pasteprobe-mock-backend".into())
            .spawn(move || {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .expect("mock backend runtime");
                rt.block_on(async move {
                    let listener =
                        tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                    let _ = axum::serve(listener, router)
                        .with_graceful_shutdown(async {
                            let _ = shutdown_rx.await;
                        })
                        .await;
                });
            })
            .expect("spawn mock backend");

        Self {
            addr,
            state,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL to configure clients with.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn state(&self) -> &MockState {
        &self.state
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
