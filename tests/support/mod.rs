//! Mock snippet API for integration tests.
//!
//! An axum server on 127.0.0.1:0 speaking the same JSON as the real API.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

#[derive(Default)]
pub struct MockState {
    pub snippets: Vec<Value>,
    pub requests: Vec<String>,
    next_id: usize,
}

pub type Shared = Arc<Mutex<MockState>>;

pub fn seeded(snippets: &[(&str, &str, &str)]) -> Shared {
    let state = MockState {
        snippets: snippets
            .iter()
            .map(|(id, title, code)| {
                json!({
                    "_id": id,
                    "title": title,
                    "code": code,
                    "createdAt": "2024-01-01T00:00:00Z",
                })
            })
            .collect(),
        ..Default::default()
    };
    Arc::new(Mutex::new(state))
}

pub fn empty() -> Shared {
    seeded(&[])
}

fn blank(body: &Value, field: &str) -> bool {
    body[field].as_str().map(|s| s.trim().is_empty()).unwrap_or(true)
}

async fn list(State(state): State<Shared>) -> Json<Vec<Value>> {
    let mut state = state.lock().unwrap();
    state.requests.push("GET /api/code".into());
    Json(state.snippets.clone())
}

async fn create(State(state): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    state.requests.push("POST /api/snippet".into());
    if blank(&body, "title") || blank(&body, "code") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Title and code are required" })),
        );
    }
    state.next_id += 1;
    let snippet = json!({
        "_id": format!("srv-{}", state.next_id),
        "title": body["title"],
        "code": body["code"],
        "createdAt": "2024-06-01T12:00:00Z",
    });
    state.snippets.push(snippet.clone());
    (StatusCode::CREATED, Json(snippet))
}

async fn update(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("PUT /api/snippet/{}", id));
    match state.snippets.iter_mut().find(|s| s["_id"] == id.as_str()) {
        Some(existing) => {
            existing["title"] = body["title"].clone();
            existing["code"] = body["code"].clone();
            (StatusCode::OK, Json(existing.clone()))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Snippet not found" })),
        ),
    }
}

async fn remove(State(state): State<Shared>, Path(id): Path<String>) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("DELETE /api/snippet/{}", id));
    let before = state.snippets.len();
    state.snippets.retain(|s| s["_id"] != id.as_str());
    if state.snippets.len() == before {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Snippet not found" })),
        )
    } else {
        (StatusCode::OK, Json(json!({ "message": "Snippet deleted" })))
    }
}

pub fn snippet_api(state: Shared) -> Router {
    Router::new()
        .route("/api/code", get(list))
        .route("/api/snippet", post(create))
        .route("/api/snippet/:id", put(update).delete(remove))
        .with_state(state)
}

/// Every route answers 500 with a message body.
pub fn failing_api() -> Router {
    async fn boom() -> impl IntoResponse {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "database unavailable" })),
        )
    }
    Router::new()
        .route("/api/code", get(boom))
        .route("/api/snippet", post(boom))
        .route("/api/snippet/:id", put(boom).delete(boom))
}

/// Answers 200 with a body that is not a snippet list.
pub fn garbled_api() -> Router {
    Router::new().route("/api/code", get(|| async { "<html>oops</html>" }))
}

/// Takes longer than any sane client timeout.
pub fn slow_api(delay: Duration) -> Router {
    Router::new().route(
        "/api/code",
        get(move || async move {
            tokio::time::sleep(delay).await;
            Json(json!([]))
        }),
    )
}

/// Bind to port 0 and return the base URL.
pub async fn start_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Runs the server on its own thread and runtime, for tests that are not async.
pub fn start_server_in_background(app: Router) -> String {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    let addr = rx.recv().unwrap();
    format!("http://{addr}")
}
