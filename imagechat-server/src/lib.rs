//! HTTP front end for imagechat
//!
//! Exposes the request router over two routes:
//! - `GET /health` for liveness checks
//! - `POST /chat` taking a `ChatRequest` and answering with a `ChatResponse`
//!
//! Every well-formed chat request gets a 200; failures travel inside the body
//! as `{"type": "error"}`.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use imagechat_core::{ChatRequest, ChatResponse, RequestRouter};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<RequestRouter>,
}

impl AppState {
    pub fn new(router: RequestRouter) -> Self {
        Self {
            router: Arc::new(router),
        }
    }
}

/// Build the axum application
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Json<ChatResponse> {
    let history = request.history.len();
    let response = state.router.handle(request).await;
    info!(kind = response.kind(), history, "Handled /chat");
    Json(response)
}
