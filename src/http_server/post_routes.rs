//! Post HTTP Routes
//!
//! Endpoints for submitting event reports and inspecting the raw posts
//! store.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::model::Post;
use crate::observability::Logger;
use crate::store::JsonStore;

// ==================
// Shared State
// ==================

/// Posts state shared across handlers
pub struct PostsState {
    pub store: JsonStore,
}

impl PostsState {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// 400 response for malformed or missing submission fields
    pub fn invalid_payload() -> (StatusCode, Json<ErrorResponse>) {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid payload".to_string(),
            }),
        )
    }

    /// 500 response; detail stays server-side
    pub fn server_error() -> (StatusCode, Json<ErrorResponse>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Server error".to_string(),
            }),
        )
    }
}

// ==================
// Post Routes
// ==================

/// Create post routes
pub fn post_routes(state: Arc<PostsState>) -> Router {
    Router::new()
        .route("/posts", post(submit_post_handler))
        .route("/posts", get(list_posts_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

/// Validate one submission and append it to the posts store
async fn submit_post_handler(
    State(state): State<Arc<PostsState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SubmitResponse>, (StatusCode, Json<ErrorResponse>)> {
    // A body that is not JSON at all is the same client error as bad fields
    let Ok(Json(body)) = body else {
        return Err(ErrorResponse::invalid_payload());
    };

    let post = Post::from_submission(&body, Utc::now()).map_err(|_| ErrorResponse::invalid_payload())?;

    let doc = serde_json::to_value(&post).map_err(|e| {
        let detail = e.to_string();
        Logger::error("POST_ENCODE_FAILED", &[("detail", &detail)]);
        ErrorResponse::server_error()
    })?;

    let count = state.store.append(doc).map_err(|e| {
        let detail = e.to_string();
        Logger::error("POST_APPEND_FAILED", &[("detail", &detail), ("store", state.store.name())]);
        ErrorResponse::server_error()
    })?;

    Ok(Json(SubmitResponse { ok: true, count }))
}

/// Debug endpoint: the full posts store as received
async fn list_posts_handler(State(state): State<Arc<PostsState>>) -> Json<Vec<Value>> {
    Json(state.store.read_or_empty())
}
