//! Processed Marker HTTP Routes
//!
//! Read-only endpoint over the processed-markers store. The store is
//! owned and rewritten by the external processor; this service passes its
//! contents through unchanged and only reports staleness.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::model::ProcessedMarker;
use crate::store::JsonStore;

// ==================
// Shared State
// ==================

/// Markers state shared across handlers
pub struct MarkersState {
    pub store: JsonStore,
}

impl MarkersState {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }
}

// ==================
// Marker Routes
// ==================

/// Create processed-marker routes
pub fn marker_routes(state: Arc<MarkersState>) -> Router {
    Router::new()
        .route("/processed", get(processed_markers_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

/// Return the processed store as-is.
///
/// A `Last-Modified` header reports the backing file's mtime when
/// obtainable so clients can detect staleness without re-fetching. Missing
/// or unreadable stores degrade to an empty sequence, never a 500.
async fn processed_markers_handler(State(state): State<Arc<MarkersState>>) -> impl IntoResponse {
    let markers: Vec<ProcessedMarker> = state
        .store
        .read_or_empty()
        .into_iter()
        .map(ProcessedMarker::from)
        .collect();

    let mut headers = HeaderMap::new();
    if let Some(modified) = state.store.modified() {
        // RFC 7231 IMF-fixdate, e.g. "Thu, 06 Aug 2026 10:42:00 GMT"
        let value = modified.format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(header::LAST_MODIFIED, value);
        }
    }

    (headers, Json(markers))
}
