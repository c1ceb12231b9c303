//! Route table for the relay's HTTP surface
//!
//! ## Endpoints
//!
//! - `POST /api/emergency` - dispatch a report to all configured sinks
//! - `POST /api/message` - acknowledge and best-effort forward a message
//! - `GET /api/test` - per-sink configuration probe
//! - `GET /api/health` - liveness, configuration presence only
//! - `GET /` - human-readable status page
//! - anything else - JSON 404 echoing the path

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Create the relay router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/emergency", post(handlers::post_emergency))
        .route("/api/message", post(handlers::post_message))
        .route("/api/test", get(handlers::get_test))
        .route("/api/health", get(handlers::get_health))
        .route("/", get(handlers::index))
        .fallback(handlers::not_found)
        .with_state(state)
}
