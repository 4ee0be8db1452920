//! Liveness endpoint.

use axum::extract::State;
use axum::Json;

use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "connections": state.realtime.connection_count(),
        "rooms": state.realtime.room_count(),
    }))
}
