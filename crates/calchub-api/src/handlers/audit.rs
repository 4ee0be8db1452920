//! Audit trail listing handler.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use calchub_entity::audit::AuditLogEntry;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;

/// Query parameters for the audit listing.
#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    /// Maximum number of entries to return.
    pub limit: Option<i64>,
}

/// GET /api/audit?limit=
pub async fn list_recent(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditLogEntry>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let entries = state.stores.audit.list_recent(limit).await?;
    Ok(Json(entries))
}
