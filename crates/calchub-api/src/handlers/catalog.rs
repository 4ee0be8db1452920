//! Catalog handlers: tree, categories, calculators, versioning.
//!
//! Every successful mutation ends with a `catalog_updated` broadcast so
//! connected clients refetch the tree.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use calchub_entity::calculator::{
    Calculator, CalculatorPlacement, CalculatorVersion, CreateCalculator, CreateVersion,
    UpdateCalculator,
};
use calchub_entity::category::{Category, CategoryPlacement, CreateCategory, UpdateCategory};

use crate::error::ApiError;
use crate::extractors::Actor;
use crate::state::AppState;

/// Query parameters for the catalog tree.
#[derive(Debug, Deserialize)]
pub struct TreeQuery {
    /// Optional case-insensitive search term.
    pub search: Option<String>,
}

/// GET /api/catalog/tree?search=
pub async fn get_tree(
    State(state): State<AppState>,
    Query(query): Query<TreeQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tree = state.catalog.get_tree(query.search.as_deref()).await?;
    Ok(Json(serde_json::json!({ "tree": tree })))
}

/// POST /api/catalog/categories
pub async fn create_category(
    State(state): State<AppState>,
    actor: Actor,
    Json(body): Json<CreateCategory>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state.catalog.create_category(&actor, body).await?;
    state.realtime.broadcast_catalog_updated();
    Ok((StatusCode::CREATED, Json(category)))
}

/// PATCH /api/catalog/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCategory>,
) -> Result<Json<Category>, ApiError> {
    let category = state.catalog.update_category(&actor, id, body).await?;
    state.realtime.broadcast_catalog_updated();
    Ok(Json(category))
}

/// DELETE /api/catalog/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.catalog.delete_category(&actor, id).await?;
    state.realtime.broadcast_catalog_updated();
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// POST /api/catalog/categories/reorder
pub async fn reorder_categories(
    State(state): State<AppState>,
    actor: Actor,
    Json(body): Json<Vec<CategoryPlacement>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.catalog.reorder_categories(&actor, body).await?;
    state.realtime.broadcast_catalog_updated();
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// GET /api/catalog/calculators/{id}
pub async fn get_calculator(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Calculator>, ApiError> {
    let calculator = state.catalog.get_calculator(id).await?;
    Ok(Json(calculator))
}

/// POST /api/catalog/calculators
pub async fn create_calculator(
    State(state): State<AppState>,
    actor: Actor,
    Json(body): Json<CreateCalculator>,
) -> Result<(StatusCode, Json<Calculator>), ApiError> {
    let calculator = state.catalog.create_calculator(&actor, body).await?;
    state.realtime.broadcast_catalog_updated();
    Ok((StatusCode::CREATED, Json(calculator)))
}

/// PATCH /api/catalog/calculators/{id}
pub async fn update_calculator(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCalculator>,
) -> Result<Json<Calculator>, ApiError> {
    let calculator = state.catalog.update_calculator(&actor, id, body).await?;
    state.realtime.broadcast_catalog_updated();
    Ok(Json(calculator))
}

/// DELETE /api/catalog/calculators/{id}
pub async fn delete_calculator(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.catalog.delete_calculator(&actor, id).await?;
    state.realtime.broadcast_catalog_updated();
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// POST /api/catalog/calculators/reorder
pub async fn reorder_calculators(
    State(state): State<AppState>,
    actor: Actor,
    Json(body): Json<Vec<CalculatorPlacement>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.catalog.reorder_calculators(&actor, body).await?;
    state.realtime.broadcast_catalog_updated();
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// GET /api/catalog/calculators/{id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CalculatorVersion>>, ApiError> {
    let versions = state.versions.list_versions(id).await?;
    Ok(Json(versions))
}

/// POST /api/catalog/calculators/{id}/versions
pub async fn create_version(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(body): Json<CreateVersion>,
) -> Result<(StatusCode, Json<CalculatorVersion>), ApiError> {
    let version = state.versions.create_version(&actor, id, body).await?;
    state.realtime.broadcast_catalog_updated();
    Ok((StatusCode::CREATED, Json(version)))
}

/// POST /api/catalog/calculators/{id}/rollback/{version_id}
pub async fn rollback(
    State(state): State<AppState>,
    actor: Actor,
    Path((id, version_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Calculator>, ApiError> {
    let calculator = state.versions.rollback(&actor, id, version_id).await?;
    state.realtime.broadcast_catalog_updated();
    Ok(Json(calculator))
}
