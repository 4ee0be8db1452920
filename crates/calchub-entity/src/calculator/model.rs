//! Calculator entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A calculator in the catalog.
///
/// `logic_source` and `ui_document` are opaque payloads to the engine:
/// the script text and structured UI document the frontend executes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Calculator {
    /// Unique calculator identifier.
    pub id: Uuid,
    /// Owning category (null for uncategorized).
    pub category_id: Option<Uuid>,
    /// Calculator name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Free-form tags used by search.
    pub tags: Vec<String>,
    /// Opaque logic payload (script text).
    pub logic_source: String,
    /// Opaque structured UI payload.
    pub ui_document: serde_json::Value,
    /// Version number of the live payload. Starts at 1; bumped by
    /// version creation, moved backward by rollback.
    pub current_version: i32,
    /// Sibling sort key, ascending.
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    /// When the calculator was created.
    pub created_at: DateTime<Utc>,
    /// When the calculator was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCalculator {
    /// Calculator name.
    pub name: String,
    /// Description (defaults to empty).
    #[serde(default)]
    pub description: String,
    /// Owning category (None for uncategorized).
    #[serde(default)]
    pub category_id: Option<Uuid>,
    /// Tags (defaults to empty).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Logic payload (defaults to empty).
    #[serde(default)]
    pub logic_source: String,
    /// UI payload (defaults to `{}`).
    #[serde(default = "default_ui_document")]
    pub ui_document: serde_json::Value,
    /// Sibling sort key (defaults to 0).
    #[serde(default)]
    pub order: i32,
}

/// Partial metadata patch applied to an existing calculator.
///
/// Never bumps `current_version` and never writes a version row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCalculator {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New category (outer None = untouched, inner None = uncategorized).
    #[serde(
        default,
        deserialize_with = "crate::serde_util::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub category_id: Option<Option<Uuid>>,
    /// New tag set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// New logic payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic_source: Option<String>,
    /// New UI payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_document: Option<serde_json::Value>,
    /// New sort key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl UpdateCalculator {
    /// Overwrite the supplied fields on an existing calculator.
    ///
    /// `current_version` is deliberately untouchable through a patch.
    pub fn apply(&self, calculator: &mut Calculator) {
        if let Some(name) = &self.name {
            calculator.name = name.clone();
        }
        if let Some(description) = &self.description {
            calculator.description = description.clone();
        }
        if let Some(category_id) = self.category_id {
            calculator.category_id = category_id;
        }
        if let Some(tags) = &self.tags {
            calculator.tags = tags.clone();
        }
        if let Some(logic_source) = &self.logic_source {
            calculator.logic_source = logic_source.clone();
        }
        if let Some(ui_document) = &self.ui_document {
            calculator.ui_document = ui_document.clone();
        }
        if let Some(order) = self.order {
            calculator.order = order;
        }
    }
}

/// One entry of a bulk calculator reorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorPlacement {
    /// The calculator being placed.
    pub id: Uuid,
    /// New owning category (None = uncategorized).
    #[serde(default)]
    pub category_id: Option<Uuid>,
    /// New sort key.
    #[serde(default)]
    pub order: i32,
}

fn default_ui_document() -> serde_json::Value {
    serde_json::json!({})
}
