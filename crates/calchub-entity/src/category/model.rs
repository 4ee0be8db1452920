//! Category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A category in the calculator catalog tree.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier.
    pub id: Uuid,
    /// Category name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Parent category ID (null for root categories).
    pub parent_id: Option<Uuid>,
    /// Sibling sort key, ascending.
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    /// Free-form tags used by search.
    pub tags: Vec<String>,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    /// Category name.
    pub name: String,
    /// Description (defaults to empty).
    #[serde(default)]
    pub description: String,
    /// Parent category (None for root).
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    /// Sibling sort key (defaults to 0).
    #[serde(default)]
    pub order: i32,
    /// Tags (defaults to empty).
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial patch applied to an existing category.
///
/// A field that is absent from the request body is left untouched.
/// `parent_id` distinguishes "absent" from an explicit `null` (re-root).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New parent (outer None = untouched, inner None = move to root).
    #[serde(
        default,
        deserialize_with = "crate::serde_util::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<Option<Uuid>>,
    /// New sort key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// New tag set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl UpdateCategory {
    /// Overwrite the supplied fields on an existing category.
    pub fn apply(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(description) = &self.description {
            category.description = description.clone();
        }
        if let Some(parent_id) = self.parent_id {
            category.parent_id = parent_id;
        }
        if let Some(order) = self.order {
            category.order = order;
        }
        if let Some(tags) = &self.tags {
            category.tags = tags.clone();
        }
    }
}

/// One entry of a bulk category reorder: where the category goes and
/// what its new sort key is. Applied per row, no cross-row atomicity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPlacement {
    /// The category being placed.
    pub id: Uuid,
    /// New parent (None = root).
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    /// New sort key.
    #[serde(default)]
    pub order: i32,
}
