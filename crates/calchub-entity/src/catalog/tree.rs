//! Catalog tree structures for hierarchical display.
//!
//! These are assembled in memory from flat category and calculator
//! lists; they are never persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A category node in the assembled catalog tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogNode {
    /// Category ID.
    pub id: Uuid,
    /// Category name.
    pub name: String,
    /// Category description.
    pub description: String,
    /// Parent category (None for roots).
    pub parent_id: Option<Uuid>,
    /// Sibling sort key.
    pub order: i32,
    /// Category tags.
    pub tags: Vec<String>,
    /// Calculators attached to this category, sorted by `order`.
    pub calculators: Vec<CalculatorSummary>,
    /// Child category nodes, sorted by `order`.
    pub children: Vec<CatalogNode>,
}

/// Calculator summary carried by a tree node.
///
/// Payloads are deliberately omitted; the tree is a navigation
/// structure, not a payload transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorSummary {
    /// Calculator ID.
    pub id: Uuid,
    /// Calculator name.
    pub name: String,
    /// Calculator description.
    pub description: String,
    /// Calculator tags.
    pub tags: Vec<String>,
    /// Sibling sort key.
    pub order: i32,
    /// The live payload's version number.
    pub version: i32,
}
