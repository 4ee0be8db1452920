//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An immutable audit log entry recording a mutating catalog action.
///
/// Entries are append-only: never mutated, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// Unique audit entry identifier.
    pub id: Uuid,
    /// Actor identity supplied by the caller.
    pub actor: String,
    /// Actor role at the time of the action.
    pub role: String,
    /// Dotted action taxonomy (e.g., `"calculator.version.rollback"`).
    pub action: String,
    /// The type of target entity (`"category"`, `"calculator"`).
    pub entity_type: String,
    /// The target entity ID (if applicable).
    pub entity_id: Option<Uuid>,
    /// Entity snapshot before the mutation. Reserved in the schema;
    /// current catalog mutations leave it null.
    pub before: Option<serde_json::Value>,
    /// Entity snapshot after the mutation.
    pub after: Option<serde_json::Value>,
    /// Data needed to undo the action. Reserved in the schema.
    pub rollback_data: Option<serde_json::Value>,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuditLogEntry {
    /// Actor identity.
    pub actor: String,
    /// Actor role.
    pub role: String,
    /// Dotted action taxonomy.
    pub action: String,
    /// Target entity type.
    pub entity_type: String,
    /// Target entity ID.
    pub entity_id: Option<Uuid>,
    /// Pre-mutation snapshot.
    pub before: Option<serde_json::Value>,
    /// Post-mutation snapshot.
    pub after: Option<serde_json::Value>,
    /// Undo data.
    pub rollback_data: Option<serde_json::Value>,
}
