//! Calculator version entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An immutable historical snapshot of a calculator's payloads.
///
/// Rows are only ever appended; rollback copies a row's payloads back
/// onto the live calculator without touching the history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorVersion {
    /// Unique version row identifier.
    pub id: Uuid,
    /// The calculator this version belongs to.
    pub calculator_id: Uuid,
    /// Sequential version number, unique per calculator.
    pub version: i32,
    /// Logic payload snapshot.
    pub logic_source: String,
    /// UI payload snapshot.
    pub ui_document: serde_json::Value,
    /// Free-form change notes.
    pub notes: String,
    /// Actor identity that created the version.
    pub changed_by: String,
    /// When the version was created.
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a new version.
///
/// Omitted payload fields inherit the calculator's live values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVersion {
    /// Logic payload (None = inherit the live payload).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic_source: Option<String>,
    /// UI payload (None = inherit the live payload).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_document: Option<serde_json::Value>,
    /// Change notes (defaults to empty).
    #[serde(default)]
    pub notes: String,
}
