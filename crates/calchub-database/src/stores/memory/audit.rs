//! In-memory audit log store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use calchub_core::result::AppResult;
use calchub_entity::audit::{AuditLogEntry, CreateAuditLogEntry};

use crate::stores::AuditStore;

/// In-memory implementation of [`AuditStore`].
///
/// Entries are kept newest first so `list_recent` is a prefix slice.
#[derive(Debug, Default)]
pub struct MemoryAuditStore {
    rows: RwLock<Vec<AuditLogEntry>>,
}

impl MemoryAuditStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn append(&self, data: &CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        let entry = AuditLogEntry {
            id: Uuid::new_v4(),
            actor: data.actor.clone(),
            role: data.role.clone(),
            action: data.action.clone(),
            entity_type: data.entity_type.clone(),
            entity_id: data.entity_id,
            before: data.before.clone(),
            after: data.after.clone(),
            rollback_data: data.rollback_data.clone(),
            created_at: Utc::now(),
        };
        self.rows.write().await.insert(0, entry.clone());
        Ok(entry)
    }

    async fn list_recent(&self, limit: i64) -> AppResult<Vec<AuditLogEntry>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().take(limit.max(0) as usize).cloned().collect())
    }
}
