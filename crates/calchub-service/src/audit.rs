//! Fire-and-forget audit recording.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use calchub_database::stores::AuditStore;
use calchub_entity::audit::CreateAuditLogEntry;

use crate::context::ActorContext;

/// Records audit entries without blocking the mutation that triggered them.
///
/// Writes happen on a spawned task; a failed write is logged at `warn`
/// and never fails the originating operation. Exactly one entry is
/// recorded per successful mutation.
#[derive(Clone)]
pub struct AuditRecorder {
    /// Audit log store.
    store: Arc<dyn AuditStore>,
}

impl std::fmt::Debug for AuditRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditRecorder").finish()
    }
}

impl AuditRecorder {
    /// Creates a new audit recorder over the given store.
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Record a mutation against an entity.
    ///
    /// `action` follows the dotted taxonomy (`"category.create"`,
    /// `"calculator.version.rollback"`, ...).
    pub fn record(
        &self,
        ctx: &ActorContext,
        action: &str,
        entity_type: &str,
        entity_id: Option<Uuid>,
        after: Option<Value>,
    ) {
        let entry = CreateAuditLogEntry {
            actor: ctx.actor.clone(),
            role: ctx.role.clone(),
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id,
            before: None,
            after,
            rollback_data: None,
        };

        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(e) = store.append(&entry).await {
                warn!(
                    action = %entry.action,
                    entity_type = %entry.entity_type,
                    error = %e,
                    "Failed to write audit entry"
                );
            }
        });
    }
}
