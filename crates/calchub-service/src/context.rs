//! Actor context carrying the caller identity supplied with each request.

use serde::{Deserialize, Serialize};

/// Context for the current request's actor.
///
/// Authentication happens upstream of this service; the identity and
/// role arrive already resolved and are trusted as-is. They are carried
/// into every mutating operation so the audit trail knows *who* acted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorContext {
    /// Actor identity (username or service account name).
    pub actor: String,
    /// Actor role at the time of the request.
    pub role: String,
}

impl ActorContext {
    /// Creates a new actor context.
    pub fn new(actor: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            role: role.into(),
        }
    }
}
