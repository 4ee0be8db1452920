//! Persistence backend selection.

use serde::{Deserialize, Serialize};

/// Which persistence backend the catalog stores run on.
///
/// Selected once at process startup; the engine itself never branches
/// on the active backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL via sqlx.
    Postgres,
    /// In-memory fallback with equivalent semantics.
    Memory,
}

/// Store provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// The active backend.
    #[serde(default = "default_backend")]
    pub backend: StoreBackend,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
        }
    }
}

fn default_backend() -> StoreBackend {
    StoreBackend::Memory
}
