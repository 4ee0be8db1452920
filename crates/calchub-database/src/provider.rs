//! Store manager that dispatches to the configured backend.

use std::sync::Arc;

use tracing::info;

use calchub_core::config::database::DatabaseConfig;
use calchub_core::config::store::{StoreBackend, StoreConfig};
use calchub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::stores::memory::{
    MemoryAuditStore, MemoryCalculatorStore, MemoryCategoryStore, MemoryVersionStore,
};
use crate::stores::postgres::{PgAuditStore, PgCalculatorStore, PgCategoryStore, PgVersionStore};
use crate::stores::{AuditStore, CalculatorStore, CategoryStore, VersionStore};

/// The full set of entity stores behind trait objects.
///
/// The backend is selected once at construction; nothing downstream ever
/// branches on which implementation is active.
#[derive(Clone)]
pub struct StoreManager {
    /// Category store.
    pub categories: Arc<dyn CategoryStore>,
    /// Calculator store.
    pub calculators: Arc<dyn CalculatorStore>,
    /// Calculator version store.
    pub versions: Arc<dyn VersionStore>,
    /// Audit log store.
    pub audit: Arc<dyn AuditStore>,
}

impl std::fmt::Debug for StoreManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreManager").finish()
    }
}

impl StoreManager {
    /// Create a store manager from configuration.
    ///
    /// For the `postgres` backend this connects the pool and runs
    /// migrations; the `memory` backend starts empty.
    pub async fn new(store: &StoreConfig, database: &DatabaseConfig) -> AppResult<Self> {
        match store.backend {
            StoreBackend::Postgres => {
                info!("Initializing PostgreSQL stores");
                let db = DatabasePool::connect(database).await?;
                crate::migration::run_migrations(db.pool()).await?;
                Ok(Self::postgres(&db))
            }
            StoreBackend::Memory => {
                info!("Initializing in-memory stores");
                Ok(Self::memory())
            }
        }
    }

    /// Build stores over an already connected pool.
    pub fn postgres(db: &DatabasePool) -> Self {
        Self {
            categories: Arc::new(PgCategoryStore::new(db.pool().clone())),
            calculators: Arc::new(PgCalculatorStore::new(db.pool().clone())),
            versions: Arc::new(PgVersionStore::new(db.pool().clone())),
            audit: Arc::new(PgAuditStore::new(db.pool().clone())),
        }
    }

    /// Build empty in-memory stores.
    pub fn memory() -> Self {
        Self {
            categories: Arc::new(MemoryCategoryStore::new()),
            calculators: Arc::new(MemoryCalculatorStore::new()),
            versions: Arc::new(MemoryVersionStore::new()),
            audit: Arc::new(MemoryAuditStore::new()),
        }
    }
}
