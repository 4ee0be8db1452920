//! Application state shared across all handlers.

use std::sync::Arc;

use calchub_core::config::AppConfig;
use calchub_database::StoreManager;
use calchub_realtime::RealtimeEngine;
use calchub_service::{AuditRecorder, CatalogService, VersionService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped (or internally `Arc`-backed) for cheap
/// cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Entity stores (PostgreSQL or in-memory, chosen at startup)
    pub stores: StoreManager,
    /// Catalog CRUD and tree assembly
    pub catalog: CatalogService,
    /// Calculator versioning and rollback
    pub versions: VersionService,
    /// WebSocket engine (rooms + change broadcasts)
    pub realtime: Arc<RealtimeEngine>,
}

impl AppState {
    /// Wire up the full service graph over the given stores.
    pub fn new(config: AppConfig, stores: StoreManager) -> Self {
        let audit = AuditRecorder::new(stores.audit.clone());
        let catalog = CatalogService::new(
            stores.categories.clone(),
            stores.calculators.clone(),
            stores.versions.clone(),
            audit.clone(),
        );
        let versions = VersionService::new(
            stores.calculators.clone(),
            stores.versions.clone(),
            audit,
            &config.catalog,
        );
        let realtime = Arc::new(RealtimeEngine::new(&config.realtime));

        Self {
            config: Arc::new(config),
            stores,
            catalog,
            versions,
            realtime,
        }
    }
}
