//! In-memory calculator version store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use calchub_core::result::AppResult;
use calchub_entity::calculator::CalculatorVersion;

use crate::stores::VersionStore;

/// In-memory implementation of [`VersionStore`].
#[derive(Debug, Default)]
pub struct MemoryVersionStore {
    rows: RwLock<Vec<CalculatorVersion>>,
}

impl MemoryVersionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VersionStore for MemoryVersionStore {
    async fn insert(&self, row: &CalculatorVersion) -> AppResult<CalculatorVersion> {
        self.rows.write().await.push(row.clone());
        Ok(row.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CalculatorVersion>> {
        Ok(self.rows.read().await.iter().find(|v| v.id == id).cloned())
    }

    async fn list_for_calculator(&self, calculator_id: Uuid) -> AppResult<Vec<CalculatorVersion>> {
        let mut versions: Vec<CalculatorVersion> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|v| v.calculator_id == calculator_id)
            .cloned()
            .collect();
        versions.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(versions)
    }

    async fn max_version(&self, calculator_id: Uuid) -> AppResult<Option<i32>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|v| v.calculator_id == calculator_id)
            .map(|v| v.version)
            .max())
    }

    async fn delete_for_calculator(&self, calculator_id: Uuid) -> AppResult<u64> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|v| v.calculator_id != calculator_id);
        Ok((before - rows.len()) as u64)
    }
}
