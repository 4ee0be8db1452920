//! In-memory calculator store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use calchub_core::result::AppResult;
use calchub_entity::calculator::{
    Calculator, CalculatorPlacement, CreateCalculator, UpdateCalculator,
};

use crate::stores::CalculatorStore;

/// In-memory implementation of [`CalculatorStore`].
#[derive(Debug, Default)]
pub struct MemoryCalculatorStore {
    rows: RwLock<Vec<Calculator>>,
}

impl MemoryCalculatorStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CalculatorStore for MemoryCalculatorStore {
    async fn find_all(&self) -> AppResult<Vec<Calculator>> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Calculator>> {
        Ok(self.rows.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, data: &CreateCalculator) -> AppResult<Calculator> {
        let now = Utc::now();
        let calculator = Calculator {
            id: Uuid::new_v4(),
            category_id: data.category_id,
            name: data.name.clone(),
            description: data.description.clone(),
            tags: data.tags.clone(),
            logic_source: data.logic_source.clone(),
            ui_document: data.ui_document.clone(),
            current_version: 1,
            order: data.order,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(calculator.clone());
        Ok(calculator)
    }

    async fn update(&self, id: Uuid, patch: &UpdateCalculator) -> AppResult<Option<Calculator>> {
        let mut rows = self.rows.write().await;
        let Some(calculator) = rows.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        patch.apply(calculator);
        calculator.updated_at = Utc::now();
        Ok(Some(calculator.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }

    async fn clear_category(&self, category_id: Uuid) -> AppResult<u64> {
        let mut rows = self.rows.write().await;
        let mut orphaned = 0;
        for calculator in rows
            .iter_mut()
            .filter(|c| c.category_id == Some(category_id))
        {
            calculator.category_id = None;
            calculator.updated_at = Utc::now();
            orphaned += 1;
        }
        Ok(orphaned)
    }

    async fn apply_placements(&self, items: &[CalculatorPlacement]) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        for item in items {
            if let Some(calculator) = rows.iter_mut().find(|c| c.id == item.id) {
                calculator.category_id = item.category_id;
                calculator.order = item.order;
                calculator.updated_at = Utc::now();
            }
        }
        Ok(())
    }

    async fn apply_version(
        &self,
        id: Uuid,
        logic_source: &str,
        ui_document: &serde_json::Value,
        version: i32,
    ) -> AppResult<Option<Calculator>> {
        let mut rows = self.rows.write().await;
        let Some(calculator) = rows.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        calculator.logic_source = logic_source.to_string();
        calculator.ui_document = ui_document.clone();
        calculator.current_version = version;
        calculator.updated_at = Utc::now();
        Ok(Some(calculator.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_starts_at_version_one() {
        let store = MemoryCalculatorStore::new();
        let calc = store
            .create(&CreateCalculator {
                name: "Loan".to_string(),
                description: String::new(),
                category_id: None,
                tags: Vec::new(),
                logic_source: String::new(),
                ui_document: serde_json::json!({}),
                order: 0,
            })
            .await
            .unwrap();
        assert_eq!(calc.current_version, 1);
    }

    #[tokio::test]
    async fn test_apply_version_can_move_backward() {
        let store = MemoryCalculatorStore::new();
        let calc = store
            .create(&CreateCalculator {
                name: "Loan".to_string(),
                description: String::new(),
                category_id: None,
                tags: Vec::new(),
                logic_source: "v1".to_string(),
                ui_document: serde_json::json!({}),
                order: 0,
            })
            .await
            .unwrap();

        store
            .apply_version(calc.id, "v3", &serde_json::json!({"rev": 3}), 3)
            .await
            .unwrap();
        let rolled = store
            .apply_version(calc.id, "v1", &serde_json::json!({}), 1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rolled.current_version, 1);
        assert_eq!(rolled.logic_source, "v1");
    }
}
