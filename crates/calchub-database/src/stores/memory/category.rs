//! In-memory category store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use calchub_core::result::AppResult;
use calchub_entity::category::{Category, CategoryPlacement, CreateCategory, UpdateCategory};

use crate::stores::CategoryStore;

/// In-memory implementation of [`CategoryStore`].
#[derive(Debug, Default)]
pub struct MemoryCategoryStore {
    rows: RwLock<Vec<Category>>,
}

impl MemoryCategoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryStore for MemoryCategoryStore {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        Ok(self.rows.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            description: data.description.clone(),
            parent_id: data.parent_id,
            order: data.order,
            tags: data.tags.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(category.clone());
        Ok(category)
    }

    async fn update(&self, id: Uuid, patch: &UpdateCategory) -> AppResult<Option<Category>> {
        let mut rows = self.rows.write().await;
        let Some(category) = rows.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        patch.apply(category);
        category.updated_at = Utc::now();
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }

    async fn clear_parent(&self, parent_id: Uuid) -> AppResult<u64> {
        let mut rows = self.rows.write().await;
        let mut orphaned = 0;
        for category in rows.iter_mut().filter(|c| c.parent_id == Some(parent_id)) {
            category.parent_id = None;
            category.updated_at = Utc::now();
            orphaned += 1;
        }
        Ok(orphaned)
    }

    async fn apply_placements(&self, items: &[CategoryPlacement]) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        for item in items {
            if let Some(category) = rows.iter_mut().find(|c| c.id == item.id) {
                category.parent_id = item.parent_id;
                category.order = item.order;
                category.updated_at = Utc::now();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_req(name: &str, parent_id: Option<Uuid>) -> CreateCategory {
        CreateCategory {
            name: name.to_string(),
            description: String::new(),
            parent_id,
            order: 0,
            tags: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_clear_parent_orphans_children() {
        let store = MemoryCategoryStore::new();
        let root = store.create(&create_req("root", None)).await.unwrap();
        let child_a = store
            .create(&create_req("a", Some(root.id)))
            .await
            .unwrap();
        let child_b = store
            .create(&create_req("b", Some(root.id)))
            .await
            .unwrap();

        let orphaned = store.clear_parent(root.id).await.unwrap();
        assert_eq!(orphaned, 2);

        for id in [child_a.id, child_b.id] {
            let row = store.find_by_id(id).await.unwrap().unwrap();
            assert!(row.parent_id.is_none());
        }
    }

    #[tokio::test]
    async fn test_placements_skip_unknown_ids() {
        let store = MemoryCategoryStore::new();
        let cat = store.create(&create_req("finance", None)).await.unwrap();

        store
            .apply_placements(&[
                CategoryPlacement {
                    id: cat.id,
                    parent_id: None,
                    order: 7,
                },
                CategoryPlacement {
                    id: Uuid::new_v4(),
                    parent_id: None,
                    order: 1,
                },
            ])
            .await
            .unwrap();

        let row = store.find_by_id(cat.id).await.unwrap().unwrap();
        assert_eq!(row.order, 7);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_patch_is_partial() {
        let store = MemoryCategoryStore::new();
        let cat = store.create(&create_req("finance", None)).await.unwrap();

        let patch = UpdateCategory {
            description: Some("money tools".to_string()),
            ..Default::default()
        };
        let updated = store.update(cat.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.name, "finance");
        assert_eq!(updated.description, "money tools");
    }
}
