//! Category store backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use calchub_core::error::{AppError, ErrorKind};
use calchub_core::result::AppResult;
use calchub_entity::category::{Category, CategoryPlacement, CreateCategory, UpdateCategory};

use crate::stores::CategoryStore;

/// PostgreSQL implementation of [`CategoryStore`].
#[derive(Debug, Clone)]
pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    /// Create a new category store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list categories", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find category", e))
    }

    async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description, parent_id, sort_order, tags) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.parent_id)
        .bind(data.order)
        .bind(&data.tags)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create category", e))
    }

    async fn update(&self, id: Uuid, patch: &UpdateCategory) -> AppResult<Option<Category>> {
        // Read-modify-write: a patch overwrites arbitrary fields, so the
        // simplest faithful translation is to apply it in memory and
        // write the whole row back.
        let Some(mut category) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut category);

        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, description = $3, parent_id = $4, \
             sort_order = $5, tags = $6, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.parent_id)
        .bind(category.order)
        .bind(&category.tags)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update category", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete category", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear_parent(&self, parent_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE categories SET parent_id = NULL, updated_at = NOW() WHERE parent_id = $1",
        )
        .bind(parent_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to orphan children", e))?;
        Ok(result.rows_affected())
    }

    async fn apply_placements(&self, items: &[CategoryPlacement]) -> AppResult<()> {
        // Per-row updates, no cross-row atomicity.
        for item in items {
            sqlx::query(
                "UPDATE categories SET parent_id = $2, sort_order = $3, updated_at = NOW() \
                 WHERE id = $1",
            )
            .bind(item.id)
            .bind(item.parent_id)
            .bind(item.order)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to reorder category", e)
            })?;
        }
        Ok(())
    }
}
