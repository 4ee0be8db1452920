//! Calculator store backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use calchub_core::error::{AppError, ErrorKind};
use calchub_core::result::AppResult;
use calchub_entity::calculator::{
    Calculator, CalculatorPlacement, CreateCalculator, UpdateCalculator,
};

use crate::stores::CalculatorStore;

/// PostgreSQL implementation of [`CalculatorStore`].
#[derive(Debug, Clone)]
pub struct PgCalculatorStore {
    pool: PgPool,
}

impl PgCalculatorStore {
    /// Create a new calculator store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalculatorStore for PgCalculatorStore {
    async fn find_all(&self) -> AppResult<Vec<Calculator>> {
        sqlx::query_as::<_, Calculator>("SELECT * FROM calculators")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list calculators", e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Calculator>> {
        sqlx::query_as::<_, Calculator>("SELECT * FROM calculators WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find calculator", e))
    }

    async fn create(&self, data: &CreateCalculator) -> AppResult<Calculator> {
        sqlx::query_as::<_, Calculator>(
            "INSERT INTO calculators \
             (category_id, name, description, tags, logic_source, ui_document, current_version, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, 1, $7) RETURNING *",
        )
        .bind(data.category_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.tags)
        .bind(&data.logic_source)
        .bind(&data.ui_document)
        .bind(data.order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create calculator", e))
    }

    async fn update(&self, id: Uuid, patch: &UpdateCalculator) -> AppResult<Option<Calculator>> {
        let Some(mut calculator) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut calculator);

        sqlx::query_as::<_, Calculator>(
            "UPDATE calculators SET category_id = $2, name = $3, description = $4, tags = $5, \
             logic_source = $6, ui_document = $7, sort_order = $8, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(calculator.category_id)
        .bind(&calculator.name)
        .bind(&calculator.description)
        .bind(&calculator.tags)
        .bind(&calculator.logic_source)
        .bind(&calculator.ui_document)
        .bind(calculator.order)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update calculator", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM calculators WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete calculator", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear_category(&self, category_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE calculators SET category_id = NULL, updated_at = NOW() WHERE category_id = $1",
        )
        .bind(category_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to orphan calculators", e)
        })?;
        Ok(result.rows_affected())
    }

    async fn apply_placements(&self, items: &[CalculatorPlacement]) -> AppResult<()> {
        for item in items {
            sqlx::query(
                "UPDATE calculators SET category_id = $2, sort_order = $3, updated_at = NOW() \
                 WHERE id = $1",
            )
            .bind(item.id)
            .bind(item.category_id)
            .bind(item.order)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to reorder calculator", e)
            })?;
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
        sqlx::query_as::<_, Calculator>(
            "UPDATE calculators SET logic_source = $2, ui_document = $3, current_version = $4, \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(logic_source)
        .bind(ui_document)
        .bind(version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to apply calculator version", e)
        })
    }
}
