//! Calculator version store backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use calchub_core::error::{AppError, ErrorKind};
use calchub_core::result::AppResult;
use calchub_entity::calculator::CalculatorVersion;

use crate::stores::VersionStore;

/// PostgreSQL implementation of [`VersionStore`].
#[derive(Debug, Clone)]
pub struct PgVersionStore {
    pool: PgPool,
}

impl PgVersionStore {
    /// Create a new version store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VersionStore for PgVersionStore {
    async fn insert(&self, row: &CalculatorVersion) -> AppResult<CalculatorVersion> {
        sqlx::query_as::<_, CalculatorVersion>(
            "INSERT INTO calculator_versions \
             (id, calculator_id, version, logic_source, ui_document, notes, changed_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(row.id)
        .bind(row.calculator_id)
        .bind(row.version)
        .bind(&row.logic_source)
        .bind(&row.ui_document)
        .bind(&row.notes)
        .bind(&row.changed_by)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert version", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CalculatorVersion>> {
        sqlx::query_as::<_, CalculatorVersion>("SELECT * FROM calculator_versions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find version", e))
    }

    async fn list_for_calculator(&self, calculator_id: Uuid) -> AppResult<Vec<CalculatorVersion>> {
        sqlx::query_as::<_, CalculatorVersion>(
            "SELECT * FROM calculator_versions WHERE calculator_id = $1 ORDER BY version DESC",
        )
        .bind(calculator_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list versions", e))
    }

    async fn max_version(&self, calculator_id: Uuid) -> AppResult<Option<i32>> {
        sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MAX(version) FROM calculator_versions WHERE calculator_id = $1",
        )
        .bind(calculator_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find max version", e))
    }

    async fn delete_for_calculator(&self, calculator_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM calculator_versions WHERE calculator_id = $1")
            .bind(calculator_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete versions", e)
            })?;
        Ok(result.rows_affected())
    }
}
