//! Per-entity store traits.
//!
//! Each entity gets a strongly typed async store trait with two
//! implementations: PostgreSQL ([`postgres`]) and an in-memory fallback
//! with equivalent semantics ([`memory`]). The backend is chosen once at
//! startup by [`crate::provider::StoreManager`]; callers only ever see
//! trait objects.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use calchub_core::result::AppResult;
use calchub_entity::audit::{AuditLogEntry, CreateAuditLogEntry};
use calchub_entity::calculator::{
    Calculator, CalculatorPlacement, CalculatorVersion, CreateCalculator, UpdateCalculator,
};
use calchub_entity::category::{Category, CategoryPlacement, CreateCategory, UpdateCategory};

/// Store for [`Category`] rows.
#[async_trait]
pub trait CategoryStore: Send + Sync + 'static {
    /// All categories, unordered (tree assembly sorts).
    async fn find_all(&self) -> AppResult<Vec<Category>>;

    /// Find a category by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>>;

    /// Create a category and return it.
    async fn create(&self, data: &CreateCategory) -> AppResult<Category>;

    /// Apply a partial patch. Returns `None` if the category is absent.
    async fn update(&self, id: Uuid, patch: &UpdateCategory) -> AppResult<Option<Category>>;

    /// Delete a category. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Null out `parent_id` on every child of the given category.
    /// Returns the number of orphaned rows.
    async fn clear_parent(&self, parent_id: Uuid) -> AppResult<u64>;

    /// Apply a bulk reorder, one row at a time. Unknown IDs are skipped.
    async fn apply_placements(&self, items: &[CategoryPlacement]) -> AppResult<()>;
}

/// Store for [`Calculator`] rows.
#[async_trait]
pub trait CalculatorStore: Send + Sync + 'static {
    /// All calculators, unordered.
    async fn find_all(&self) -> AppResult<Vec<Calculator>>;

    /// Find a calculator by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Calculator>>;

    /// Create a calculator with `current_version` fixed at 1.
    async fn create(&self, data: &CreateCalculator) -> AppResult<Calculator>;

    /// Apply a partial metadata patch. Never touches `current_version`.
    async fn update(&self, id: Uuid, patch: &UpdateCalculator) -> AppResult<Option<Calculator>>;

    /// Delete a calculator. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Null out `category_id` on every calculator in the given category.
    /// Returns the number of orphaned rows.
    async fn clear_category(&self, category_id: Uuid) -> AppResult<u64>;

    /// Apply a bulk reorder, one row at a time. Unknown IDs are skipped.
    async fn apply_placements(&self, items: &[CalculatorPlacement]) -> AppResult<()>;

    /// Overwrite the live payloads and version number in one write.
    /// Used by version creation and rollback. Returns `None` if the
    /// calculator is absent.
    async fn apply_version(
        &self,
        id: Uuid,
        logic_source: &str,
        ui_document: &serde_json::Value,
        version: i32,
    ) -> AppResult<Option<Calculator>>;
}

/// Store for [`CalculatorVersion`] rows. Rows are immutable snapshots.
#[async_trait]
pub trait VersionStore: Send + Sync + 'static {
    /// Persist a fully constructed version row.
    async fn insert(&self, row: &CalculatorVersion) -> AppResult<CalculatorVersion>;

    /// Find a version row by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CalculatorVersion>>;

    /// All versions for a calculator, version number descending.
    async fn list_for_calculator(&self, calculator_id: Uuid) -> AppResult<Vec<CalculatorVersion>>;

    /// Highest version number ever created for a calculator.
    async fn max_version(&self, calculator_id: Uuid) -> AppResult<Option<i32>>;

    /// Delete all versions for a calculator (cascade on calculator
    /// delete). Returns the number of rows removed.
    async fn delete_for_calculator(&self, calculator_id: Uuid) -> AppResult<u64>;
}

/// Append-only store for [`AuditLogEntry`] rows.
#[async_trait]
pub trait AuditStore: Send + Sync + 'static {
    /// Append an entry.
    async fn append(&self, data: &CreateAuditLogEntry) -> AppResult<AuditLogEntry>;

    /// Most recent entries, newest first.
    async fn list_recent(&self, limit: i64) -> AppResult<Vec<AuditLogEntry>>;
}
