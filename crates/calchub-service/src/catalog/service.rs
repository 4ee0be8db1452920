//! Category and calculator CRUD with audit recording.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use calchub_core::error::AppError;
use calchub_database::stores::{CalculatorStore, CategoryStore, VersionStore};
use calchub_entity::calculator::{Calculator, CalculatorPlacement, CreateCalculator, UpdateCalculator};
use calchub_entity::category::{Category, CategoryPlacement, CreateCategory, UpdateCategory};
use calchub_entity::catalog::CatalogNode;

use crate::audit::AuditRecorder;
use crate::catalog::tree::build_catalog_tree;
use crate::context::ActorContext;

/// Manages the catalog: categories, calculators, and the assembled tree.
#[derive(Clone)]
pub struct CatalogService {
    /// Category store.
    categories: Arc<dyn CategoryStore>,
    /// Calculator store.
    calculators: Arc<dyn CalculatorStore>,
    /// Version store, for the cascade on calculator delete.
    versions: Arc<dyn VersionStore>,
    /// Audit recorder.
    audit: AuditRecorder,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService").finish()
    }
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(
        categories: Arc<dyn CategoryStore>,
        calculators: Arc<dyn CalculatorStore>,
        versions: Arc<dyn VersionStore>,
        audit: AuditRecorder,
    ) -> Self {
        Self {
            categories,
            calculators,
            versions,
            audit,
        }
    }

    /// Assemble the catalog tree, optionally filtered by a search term.
    pub async fn get_tree(&self, search: Option<&str>) -> Result<Vec<CatalogNode>, AppError> {
        let categories = self.categories.find_all().await?;
        let calculators = self.calculators.find_all().await?;
        Ok(build_catalog_tree(&categories, &calculators, search))
    }

    /// Create a category.
    pub async fn create_category(
        &self,
        ctx: &ActorContext,
        data: CreateCategory,
    ) -> Result<Category, AppError> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Category name cannot be empty"));
        }

        let category = self.categories.create(&data).await?;

        info!(category_id = %category.id, name = %category.name, "Category created");
        self.audit.record(
            ctx,
            "category.create",
            "category",
            Some(category.id),
            serde_json::to_value(&category).ok(),
        );
        Ok(category)
    }

    /// Apply a partial patch to a category.
    pub async fn update_category(
        &self,
        ctx: &ActorContext,
        id: Uuid,
        patch: UpdateCategory,
    ) -> Result<Category, AppError> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Category name cannot be empty"));
            }
        }

        let category = self
            .categories
            .update(id, &patch)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))?;

        info!(category_id = %id, "Category updated");
        self.audit.record(
            ctx,
            "category.update",
            "category",
            Some(id),
            serde_json::to_value(&category).ok(),
        );
        Ok(category)
    }

    /// Delete a category.
    ///
    /// Child categories and owned calculators are orphaned, not deleted:
    /// children become roots, calculators become uncategorized.
    pub async fn delete_category(&self, ctx: &ActorContext, id: Uuid) -> Result<(), AppError> {
        if !self.categories.delete(id).await? {
            return Err(AppError::not_found("Category not found"));
        }

        let orphaned_children = self.categories.clear_parent(id).await?;
        let orphaned_calculators = self.calculators.clear_category(id).await?;

        info!(
            category_id = %id,
            orphaned_children,
            orphaned_calculators,
            "Category deleted"
        );
        self.audit.record(ctx, "category.delete", "category", Some(id), None);
        Ok(())
    }

    /// Apply a bulk category reorder. Unknown IDs are skipped; rows are
    /// written independently with no cross-row atomicity.
    pub async fn reorder_categories(
        &self,
        ctx: &ActorContext,
        items: Vec<CategoryPlacement>,
    ) -> Result<(), AppError> {
        self.categories.apply_placements(&items).await?;

        info!(count = items.len(), "Categories reordered");
        self.audit.record(
            ctx,
            "category.reorder",
            "category",
            None,
            serde_json::to_value(&items).ok(),
        );
        Ok(())
    }

    /// Fetch a calculator by ID.
    pub async fn get_calculator(&self, id: Uuid) -> Result<Calculator, AppError> {
        self.calculators
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Calculator not found"))
    }

    /// Create a calculator. `current_version` starts at 1 and no version
    /// row is written until the first explicit version creation.
    pub async fn create_calculator(
        &self,
        ctx: &ActorContext,
        data: CreateCalculator,
    ) -> Result<Calculator, AppError> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Calculator name cannot be empty"));
        }

        let calculator = self.calculators.create(&data).await?;

        info!(calculator_id = %calculator.id, name = %calculator.name, "Calculator created");
        self.audit.record(
            ctx,
            "calculator.create",
            "calculator",
            Some(calculator.id),
            serde_json::to_value(&calculator).ok(),
        );
        Ok(calculator)
    }

    /// Apply a partial metadata patch to a calculator. Payload edits via
    /// this path never bump `current_version` and never write a version
    /// row; versioning is always an explicit operation.
    pub async fn update_calculator(
        &self,
        ctx: &ActorContext,
        id: Uuid,
        patch: UpdateCalculator,
    ) -> Result<Calculator, AppError> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Calculator name cannot be empty"));
            }
        }

        let calculator = self
            .calculators
            .update(id, &patch)
            .await?
            .ok_or_else(|| AppError::not_found("Calculator not found"))?;

        info!(calculator_id = %id, "Calculator updated");
        self.audit.record(
            ctx,
            "calculator.update",
            "calculator",
            Some(id),
            serde_json::to_value(&calculator).ok(),
        );
        Ok(calculator)
    }

    /// Delete a calculator and all of its version history.
    pub async fn delete_calculator(&self, ctx: &ActorContext, id: Uuid) -> Result<(), AppError> {
        if !self.calculators.delete(id).await? {
            return Err(AppError::not_found("Calculator not found"));
        }

        let versions_removed = self.versions.delete_for_calculator(id).await?;

        info!(calculator_id = %id, versions_removed, "Calculator deleted");
        self.audit.record(ctx, "calculator.delete", "calculator", Some(id), None);
        Ok(())
    }

    /// Apply a bulk calculator reorder.
    pub async fn reorder_calculators(
        &self,
        ctx: &ActorContext,
        items: Vec<CalculatorPlacement>,
    ) -> Result<(), AppError> {
        self.calculators.apply_placements(&items).await?;

        info!(count = items.len(), "Calculators reordered");
        self.audit.record(
            ctx,
            "calculator.reorder",
            "calculator",
            None,
            serde_json::to_value(&items).ok(),
        );
        Ok(())
    }
}
