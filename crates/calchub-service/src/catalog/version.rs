//! Calculator versioning: create, list, and rollback.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use calchub_core::config::catalog::{CatalogConfig, VersionNumbering};
use calchub_core::error::AppError;
use calchub_database::stores::{CalculatorStore, VersionStore};
use calchub_entity::calculator::{Calculator, CalculatorVersion, CreateVersion};

use crate::audit::AuditRecorder;
use crate::context::ActorContext;

/// Manages calculator version history.
///
/// Version rows are immutable snapshots; the live calculator carries the
/// current payloads plus `current_version`. Rollback copies a snapshot
/// back onto the live row and never touches history.
#[derive(Clone)]
pub struct VersionService {
    /// Calculator store.
    calculators: Arc<dyn CalculatorStore>,
    /// Version store.
    versions: Arc<dyn VersionStore>,
    /// Audit recorder.
    audit: AuditRecorder,
    /// How new version numbers are assigned.
    numbering: VersionNumbering,
}

impl std::fmt::Debug for VersionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionService")
            .field("numbering", &self.numbering)
            .finish()
    }
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(
        calculators: Arc<dyn CalculatorStore>,
        versions: Arc<dyn VersionStore>,
        audit: AuditRecorder,
        config: &CatalogConfig,
    ) -> Self {
        Self {
            calculators,
            versions,
            audit,
            numbering: config.version_numbering,
        }
    }

    /// List all versions of a calculator, newest number first.
    ///
    /// An unknown calculator simply has no versions; listing is not a
    /// failure mode.
    pub async fn list_versions(
        &self,
        calculator_id: Uuid,
    ) -> Result<Vec<CalculatorVersion>, AppError> {
        self.versions.list_for_calculator(calculator_id).await
    }

    /// Create a new version snapshot and promote it to the live payload.
    ///
    /// Payload fields omitted from the request inherit the calculator's
    /// live values. The number assigned depends on the configured
    /// strategy: `current_plus_one` (default) or `max_plus_one`, which
    /// never reuses a number after a rollback.
    pub async fn create_version(
        &self,
        ctx: &ActorContext,
        calculator_id: Uuid,
        data: CreateVersion,
    ) -> Result<CalculatorVersion, AppError> {
        let calculator = self.require_calculator(calculator_id).await?;

        let next_version = match self.numbering {
            VersionNumbering::CurrentPlusOne => calculator.current_version + 1,
            VersionNumbering::MaxPlusOne => {
                let max = self.versions.max_version(calculator_id).await?;
                max.unwrap_or(calculator.current_version).max(calculator.current_version) + 1
            }
        };

        let logic_source = data.logic_source.unwrap_or_else(|| calculator.logic_source.clone());
        let ui_document = data.ui_document.unwrap_or_else(|| calculator.ui_document.clone());
        let changed_by = if ctx.actor.is_empty() {
            "system".to_string()
        } else {
            ctx.actor.clone()
        };

        let row = CalculatorVersion {
            id: Uuid::new_v4(),
            calculator_id,
            version: next_version,
            logic_source: logic_source.clone(),
            ui_document: ui_document.clone(),
            notes: data.notes,
            changed_by,
            created_at: Utc::now(),
        };
        let row = self.versions.insert(&row).await?;

        self.calculators
            .apply_version(calculator_id, &logic_source, &ui_document, next_version)
            .await?
            .ok_or_else(|| AppError::not_found("Calculator not found"))?;

        info!(
            calculator_id = %calculator_id,
            version = next_version,
            "Calculator version created"
        );
        self.audit.record(
            ctx,
            "calculator.version.create",
            "calculator",
            Some(calculator_id),
            serde_json::to_value(&row).ok(),
        );
        Ok(row)
    }

    /// Roll the live payloads back to a stored version.
    ///
    /// The version must belong to the named calculator. `current_version`
    /// moves backward to the snapshot's number; no version rows are
    /// created, modified, or deleted.
    pub async fn rollback(
        &self,
        ctx: &ActorContext,
        calculator_id: Uuid,
        version_id: Uuid,
    ) -> Result<Calculator, AppError> {
        self.require_calculator(calculator_id).await?;

        let snapshot = self
            .versions
            .find_by_id(version_id)
            .await?
            .filter(|v| v.calculator_id == calculator_id)
            .ok_or_else(|| AppError::not_found("Version not found"))?;

        let calculator = self
            .calculators
            .apply_version(
                calculator_id,
                &snapshot.logic_source,
                &snapshot.ui_document,
                snapshot.version,
            )
            .await?
            .ok_or_else(|| AppError::not_found("Calculator not found"))?;

        info!(
            calculator_id = %calculator_id,
            version = snapshot.version,
            "Calculator rolled back"
        );
        self.audit.record(
            ctx,
            "calculator.version.rollback",
            "calculator",
            Some(calculator_id),
            serde_json::to_value(&snapshot).ok(),
        );
        Ok(calculator)
    }

    async fn require_calculator(&self, id: Uuid) -> Result<Calculator, AppError> {
        self.calculators
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Calculator not found"))
    }
}
