//! Catalog engine configuration.

use serde::{Deserialize, Serialize};

/// Strategy for numbering a newly created calculator version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionNumbering {
    /// `calculator.current_version + 1`. After a rollback this can skip
    /// or duplicate an existing version number; kept as the compatible
    /// default.
    CurrentPlusOne,
    /// `max(existing version numbers) + 1`. Never collides.
    MaxPlusOne,
}

/// Catalog engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// How new version numbers are assigned.
    #[serde(default = "default_version_numbering")]
    pub version_numbering: VersionNumbering,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            version_numbering: default_version_numbering(),
        }
    }
}

fn default_version_numbering() -> VersionNumbering {
    VersionNumbering::CurrentPlusOne
}
