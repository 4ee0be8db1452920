//! Serde helpers shared by the entity models.

use serde::{Deserialize, Deserializer};

/// Deserialize into `Some(inner)` whenever the field is present, so a
/// patch can tell an explicit `null` (Some(None)) apart from an absent
/// field (None via `#[serde(default)]`).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
