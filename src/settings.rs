//! Conversion settings loaded from TOML.
//!
//! - `parse_settings_toml(toml)` parses and validates a settings document
//! - `default_toml()` returns the embedded defaults
//! - `Settings::resolve(&catalog)` stacks the configured tables
//!
//! Settings are plain values owned by the caller; nothing here is global.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::catalog::{Catalog, CatalogError};
use crate::table::MappingTable;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub conversion: ConversionSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionSettings {
    pub table: String,
    #[serde(default = "default_preserve_case")]
    pub preserve_case: bool,
    #[serde(default)]
    pub overlays: Vec<String>,
}

fn default_preserve_case() -> bool {
    true
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        parse_settings_toml(&content)
    }

    /// The configured script table with its overlays layered on top.
    pub fn resolve(&self, catalog: &Catalog) -> Result<Arc<dyn MappingTable>, CatalogError> {
        catalog.stack(&self.conversion.table, &self.conversion.overlays)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            conversion: ConversionSettings {
                table: "ukrainian_kmu".to_string(),
                preserve_case: true,
                overlays: vec!["special_characters".to_string()],
            },
        }
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    let invalid = |field: &str, reason: &str| SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    if s.conversion.table.trim().is_empty() {
        return Err(invalid("conversion.table", "must not be empty"));
    }
    let mut seen = HashSet::new();
    for overlay in &s.conversion.overlays {
        if overlay.trim().is_empty() {
            return Err(invalid("conversion.overlays", "ids must not be empty"));
        }
        if !seen.insert(overlay.as_str()) {
            return Err(invalid(
                "conversion.overlays",
                &format!("duplicate overlay {overlay:?}"),
            ));
        }
    }
    Ok(())
}
