//! Caller-owned collection of named tables.
//!
//! There is no process-wide registry: an application assembles a `Catalog`
//! at startup (usually from [`crate::bundled::catalog`]) and passes it
//! around. Tests build isolated catalogs with just the tables they need.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::table::{LayeredTable, MappingTable, TableError, TableSource};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown table: {0}")]
    UnknownTable(String),
    #[error("duplicate table id: {0}")]
    DuplicateId(String),
    #[error("invalid table {id}: {source}")]
    Invalid { id: String, source: TableError },
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Descriptive metadata kept next to each table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    pub id: String,
    pub name: String,
    pub language: String,
    pub description: String,
}

impl TableInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            language: language.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Metadata from a parsed TOML table; missing fields fall back to the id.
    pub fn from_source(id: &str, source: &TableSource) -> Self {
        Self {
            id: id.to_string(),
            name: source.name.clone().unwrap_or_else(|| id.to_string()),
            language: source.language.clone().unwrap_or_default(),
            description: source.description.clone().unwrap_or_default(),
        }
    }
}

struct CatalogEntry {
    info: TableInfo,
    table: Arc<dyn MappingTable>,
}

#[derive(Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        info: TableInfo,
        table: Arc<dyn MappingTable>,
    ) -> Result<(), CatalogError> {
        if self.entries.iter().any(|e| e.info.id == info.id) {
            return Err(CatalogError::DuplicateId(info.id));
        }
        self.entries.push(CatalogEntry { info, table });
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn MappingTable>> {
        self.entry(id).map(|e| Arc::clone(&e.table))
    }

    pub fn resolve(&self, id: &str) -> Result<Arc<dyn MappingTable>, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownTable(id.to_string()))
    }

    pub fn info(&self, id: &str) -> Option<&TableInfo> {
        self.entry(id).map(|e| &e.info)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&TableInfo, &Arc<dyn MappingTable>)> {
        self.entries.iter().map(|e| (&e.info, &e.table))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.info.id.as_str())
    }

    pub fn by_language<'a>(&'a self, language: &'a str) -> impl Iterator<Item = &'a TableInfo> {
        self.entries
            .iter()
            .map(|e| &e.info)
            .filter(move |info| info.language == language)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Layer `overlays` on top of `base_id`, left to right.
    ///
    /// `stack("ukrainian_kmu", &["special_characters", "currency"])` yields
    /// `combine(combine(kmu, special), currency)`.
    pub fn stack<S: AsRef<str>>(
        &self,
        base_id: &str,
        overlays: &[S],
    ) -> Result<Arc<dyn MappingTable>, CatalogError> {
        let mut table = self.resolve(base_id)?;
        for overlay in overlays {
            let top = self.resolve(overlay.as_ref())?;
            table = Arc::new(LayeredTable::new(table, top));
        }
        debug!(base_id, overlays = overlays.len(), "stacked tables");
        Ok(table)
    }

    fn entry(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.info.id == id)
    }
}
