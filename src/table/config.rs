use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{Table, TableBuilder, TableError};

/// A table as written in TOML, before the builder runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSource {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub delete: Vec<String>,
    pub base: BTreeMap<String, String>,
    #[serde(default)]
    pub contextual: BTreeMap<String, String>,
    #[serde(default)]
    pub word_initial: BTreeMap<String, String>,
}

impl TableSource {
    pub fn build(&self) -> Result<Table, TableError> {
        TableBuilder::new()
            .base_rules(self.base.clone())
            .contextual_rules(self.contextual.clone())
            .word_initial_rules(self.word_initial.clone())
            .delete_all(self.delete.iter().cloned())
            .build()
    }
}

/// Parse a TOML table document. Shape errors (multi-character base keys,
/// empty patterns) are reported here, not deferred to `build`.
pub fn parse_table_toml(toml_str: &str) -> Result<TableSource, TableError> {
    let source: TableSource =
        toml::from_str(toml_str).map_err(|e| TableError::Parse(e.to_string()))?;

    if let Some(key) = source.base.keys().find(|k| k.chars().count() != 1) {
        return Err(TableError::InvalidKey(key.clone()));
    }
    let empty_key = source.contextual.keys().any(String::is_empty)
        || source.word_initial.keys().any(String::is_empty)
        || source.delete.iter().any(String::is_empty);
    if empty_key {
        return Err(TableError::EmptyPattern);
    }

    Ok(source)
}

/// Read, parse and build a table file.
pub fn load_table_file(path: &Path) -> Result<(TableSource, Table), TableError> {
    let content = fs::read_to_string(path)?;
    let source = parse_table_toml(&content)?;
    let table = source.build()?;
    Ok((source, table))
}
