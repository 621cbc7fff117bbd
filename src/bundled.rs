//! Romanization tables shipped with the crate.
//!
//! Each table is a TOML document under `src/table/data/`, embedded at
//! compile time. They are pure data: the engine treats them exactly like a
//! table a caller builds by hand or loads from disk.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogError, TableInfo};
use crate::table::{parse_table_toml, Table, TableError};

pub const SPECIAL_CHARACTERS: &str = "special_characters";
pub const CURRENCY: &str = "currency";

macro_rules! bundled_tables {
    ($($id:literal),* $(,)?) => {
        const BUNDLED: &[(&str, &str)] = &[
            $(($id, include_str!(concat!("table/data/", $id, ".toml"))),)*
        ];
    };
}

bundled_tables![
    "ukrainian_kmu",
    "ukrainian_simple",
    "ukrainian_wws",
    "ukrainian_british",
    "ukrainian_bgn",
    "ukrainian_iso9",
    "ukrainian_french",
    "ukrainian_german",
    "ukrainian_gost1971",
    "ukrainian_gost1986",
    "ukrainian_passport2007",
    "ukrainian_national1996",
    "ukrainian_passport2004_alt",
    "russian_gost2006",
    "russian_simple",
    "russian_icao",
    "russian_telegram",
    "russian_international_passport1997",
    "russian_international_passport1997_reduced",
    "russian_driver_license",
    "russian_iso9_system_a",
    "russian_iso9_system_b",
    "russian_isor9_table2",
    "special_characters",
    "currency",
];

/// Ids of every bundled table, in catalog order.
pub fn ids() -> impl Iterator<Item = &'static str> {
    BUNDLED.iter().map(|&(id, _)| id)
}

/// Raw TOML of a bundled table.
pub fn source(id: &str) -> Option<&'static str> {
    BUNDLED
        .iter()
        .find_map(|&(bid, toml)| (bid == id).then_some(toml))
}

/// Parse and build one bundled table.
pub fn table(id: &str) -> Result<Table, CatalogError> {
    let toml = source(id).ok_or_else(|| CatalogError::UnknownTable(id.to_string()))?;
    Ok(parse_table_toml(toml)?.build()?)
}

/// A fresh catalog holding every bundled table.
///
/// Nothing is cached: each call builds new tables, so callers can assemble
/// and mutate their own catalogs independently.
pub fn catalog() -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();
    for &(id, toml) in BUNDLED {
        let source = parse_table_toml(toml).map_err(|e| with_id(id, e))?;
        let table = source.build().map_err(|e| with_id(id, e))?;
        catalog.insert(TableInfo::from_source(id, &source), Arc::new(table))?;
    }
    Ok(catalog)
}

fn with_id(id: &str, e: TableError) -> CatalogError {
    CatalogError::Invalid {
        id: id.to_string(),
        source: e,
    }
}
