//! Table-driven romanization.
//!
//! A [`table::MappingTable`] bundles four rule sets (base map, contextual
//! rules, word-initial rules, deletion set). Tables are built with
//! [`table::TableBuilder`] or parsed from TOML, stacked with
//! [`table::LayeredTable`], and applied by [`convert::convert`].

pub mod bundled;
pub mod catalog;
pub mod convert;
pub mod settings;
pub mod table;
pub mod trace_init;
pub mod unicode;

pub use catalog::{Catalog, CatalogError, TableInfo};
pub use convert::{convert, try_convert};
pub use table::{
    combine, BaseMap, DeletionMatcher, LayeredTable, MappingTable, RuleSet, Table, TableBuilder,
    TableError,
};
