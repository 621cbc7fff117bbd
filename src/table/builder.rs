use std::collections::BTreeMap;

use tracing::{debug, debug_span};

use super::{BaseMap, DeletionMatcher, MappingTable, RuleSet, TableError};
use crate::unicode::{capitalize_first, single_upper};

/// A validated, case-complete table produced by [`TableBuilder`].
#[derive(Debug)]
pub struct Table {
    base: BaseMap,
    contextual: Option<RuleSet>,
    word_initial: Option<RuleSet>,
    deletion: Option<DeletionMatcher>,
}

impl Table {
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }
}

impl MappingTable for Table {
    fn base(&self) -> &BaseMap {
        &self.base
    }

    fn contextual(&self) -> Option<&RuleSet> {
        self.contextual.as_ref()
    }

    fn word_initial(&self) -> Option<&RuleSet> {
        self.word_initial.as_ref()
    }

    fn deletion(&self) -> Option<&DeletionMatcher> {
        self.deletion.as_ref()
    }
}

/// Collects author-supplied rules and turns them into a [`Table`].
///
/// Base rules are keyed by single-character strings. For every lower-case
/// key without an explicit upper-case sibling, `build` adds the upper-case
/// key mapped to the replacement with only its first character capitalised.
#[derive(Debug, Default, Clone)]
pub struct TableBuilder {
    base: Vec<(String, String)>,
    contextual: BTreeMap<String, String>,
    word_initial: BTreeMap<String, String>,
    delete: Vec<String>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.base.push((key.into(), value.into()));
        self
    }

    pub fn base_rules<I, K, V>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.base
            .extend(rules.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn contextual(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.contextual.insert(key.into(), value.into());
        self
    }

    pub fn contextual_rules<I, K, V>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.contextual
            .extend(rules.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn word_initial(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.word_initial.insert(key.into(), value.into());
        self
    }

    pub fn word_initial_rules<I, K, V>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.word_initial
            .extend(rules.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn delete(mut self, pattern: impl Into<String>) -> Self {
        self.delete.push(pattern.into());
        self
    }

    pub fn delete_all<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delete.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<Table, TableError> {
        let _span = debug_span!(
            "build_table",
            base = self.base.len(),
            contextual = self.contextual.len(),
            word_initial = self.word_initial.len(),
            delete = self.delete.len()
        )
        .entered();

        let base = build_base_map(self.base)?;
        let table = Table {
            base,
            contextual: RuleSet::new(self.contextual)?,
            word_initial: RuleSet::new(self.word_initial)?,
            deletion: DeletionMatcher::new(self.delete)?,
        };
        debug!(base_with_upper = table.base.len());
        Ok(table)
    }
}

fn single_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Validate keys and synthesise upper-case variants.
///
/// Explicit entries go in first, so an author-supplied upper-case key always
/// wins over a synthesised one regardless of input order.
fn build_base_map(rules: Vec<(String, String)>) -> Result<BaseMap, TableError> {
    let mut base = BaseMap::with_capacity(rules.len() * 2);
    for (key, value) in rules {
        let c = single_char(&key).ok_or_else(|| TableError::InvalidKey(key.clone()))?;
        base.insert(c, value);
    }

    let synthesized: Vec<(char, String)> = base
        .iter()
        .filter_map(|(&c, value)| {
            let upper = single_upper(c)?;
            (!base.contains_key(&upper)).then(|| (upper, capitalize_first(value)))
        })
        .collect();
    base.extend(synthesized);
    Ok(base)
}
