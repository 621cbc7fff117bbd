//! Mapping tables: the rule-bundle abstraction the conversion engine reads.
//!
//! A table exposes four independent rule sets. `Table` is the concrete,
//! builder-produced form; `LayeredTable` merges two tables into one.
//! Both are immutable after construction and safe to share across threads.

mod builder;
pub mod config;
mod layered;
pub(crate) mod trie;

pub use builder::{Table, TableBuilder};
pub use config::{load_table_file, parse_table_toml, TableSource};
pub use layered::{combine, LayeredTable};

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::io;

use trie::PatternTrie;

/// Single character → replacement string.
pub type BaseMap = HashMap<char, String>;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("base rule key must be a single character: {0:?}")]
    InvalidKey(String),
    #[error("rule and deletion patterns must not be empty")]
    EmptyPattern,
    #[error("{0} table is missing")]
    MissingTable(&'static str),
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Read-only contract every table satisfies. The engine depends only on this.
pub trait MappingTable: Send + Sync {
    fn base(&self) -> &BaseMap;
    fn contextual(&self) -> Option<&RuleSet>;
    fn word_initial(&self) -> Option<&RuleSet>;
    fn deletion(&self) -> Option<&DeletionMatcher>;
}

/// Substring → replacement rules with their compiled matcher.
pub struct RuleSet {
    rules: BTreeMap<String, String>,
    trie: PatternTrie<String>,
}

impl RuleSet {
    /// Compile `rules`. An empty map yields `None` so callers can skip the stage.
    pub fn new(rules: BTreeMap<String, String>) -> Result<Option<Self>, TableError> {
        if rules.is_empty() {
            return Ok(None);
        }
        let trie = PatternTrie::build(rules.iter().map(|(k, v)| (k.as_str(), v.clone())))?;
        Ok(Some(RuleSet { rules, trie }))
    }

    /// Union of rule sets, later sets winning on equal keys. Every key comes
    /// from an already compiled set, so no validation is repeated.
    pub(crate) fn merge<'a>(sets: impl IntoIterator<Item = &'a RuleSet>) -> Option<Self> {
        let mut rules = BTreeMap::new();
        for set in sets {
            rules.extend(set.rules.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        if rules.is_empty() {
            return None;
        }
        let trie =
            PatternTrie::from_validated(rules.iter().map(|(k, v)| (k.as_str(), v.clone())));
        Some(RuleSet { rules, trie })
    }

    pub fn rules(&self) -> &BTreeMap<String, String> {
        &self.rules
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.rules.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn matcher(&self) -> &PatternTrie<String> {
        &self.trie
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.rules.iter()).finish()
    }
}

/// Compiled deletion set: recognises any of its substrings.
pub struct DeletionMatcher {
    patterns: BTreeSet<String>,
    trie: PatternTrie<()>,
}

impl DeletionMatcher {
    /// Compile `patterns`. No patterns yields `None`, not an empty matcher.
    pub fn new<I, S>(patterns: I) -> Result<Option<Self>, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: BTreeSet<String> = patterns.into_iter().map(Into::into).collect();
        if patterns.is_empty() {
            return Ok(None);
        }
        let trie = PatternTrie::build(patterns.iter().map(|p| (p.as_str(), ())))?;
        Ok(Some(DeletionMatcher { patterns, trie }))
    }

    pub fn patterns(&self) -> &BTreeSet<String> {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_match(&self, text: &str) -> bool {
        text.char_indices()
            .any(|(i, _)| self.trie.longest_at(text, i).is_some())
    }

    /// Remove every matched occurrence in one left-to-right pass.
    pub fn remove_all(&self, text: &str) -> String {
        self.trie.rewrite(text, |_, _| true, |_, _| {})
    }
}

impl fmt::Debug for DeletionMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.patterns.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_rule_set_empty_is_absent() {
        assert!(RuleSet::new(BTreeMap::new()).unwrap().is_none());
    }

    #[test]
    fn test_rule_set_accessors() {
        let set = RuleSet::new(rules(&[("зг", "zgh"), ("Зг", "Zgh")]))
            .unwrap()
            .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("зг"), Some("zgh"));
        assert_eq!(set.get("ЗГ"), None);
    }

    #[test]
    fn test_rule_set_rejects_empty_key() {
        let err = RuleSet::new(rules(&[("", "x")])).err().unwrap();
        assert!(matches!(err, TableError::EmptyPattern));
    }

    #[test]
    fn test_deletion_empty_is_absent() {
        assert!(DeletionMatcher::new(Vec::<String>::new()).unwrap().is_none());
    }

    #[test]
    fn test_deletion_remove_all() {
        let m = DeletionMatcher::new(["ь", "'", "\u{2019}"]).unwrap().unwrap();
        assert_eq!(m.len(), 3);
        assert_eq!(m.remove_all("м'ясо"), "мясо");
        assert_eq!(m.remove_all("м\u{2019}ясо"), "мясо");
        assert_eq!(m.remove_all("мать"), "мат");
        assert_eq!(m.remove_all("без змін"), "без змін");
    }

    #[test]
    fn test_deletion_multi_char_pattern() {
        let m = DeletionMatcher::new(["--"]).unwrap().unwrap();
        assert_eq!(m.remove_all("a--b-c"), "ab-c");
        assert!(m.is_match("x--"));
        assert!(!m.is_match("x-y"));
    }

    #[test]
    fn test_deletion_duplicates_collapse() {
        let m = DeletionMatcher::new(["ь", "ь"]).unwrap().unwrap();
        assert_eq!(m.patterns().len(), 1);
    }
}
