use std::sync::Arc;

use tracing::debug_span;

use super::{BaseMap, DeletionMatcher, MappingTable, RuleSet, TableError};

/// Two tables merged into one, the second layered on top of the first.
///
/// - base, contextual and word-initial rules: union, second wins on collision
/// - deletion set: the second's if it has one, otherwise the first's; the two
///   sets are never merged
///
/// The merge happens once, in `new`. The result is itself a [`MappingTable`],
/// so layers nest to any depth.
pub struct LayeredTable {
    first: Arc<dyn MappingTable>,
    second: Arc<dyn MappingTable>,
    base: BaseMap,
    contextual: Option<RuleSet>,
    word_initial: Option<RuleSet>,
}

impl LayeredTable {
    pub fn new(first: Arc<dyn MappingTable>, second: Arc<dyn MappingTable>) -> Self {
        let _span = debug_span!(
            "layer_tables",
            first_base = first.base().len(),
            second_base = second.base().len()
        )
        .entered();

        let mut base = first.base().clone();
        base.extend(second.base().iter().map(|(&k, v)| (k, v.clone())));

        let contextual = RuleSet::merge(first.contextual().into_iter().chain(second.contextual()));
        let word_initial =
            RuleSet::merge(first.word_initial().into_iter().chain(second.word_initial()));

        Self {
            first,
            second,
            base,
            contextual,
            word_initial,
        }
    }

    pub fn first(&self) -> &Arc<dyn MappingTable> {
        &self.first
    }

    pub fn second(&self) -> &Arc<dyn MappingTable> {
        &self.second
    }
}

/// Checked form of [`LayeredTable::new`] for callers holding optional tables.
pub fn combine(
    first: Option<Arc<dyn MappingTable>>,
    second: Option<Arc<dyn MappingTable>>,
) -> Result<LayeredTable, TableError> {
    let first = first.ok_or(TableError::MissingTable("first"))?;
    let second = second.ok_or(TableError::MissingTable("second"))?;
    Ok(LayeredTable::new(first, second))
}

impl MappingTable for LayeredTable {
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
        self.second.deletion().or_else(|| self.first.deletion())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableBuilder;

    fn script() -> Arc<dyn MappingTable> {
        Arc::new(
            TableBuilder::new()
                .base_rules([("т", "t"), ("е", "e"), ("с", "s"), ("г", "h")])
                .contextual("зг", "zgh")
                .word_initial("є", "ye")
                .delete_all(["ь", "'"])
                .build()
                .unwrap(),
        )
    }

    fn overlay() -> Arc<dyn MappingTable> {
        Arc::new(
            TableBuilder::new()
                .base_rules([("«", "\""), ("»", "\""), ("г", "g")])
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_base_second_wins() {
        let layered = LayeredTable::new(script(), overlay());
        assert_eq!(layered.base()[&'г'], "g");
        assert_eq!(layered.base()[&'Г'], "G");
        // Only in first
        assert_eq!(layered.base()[&'т'], "t");
        // Only in second
        assert_eq!(layered.base()[&'«'], "\"");
    }

    #[test]
    fn test_rules_union_with_second_winning() {
        let a: Arc<dyn MappingTable> = Arc::new(
            TableBuilder::new()
                .base("а", "a")
                .contextual_rules([("зг", "zgh"), ("кс", "ks")])
                .word_initial("я", "ya")
                .build()
                .unwrap(),
        );
        let b: Arc<dyn MappingTable> = Arc::new(
            TableBuilder::new()
                .base("а", "a")
                .contextual("зг", "zg")
                .word_initial("ю", "yu")
                .build()
                .unwrap(),
        );
        let layered = LayeredTable::new(a, b);
        let ctx = layered.contextual().unwrap();
        assert_eq!(ctx.get("зг"), Some("zg"));
        assert_eq!(ctx.get("кс"), Some("ks"));
        let wi = layered.word_initial().unwrap();
        assert_eq!(wi.len(), 2);
    }

    #[test]
    fn test_rules_absent_in_both_stay_absent() {
        let a: Arc<dyn MappingTable> = Arc::new(TableBuilder::new().base("а", "a").build().unwrap());
        let b: Arc<dyn MappingTable> = Arc::new(TableBuilder::new().base("б", "b").build().unwrap());
        let layered = LayeredTable::new(a, b);
        assert!(layered.contextual().is_none());
        assert!(layered.word_initial().is_none());
        assert!(layered.deletion().is_none());
    }

    #[test]
    fn test_deletion_falls_back_to_first() {
        let layered = LayeredTable::new(script(), overlay());
        let del = layered.deletion().unwrap();
        assert!(del.patterns().contains("ь"));
    }

    #[test]
    fn test_deletion_second_replaces_first() {
        let second: Arc<dyn MappingTable> = Arc::new(
            TableBuilder::new()
                .base("а", "a")
                .delete("\u{2019}")
                .build()
                .unwrap(),
        );
        let layered = LayeredTable::new(script(), second);
        let del = layered.deletion().unwrap();
        // Not unioned: the first table's "ь" is gone
        assert_eq!(del.len(), 1);
        assert!(!del.patterns().contains("ь"));
    }

    #[test]
    fn test_nested_layers() {
        let top: Arc<dyn MappingTable> =
            Arc::new(TableBuilder::new().base("г", "gh").build().unwrap());
        let inner: Arc<dyn MappingTable> = Arc::new(LayeredTable::new(script(), overlay()));
        let outer = LayeredTable::new(inner, top);
        assert_eq!(outer.base()[&'г'], "gh");
        assert_eq!(outer.base()[&'«'], "\"");
        assert_eq!(outer.base()[&'т'], "t");
        assert!(outer.deletion().is_some());
    }

    #[test]
    fn test_combine_missing_first() {
        let err = combine(None, Some(overlay())).err().unwrap();
        assert!(matches!(err, TableError::MissingTable("first")));
    }

    #[test]
    fn test_combine_missing_second() {
        let err = combine(Some(script()), None).err().unwrap();
        assert!(matches!(err, TableError::MissingTable("second")));
    }

    #[test]
    fn test_combine_ok() {
        let layered = combine(Some(script()), Some(overlay())).unwrap();
        assert_eq!(layered.base()[&'»'], "\"");
    }

    #[test]
    fn test_sources_untouched() {
        let a = script();
        let b = overlay();
        let layered = LayeredTable::new(Arc::clone(&a), Arc::clone(&b));
        assert!(Arc::ptr_eq(layered.first(), &a));
        assert!(Arc::ptr_eq(layered.second(), &b));
        assert_eq!(a.base()[&'г'], "h");
        assert!(b.deletion().is_none());
    }

    #[test]
    fn test_merged_rules_are_matchable() {
        let b: Arc<dyn MappingTable> = Arc::new(
            TableBuilder::new()
                .base("а", "a")
                .contextual("зга", "zgha")
                .build()
                .unwrap(),
        );
        let layered = LayeredTable::new(script(), b);
        let matcher = layered.contextual().unwrap().matcher();
        assert_eq!(matcher.len(), 2);
        let hit = |text: &str| matcher.longest_at(text, 0).map(|(end, v)| (end, v.as_str()));
        assert_eq!(hit("зграя"), Some((4, "zgh")));
        assert_eq!(hit("зга"), Some((6, "zgha")));
    }
}
