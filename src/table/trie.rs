use std::collections::HashMap;

use super::TableError;

struct Node<V> {
    children: HashMap<char, Node<V>>,
    value: Option<V>,
}

impl<V> Node<V> {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            value: None,
        }
    }
}

/// Character-keyed prefix trie used for contextual rules, word-initial rules
/// and deletion sets.
///
/// Lookups are anchored: `longest_at` only considers keys that start exactly
/// at the given offset, which lets the caller drive a leftmost,
/// non-overlapping scan.
pub(crate) struct PatternTrie<V> {
    root: Node<V>,
    len: usize,
}

impl<V> PatternTrie<V> {
    pub(crate) fn build<K, I>(entries: I) -> Result<Self, TableError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut trie = PatternTrie {
            root: Node::new(),
            len: 0,
        };
        for (key, value) in entries {
            let key = key.as_ref();
            if key.is_empty() {
                return Err(TableError::EmptyPattern);
            }
            trie.insert(key, value);
        }
        Ok(trie)
    }

    /// Build from keys that already passed through [`PatternTrie::build`].
    pub(crate) fn from_validated<K, I>(entries: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut trie = PatternTrie {
            root: Node::new(),
            len: 0,
        };
        for (key, value) in entries {
            debug_assert!(!key.as_ref().is_empty());
            trie.insert(key.as_ref(), value);
        }
        trie
    }

    fn insert(&mut self, key: &str, value: V) {
        let mut node = &mut self.root;
        for c in key.chars() {
            node = node.children.entry(c).or_insert_with(Node::new);
        }
        if node.value.replace(value).is_none() {
            self.len += 1;
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Longest key starting at byte offset `start` of `text`.
    ///
    /// Returns the byte offset just past the match and the stored value.
    pub(crate) fn longest_at(&self, text: &str, start: usize) -> Option<(usize, &V)> {
        let mut node = &self.root;
        let mut best = None;
        for (i, c) in text[start..].char_indices() {
            match node.children.get(&c) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(v) = &node.value {
                best = Some((start + i + c.len_utf8(), v));
            }
        }
        best
    }

    /// Single left-to-right pass replacing every accepted match.
    ///
    /// At each position the longest key wins; when `accept` rejects a match
    /// (given the text and the match start), the current character is copied
    /// through and scanning resumes at the next one. Matched text is consumed,
    /// so matches never overlap.
    pub(crate) fn rewrite<A, E>(&self, text: &str, mut accept: A, mut emit: E) -> String
    where
        A: FnMut(&str, usize) -> bool,
        E: FnMut(&mut String, &V),
    {
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        while pos < text.len() {
            if let Some((end, value)) = self.longest_at(text, pos) {
                if accept(text, pos) {
                    emit(&mut out, value);
                    pos = end;
                    continue;
                }
            }
            // pos always sits on a char boundary
            let Some(c) = text[pos..].chars().next() else {
                break;
            };
            out.push(c);
            pos += c.len_utf8();
        }
        out
    }
}
