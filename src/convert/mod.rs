//! Conversion engine: applies one [`MappingTable`] to a source string.
//!
//! Five stages run in a fixed order over the working text:
//!
//! 1. deletion of every deletion-set match
//! 2. contextual rules, one leftmost-longest scan
//! 3. word-initial rules, only where the match starts the text or follows a
//!    character that is neither a letter nor a combining mark
//! 4. base map, character by character; unmapped characters pass through
//! 5. case propagation from the original source
//!
//! The engine keeps no state between calls.

#[cfg(test)]
mod tests;

use tracing::{debug, debug_span};

use crate::table::{MappingTable, RuleSet, TableError};
use crate::unicode::{capitalize_first, is_all_upper, is_word_char};

/// Romanize `source` with `table`.
///
/// With `preserve_case`, an all-upper-case source (over its letters) yields
/// an all-upper-case result, and mixed case is left to the table's own
/// upper/lower mappings. Without it, the source is lower-cased first and the
/// result gets a single leading capital.
pub fn convert(source: &str, table: &dyn MappingTable, preserve_case: bool) -> String {
    if source.is_empty() {
        return String::new();
    }
    let _span = debug_span!("convert", len = source.len(), preserve_case).entered();

    let source_all_upper = is_all_upper(source);
    let mut text = if preserve_case {
        source.to_string()
    } else {
        source.to_lowercase()
    };

    if let Some(deletion) = table.deletion() {
        text = deletion.remove_all(&text);
        debug!(stage = "deletion", len = text.len());
    }
    if let Some(rules) = table.contextual() {
        text = apply_contextual(&text, rules);
        debug!(stage = "contextual", len = text.len());
    }
    if let Some(rules) = table.word_initial() {
        text = apply_word_initial(&text, rules);
        debug!(stage = "word_initial", len = text.len());
    }
    let mut result = apply_base(&text, table);

    if preserve_case {
        if source_all_upper {
            result = result.to_uppercase();
        }
    } else if result.chars().next().is_some_and(char::is_lowercase) {
        result = capitalize_first(&result);
    }

    debug!(source_all_upper, out_len = result.len());
    result
}

/// Checked form of [`convert`] for callers holding optional values.
///
/// An absent table is an error, reported before the source is examined.
/// An absent source is treated like an empty one.
pub fn try_convert(
    source: Option<&str>,
    table: Option<&dyn MappingTable>,
    preserve_case: bool,
) -> Result<String, TableError> {
    let table = table.ok_or(TableError::MissingTable("table"))?;
    Ok(convert(source.unwrap_or_default(), table, preserve_case))
}

fn apply_contextual(text: &str, rules: &RuleSet) -> String {
    rules
        .matcher()
        .rewrite(text, |_, _| true, |out, value| out.push_str(value))
}

fn apply_word_initial(text: &str, rules: &RuleSet) -> String {
    rules.matcher().rewrite(
        text,
        |text, pos| at_word_start(text, pos),
        |out, value| out.push_str(value),
    )
}

/// Start of text, or immediately after a character that is neither a letter
/// nor a combining mark.
fn at_word_start(text: &str, pos: usize) -> bool {
    text[..pos].chars().next_back().map_or(true, |c| !is_word_char(c))
}

fn apply_base(text: &str, table: &dyn MappingTable) -> String {
    let base = table.base();
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        match base.get(&c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}
