//! Character classification and casing helpers shared by the builder and
//! the conversion engine.
//!
//! Classification follows Unicode general categories only; there is no
//! locale-specific casing.

use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};

/// General category L*. Letter numbers such as 'Ⅻ' (Nl) are not letters.
pub fn is_letter(c: char) -> bool {
    c.general_category_group() == GeneralCategoryGroup::Letter
}

/// Letters and combining marks (L*, M*): the characters a word is made of.
///
/// A stress mark after a vowel ("а\u{301}") keeps the word going.
pub fn is_word_char(c: char) -> bool {
    matches!(
        c.general_category_group(),
        GeneralCategoryGroup::Letter | GeneralCategoryGroup::Mark
    )
}

/// True when `text` contains at least one letter and every letter is
/// upper-case (Lu). Non-letters (digits, punctuation, marks) are ignored.
pub fn is_all_upper(text: &str) -> bool {
    let mut has_letters = false;
    for c in text.chars().filter(|&c| is_letter(c)) {
        has_letters = true;
        if c.general_category() != GeneralCategory::UppercaseLetter {
            return false;
        }
    }
    has_letters
}

/// Upper-case only the first character, leaving the remainder unchanged.
///
/// "shch" becomes "Shch", not "SHCH".
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(s.len() + 2);
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Single-code-point upper-case form of `c`, if `c` is lower-case and has one.
///
/// Characters whose upper-case form expands ('ß' → "SS") yield `None`,
/// since a base-map key must stay a single character.
pub fn single_upper(c: char) -> Option<char> {
    if !c.is_lowercase() {
        return None;
    }
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if u != c => Some(u),
        _ => None,
    }
}
