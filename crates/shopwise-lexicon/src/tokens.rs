// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tokenization and synonym expansion.

use std::collections::BTreeSet;

use crate::synonyms::synonyms_for;

/// Tokens of this many characters or fewer are discarded.
const MIN_TOKEN_CHARS: usize = 3;

/// Lower-case `text`, split on runs of non-alphanumeric characters, and drop
/// tokens of two characters or fewer. Order of first appearance is kept;
/// duplicates are not removed.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Tokenize `text` and add every synonym of every token.
pub fn expand(text: &str) -> BTreeSet<String> {
    let mut terms = BTreeSet::new();
    for token in tokenize(text) {
        for synonym in synonyms_for(&token) {
            terms.insert((*synonym).to_string());
        }
        terms.insert(token);
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_splits_on_punctuation() {
        assert_eq!(
            tokenize("Blue NECKLACE, size-large!"),
            vec!["blue", "necklace", "size", "large"]
        );
    }

    #[test]
    fn tokenize_drops_short_tokens() {
        assert_eq!(tokenize("I am a fan of it"), vec!["fan"]);
        assert!(tokenize("a b c 12").is_empty());
    }

    #[test]
    fn tokenize_keeps_digits() {
        assert_eq!(tokenize("size 10 or 100"), vec!["size", "100"]);
    }

    #[test]
    fn expand_adds_synonyms_alongside_original() {
        let terms = expand("cheap jewelry");
        assert!(terms.contains("cheap"));
        assert!(terms.contains("jewelry"));
        assert!(terms.contains("jewellery"));
        assert!(terms.contains("accessories"));
    }

    #[test]
    fn expand_passes_unknown_tokens_through() {
        let terms = expand("zebra pattern");
        assert_eq!(
            terms.into_iter().collect::<Vec<_>>(),
            vec!["pattern", "zebra"]
        );
    }

    #[test]
    fn expand_of_empty_text_is_empty() {
        assert!(expand("").is_empty());
        assert!(expand("?!").is_empty());
    }
}
