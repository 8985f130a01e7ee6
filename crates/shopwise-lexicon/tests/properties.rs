// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for the lexical pipeline.

use proptest::prelude::*;
use shopwise_lexicon::{build_search_plan, expand, is_stock_query, tokenize};

proptest! {
    #[test]
    fn expand_is_pure(message in ".{0,80}") {
        prop_assert_eq!(expand(&message), expand(&message));
    }

    #[test]
    fn retokenizing_tokens_is_stable(message in "[a-zA-Z0-9 ,.!?-]{0,80}") {
        let once = tokenize(&message);
        let twice = tokenize(&once.join(" "));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn expanding_expanded_text_keeps_every_term(message in "[a-zA-Z ]{0,60}") {
        let first = expand(&message);
        let joined: Vec<&str> = first.iter().map(String::as_str).collect();
        let second = expand(&joined.join(" "));
        prop_assert!(first.is_subset(&second));
    }

    #[test]
    fn in_stock_substring_always_detected(
        prefix in "[a-zA-Z ]{0,20}",
        suffix in "[a-zA-Z ?]{0,20}",
        upper in any::<bool>(),
    ) {
        let phrase = if upper { "IN STOCK" } else { "in stock" };
        let message = format!("{prefix}{phrase}{suffix}");
        prop_assert!(is_stock_query(&message));
        prop_assert!(build_search_plan(&message).in_stock);
    }

    #[test]
    fn tokens_are_lowercase_and_long_enough(message in "[a-zA-Z0-9 ,.!?]{0,80}") {
        for token in tokenize(&message) {
            prop_assert!(token.chars().count() >= 3);
            prop_assert_eq!(token.to_lowercase(), token.clone());
        }
    }
}
