// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stopwords dropped before shopper text is used as search keywords.
//!
//! Only words of three or more characters matter here; shorter tokens
//! never survive [`crate::tokenize`].

const STOPWORDS: &[&str] = &[
    // Articles, pronouns, determiners
    "the", "this", "that", "these", "those", "you", "your", "yours", "our", "ours",
    "they", "them", "their", "she", "her", "his", "him", "its", "mine", "myself",
    "yourself", "who", "whom", "whose", "which", "what", "whatever", "any", "some",
    "all", "each", "every", "both", "few", "more", "most", "other", "such", "own",
    // Auxiliaries and common verbs
    "are", "was", "were", "been", "being", "has", "have", "had", "having", "does",
    "did", "doing", "done", "can", "could", "should", "would", "will", "shall",
    "may", "might", "must", "get", "got", "gets", "getting", "let", "make", "see",
    "show", "tell", "give", "find", "look", "looking", "want", "wanted", "wants",
    "need", "needs", "like", "buy", "buying", "purchase", "order", "search",
    "searching", "check", "know", "help",
    // Prepositions and conjunctions
    "and", "but", "for", "nor", "yet", "with", "without", "from", "into", "onto",
    "about", "above", "below", "over", "under", "again", "then", "once", "than",
    "too", "very", "just", "also", "only", "out", "off", "between", "through",
    "during", "before", "after", "because", "while", "until", "where", "when",
    "why", "how", "there", "here", "not", "now",
    // Chat filler
    "please", "thanks", "thank", "hey", "hello", "hii", "okay", "yes", "yeah",
    "sure", "maybe", "something", "anything", "thing", "things", "stuff", "kind",
    "sort", "type", "one", "ones", "lot", "lots", "much", "many",
    // Availability phrasing
    "stock", "available", "availability", "inventory", "sell", "selling", "sold",
    "carry", "offer", "offers", "store", "shop",
];

/// True when `token` (already lower-cased) is a stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_words_are_stopwords() {
        for w in ["the", "have", "want", "please", "stock"] {
            assert!(is_stopword(w), "{w} should be a stopword");
        }
    }

    #[test]
    fn greetings_are_stopwords() {
        assert!(is_stopword("hello"));
        assert!(is_stopword("thanks"));
    }

    #[test]
    fn product_words_are_not_stopwords() {
        for w in ["necklace", "blue", "silver", "dress"] {
            assert!(!is_stopword(w), "{w} should not be a stopword");
        }
    }
}
