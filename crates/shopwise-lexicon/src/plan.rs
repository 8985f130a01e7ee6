// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search-plan construction: stock/exploratory phrase detection and
//! anchor-noun extraction.

use std::collections::BTreeSet;

use crate::tokens::{expand, tokenize};

/// Phrases that mark a stock/availability question (substring, case-insensitive).
///
/// "have" is deliberately broad and flags messages such as
/// "I have a question"; kept as-is pending product-owner confirmation.
const STOCK_PHRASES: &[&str] = &["in stock", "available", "stock", "inventory", "have"];

/// Phrases that mark an open-ended browsing question (substring, case-insensitive).
const EXPLORATORY_PHRASES: &[&str] = &[
    "what do you have",
    "what do you sell",
    "what do you offer",
    "what do you carry",
    "what products",
    "what kind of",
    "show me everything",
    "show me what",
    "browse",
    "categories",
    "catalog",
    "catalogue",
    "collection",
];

/// Known product nouns, in priority order for anchor extraction.
pub const PRODUCT_NOUNS: &[&str] = &[
    "necklace", "earring", "bracelet", "ring", "watch", "bag", "shoe", "dress", "shirt",
    "jewelry",
];

/// Derived per-message search plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPlan {
    /// Expanded tokens (tokens plus synonyms).
    pub terms: BTreeSet<String>,
    /// Best-guess product noun, used for display labelling.
    pub anchor: Option<String>,
    /// Whether results must have stock on hand.
    pub in_stock: bool,
}

/// True when the message asks about stock or availability.
pub fn is_stock_query(message: &str) -> bool {
    let lower = message.to_lowercase();
    STOCK_PHRASES.iter().any(|p| lower.contains(p))
}

/// True when the message is an open-ended browsing question.
pub fn is_exploratory_question(message: &str) -> bool {
    let lower = message.to_lowercase();
    EXPLORATORY_PHRASES.iter().any(|p| lower.contains(p))
}

/// First known product noun (in [`PRODUCT_NOUNS`] order) that appears as a
/// substring of any token of the message.
pub fn extract_anchor(message: &str) -> Option<String> {
    let tokens = tokenize(message);
    PRODUCT_NOUNS
        .iter()
        .find(|noun| tokens.iter().any(|t| t.contains(*noun)))
        .map(|noun| (*noun).to_string())
}

/// Build the search plan for a message.
pub fn build_search_plan(message: &str) -> SearchPlan {
    let plan = SearchPlan {
        terms: expand(message),
        anchor: extract_anchor(message),
        in_stock: is_stock_query(message),
    };
    tracing::trace!(
        terms = plan.terms.len(),
        anchor = ?plan.anchor,
        in_stock = plan.in_stock,
        "search plan built"
    );
    plan
}
