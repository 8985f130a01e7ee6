// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lexical analysis of shopper messages.
//!
//! This crate provides:
//! - [`tokenize`] / [`expand`]: lower-cased tokens plus synonym closure
//! - [`is_stock_query`] / [`is_exploratory_question`]: phrase detectors
//! - [`build_search_plan`]: the per-message [`SearchPlan`] consumed by the matcher
//!
//! Everything here is synchronous, allocation-light and free of hidden
//! state: the same message always yields the same plan.

pub mod plan;
pub mod stopwords;
pub mod synonyms;
pub mod tokens;

pub use plan::{
    build_search_plan, extract_anchor, is_exploratory_question, is_stock_query, SearchPlan,
    PRODUCT_NOUNS,
};
pub use stopwords::is_stopword;
pub use synonyms::synonyms_for;
pub use tokens::{expand, tokenize};
