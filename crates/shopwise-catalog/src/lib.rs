// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog search and result presentation.
//!
//! [`ProductMatcher`] turns a search term and search plan into workspace-scoped
//! [`ProductQuery`](shopwise_core::types::ProductQuery)s, with a broader
//! keyword fallback. [`ResponseFormatter`] renders the matches as reply text
//! plus client-facing product cards.

pub mod formatter;
pub mod matcher;

pub use formatter::{
    DEFAULT_LOW_STOCK_THRESHOLD, FormattedResults, ResponseFormatter, SUGGESTION_BUTTONS,
    format_product, pluralize,
};
pub use matcher::{MatchOptions, MatchOutcome, ProductMatcher, DEFAULT_RESULT_LIMIT};
