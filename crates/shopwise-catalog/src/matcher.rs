// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tolerant product matching.
//!
//! Every query is an OR of case-insensitive substring predicates, scoped to
//! one workspace and to `ACTIVE` products. The matcher never ranks; products
//! come back in store order, at most `limit` of them.

use std::sync::Arc;

use shopwise_core::ShopwiseError;
use shopwise_core::traits::ProductStore;
use shopwise_core::types::{FieldMatch, Product, ProductField, ProductQuery};
use shopwise_lexicon::is_stopword;
use tracing::debug;

/// Default maximum number of products per search.
pub const DEFAULT_RESULT_LIMIT: usize = 3;

/// Per-search switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Only return products with at least one variant in stock.
    pub require_in_stock: bool,
    /// Expanded terms matched against title and description. Stopwords are
    /// skipped; an empty list disables expansion.
    pub expanded_terms: Vec<String>,
}

/// Matches plus which pass produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    pub products: Vec<Product>,
    /// True when the primary pass found nothing and the keyword fallback ran.
    pub used_fallback: bool,
}

/// Builds catalog queries and runs them against a [`ProductStore`].
pub struct ProductMatcher {
    store: Arc<dyn ProductStore>,
    limit: usize,
}

impl ProductMatcher {
    pub fn new(store: Arc<dyn ProductStore>, limit: usize) -> Self {
        Self { store, limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Search for `term` in one workspace.
    ///
    /// The primary pass matches `term` against title, description, category
    /// and brand, plus each expanded term against title and description.
    /// When that finds nothing, a fallback matches the raw `term` against
    /// title and description only, without the stock filter.
    ///
    /// An empty term with no expanded terms matches nothing and issues no
    /// query.
    pub async fn search(
        &self,
        term: &str,
        workspace_id: &str,
        options: &MatchOptions,
    ) -> Result<MatchOutcome, ShopwiseError> {
        let term = term.trim();
        let mut any_of = Vec::new();
        if !term.is_empty() {
            any_of.extend(
                [
                    ProductField::Title,
                    ProductField::Description,
                    ProductField::Category,
                    ProductField::Brand,
                ]
                .into_iter()
                .map(|field| FieldMatch::new(field, term)),
            );
        }
        for expanded in options
            .expanded_terms
            .iter()
            .filter(|t| !t.is_empty() && !is_stopword(t))
        {
            any_of.extend(title_or_description(expanded));
        }

        if any_of.is_empty() {
            return Ok(MatchOutcome::default());
        }

        let primary = ProductQuery {
            workspace_id: workspace_id.to_string(),
            any_of,
            require_in_stock: options.require_in_stock,
            limit: self.limit,
        };
        let products = self.store.find_products(&primary).await?;
        debug!(
            predicates = primary.any_of.len(),
            in_stock = options.require_in_stock,
            found = products.len(),
            "primary product search"
        );
        if !products.is_empty() || term.is_empty() {
            return Ok(MatchOutcome {
                products,
                used_fallback: false,
            });
        }

        let fallback = ProductQuery {
            workspace_id: workspace_id.to_string(),
            any_of: title_or_description(term).to_vec(),
            require_in_stock: false,
            limit: self.limit,
        };
        let products = self.store.find_products(&fallback).await?;
        debug!(found = products.len(), "fallback keyword search");
        Ok(MatchOutcome {
            products,
            used_fallback: true,
        })
    }

    /// Title/description search used for general questions: the raw message
    /// plus each keyword, no synonym expansion and no stock filter.
    pub async fn keyword_search(
        &self,
        message: &str,
        keywords: &[String],
        workspace_id: &str,
    ) -> Result<Vec<Product>, ShopwiseError> {
        let message = message.trim();
        let any_of: Vec<FieldMatch> = std::iter::once(message)
            .chain(keywords.iter().map(String::as_str))
            .filter(|needle| !needle.is_empty())
            .flat_map(title_or_description)
            .collect();
        if any_of.is_empty() {
            return Ok(Vec::new());
        }

        let query = ProductQuery {
            workspace_id: workspace_id.to_string(),
            any_of,
            require_in_stock: false,
            limit: self.limit,
        };
        let products = self.store.find_products(&query).await?;
        debug!(found = products.len(), "keyword search");
        Ok(products)
    }
}

fn title_or_description(needle: &str) -> [FieldMatch; 2] {
    [
        FieldMatch::new(ProductField::Title, needle),
        FieldMatch::new(ProductField::Description, needle),
    ]
}
