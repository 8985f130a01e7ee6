// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply text and product cards for search results.

use std::fmt::Write as _;

use shopwise_core::types::{FormattedProduct, FormattedVariant, Product, Reply};

/// Stock below this (and above zero) is flagged as "Only N left".
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Quick-reply buttons attached to suggestion lists.
pub const SUGGESTION_BUTTONS: [&str; 2] = ["See more", "Refine search"];

/// Rendered search results.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedResults {
    pub text: String,
    pub products: Vec<FormattedProduct>,
}

impl FormattedResults {
    /// A `product_results` reply when anything matched, else a text reply.
    pub fn into_reply(self) -> Reply {
        if self.products.is_empty() {
            Reply::text(self.text)
        } else {
            Reply::products(self.text, self.products)
        }
    }
}

/// Renders matched products as reply text plus product cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseFormatter {
    low_stock_threshold: i64,
}

impl Default for ResponseFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_LOW_STOCK_THRESHOLD)
    }
}

impl ResponseFormatter {
    pub fn new(low_stock_threshold: i64) -> Self {
        Self {
            low_stock_threshold,
        }
    }

    /// Format search results for `label`.
    ///
    /// `in_stock` selects the availability phrasing ("We currently have ...")
    /// over the listing phrasing ("Found N product(s) ...").
    pub fn format(&self, products: &[Product], label: &str, in_stock: bool) -> FormattedResults {
        let count = products.len();
        let text = match (count, in_stock) {
            (0, true) => format!(
                "We don't have {} in stock right now.",
                pluralize(label, count)
            ),
            (0, false) => format!("No products found matching \"{label}\""),
            (n, true) => format!("We currently have {n} {} in stock.", pluralize(label, n)),
            (n, false) => {
                let mut text = format!("Found {n} product(s) matching \"{label}\":");
                for (i, product) in products.iter().enumerate() {
                    self.write_product_lines(&mut text, i + 1, product);
                }
                text
            }
        };

        FormattedResults {
            text,
            products: products.iter().map(format_product).collect(),
        }
    }

    /// Suggestion list for general questions, with the two quick-reply buttons.
    pub fn suggestions(&self, products: &[Product]) -> Reply {
        let mut text = String::from("Here are some products you might be interested in:");
        for (i, product) in products.iter().enumerate() {
            self.write_product_lines(&mut text, i + 1, product);
        }
        Reply::products(text, products.iter().map(format_product).collect())
            .with_buttons(SUGGESTION_BUTTONS)
    }

    fn write_product_lines(&self, out: &mut String, position: usize, product: &Product) {
        let _ = write!(out, "\n{position}. {}", product.title);
        if let Some(price) = display_price(product) {
            let _ = write!(out, " - ${price:.2}");
        }
        for variant in &product.variants {
            let _ = write!(out, "\n   - {}: ${:.2}", variant.name, variant.price);
            if variant.stock <= 0 {
                out.push_str(" (Out of stock)");
            } else if variant.stock < self.low_stock_threshold {
                let _ = write!(out, " (Only {} left)", variant.stock);
            }
        }
    }
}

/// Append "s" to `label` unless it already ends in "s" or `count` is 1.
///
/// No irregular plurals: "watch" becomes "watchs" and "dress" stays "dress".
pub fn pluralize(label: &str, count: usize) -> String {
    if count == 1 || label.ends_with('s') {
        label.to_string()
    } else {
        format!("{label}s")
    }
}

/// First variant's price if any variant exists, else the product price.
/// Zero, negative and non-finite prices are treated as absent.
fn display_price(product: &Product) -> Option<f64> {
    let price = match product.variants.first() {
        Some(variant) => Some(variant.price),
        None => product.price,
    };
    price.filter(|p| p.is_finite() && *p > 0.0)
}

/// Client-facing projection of a product.
pub fn format_product(product: &Product) -> FormattedProduct {
    let url = match (product.store.domain.as_deref(), product.handle.as_deref()) {
        (Some(domain), Some(handle)) if !domain.is_empty() && !handle.is_empty() => {
            Some(format!("https://{domain}/products/{handle}"))
        }
        _ => None,
    };

    FormattedProduct {
        id: product.id.clone(),
        title: product.title.clone(),
        description: product.description.clone(),
        price: display_price(product),
        image: product.images.first().cloned(),
        variants: product
            .variants
            .iter()
            .map(|v| FormattedVariant {
                id: v.id.clone(),
                name: v.name.clone(),
                price: v.price,
                stock: v.stock,
                sku: v.sku.clone(),
            })
            .collect(),
        url,
    }
}
