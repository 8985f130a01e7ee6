// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static product-category synonym table.

/// Token -> synonyms. Keys and values are lower-case and at least three
/// characters long so expanded terms survive re-tokenization.
const SYNONYMS: &[(&str, &[&str])] = &[
    ("jewelry", &["jewellery", "accessories"]),
    ("jewellery", &["jewelry", "accessories"]),
    ("accessories", &["jewelry", "jewellery"]),
    ("necklace", &["pendant", "chain"]),
    ("necklaces", &["necklace", "pendant", "chain"]),
    ("pendant", &["necklace"]),
    ("earring", &["earrings", "studs"]),
    ("earrings", &["earring", "studs"]),
    ("bracelet", &["bangle", "cuff"]),
    ("bracelets", &["bracelet", "bangle"]),
    ("ring", &["band"]),
    ("rings", &["ring", "band"]),
    ("watch", &["timepiece"]),
    ("watches", &["watch", "timepiece"]),
    ("bag", &["handbag", "purse", "tote"]),
    ("bags", &["bag", "handbag", "purse"]),
    ("handbag", &["bag", "purse"]),
    ("purse", &["bag", "handbag"]),
    ("shoe", &["shoes", "sneakers", "footwear"]),
    ("shoes", &["shoe", "sneakers", "footwear"]),
    ("sneakers", &["shoes", "trainers"]),
    ("dress", &["gown", "frock"]),
    ("dresses", &["dress", "gown"]),
    ("shirt", &["tee", "top", "blouse"]),
    ("shirts", &["shirt", "tee", "top"]),
    ("tshirt", &["tee", "shirt"]),
    ("tee", &["shirt", "tshirt"]),
    ("pants", &["trousers", "jeans"]),
    ("trousers", &["pants"]),
];

/// Synonyms for a lower-cased token; empty for unknown tokens.
pub fn synonyms_for(token: &str) -> &'static [&'static str] {
    SYNONYMS
        .iter()
        .find(|(key, _)| *key == token)
        .map(|(_, synonyms)| *synonyms)
        .unwrap_or(&[])
}
