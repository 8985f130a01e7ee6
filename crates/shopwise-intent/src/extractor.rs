// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Product attribute extraction.
//!
//! [`AttributeExtractor`] asks the provider for a `{productName, attributes}`
//! JSON object. Two local utilities back it up: [`guess_product_name`]
//! (lead-in phrase matching) and [`keyword_attributes`] (stopword-filtered
//! tokens).

use std::sync::Arc;

use shopwise_core::traits::TextGenerator;
use shopwise_core::types::ProductDetails;
use shopwise_lexicon::{is_stopword, tokenize};
use tracing::{debug, warn};

use crate::PromptSettings;

const EXTRACTION_PROMPT: &str = r#"Extract the product the customer is looking for from the message below.
Return a JSON object with exactly these keys:
- "productName": the core product name (string, empty if none)
- "attributes": descriptive attributes such as color, size or material (array of strings)

Message: "{message}"

Output JSON only, no explanation:"#;

/// Phrases that introduce a product name. The rightmost occurrence wins;
/// on ties the longest phrase wins.
const LEAD_IN_PHRASES: &[&str] = &[
    "want to buy ",
    "would like to buy ",
    "looking for ",
    "searching for ",
    "search for ",
    "interested in ",
    "show me ",
    "i need ",
    "i want ",
    "buy ",
    "get ",
    "find ",
];

/// Leading words stripped from a guessed product name.
const LEADING_ARTICLES: &[&str] = &["a", "an", "the", "to", "for", "some"];

/// Messages up to this many words are taken whole when no phrase matches.
const SHORT_MESSAGE_WORDS: usize = 8;

/// Provider-backed product-details extractor.
pub struct AttributeExtractor {
    provider: Arc<dyn TextGenerator>,
    settings: PromptSettings,
}

impl AttributeExtractor {
    pub fn new(provider: Arc<dyn TextGenerator>, settings: PromptSettings) -> Self {
        Self { provider, settings }
    }

    /// Extract product details from a message.
    ///
    /// Returns empty details when the provider fails or answers with
    /// something that is not the expected JSON object.
    pub async fn extract(&self, message: &str) -> ProductDetails {
        let prompt = EXTRACTION_PROMPT.replace("{message}", message);
        match self.provider.generate_text(self.settings.request(prompt)).await {
            Ok(response) => parse_extraction_response(&response.text),
            Err(e) => {
                warn!(error = %e, "attribute extraction provider unavailable");
                ProductDetails::default()
            }
        }
    }
}

/// Parse the provider's extraction answer.
///
/// Accepts a bare JSON object, one wrapped in a markdown code block, or one
/// surrounded by prose. Anything else yields empty details.
pub fn parse_extraction_response(response: &str) -> ProductDetails {
    let trimmed = response.trim();
    let start = trimmed.find('{').unwrap_or(0);
    let end = trimmed.rfind('}').map(|i| i + 1).unwrap_or(trimmed.len());
    let json_str = if start < end { &trimmed[start..end] } else { trimmed };

    match serde_json::from_str::<ProductDetails>(json_str) {
        Ok(mut details) => {
            details.product_name = details.product_name.trim().to_string();
            details.attributes = details
                .attributes
                .into_iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect();
            details
        }
        Err(e) => {
            warn!("Failed to parse extraction response: {e}");
            debug!("Raw response: {response}");
            ProductDetails::default()
        }
    }
}

/// Guess a product name from lead-in phrases such as "looking for ".
///
/// Falls back to the whole message when nothing matches and the message has
/// at most eight words. Returns `None` when no usable candidate remains.
pub fn guess_product_name(message: &str) -> Option<String> {
    let trimmed = message.trim();
    let lower = trimmed.to_lowercase();

    let best = LEAD_IN_PHRASES
        .iter()
        .filter_map(|phrase| lower.rfind(phrase).map(|pos| (pos, phrase.len())))
        .max_by_key(|&(pos, len)| (pos + len, len));

    let candidate = match best {
        // Offsets come from `lower`, not `trimmed`.
        Some((pos, len)) => lower[pos + len..].to_string(),
        None if trimmed.split_whitespace().count() <= SHORT_MESSAGE_WORDS => lower.clone(),
        None => return None,
    };

    let cleaned = strip_leading_articles(&candidate)
        .trim_end_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
        .to_string();
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

fn strip_leading_articles(text: &str) -> &str {
    let mut rest = text.trim_start();
    loop {
        let Some((first, tail)) = rest.split_once(char::is_whitespace) else {
            return if LEADING_ARTICLES.contains(&rest) { "" } else { rest };
        };
        if LEADING_ARTICLES.contains(&first) {
            rest = tail.trim_start();
        } else {
            return rest;
        }
    }
}

/// Stopword-filtered tokens of a message, in order, without duplicates.
pub fn keyword_attributes(message: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for token in tokenize(message) {
        if !is_stopword(&token) && !keywords.contains(&token) {
            keywords.push(token);
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopwise_test_utils::MockProvider;

    #[test]
    fn parse_valid_object() {
        let details = parse_extraction_response(
            r#"{"productName": "Blue Necklace", "attributes": ["blue", "silver"]}"#,
        );
        assert_eq!(details.product_name, "Blue Necklace");
        assert_eq!(details.attributes, vec!["blue", "silver"]);
    }

    #[test]
    fn parse_markdown_code_block() {
        let response = "```json\n{\"productName\": \"ring\", \"attributes\": []}\n```";
        assert_eq!(parse_extraction_response(response).product_name, "ring");
    }

    #[test]
    fn parse_with_surrounding_text() {
        let response = "Sure! Here it is:\n{\"productName\":\"tote bag\",\"attributes\":[\" \",\"red\"]}\nHope that helps.";
        let details = parse_extraction_response(response);
        assert_eq!(details.product_name, "tote bag");
        assert_eq!(details.attributes, vec!["red"]);
    }

    #[test]
    fn parse_missing_keys_default_to_empty() {
        let details = parse_extraction_response(r#"{"attributes": ["large"]}"#);
        assert_eq!(details.product_name, "");
        assert_eq!(details.attributes, vec!["large"]);
    }

    #[test]
    fn parse_malformed_returns_empty() {
        assert!(parse_extraction_response("not json").is_empty());
        assert!(parse_extraction_response("}{").is_empty());
        assert!(parse_extraction_response(r#"{"productName": 42}"#).is_empty());
    }

    #[test]
    fn guess_takes_text_after_lead_in() {
        assert_eq!(
            guess_product_name("I want to buy a blue necklace").as_deref(),
            Some("blue necklace")
        );
        assert_eq!(
            guess_product_name("Hi! I'm looking for the Silver Rings.").as_deref(),
            Some("silver rings")
        );
    }

    #[test]
    fn guess_prefers_rightmost_then_longest() {
        // "buy " ends at the same place as "want to buy "; the longer one wins.
        assert_eq!(guess_product_name("want to buy shoes").as_deref(), Some("shoes"));
        // The later "get " beats the earlier "looking for ".
        assert_eq!(
            guess_product_name("looking for gifts, can I get a watch").as_deref(),
            Some("watch")
        );
    }

    #[test]
    fn guess_short_message_used_whole() {
        assert_eq!(guess_product_name("red dress").as_deref(), Some("red dress"));
        assert_eq!(guess_product_name("the red dress?").as_deref(), Some("red dress"));
    }

    #[test]
    fn guess_long_message_without_phrase_is_none() {
        let message = "it would be lovely to hear more about your shop and its history";
        assert_eq!(guess_product_name(message), None);
    }

    #[test]
    fn guess_empty_candidate_is_none() {
        assert_eq!(guess_product_name("buy a"), None);
        assert_eq!(guess_product_name("   "), None);
    }

    #[test]
    fn keywords_drop_stopwords_and_duplicates() {
        assert_eq!(
            keyword_attributes("Do you have a blue necklace, blue please?"),
            vec!["blue", "necklace"]
        );
        assert!(keyword_attributes("hello there").is_empty());
    }

    #[tokio::test]
    async fn extract_parses_provider_answer() {
        let provider = Arc::new(MockProvider::with_responses([
            r#"{"productName":"necklace","attributes":["blue"]}"#,
        ]));
        let extractor = AttributeExtractor::new(provider.clone(), PromptSettings::extraction());
        let details = extractor.extract("I want to buy a blue necklace").await;
        assert_eq!(details.product_name, "necklace");
        assert_eq!(details.attributes, vec!["blue"]);
        assert_eq!(provider.requests().await[0].max_tokens, 150);
    }

    #[tokio::test]
    async fn extract_returns_empty_on_provider_error() {
        let extractor =
            AttributeExtractor::new(Arc::new(MockProvider::failing()), PromptSettings::extraction());
        assert!(extractor.extract("blue necklace").await.is_empty());
    }
}
