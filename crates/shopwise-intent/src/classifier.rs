// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification.
//!
//! The primary path asks the text-generation provider for exactly one
//! category name. When the provider fails or times out, a substring
//! heuristic takes over, so classification always yields an [`Intent`].

use std::str::FromStr;
use std::sync::Arc;

use shopwise_core::traits::TextGenerator;
use shopwise_core::types::Intent;
use tracing::{debug, warn};

use crate::PromptSettings;

const CLASSIFICATION_PROMPT: &str = r#"Classify the following customer message into exactly one of these categories:
product_search, order_status, recommendation, general_question, other

Answer with the category name only, no punctuation or explanation.

Message: "{message}"

Category:"#;

/// Substrings that mark a product search (checked first).
const SEARCH_HINTS: &[&str] = &["buy", "want", "have", "search"];

/// Substrings that mark an order status question.
const ORDER_HINTS: &[&str] = &["order", "status"];

/// Substrings that mark a recommendation request.
const RECOMMEND_HINTS: &[&str] = &["recommend", "suggest"];

/// Provider-backed intent classifier with a rule-based fallback.
pub struct IntentClassifier {
    provider: Arc<dyn TextGenerator>,
    settings: PromptSettings,
}

impl IntentClassifier {
    pub fn new(provider: Arc<dyn TextGenerator>, settings: PromptSettings) -> Self {
        Self { provider, settings }
    }

    /// Classify a message.
    ///
    /// Provider errors are logged and answered by [`classify_heuristic`];
    /// unknown provider answers map to [`Intent::Other`].
    pub async fn classify(&self, message: &str) -> Intent {
        let prompt = CLASSIFICATION_PROMPT.replace("{message}", message);
        match self.provider.generate_text(self.settings.request(prompt)).await {
            Ok(response) => {
                let intent = parse_intent(&response.text);
                debug!(answer = %response.text.trim(), %intent, "provider classified message");
                intent
            }
            Err(e) => {
                let intent = classify_heuristic(message);
                warn!(error = %e, %intent, "intent provider unavailable, using heuristic");
                intent
            }
        }
    }
}

/// Map a provider answer onto the intent taxonomy.
///
/// Surrounding whitespace, quotes and a trailing period are ignored, and the
/// comparison is case-insensitive. Anything else is [`Intent::Other`].
pub fn parse_intent(answer: &str) -> Intent {
    let cleaned = answer
        .trim()
        .trim_end_matches('.')
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim()
        .to_lowercase();
    Intent::from_str(&cleaned).unwrap_or(Intent::Other)
}

/// Rule-based classification used when the provider is unavailable.
pub fn classify_heuristic(message: &str) -> Intent {
    let lower = message.to_lowercase();
    let contains_any = |hints: &[&str]| hints.iter().any(|h| lower.contains(h));

    if contains_any(SEARCH_HINTS) {
        Intent::ProductSearch
    } else if contains_any(ORDER_HINTS) {
        Intent::OrderStatus
    } else if contains_any(RECOMMEND_HINTS) {
        Intent::Recommendation
    } else {
        Intent::GeneralQuestion
    }
}
