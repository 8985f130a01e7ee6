// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-turn conversation routing.
//!
//! Each turn moves through `Received -> Classified -> Handled -> Replied`.
//! There is no failure state: every branch ends in `Replied` with either a
//! content reply or a generic error reply.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use shopwise_catalog::{MatchOptions, ProductMatcher, ResponseFormatter};
use shopwise_config::ShopwiseConfig;
use shopwise_core::traits::{ProductStore, TextGenerator};
use shopwise_core::types::{ChatResponse, ConversationContext, Intent, LastIntent, Reply};
use shopwise_intent::{
    AttributeExtractor, IntentClassifier, PromptSettings, guess_product_name, keyword_attributes,
};
use shopwise_lexicon::{build_search_plan, is_exploratory_question};
use tracing::{Instrument, debug, error, info_span, warn};

use crate::replies;

/// States of a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Received,
    Classified,
    Handled,
    Replied,
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnState::Received => write!(f, "received"),
            TurnState::Classified => write!(f, "classified"),
            TurnState::Handled => write!(f, "handled"),
            TurnState::Replied => write!(f, "replied"),
        }
    }
}

/// Tunables for the router's components.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterSettings {
    pub classification: PromptSettings,
    pub extraction: PromptSettings,
    pub max_results: usize,
    pub low_stock_threshold: i64,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            classification: PromptSettings::classification(),
            extraction: PromptSettings::extraction(),
            max_results: shopwise_catalog::DEFAULT_RESULT_LIMIT,
            low_stock_threshold: shopwise_catalog::DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl RouterSettings {
    /// Settings from the `[chat]` and `[provider]` config sections.
    pub fn from_config(config: &ShopwiseConfig) -> Self {
        let chat = &config.chat;
        let prompt = |max_tokens| PromptSettings {
            model: Some(config.provider.model.clone()),
            max_tokens,
            temperature: chat.temperature,
        };
        Self {
            classification: prompt(chat.classification_max_tokens),
            extraction: prompt(chat.extraction_max_tokens),
            max_results: chat.max_results,
            low_stock_threshold: chat.low_stock_threshold,
        }
    }
}

/// Ties classification, extraction, matching and formatting together.
///
/// Holds no per-session state; every turn builds its plan fresh.
pub struct ConversationRouter {
    classifier: IntentClassifier,
    extractor: AttributeExtractor,
    matcher: ProductMatcher,
    formatter: ResponseFormatter,
}

impl ConversationRouter {
    pub fn new(
        provider: Arc<dyn TextGenerator>,
        store: Arc<dyn ProductStore>,
        settings: RouterSettings,
    ) -> Self {
        Self {
            classifier: IntentClassifier::new(provider.clone(), settings.classification),
            extractor: AttributeExtractor::new(provider, settings.extraction),
            matcher: ProductMatcher::new(store, settings.max_results),
            formatter: ResponseFormatter::new(settings.low_stock_threshold),
        }
    }

    /// Route one message. Never fails and never panics past this call.
    pub async fn route(&self, message: &str, context: ConversationContext) -> ChatResponse {
        let span = info_span!(
            "chat_turn",
            session_id = %context.session_id,
            chatbot_id = %context.chatbot_id,
            workspace_id = %context.workspace_id,
        );
        self.route_inner(message, context).instrument(span).await
    }

    async fn route_inner(&self, message: &str, context: ConversationContext) -> ChatResponse {
        debug!(state = %TurnState::Received, chars = message.chars().count());

        if message.trim().is_empty() {
            return replied(Reply::error(replies::EMPTY_MESSAGE), context);
        }

        let intent = match AssertUnwindSafe(self.classifier.classify(message))
            .catch_unwind()
            .await
        {
            Ok(intent) => intent,
            Err(panic) => {
                error!(panic = panic_message(&*panic), "intent classification panicked");
                return replied(Reply::error(replies::PROCESSING_ERROR), context);
            }
        };
        debug!(state = %TurnState::Classified, %intent);

        let fallback_context = context.clone();
        match AssertUnwindSafe(self.dispatch(intent, message, context))
            .catch_unwind()
            .await
        {
            Ok((reply, context)) => {
                debug!(state = %TurnState::Handled, reply_type = %reply.kind);
                replied(reply, context)
            }
            Err(panic) => {
                error!(panic = panic_message(&*panic), %intent, "turn handler panicked");
                replied(Reply::error(replies::INTERNAL_ERROR), fallback_context)
            }
        }
    }

    async fn dispatch(
        &self,
        intent: Intent,
        message: &str,
        mut context: ConversationContext,
    ) -> (Reply, ConversationContext) {
        match intent {
            Intent::ProductSearch => self.handle_product_search(message, context).await,
            Intent::OrderStatus => {
                context.last_intent = Some(LastIntent::OrderStatus);
                (Reply::text(replies::ORDER_STATUS), context)
            }
            Intent::Recommendation => {
                context.last_intent = Some(LastIntent::Recommendation);
                (Reply::text(replies::RECOMMENDATION), context)
            }
            Intent::GeneralQuestion | Intent::Other => {
                self.handle_general(message, context).await
            }
        }
    }

    async fn handle_product_search(
        &self,
        message: &str,
        mut context: ConversationContext,
    ) -> (Reply, ConversationContext) {
        let mut details = self.extractor.extract(message).await;
        if details.product_name.is_empty()
            && let Some(guess) = guess_product_name(message)
        {
            debug!(guess = %guess, "using heuristic product name");
            details.product_name = guess;
        }

        let mut seed = details.product_name.clone();
        for attribute in &details.attributes {
            seed.push(' ');
            seed.push_str(attribute);
        }
        seed.push(' ');
        seed.push_str(message);
        let plan = build_search_plan(&seed);

        let term = if !details.product_name.is_empty() {
            details.product_name.clone()
        } else if let Some(anchor) = &plan.anchor {
            anchor.clone()
        } else {
            message.trim().to_string()
        };
        let label = match (&plan.anchor, plan.in_stock) {
            (Some(anchor), true) => anchor.clone(),
            _ => term.clone(),
        };

        let options = MatchOptions {
            require_in_stock: plan.in_stock,
            expanded_terms: plan.terms.iter().cloned().collect(),
        };
        let outcome = match self
            .matcher
            .search(&term, &context.workspace_id, &options)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "product search failed");
                return (Reply::error(replies::SEARCH_ERROR), context);
            }
        };
        debug!(
            term = %term,
            found = outcome.products.len(),
            used_fallback = outcome.used_fallback,
            in_stock = plan.in_stock,
            "product search finished"
        );

        let reply = self
            .formatter
            .format(&outcome.products, &label, plan.in_stock)
            .into_reply();
        context.last_product = Some(label);
        context.last_intent = Some(if plan.in_stock {
            LastIntent::StockQuery
        } else {
            LastIntent::ProductSearch
        });
        (reply, context)
    }

    async fn handle_general(
        &self,
        message: &str,
        mut context: ConversationContext,
    ) -> (Reply, ConversationContext) {
        let keywords = keyword_attributes(message);
        let reply = match self
            .matcher
            .keyword_search(message, &keywords, &context.workspace_id)
            .await
        {
            Ok(products) if !products.is_empty() => self.formatter.suggestions(&products),
            Ok(_) if is_exploratory_question(message) => Reply::text(replies::BROWSE_HELP),
            Ok(_) => Reply::text(replies::GENERAL_HELP),
            Err(e) => {
                warn!(error = %e, "keyword search failed");
                return (Reply::error(replies::SEARCH_ERROR), context);
            }
        };
        context.last_intent = Some(LastIntent::General);
        (reply, context)
    }
}

fn replied(reply: Reply, context: ConversationContext) -> ChatResponse {
    debug!(state = %TurnState::Replied, reply_type = %reply.kind);
    ChatResponse { reply, context }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    panic
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopwise_core::types::ReplyType;
    use shopwise_test_utils::{MemoryCatalog, MockProvider, ProductBuilder};

    fn catalog() -> Arc<MemoryCatalog> {
        Arc::new(MemoryCatalog::with_products(vec![
            ProductBuilder::new("w1", "Blue Necklace")
                .variant("Default", 25.0, 3)
                .build(),
            ProductBuilder::new("w1", "Gold Necklace")
                .variant("Default", 80.0, 7)
                .build(),
            ProductBuilder::new("w1", "Leather Bag")
                .variant("Default", 60.0, 0)
                .build(),
        ]))
    }

    fn router(provider: MockProvider, store: Arc<MemoryCatalog>) -> ConversationRouter {
        ConversationRouter::new(Arc::new(provider), store, RouterSettings::default())
    }

    fn ctx() -> ConversationContext {
        ConversationContext::new("c1", "s1", "w1")
    }

    #[tokio::test]
    async fn product_search_with_provider_answers() {
        let provider = MockProvider::with_responses([
            "product_search",
            r#"{"productName":"blue necklace","attributes":["blue"]}"#,
        ]);
        let response = router(provider, catalog())
            .route("I want to buy a blue necklace", ctx())
            .await;
        assert_eq!(response.reply.kind, ReplyType::ProductResults);
        // The expanded term "necklace" also pulls in the gold one.
        assert!(
            response
                .reply
                .text
                .starts_with("Found 2 product(s) matching \"blue necklace\":"),
            "{}",
            response.reply.text
        );
        assert_eq!(response.context.last_product.as_deref(), Some("blue necklace"));
        assert_eq!(response.context.last_intent, Some(LastIntent::ProductSearch));
    }

    #[tokio::test]
    async fn stock_query_uses_anchor_label() {
        let provider = MockProvider::with_responses([
            "product_search",
            r#"{"productName":"necklaces","attributes":[]}"#,
        ]);
        let response = router(provider, catalog())
            .route("do you have necklaces in stock", ctx())
            .await;
        assert_eq!(response.reply.text, "We currently have 2 necklaces in stock.");
        assert_eq!(response.context.last_intent, Some(LastIntent::StockQuery));
        assert_eq!(response.context.last_product.as_deref(), Some("necklace"));
    }

    #[tokio::test]
    async fn out_of_stock_query_reports_none() {
        let provider = MockProvider::with_responses([
            "product_search",
            r#"{"productName":"","attributes":[]}"#,
        ]);
        let response = router(provider, catalog())
            .route("is the bag in stock", ctx())
            .await;
        // Primary pass filters on stock; the fallback searches the raw
        // message, which matches no title.
        assert_eq!(response.reply.text, "We don't have bags in stock right now.");
        assert_eq!(response.reply.kind, ReplyType::Text);
    }

    #[tokio::test]
    async fn general_question_without_matches_gets_help_text() {
        let provider = MockProvider::with_responses(["general_question"]);
        let response = router(provider, catalog()).route("hello", ctx()).await;
        assert_eq!(response.reply.text, replies::GENERAL_HELP);
        assert_eq!(response.reply.kind, ReplyType::Text);
        assert_eq!(response.context.last_intent, Some(LastIntent::General));
    }

    #[tokio::test]
    async fn general_question_with_matches_suggests() {
        let provider = MockProvider::with_responses(["other"]);
        let response = router(provider, catalog())
            .route("tell me about leather", ctx())
            .await;
        assert_eq!(response.reply.kind, ReplyType::ProductResults);
        assert_eq!(response.reply.buttons.as_ref().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn browsing_question_lists_categories() {
        let provider = MockProvider::with_responses(["general_question"]);
        let response = router(provider, catalog())
            .route("what do you sell?", ctx())
            .await;
        assert_eq!(response.reply.text, replies::BROWSE_HELP);
    }

    #[tokio::test]
    async fn canned_intents() {
        let provider = MockProvider::with_responses(["order_status", "recommendation"]);
        let router = router(provider, catalog());
        let order = router.route("where is my parcel", ctx()).await;
        assert_eq!(order.reply.text, replies::ORDER_STATUS);
        assert_eq!(order.context.last_intent, Some(LastIntent::OrderStatus));
        let rec = router.route("gift ideas?", ctx()).await;
        assert_eq!(rec.reply.text, replies::RECOMMENDATION);
    }

    #[tokio::test]
    async fn failing_provider_falls_back_to_heuristics() {
        let response = router(MockProvider::failing(), catalog())
            .route("I want to buy a blue necklace", ctx())
            .await;
        assert_eq!(response.reply.kind, ReplyType::ProductResults);
        assert!(response.reply.text.contains("\"blue necklace\""));
    }

    #[tokio::test]
    async fn store_failure_becomes_error_reply() {
        let store = catalog();
        store.set_failing(true);
        let provider = MockProvider::with_responses([
            "product_search",
            r#"{"productName":"ring","attributes":[]}"#,
        ]);
        let response = router(provider, store).route("a ring", ctx()).await;
        assert_eq!(response.reply.kind, ReplyType::Error);
        assert_eq!(response.reply.text, replies::SEARCH_ERROR);
        assert_eq!(response.context, ctx());
    }

    #[tokio::test]
    async fn classification_panic_returns_processing_error() {
        let response = router(MockProvider::panicking(), catalog())
            .route("anything", ctx())
            .await;
        assert_eq!(response.reply.kind, ReplyType::Error);
        assert_eq!(response.reply.text, replies::PROCESSING_ERROR);
        assert_eq!(response.context, ctx());
    }

    #[tokio::test]
    async fn empty_message_is_rejected_without_provider_call() {
        let provider = Arc::new(MockProvider::new());
        let router = ConversationRouter::new(provider.clone(), catalog(), RouterSettings::default());
        let response = router.route("   ", ctx()).await;
        assert_eq!(response.reply.kind, ReplyType::Error);
        assert_eq!(provider.call_count().await, 0);
    }

    #[test]
    fn settings_follow_config() {
        let mut config = ShopwiseConfig::default();
        config.chat.max_results = 7;
        config.chat.temperature = 0.3;
        let settings = RouterSettings::from_config(&config);
        assert_eq!(settings.max_results, 7);
        assert_eq!(settings.classification.max_tokens, 10);
        assert_eq!(settings.extraction.max_tokens, 150);
        assert_eq!(settings.extraction.temperature, 0.3);
        assert_eq!(
            settings.classification.model.as_deref(),
            Some("claude-haiku-4-5-20251001")
        );
    }
}
