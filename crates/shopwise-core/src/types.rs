// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the chat pipeline and its collaborators.
//!
//! Wire-facing types (`ChatRequest`, `ChatResponse`, `Reply`,
//! `ConversationContext`, `FormattedProduct`) serialize with camelCase keys
//! to match the JSON contract of the chat endpoint.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of collaborator behind a boundary trait.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Catalog,
    ConversationLog,
}

// --- Intent taxonomy ---

/// The classified purpose of an inbound chat message.
///
/// Closed enumeration: anything a provider answers outside of these five
/// names is mapped to [`Intent::Other`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ProductSearch,
    OrderStatus,
    Recommendation,
    GeneralQuestion,
    Other,
}

impl Intent {
    /// All intents, in prompt order.
    pub const ALL: [Intent; 5] = [
        Intent::ProductSearch,
        Intent::OrderStatus,
        Intent::Recommendation,
        Intent::GeneralQuestion,
        Intent::Other,
    ];
}

/// What the router recorded as the purpose of the previous turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LastIntent {
    StockQuery,
    ProductSearch,
    General,
    OrderStatus,
    Recommendation,
}

/// Structured product description pulled out of free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl ProductDetails {
    /// True when neither a product name nor any attribute was found.
    pub fn is_empty(&self) -> bool {
        self.product_name.trim().is_empty() && self.attributes.is_empty()
    }
}

// --- Catalog entities (read-only to the chat engine) ---

/// Publication status of a product.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    Inactive,
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    #[serde(default)]
    pub sku: Option<String>,
}

/// Summary of the store that owns a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
}

/// A catalog product with its variants and owning store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    pub status: ProductStatus,
    /// Whether the product is enabled for conversational commerce.
    #[serde(default)]
    pub chat_enabled: bool,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Sorted by ascending price by every store implementation.
    #[serde(default)]
    pub variants: Vec<Variant>,
    pub store: StoreSummary,
}

impl Product {
    /// True when at least one variant has stock on hand.
    pub fn in_stock(&self) -> bool {
        self.variants.iter().any(|v| v.stock > 0)
    }
}

/// A product field that a catalog query can match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ProductField {
    Title,
    Description,
    Category,
    Brand,
}

/// One case-insensitive substring predicate of a catalog query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: ProductField,
    pub needle: String,
}

impl FieldMatch {
    pub fn new(field: ProductField, needle: impl Into<String>) -> Self {
        Self {
            field,
            needle: needle.into(),
        }
    }
}

/// A workspace-scoped catalog query.
///
/// The predicates in `any_of` are OR'd together; the workspace scope, the
/// active-status filter and the optional stock filter are AND'd on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub workspace_id: String,
    pub any_of: Vec<FieldMatch>,
    pub require_in_stock: bool,
    pub limit: usize,
}

// --- Replies ---

/// Kind of reply returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReplyType {
    Text,
    ProductResults,
    Error,
}

/// Client-facing projection of a variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedVariant {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub sku: Option<String>,
}

/// Client-facing projection of a product and its variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedProduct {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Cheapest variant price, else the product's own price; `None` when neither is usable.
    pub price: Option<f64>,
    pub image: Option<String>,
    pub variants: Vec<FormattedVariant>,
    pub url: Option<String>,
}

/// The bot's answer to one inbound message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ReplyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<FormattedProduct>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<String>>,
}

impl Reply {
    /// A plain text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ReplyType::Text,
            products: None,
            buttons: None,
        }
    }

    /// An error-typed reply.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ReplyType::Error,
            products: None,
            buttons: None,
        }
    }

    /// A reply carrying product results.
    pub fn products(text: impl Into<String>, products: Vec<FormattedProduct>) -> Self {
        Self {
            text: text.into(),
            kind: ReplyType::ProductResults,
            products: Some(products),
            buttons: None,
        }
    }

    /// Attach quick-reply buttons.
    pub fn with_buttons<I, S>(mut self, buttons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.buttons = Some(buttons.into_iter().map(Into::into).collect());
        self
    }
}

// --- Conversation ---

/// Per-session routing context carried by the caller between turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationContext {
    pub chatbot_id: String,
    pub session_id: String,
    pub workspace_id: String,
    pub last_product: Option<String>,
    pub last_intent: Option<LastIntent>,
}

impl ConversationContext {
    pub fn new(
        chatbot_id: impl Into<String>,
        session_id: impl Into<String>,
        workspace_id: impl Into<String>,
    ) -> Self {
        Self {
            chatbot_id: chatbot_id.into(),
            session_id: session_id.into(),
            workspace_id: workspace_id.into(),
            last_product: None,
            last_intent: None,
        }
    }
}

/// Inbound chat request as received at the caller boundary.
///
/// Every field is optional at the type level so that missing fields can be
/// reported together instead of failing on the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub chatbot_id: Option<String>,
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A chat request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub message: String,
    pub phone: Option<String>,
    pub context: ConversationContext,
}

impl ChatRequest {
    /// Check that every required field is present and non-blank.
    ///
    /// Returns the names of all missing fields (camelCase, as on the wire).
    pub fn validate(&self) -> Result<ChatTurn, Vec<String>> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.trim().is_empty())
        }

        let fields = [
            ("message", present(&self.message)),
            ("sessionId", present(&self.session_id)),
            ("chatbotId", present(&self.chatbot_id)),
            ("workspaceId", present(&self.workspace_id)),
        ];
        let missing: Vec<String> = fields
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let [(_, Some(message)), (_, Some(session_id)), (_, Some(chatbot_id)), (_, Some(workspace_id))] =
            fields
        else {
            return Err(vec!["message".to_string()]);
        };

        Ok(ChatTurn {
            message: message.to_string(),
            phone: present(&self.phone).map(str::to_string),
            context: ConversationContext::new(chatbot_id, session_id, workspace_id),
        })
    }
}

/// The result of one routed turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: Reply,
    pub context: ConversationContext,
}

/// A logged conversation, unique per (chatbot, session, workspace).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub chatbot_id: String,
    pub session_id: String,
    pub workspace_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A message to append to a conversation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub from_bot: bool,
    pub content: String,
    pub phone: Option<String>,
}

/// A message stored in a conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessage {
    pub id: String,
    pub conversation_id: String,
    pub from_bot: bool,
    pub content: String,
    pub phone: Option<String>,
    pub created_at: String,
}

// --- Text generation ---

/// A single-prompt request to a text-generation provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Overrides the provider's default model when set.
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Free-form provider hint, recorded for logging.
    pub provider: Option<String>,
}

/// A text-generation provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    pub text: String,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn intent_round_trips_through_snake_case() {
        for intent in Intent::ALL {
            let s = intent.to_string();
            assert_eq!(Intent::from_str(&s).unwrap(), intent);
        }
        assert_eq!(Intent::ProductSearch.to_string(), "product_search");
        assert_eq!(
            serde_json::to_string(&Intent::GeneralQuestion).unwrap(),
            "\"general_question\""
        );
    }

    #[test]
    fn unknown_intent_does_not_parse() {
        assert!(Intent::from_str("shopping").is_err());
    }

    #[test]
    fn reply_serializes_type_and_skips_absent_fields() {
        let json = serde_json::to_value(Reply::text("hi")).unwrap();
        assert_eq!(json["type"], "text");
        assert!(json.get("products").is_none());
        assert!(json.get("buttons").is_none());

        let json = serde_json::to_value(Reply::products("found", vec![])).unwrap();
        assert_eq!(json["type"], "product_results");
        assert!(json["products"].as_array().unwrap().is_empty());
    }

    #[test]
    fn context_uses_camel_case_keys() {
        let mut ctx = ConversationContext::new("c1", "s1", "w1");
        ctx.last_intent = Some(LastIntent::StockQuery);
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["chatbotId"], "c1");
        assert_eq!(json["lastIntent"], "stock_query");
        assert!(json["lastProduct"].is_null());
    }

    #[test]
    fn chat_request_validation_reports_all_missing_fields() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "  ", "chatbotId": "c1"}"#).unwrap();
        let missing = req.validate().unwrap_err();
        assert_eq!(missing, vec!["message", "sessionId", "workspaceId"]);
    }

    #[test]
    fn chat_request_validation_builds_turn() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"message": "hello", "sessionId": "s1", "chatbotId": "c1", "workspaceId": "w1", "phone": ""}"#,
        )
        .unwrap();
        let turn = req.validate().unwrap();
        assert_eq!(turn.message, "hello");
        assert_eq!(turn.phone, None);
        assert_eq!(turn.context, ConversationContext::new("c1", "s1", "w1"));
    }

    #[test]
    fn product_details_default_is_empty() {
        assert!(ProductDetails::default().is_empty());
        let parsed: ProductDetails =
            serde_json::from_str(r#"{"productName": "necklace", "attributes": ["blue"]}"#).unwrap();
        assert_eq!(parsed.product_name, "necklace");
        assert!(!parsed.is_empty());
    }

    #[test]
    fn product_status_uses_screaming_case() {
        assert_eq!(ProductStatus::Active.to_string(), "ACTIVE");
        assert_eq!(ProductStatus::from_str("INACTIVE").unwrap(), ProductStatus::Inactive);
    }
}
