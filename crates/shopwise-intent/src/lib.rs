// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message understanding for the Shopwise chat engine.
//!
//! Two provider-backed components, each with a rule-based fallback that needs
//! no network:
//! - [`IntentClassifier`] maps a message onto the closed [`Intent`] taxonomy.
//! - [`AttributeExtractor`] pulls `{productName, attributes}` out of free text.
//!
//! Provider failures never propagate out of this crate.
//!
//! [`Intent`]: shopwise_core::Intent

pub mod classifier;
pub mod extractor;

pub use classifier::{IntentClassifier, classify_heuristic, parse_intent};
pub use extractor::{
    AttributeExtractor, guess_product_name, keyword_attributes, parse_extraction_response,
};

/// Generation parameters shared by the classification and extraction prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSettings {
    /// Model override; `None` uses the provider default.
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl PromptSettings {
    /// Defaults for the one-word classification prompt.
    pub fn classification() -> Self {
        Self {
            model: None,
            max_tokens: 10,
            temperature: 0.0,
        }
    }

    /// Defaults for the JSON extraction prompt.
    pub fn extraction() -> Self {
        Self {
            model: None,
            max_tokens: 150,
            temperature: 0.0,
        }
    }

    pub(crate) fn request(&self, prompt: String) -> shopwise_core::types::GenerationRequest {
        shopwise_core::types::GenerationRequest {
            prompt,
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            provider: None,
        }
    }
}
