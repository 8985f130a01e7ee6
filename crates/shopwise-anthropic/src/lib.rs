// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic text-generation provider for Shopwise.
//!
//! Implements [`TextGenerator`] over the non-streaming Messages API. The
//! chat pipeline only ever sends short single-prompt requests (intent
//! classification and attribute extraction), so there is no conversation
//! history or streaming support here.
//!
//! Without an API key the provider runs in disabled mode: every call fails
//! with a provider error and the pipeline answers from its rule-based
//! fallbacks.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use shopwise_config::model::ProviderConfig;
use shopwise_core::types::{
    AdapterType, GenerationRequest, GenerationResponse, HealthStatus,
};
use shopwise_core::{PluginAdapter, ShopwiseError, TextGenerator};
use tracing::{debug, info, warn};

use crate::client::{AnthropicClient, ClientSettings};
use crate::types::{ApiMessage, MessageRequest};

/// Environment variable consulted when the config carries no API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Anthropic provider implementing [`TextGenerator`].
pub struct AnthropicProvider {
    client: Option<AnthropicClient>,
    default_model: String,
}

impl AnthropicProvider {
    /// Creates a provider from configuration.
    ///
    /// # API Key Resolution
    /// 1. `provider.api_key` if set and non-empty
    /// 2. `ANTHROPIC_API_KEY` environment variable
    /// 3. Neither: the provider starts disabled
    pub fn new(config: &ProviderConfig) -> Result<Self, ShopwiseError> {
        let api_key = resolve_api_key(config.api_key.as_deref(), std::env::var(API_KEY_ENV).ok());
        let settings = api_key.map(|api_key| ClientSettings {
            api_key,
            api_version: config.api_version.clone(),
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            max_retries: config.max_retries,
        });
        Self::from_settings(settings, config.model.clone())
    }

    /// Creates a provider from explicit client settings; `None` disables it.
    pub fn from_settings(
        settings: Option<ClientSettings>,
        default_model: String,
    ) -> Result<Self, ShopwiseError> {
        let client = settings.map(AnthropicClient::new).transpose()?;
        match &client {
            Some(client) => info!(
                model = %default_model,
                endpoint = client.endpoint(),
                "Anthropic provider initialized"
            ),
            None => warn!("no Anthropic API key configured, provider disabled"),
        }
        Ok(Self {
            client,
            default_model,
        })
    }

    /// True when no API key was available at construction.
    pub fn is_disabled(&self) -> bool {
        self.client.is_none()
    }

    fn to_message_request(&self, request: GenerationRequest) -> MessageRequest {
        MessageRequest {
            model: request
                .model
                .unwrap_or_else(|| self.default_model.clone()),
            messages: vec![ApiMessage::user(request.prompt)],
            system: None,
            max_tokens: request.max_tokens,
            temperature: Some(request.temperature),
        }
    }
}

/// Picks the configured key, falling back to the environment value. Empty
/// strings count as absent.
fn resolve_api_key(configured: Option<&str>, env_value: Option<String>) -> Option<String> {
    configured
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .or_else(|| env_value.filter(|key| !key.is_empty()))
}

#[async_trait]
impl PluginAdapter for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, ShopwiseError> {
        if self.is_disabled() {
            return Ok(HealthStatus::Degraded("no API key configured".into()));
        }
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl TextGenerator for AnthropicProvider {
    async fn generate_text(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, ShopwiseError> {
        let Some(client) = &self.client else {
            return Err(ShopwiseError::Provider {
                message: "Anthropic provider disabled: no API key configured".into(),
                source: None,
            });
        };

        let hint = request.provider.clone();
        let api_request = self.to_message_request(request);
        debug!(
            model = %api_request.model,
            max_tokens = api_request.max_tokens,
            provider_hint = ?hint,
            "sending generation request"
        );

        let response = client.complete_message(&api_request).await?;
        Ok(GenerationResponse {
            text: response.text(),
            model: response.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_key_wins_over_environment() {
        assert_eq!(
            resolve_api_key(Some("cfg"), Some("env".into())),
            Some("cfg".to_string())
        );
        assert_eq!(
            resolve_api_key(Some(""), Some("env".into())),
            Some("env".to_string())
        );
        assert_eq!(resolve_api_key(None, Some(String::new())), None);
        assert_eq!(resolve_api_key(None, None), None);
    }

    #[test]
    fn request_falls_back_to_default_model() {
        let provider = AnthropicProvider::from_settings(None, "default-model".into()).unwrap();
        let req = provider.to_message_request(GenerationRequest {
            prompt: "hi".into(),
            model: None,
            max_tokens: 10,
            temperature: 0.0,
            provider: None,
        });
        assert_eq!(req.model, "default-model");
        assert_eq!(req.messages[0].content, "hi");
        assert_eq!(req.temperature, Some(0.0));
    }

    #[tokio::test]
    async fn disabled_provider_errors_and_reports_degraded() {
        let provider = AnthropicProvider::from_settings(None, "m".into()).unwrap();
        assert!(provider.is_disabled());
        assert!(matches!(
            provider.health_check().await.unwrap(),
            HealthStatus::Degraded(_)
        ));

        let err = provider
            .generate_text(GenerationRequest {
                prompt: "hi".into(),
                model: None,
                max_tokens: 10,
                temperature: 0.0,
                provider: None,
            })
            .await
            .unwrap_err();
        assert!(err.is_provider_degradation());
    }
}
