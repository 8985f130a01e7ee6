// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock text-generation provider for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use shopwise_core::traits::{PluginAdapter, TextGenerator};
use shopwise_core::types::{AdapterType, GenerationRequest, GenerationResponse, HealthStatus};
use shopwise_core::ShopwiseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Queue,
    Failing,
    Panicking,
}

/// A mock provider that returns pre-configured answers.
///
/// Answers are popped from a FIFO queue. When the queue is empty the
/// provider answers with an error, which the chat pipeline treats like an
/// unreachable provider.
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
    mode: Mode,
}

impl MockProvider {
    /// Create a new mock provider with an empty response queue.
    pub fn new() -> Self {
        Self::with_mode(Vec::new(), Mode::Queue)
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_mode(responses.into_iter().map(Into::into).collect(), Mode::Queue)
    }

    /// A provider whose every call fails with a provider error.
    pub fn failing() -> Self {
        Self::with_mode(Vec::new(), Mode::Failing)
    }

    /// A provider whose every call panics.
    pub fn panicking() -> Self {
        Self::with_mode(Vec::new(), Mode::Panicking)
    }

    fn with_mode(responses: Vec<String>, mode: Mode) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            requests: Arc::new(Mutex::new(Vec::new())),
            mode,
        }
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.responses.lock().await.push_back(text.into());
    }

    /// Every request received so far, in call order.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of calls received so far.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, ShopwiseError> {
        Ok(match self.mode {
            Mode::Queue => HealthStatus::Healthy,
            _ => HealthStatus::Unhealthy("mock provider is failing".into()),
        })
    }
}

#[async_trait]
impl TextGenerator for MockProvider {
    async fn generate_text(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, ShopwiseError> {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| "mock-model".to_string());
        self.requests.lock().await.push(request);

        match self.mode {
            Mode::Failing => Err(ShopwiseError::Provider {
                message: "mock provider failure".into(),
                source: None,
            }),
            Mode::Panicking => panic!("mock provider panic"),
            Mode::Queue => match self.responses.lock().await.pop_front() {
                Some(text) => Ok(GenerationResponse { text, model }),
                None => Err(ShopwiseError::Provider {
                    message: "mock provider has no queued response".into(),
                    source: None,
                }),
            },
        }
    }
}
