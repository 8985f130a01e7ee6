// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-generation provider trait used for intent classification and
//! attribute extraction prompts.

use async_trait::async_trait;

use crate::error::ShopwiseError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{GenerationRequest, GenerationResponse};

/// Adapter for an external text-generation API.
///
/// Implementations are network-bound and may fail or time out at any
/// time; callers are expected to degrade to heuristics on error.
#[async_trait]
pub trait TextGenerator: PluginAdapter {
    /// Sends a single prompt and returns the generated text.
    async fn generate_text(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, ShopwiseError>;
}
