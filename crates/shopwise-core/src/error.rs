// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Shopwise chat engine.

use thiserror::Error;

/// Error returned by every trait seam and engine operation.
#[derive(Debug, Error)]
pub enum ShopwiseError {
    #[error("configuration error: {0}")]
    Config(String),

    /// Catalog or conversation database failure.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The text-generation provider failed or was not configured.
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A chat request is missing one or more required fields.
    #[error("missing required fields: {}", missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ShopwiseError {
    /// Wraps any storage-layer error.
    pub fn storage(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        ShopwiseError::Storage {
            source: source.into(),
        }
    }

    /// Returns true for errors the router treats as provider degradation.
    pub fn is_provider_degradation(&self) -> bool {
        matches!(
            self,
            ShopwiseError::Provider { .. } | ShopwiseError::Timeout { .. }
        )
    }
}
