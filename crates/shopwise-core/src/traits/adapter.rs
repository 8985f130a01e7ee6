// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all collaborators implement.

use async_trait::async_trait;

use crate::error::ShopwiseError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for every Shopwise collaborator.
///
/// Provides identity and health reporting; the gateway aggregates
/// `health_check` results into its health endpoint.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Short name used in logs and health output.
    fn name(&self) -> &str;

        fn version(&self) -> semver::Version;

    /// Returns the kind of collaborator.
    fn adapter_type(&self) -> AdapterType;

    /// Check that the backing service answers.
    async fn health_check(&self) -> Result<HealthStatus, ShopwiseError>;
}
