// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boundary traits for the collaborators the chat engine depends on.
//!
//! All collaborators extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility, so the router can
//! hold them as `Arc<dyn ...>` and tests can substitute fakes per case.

pub mod adapter;
pub mod catalog;
pub mod conversation;
pub mod provider;

pub use adapter::PluginAdapter;
pub use catalog::ProductStore;
pub use conversation::ConversationLog;
pub use provider::TextGenerator;
