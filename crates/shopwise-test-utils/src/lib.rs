// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Shopwise.
//!
//! Provides in-memory implementations of the boundary traits so the chat
//! pipeline can be exercised without a network provider or a database:
//! - [`MockProvider`]: FIFO queue of canned provider answers
//! - [`MemoryCatalog`]: workspace-scoped in-memory product store
//! - [`MemoryConversationLog`]: in-memory conversation log
//! - [`ProductBuilder`]: concise catalog fixtures

pub mod fixtures;
pub mod memory_catalog;
pub mod memory_log;
pub mod mock_provider;

pub use fixtures::{ProductBuilder, store_summary};
pub use memory_catalog::MemoryCatalog;
pub use memory_log::MemoryConversationLog;
pub use mock_provider::MockProvider;
