// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Shopwise conversational commerce engine.
//!
//! This crate provides the error type, the domain types exchanged between
//! the chat pipeline stages, and the boundary traits implemented by the
//! external collaborators (text generation, product catalog, conversation
//! log).

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ShopwiseError;
pub use types::{
    AdapterType, ChatRequest, ChatResponse, ChatTurn, ConversationContext, FormattedProduct,
    HealthStatus, Intent, LastIntent, Product, ProductDetails, Reply, ReplyType,
};

pub use traits::{ConversationLog, PluginAdapter, ProductStore, TextGenerator};
