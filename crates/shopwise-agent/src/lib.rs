// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation routing for the Shopwise chat engine.
//!
//! [`ConversationRouter`] runs one turn: classify, dispatch to a handler and
//! assemble a reply. It always returns a reply; provider failures fall back to
//! heuristics, store failures become error-typed replies, and panics are
//! caught. [`ChatService`] wraps it with request validation and conversation
//! logging.

pub mod replies;
pub mod router;
pub mod service;

pub use router::{ConversationRouter, RouterSettings, TurnState};
pub use service::ChatService;
