// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation log trait for persisting chat turns.

use async_trait::async_trait;

use crate::error::ShopwiseError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Conversation, ConversationMessage, NewMessage};

/// Adapter for the conversation/message history store.
#[async_trait]
pub trait ConversationLog: PluginAdapter {
    /// Returns the conversation for the triple, creating it on first use.
    async fn find_or_create_conversation(
        &self,
        chatbot_id: &str,
        session_id: &str,
        workspace_id: &str,
    ) -> Result<Conversation, ShopwiseError>;

    /// Looks up the conversation for the triple without creating it.
    async fn find_conversation(
        &self,
        chatbot_id: &str,
        session_id: &str,
        workspace_id: &str,
    ) -> Result<Option<Conversation>, ShopwiseError>;

    /// Appends a message to a conversation.
    async fn append_message(
        &self,
        conversation_id: &str,
        message: NewMessage,
    ) -> Result<ConversationMessage, ShopwiseError>;

    /// Lists messages oldest-first, keeping only the most recent `limit` if given.
    async fn list_messages(
        &self,
        conversation_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ConversationMessage>, ShopwiseError>;
}
