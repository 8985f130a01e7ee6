// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory conversation log.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use shopwise_core::traits::{ConversationLog, PluginAdapter};
use shopwise_core::types::{
    AdapterType, Conversation, ConversationMessage, HealthStatus, NewMessage,
};
use shopwise_core::ShopwiseError;

#[derive(Default)]
struct LogState {
    conversations: Vec<Conversation>,
    messages: Vec<ConversationMessage>,
}

/// A [`ConversationLog`] kept in memory.
#[derive(Default)]
pub struct MemoryConversationLog {
    state: Mutex<LogState>,
    failing: AtomicBool,
}

impl MemoryConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a storage error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every conversation created so far.
    pub async fn conversations(&self) -> Vec<Conversation> {
        self.state.lock().await.conversations.clone()
    }

    /// Every message appended so far, across all conversations.
    pub async fn all_messages(&self) -> Vec<ConversationMessage> {
        self.state.lock().await.messages.clone()
    }

    fn check(&self) -> Result<(), ShopwiseError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(ShopwiseError::storage("memory conversation log is failing"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PluginAdapter for MemoryConversationLog {
    fn name(&self) -> &str {
        "memory-conversation-log"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ConversationLog
    }

    async fn health_check(&self) -> Result<HealthStatus, ShopwiseError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ConversationLog for MemoryConversationLog {
    async fn find_or_create_conversation(
        &self,
        chatbot_id: &str,
        session_id: &str,
        workspace_id: &str,
    ) -> Result<Conversation, ShopwiseError> {
        self.check()?;
        let mut state = self.state.lock().await;
        if let Some(existing) = state.conversations.iter().find(|c| {
            c.chatbot_id == chatbot_id
                && c.session_id == session_id
                && c.workspace_id == workspace_id
        }) {
            return Ok(existing.clone());
        }

        let now = chrono::Utc::now().to_rfc3339();
        let conversation = Conversation {
            id: uuid::Uuid::new_v4().to_string(),
            chatbot_id: chatbot_id.to_string(),
            session_id: session_id.to_string(),
            workspace_id: workspace_id.to_string(),
            created_at: now.clone(),
            updated_at: now,
        };
        state.conversations.push(conversation.clone());
        Ok(conversation)
    }

    async fn find_conversation(
        &self,
        chatbot_id: &str,
        session_id: &str,
        workspace_id: &str,
    ) -> Result<Option<Conversation>, ShopwiseError> {
        self.check()?;
        let state = self.state.lock().await;
        Ok(state
            .conversations
            .iter()
            .find(|c| {
                c.chatbot_id == chatbot_id
                    && c.session_id == session_id
                    && c.workspace_id == workspace_id
            })
            .cloned())
    }

    async fn append_message(
        &self,
        conversation_id: &str,
        message: NewMessage,
    ) -> Result<ConversationMessage, ShopwiseError> {
        self.check()?;
        let mut state = self.state.lock().await;
        let now = chrono::Utc::now().to_rfc3339();
        let Some(conversation) = state
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
        else {
            return Err(ShopwiseError::storage(format!(
                "unknown conversation {conversation_id}"
            )));
        };
        conversation.updated_at = now.clone();

        let stored = ConversationMessage {
            id: uuid::Uuid::new_v4().to_string(),
            conversation_id: conversation_id.to_string(),
            from_bot: message.from_bot,
            content: message.content,
            phone: message.phone,
            created_at: now,
        };
        state.messages.push(stored.clone());
        Ok(stored)
    }

    async fn list_messages(
        &self,
        conversation_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ConversationMessage>, ShopwiseError> {
        self.check()?;
        let state = self.state.lock().await;
        let messages: Vec<_> = state
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();
        // Most recent `limit` messages, oldest first.
        let skip = limit.map_or(0, |n| messages.len().saturating_sub(n));
        Ok(messages.into_iter().skip(skip).collect())
    }
}
