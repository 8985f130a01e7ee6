// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller-facing chat entry point.
//!
//! Validates the request, routes the turn, then logs the user message and
//! the bot reply as two independent writes. Logging failures never change
//! the reply.

use std::sync::Arc;

use shopwise_core::ShopwiseError;
use shopwise_core::traits::ConversationLog;
use shopwise_core::types::{ChatRequest, ChatResponse, ChatTurn, ConversationMessage, NewMessage};
use tracing::{debug, warn};

use crate::router::ConversationRouter;

/// Validation, routing and conversation logging for one chat request.
pub struct ChatService {
    router: Arc<ConversationRouter>,
    log: Arc<dyn ConversationLog>,
}

impl ChatService {
    pub fn new(router: Arc<ConversationRouter>, log: Arc<dyn ConversationLog>) -> Self {
        Self { router, log }
    }

    /// Handle one chat request.
    ///
    /// Fails only with [`ShopwiseError::Validation`], listing every missing
    /// field; any request that passes validation gets a reply.
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, ShopwiseError> {
        let turn = request
            .validate()
            .map_err(|missing| ShopwiseError::Validation { missing })?;

        let response = self
            .router
            .route(&turn.message, turn.context.clone())
            .await;
        self.record_turn(&turn, &response.reply.text).await;
        Ok(response)
    }

    /// Logged messages for a session, oldest first. Unknown sessions have none.
    pub async fn history(
        &self,
        chatbot_id: &str,
        session_id: &str,
        workspace_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ConversationMessage>, ShopwiseError> {
        match self
            .log
            .find_conversation(chatbot_id, session_id, workspace_id)
            .await?
        {
            Some(conversation) => self.log.list_messages(&conversation.id, limit).await,
            None => Ok(Vec::new()),
        }
    }

    async fn record_turn(&self, turn: &ChatTurn, reply_text: &str) {
        let ctx = &turn.context;
        let conversation = match self
            .log
            .find_or_create_conversation(&ctx.chatbot_id, &ctx.session_id, &ctx.workspace_id)
            .await
        {
            Ok(conversation) => conversation,
            Err(e) => {
                warn!(error = %e, session_id = %ctx.session_id, "failed to open conversation log");
                return;
            }
        };

        let user = NewMessage {
            from_bot: false,
            content: turn.message.clone(),
            phone: turn.phone.clone(),
        };
        if let Err(e) = self.log.append_message(&conversation.id, user).await {
            warn!(error = %e, conversation_id = %conversation.id, "failed to log user message");
        }

        let bot = NewMessage {
            from_bot: true,
            content: reply_text.to_string(),
            phone: None,
        };
        if let Err(e) = self.log.append_message(&conversation.id, bot).await {
            warn!(error = %e, conversation_id = %conversation.id, "failed to log bot reply");
        }
        debug!(conversation_id = %conversation.id, "turn logged");
    }
}
