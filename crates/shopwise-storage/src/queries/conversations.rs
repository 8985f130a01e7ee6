// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation and message queries.

use rusqlite::OptionalExtension;
use shopwise_core::ShopwiseError;
use shopwise_core::types::{Conversation, ConversationMessage, NewMessage};

use crate::database::{Database, map_tr_err};

fn conversation_from_row(row: &rusqlite::Row<'_>) -> Result<Conversation, rusqlite::Error> {
    Ok(Conversation {
        id: row.get(0)?,
        chatbot_id: row.get(1)?,
        session_id: row.get(2)?,
        workspace_id: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn select_conversation(
    conn: &rusqlite::Connection,
    chatbot_id: &str,
    session_id: &str,
    workspace_id: &str,
) -> Result<Option<Conversation>, rusqlite::Error> {
    conn.query_row(
        "SELECT id, chatbot_id, session_id, workspace_id, created_at, updated_at \
         FROM conversations WHERE chatbot_id = ?1 AND session_id = ?2 AND workspace_id = ?3",
        rusqlite::params![chatbot_id, session_id, workspace_id],
        conversation_from_row,
    )
    .optional()
}

/// Return the conversation for the triple, inserting it on first use.
pub async fn find_or_create(
    db: &Database,
    chatbot_id: &str,
    session_id: &str,
    workspace_id: &str,
) -> Result<Conversation, ShopwiseError> {
    let chatbot_id = chatbot_id.to_string();
    let session_id = session_id.to_string();
    let workspace_id = workspace_id.to_string();
    let id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    db.connection()
        .call(move |conn| -> Result<Conversation, rusqlite::Error> {
            conn.execute(
                "INSERT INTO conversations \
                 (id, chatbot_id, session_id, workspace_id, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
                 ON CONFLICT (chatbot_id, session_id, workspace_id) DO NOTHING",
                rusqlite::params![id, chatbot_id, session_id, workspace_id, now],
            )?;
            select_conversation(conn, &chatbot_id, &session_id, &workspace_id)?
                .ok_or(rusqlite::Error::QueryReturnedNoRows)
        })
        .await
        .map_err(map_tr_err)
}

/// Look up the conversation for the triple.
pub async fn find(
    db: &Database,
    chatbot_id: &str,
    session_id: &str,
    workspace_id: &str,
) -> Result<Option<Conversation>, ShopwiseError> {
    let chatbot_id = chatbot_id.to_string();
    let session_id = session_id.to_string();
    let workspace_id = workspace_id.to_string();

    db.connection()
        .call(move |conn| -> Result<Option<Conversation>, rusqlite::Error> {
            select_conversation(conn, &chatbot_id, &session_id, &workspace_id)
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a message and touch the conversation's `updated_at`.
pub async fn append_message(
    db: &Database,
    conversation_id: &str,
    message: NewMessage,
) -> Result<ConversationMessage, ShopwiseError> {
    let stored = ConversationMessage {
        id: uuid::Uuid::new_v4().to_string(),
        conversation_id: conversation_id.to_string(),
        from_bot: message.from_bot,
        content: message.content,
        phone: message.phone,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    let row = stored.clone();

    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO messages (id, conversation_id, from_bot, content, phone, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    row.id,
                    row.conversation_id,
                    row.from_bot,
                    row.content,
                    row.phone,
                    row.created_at,
                ],
            )?;
            tx.execute(
                "UPDATE conversations SET updated_at = ?1 WHERE id = ?2",
                rusqlite::params![row.created_at, row.conversation_id],
            )?;
            tx.commit()
        })
        .await
        .map_err(map_tr_err)?;

    Ok(stored)
}

/// List messages oldest-first. With a limit, only the most recent `limit`
/// messages are returned.
pub async fn list_messages(
    db: &Database,
    conversation_id: &str,
    limit: Option<usize>,
) -> Result<Vec<ConversationMessage>, ShopwiseError> {
    let conversation_id = conversation_id.to_string();
    let limit = limit
        .map(|n| i64::try_from(n).unwrap_or(i64::MAX))
        .unwrap_or(-1);

    db.connection()
        .call(move |conn| -> Result<Vec<ConversationMessage>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, conversation_id, from_bot, content, phone, created_at FROM ( \
                     SELECT rowid AS seq, * FROM messages WHERE conversation_id = ?1 \
                     ORDER BY seq DESC LIMIT ?2 \
                 ) ORDER BY seq ASC",
            )?;
            let rows = stmt.query_map(rusqlite::params![conversation_id, limit], |row| {
                Ok(ConversationMessage {
                    id: row.get(0)?,
                    conversation_id: row.get(1)?,
                    from_bot: row.get(2)?,
                    content: row.get(3)?,
                    phone: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}
