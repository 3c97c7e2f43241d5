// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted chat session and message operations.

use mentora_core::types::{ChatMessageRow, ChatSessionRow};
use mentora_core::MentoraError;
use rusqlite::params;

use crate::database::Database;

fn row_to_session(row: &rusqlite::Row<'_>) -> Result<ChatSessionRow, rusqlite::Error> {
    Ok(ChatSessionRow {
        id: row.get(0)?,
        clerk_user_id: row.get(1)?,
        title: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

fn row_to_message(row: &rusqlite::Row<'_>) -> Result<ChatMessageRow, rusqlite::Error> {
    Ok(ChatMessageRow {
        id: row.get(0)?,
        session_id: row.get(1)?,
        sender: row.get(2)?,
        content: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Create a chat session header.
pub async fn create_chat_session(
    db: &Database,
    session: &ChatSessionRow,
) -> Result<(), MentoraError> {
    let session = session.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO chat_sessions (id, clerk_user_id, title, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    session.id,
                    session.clerk_user_id,
                    session.title,
                    session.created_at,
                    session.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List chat sessions for a user, most recently updated first.
pub async fn list_chat_sessions_for_user(
    db: &Database,
    clerk_user_id: &str,
) -> Result<Vec<ChatSessionRow>, MentoraError> {
    let clerk_user_id = clerk_user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, clerk_user_id, title, created_at, updated_at
                 FROM chat_sessions WHERE clerk_user_id = ?1 ORDER BY updated_at DESC",
            )?;
            let rows = stmt.query_map(params![clerk_user_id], row_to_session)?;
            let mut sessions = Vec::new();
            for row in rows {
                sessions.push(row?);
            }
            Ok(sessions)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Append a message and touch the parent session's `updated_at`.
pub async fn insert_chat_message(
    db: &Database,
    message: &ChatMessageRow,
) -> Result<(), MentoraError> {
    let message = message.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO chat_messages (id, session_id, sender, content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    message.id,
                    message.session_id,
                    message.sender,
                    message.content,
                    message.created_at,
                ],
            )?;
            tx.execute(
                "UPDATE chat_sessions SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?1",
                params![message.session_id],
            )?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List messages for a session in chronological order.
pub async fn list_chat_messages(
    db: &Database,
    session_id: &str,
    limit: Option<i64>,
) -> Result<Vec<ChatMessageRow>, MentoraError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut messages = Vec::new();
            match limit {
                Some(n) => {
                    let mut stmt = conn.prepare(
                        "SELECT id, session_id, sender, content, created_at
                         FROM chat_messages WHERE session_id = ?1
                         ORDER BY created_at ASC LIMIT ?2",
                    )?;
                    let rows = stmt.query_map(params![session_id, n], row_to_message)?;
                    for row in rows {
                        messages.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT id, session_id, sender, content, created_at
                         FROM chat_messages WHERE session_id = ?1
                         ORDER BY created_at ASC",
                    )?;
                    let rows = stmt.query_map(params![session_id], row_to_message)?;
                    for row in rows {
                        messages.push(row?);
                    }
                }
            }
            Ok(messages)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
