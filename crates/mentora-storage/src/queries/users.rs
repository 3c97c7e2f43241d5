// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User CRUD operations.

use mentora_core::types::User;
use mentora_core::MentoraError;
use rusqlite::params;

use crate::database::Database;

fn row_to_user(row: &rusqlite::Row<'_>) -> Result<User, rusqlite::Error> {
    let preferences: String = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        clerk_user_id: row.get(1)?,
        email: row.get(2)?,
        name: row.get(3)?,
        preferences: serde_json::from_str(&preferences).unwrap_or(serde_json::Value::Null),
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const SELECT_COLS: &str = "id, clerk_user_id, email, name, preferences, created_at, updated_at";

/// Create a new user.
pub async fn create_user(db: &Database, user: &User) -> Result<(), MentoraError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (id, clerk_user_id, email, name, preferences, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    user.id,
                    user.clerk_user_id,
                    user.email,
                    user.name,
                    user.preferences.to_string(),
                    user.created_at,
                    user.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a user by Clerk identity.
pub async fn get_user_by_clerk_id(
    db: &Database,
    clerk_user_id: &str,
) -> Result<Option<User>, MentoraError> {
    let clerk_user_id = clerk_user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLS} FROM users WHERE clerk_user_id = ?1"
            ))?;
            let result = stmt.query_row(params![clerk_user_id], row_to_user);
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a user by email address.
pub async fn get_user_by_email(db: &Database, email: &str) -> Result<Option<User>, MentoraError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {SELECT_COLS} FROM users WHERE email = ?1"))?;
            let result = stmt.query_row(params![email], row_to_user);
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Replace a user's preference document.
pub async fn update_user_preferences(
    db: &Database,
    user_id: &str,
    preferences: &serde_json::Value,
) -> Result<(), MentoraError> {
    let user_id = user_id.to_string();
    let preferences = preferences.to_string();
    db.connection()
        .call(move |conn| {
            let updated = conn.execute(
                "UPDATE users SET preferences = ?1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2",
                params![preferences, user_id],
            )?;
            if updated == 0 {
                return Err(rusqlite::Error::QueryReturnedNoRows);
            }
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
