// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application settings key/value store.

use mentora_core::types::AppSetting;
use mentora_core::MentoraError;
use rusqlite::params;

use crate::database::Database;

/// Get a setting by key.
pub async fn get_setting(db: &Database, key: &str) -> Result<Option<AppSetting>, MentoraError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT key, value, updated_at FROM app_settings WHERE key = ?1")?;
            let result = stmt.query_row(params![key], |row| {
                Ok(AppSetting {
                    key: row.get(0)?,
                    value: row.get(1)?,
                    updated_at: row.get(2)?,
                })
            });
            match result {
                Ok(setting) => Ok(Some(setting)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or replace a setting.
pub async fn put_setting(db: &Database, key: &str, value: &str) -> Result<(), MentoraError> {
    let key = key.to_string();
    let value = value.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO app_settings (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, value],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn put_get_and_overwrite_setting() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();

        assert!(get_setting(&db, "plan_ready_message").await.unwrap().is_none());

        put_setting(&db, "plan_ready_message", "Your plan is ready!")
            .await
            .unwrap();
        let setting = get_setting(&db, "plan_ready_message").await.unwrap().unwrap();
        assert_eq!(setting.value, "Your plan is ready!");

        put_setting(&db, "plan_ready_message", "Updated copy")
            .await
            .unwrap();
        let setting = get_setting(&db, "plan_ready_message").await.unwrap().unwrap();
        assert_eq!(setting.value, "Updated copy");

        db.close().await.unwrap();
    }
}
