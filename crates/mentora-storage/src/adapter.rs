// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use mentora_config::model::StorageConfig;
use mentora_core::types::{AppSetting, ChatMessageRow, ChatSessionRow, StoredPlan, User};
use mentora_core::{AdapterType, HealthStatus, MentoraError, ServiceAdapter, StorageAdapter};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`StorageAdapter::initialize`] is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, MentoraError> {
        self.db.get().ok_or_else(|| MentoraError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl ServiceAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, MentoraError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MentoraError> {
        // Shutdown delegates to close if the DB was initialized.
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), MentoraError> {
        let path = self.config.database_path.clone();
        let db = Database::open(&path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| MentoraError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), MentoraError> {
        self.db()?.close().await
    }

    // --- User operations ---

    async fn create_user(&self, user: &User) -> Result<(), MentoraError> {
        queries::users::create_user(self.db()?, user).await
    }

    async fn get_user_by_clerk_id(
        &self,
        clerk_user_id: &str,
    ) -> Result<Option<User>, MentoraError> {
        queries::users::get_user_by_clerk_id(self.db()?, clerk_user_id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, MentoraError> {
        queries::users::get_user_by_email(self.db()?, email).await
    }

    async fn update_user_preferences(
        &self,
        user_id: &str,
        preferences: &serde_json::Value,
    ) -> Result<(), MentoraError> {
        queries::users::update_user_preferences(self.db()?, user_id, preferences).await
    }

    // --- Plan operations ---

    async fn insert_plan(&self, plan: &StoredPlan) -> Result<(), MentoraError> {
        queries::plans::insert_plan(self.db()?, plan).await
    }

    async fn get_plan(&self, id: &str) -> Result<Option<StoredPlan>, MentoraError> {
        queries::plans::get_plan(self.db()?, id).await
    }

    async fn list_plans_for_user(&self, user_id: &str) -> Result<Vec<StoredPlan>, MentoraError> {
        queries::plans::list_plans_for_user(self.db()?, user_id).await
    }

    // --- Chat persistence ---

    async fn create_chat_session(&self, session: &ChatSessionRow) -> Result<(), MentoraError> {
        queries::chat::create_chat_session(self.db()?, session).await
    }

    async fn list_chat_sessions_for_user(
        &self,
        clerk_user_id: &str,
    ) -> Result<Vec<ChatSessionRow>, MentoraError> {
        queries::chat::list_chat_sessions_for_user(self.db()?, clerk_user_id).await
    }

    async fn insert_chat_message(&self, message: &ChatMessageRow) -> Result<(), MentoraError> {
        queries::chat::insert_chat_message(self.db()?, message).await
    }

    async fn list_chat_messages(
        &self,
        session_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ChatMessageRow>, MentoraError> {
        queries::chat::list_chat_messages(self.db()?, session_id, limit).await
    }

    // --- Application settings ---

    async fn get_setting(&self, key: &str) -> Result<Option<AppSetting>, MentoraError> {
        queries::settings::get_setting(self.db()?, key).await
    }

    async fn put_setting(&self, key: &str, value: &str) -> Result<(), MentoraError> {
        queries::settings::put_setting(self.db()?, key, value).await
    }
}
