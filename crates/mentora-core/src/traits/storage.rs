// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends.

use async_trait::async_trait;

use crate::error::MentoraError;
use crate::traits::adapter::ServiceAdapter;
use crate::types::{AppSetting, ChatMessageRow, ChatSessionRow, StoredPlan, User};

/// Adapter for storage and persistence backends.
///
/// Storage adapters manage the lifecycle of database connections and provide
/// typed CRUD for users, plans, conversation history, and application settings.
#[async_trait]
pub trait StorageAdapter: ServiceAdapter {
    /// Initializes the storage backend (migrations, connection setup).
    async fn initialize(&self) -> Result<(), MentoraError>;

    /// Closes the storage backend, flushing pending writes and releasing connections.
    async fn close(&self) -> Result<(), MentoraError>;

    // --- User operations ---

    async fn create_user(&self, user: &User) -> Result<(), MentoraError>;

    async fn get_user_by_clerk_id(&self, clerk_user_id: &str)
    -> Result<Option<User>, MentoraError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, MentoraError>;

    async fn update_user_preferences(
        &self,
        user_id: &str,
        preferences: &serde_json::Value,
    ) -> Result<(), MentoraError>;

    // --- Plan operations ---

    async fn insert_plan(&self, plan: &StoredPlan) -> Result<(), MentoraError>;

    async fn get_plan(&self, id: &str) -> Result<Option<StoredPlan>, MentoraError>;

    async fn list_plans_for_user(&self, user_id: &str) -> Result<Vec<StoredPlan>, MentoraError>;

    // --- Chat persistence ---

    async fn create_chat_session(&self, session: &ChatSessionRow) -> Result<(), MentoraError>;

    async fn list_chat_sessions_for_user(
        &self,
        clerk_user_id: &str,
    ) -> Result<Vec<ChatSessionRow>, MentoraError>;

    async fn insert_chat_message(&self, message: &ChatMessageRow) -> Result<(), MentoraError>;

    async fn list_chat_messages(
        &self,
        session_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ChatMessageRow>, MentoraError>;

    // --- Application settings ---

    async fn get_setting(&self, key: &str) -> Result<Option<AppSetting>, MentoraError>;

    async fn put_setting(&self, key: &str, value: &str) -> Result<(), MentoraError>;
}
