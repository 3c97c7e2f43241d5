// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Learning plan persistence.
//!
//! The full plan document is stored as a JSON blob in `plan_data`; title and
//! subject are denormalized columns for listing without deserialization.

use mentora_core::types::StoredPlan;
use mentora_core::MentoraError;
use rusqlite::params;

use crate::database::Database;

fn row_to_plan(row: &rusqlite::Row<'_>) -> Result<StoredPlan, rusqlite::Error> {
    let plan_data: String = row.get(4)?;
    Ok(StoredPlan {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        subject: row.get(3)?,
        plan_data: serde_json::from_str(&plan_data).unwrap_or(serde_json::Value::Null),
        created_at: row.get(5)?,
    })
}

/// Insert a plan row.
pub async fn insert_plan(db: &Database, plan: &StoredPlan) -> Result<(), MentoraError> {
    let plan = plan.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO learning_plans (id, user_id, title, subject, plan_data, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    plan.id,
                    plan.user_id,
                    plan.title,
                    plan.subject,
                    plan.plan_data.to_string(),
                    plan.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a plan by ID.
pub async fn get_plan(db: &Database, id: &str) -> Result<Option<StoredPlan>, MentoraError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, title, subject, plan_data, created_at
                 FROM learning_plans WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], row_to_plan);
            match result {
                Ok(plan) => Ok(Some(plan)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List all plans for a user, newest first.
pub async fn list_plans_for_user(
    db: &Database,
    user_id: &str,
) -> Result<Vec<StoredPlan>, MentoraError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, title, subject, plan_data, created_at
                 FROM learning_plans WHERE user_id = ?1 ORDER BY created_at DESC",
            )?;
            let rows = stmt.query_map(params![user_id], row_to_plan)?;
            let mut plans = Vec::new();
            for row in rows {
                plans.push(row?);
            }
            Ok(plans)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
