// src/db/notification_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::notification::Notification};

#[derive(Clone)]
pub struct NotificationRepository {
    pool: SqlitePool,
}

impl NotificationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        project_id: Option<i64>,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
             WHERE (?1 IS NULL OR project_id = ?1)
               AND (?2 = 0 OR is_read = 0)
             ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(project_id)
        .bind(unread_only)
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        project_id: Option<i64>,
        kind: &str,
        title: &str,
        message: &str,
    ) -> Result<Notification, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (project_id, kind, title, message, is_read, created_at)
            VALUES (?1, ?2, ?3, ?4, 0, ?5)
            RETURNING *
            "#,
        )
        .bind(project_id)
        .bind(kind)
        .bind(title)
        .bind(message)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
        Ok(notification)
    }

    pub async fn mark_read<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn mark_all_read<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE is_read = 0")
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM notifications WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
