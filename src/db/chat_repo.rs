// src/db/chat_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::chat::ChatMessage};

#[derive(Clone)]
pub struct ChatRepository {
    pool: SqlitePool,
}

impl ChatRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Polling por cursor: devolve só mensagens com id > after, em ordem de
    /// criação, para o dashboard anexar no fim da conversa.
    pub async fn list_after(
        &self,
        project_id: i64,
        after: i64,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, AppError> {
        let messages = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT * FROM chat_messages
             WHERE project_id = ?1 AND id > ?2
             ORDER BY id ASC
             LIMIT ?3
            "#,
        )
        .bind(project_id)
        .bind(after)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        project_id: i64,
        sender_name: &str,
        message: &str,
    ) -> Result<ChatMessage, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let msg = sqlx::query_as::<_, ChatMessage>(
            r#"
            INSERT INTO chat_messages (project_id, sender_name, message, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING *
            "#,
        )
        .bind(project_id)
        .bind(sender_name)
        .bind(message)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
        Ok(msg)
    }

    pub async fn get(&self, id: i64) -> Result<Option<ChatMessage>, AppError> {
        let msg = sqlx::query_as::<_, ChatMessage>("SELECT * FROM chat_messages WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(msg)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM chat_messages WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
