// src/db/attachment_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::attachment::{Attachment, AttachmentKind, OwnerTable},
};

#[derive(Clone)]
pub struct AttachmentRepository {
    pool: SqlitePool,
}

impl AttachmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        owner_table: Option<OwnerTable>,
        record_id: Option<i64>,
        kind: Option<AttachmentKind>,
    ) -> Result<Vec<Attachment>, AppError> {
        let attachments = sqlx::query_as::<_, Attachment>(
            r#"
            SELECT * FROM attachments
             WHERE (?1 IS NULL OR owner_table = ?1)
               AND (?2 IS NULL OR record_id = ?2)
               AND (?3 IS NULL OR kind = ?3)
             ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner_table)
        .bind(record_id)
        .bind(kind)
        .fetch_all(&self.pool)
        .await?;
        Ok(attachments)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Attachment>, AppError> {
        let attachment = sqlx::query_as::<_, Attachment>("SELECT * FROM attachments WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(attachment)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        kind: AttachmentKind,
        owner_table: Option<OwnerTable>,
        record_id: Option<i64>,
        file_path: &str,
        file_name: &str,
        description: Option<&str>,
    ) -> Result<Attachment, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let attachment = sqlx::query_as::<_, Attachment>(
            r#"
            INSERT INTO attachments
                (kind, owner_table, record_id, file_path, file_name, description, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING *
            "#,
        )
        .bind(kind)
        .bind(owner_table)
        .bind(record_id)
        .bind(file_path)
        .bind(file_name)
        .bind(description)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
        Ok(attachment)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM attachments WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
