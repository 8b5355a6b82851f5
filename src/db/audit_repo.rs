// src/db/audit_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::audit::{AuditAction, AuditEntry},
};

#[derive(Clone)]
pub struct AuditRepository {
    pool: SqlitePool,
}

impl AuditRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Grava uma linha na trilha. Roda dentro da transação do caller para que
    /// a auditoria seja durável se e somente se a escrita principal for.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        table_name: &str,
        record_id: i64,
        action: AuditAction,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO audit_history
                (table_name, record_id, action, field_name, old_value, new_value, changed_at)
            VALUES (?1, ?2, ?3, NULL, ?4, ?5, ?6)
            "#,
        )
        .bind(table_name)
        .bind(record_id)
        .bind(action)
        .bind(old_value)
        .bind(new_value)
        .bind(Utc::now())
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn list(
        &self,
        table_name: Option<&str>,
        record_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<AuditEntry>, AppError> {
        let entries = sqlx::query_as::<_, AuditEntry>(
            r#"
            SELECT * FROM audit_history
             WHERE (?1 IS NULL OR table_name = ?1)
               AND (?2 IS NULL OR record_id = ?2)
             ORDER BY changed_at DESC, id DESC
             LIMIT ?3
            "#,
        )
        .bind(table_name)
        .bind(record_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}
