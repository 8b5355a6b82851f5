// src/services/audit_service.rs

use serde::Serialize;
use sqlx::SqliteConnection;

use crate::{
    common::error::AppError,
    db::AuditRepository,
    models::audit::{AuditAction, AuditEntry},
};

// O Audit Logger. Grava snapshots JSON do registro inteiro (antes/depois)
// dentro da transação da escrita principal. Uma falha ao gravar auditoria
// NUNCA derruba a operação pai: loga e segue.
#[derive(Clone)]
pub struct AuditService {
    repo: AuditRepository,
}

impl AuditService {
    pub fn new(repo: AuditRepository) -> Self {
        Self { repo }
    }

    pub async fn record<T: Serialize>(
        &self,
        conn: &mut SqliteConnection,
        table_name: &str,
        record_id: i64,
        action: AuditAction,
        old_value: Option<&T>,
        new_value: Option<&T>,
    ) {
        let old = old_value.and_then(|v| serde_json::to_string(v).ok());
        let new = new_value.and_then(|v| serde_json::to_string(v).ok());

        if let Err(e) = self
            .repo
            .insert(&mut *conn, table_name, record_id, action, old.as_deref(), new.as_deref())
            .await
        {
            tracing::warn!(
                "Falha ao gravar auditoria de {}/{} ({:?}): {}",
                table_name,
                record_id,
                action,
                e
            );
        }
    }

    /// Trilha de auditoria, mais recente primeiro. `limit` padrão do handler é 100.
    pub async fn history(
        &self,
        table_name: Option<&str>,
        record_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<AuditEntry>, AppError> {
        self.repo.list(table_name, record_id, limit).await
    }
}
