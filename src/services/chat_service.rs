// src/services/chat_service.rs

use sqlx::{Acquire, Sqlite};

use crate::{
    common::error::AppError,
    db::{ChatRepository, NotificationRepository},
    models::{audit::AuditAction, chat::ChatMessage},
    services::audit_service::AuditService,
};

#[derive(Clone)]
pub struct ChatService {
    repo: ChatRepository,
    notification_repo: NotificationRepository,
    audit: AuditService,
}

impl ChatService {
    pub fn new(
        repo: ChatRepository,
        notification_repo: NotificationRepository,
        audit: AuditService,
    ) -> Self {
        Self { repo, notification_repo, audit }
    }

    /// Mensagens com id > after, em ordem de criação (o cursor do polling).
    pub async fn list_after(
        &self,
        project_id: i64,
        after: i64,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, AppError> {
        self.repo.list_after(project_id, after, limit).await
    }

    /// Grava a mensagem e notifica o mural na mesma transação.
    pub async fn create<'e, A>(
        &self,
        db: A,
        project_id: i64,
        sender_name: &str,
        message: &str,
    ) -> Result<ChatMessage, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let mut tx = db.begin().await?;

        let msg = self.repo.insert(&mut *tx, project_id, sender_name, message).await?;

        self.notification_repo
            .insert(
                &mut *tx,
                Some(project_id),
                "chat",
                "Nova mensagem no chat",
                &format!("{}: {}", sender_name, message),
            )
            .await?;

        self.audit
            .record(&mut tx, "chat_messages", msg.id, AuditAction::Create, None, Some(&msg))
            .await;

        tx.commit().await?;
        Ok(msg)
    }

    pub async fn delete<'e, A>(&self, db: A, id: i64) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let old = self.repo.get(id).await?.ok_or(AppError::NotFound)?;

        let mut tx = db.begin().await?;

        let rows = self.repo.delete(&mut *tx, id).await?;
        if rows == 0 {
            return Err(AppError::NotFound);
        }

        self.audit
            .record(&mut tx, "chat_messages", id, AuditAction::Delete, Some(&old), None)
            .await;

        tx.commit().await?;
        Ok(())
    }
}
