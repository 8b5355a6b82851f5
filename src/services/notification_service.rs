// src/services/notification_service.rs

use sqlx::{Acquire, Sqlite};

use crate::{
    common::error::AppError,
    db::NotificationRepository,
    models::notification::Notification,
};

// Notificações são mobiliário do sistema: nascem como efeito colateral de
// outras operações e só mudam pela flag de leitura. Por isso ficam fora da
// trilha de auditoria.
#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
}

impl NotificationService {
    pub fn new(repo: NotificationRepository) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        project_id: Option<i64>,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError> {
        self.repo.list(project_id, unread_only).await
    }

    /// Aviso manual no mural (os automáticos nascem nos serviços de chat e anexos).
    pub async fn create<'e, A>(
        &self,
        db: A,
        project_id: Option<i64>,
        kind: &str,
        title: &str,
        message: &str,
    ) -> Result<Notification, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let mut tx = db.begin().await?;
        let notification = self.repo.insert(&mut *tx, project_id, kind, title, message).await?;
        tx.commit().await?;
        Ok(notification)
    }

    pub async fn mark_read<'e, A>(&self, db: A, id: i64) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let mut tx = db.begin().await?;
        let rows = self.repo.mark_read(&mut *tx, id).await?;
        if rows == 0 {
            return Err(AppError::NotFound);
        }
        tx.commit().await?;
        Ok(())
    }

    /// Marca todas como lidas e devolve quantas eram novas.
    pub async fn mark_all_read<'e, A>(&self, db: A) -> Result<u64, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let mut tx = db.begin().await?;
        let rows = self.repo.mark_all_read(&mut *tx).await?;
        tx.commit().await?;
        Ok(rows)
    }

    pub async fn delete<'e, A>(&self, db: A, id: i64) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let mut tx = db.begin().await?;
        let rows = self.repo.delete(&mut *tx, id).await?;
        if rows == 0 {
            return Err(AppError::NotFound);
        }
        tx.commit().await?;
        Ok(())
    }
}
