// src/services/attachment_service.rs

use std::path::{Path, PathBuf};

use sqlx::{Acquire, Sqlite};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AttachmentRepository, NotificationRepository},
    models::{
        attachment::{Attachment, AttachmentKind, OwnerTable},
        audit::AuditAction,
    },
    services::audit_service::AuditService,
};

/// Remove um arquivo sem derrubar a requisição: a linha do banco é a fonte
/// de verdade, o arquivo é limpeza posterior.
pub async fn remove_file_best_effort(path: &str) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!("Não consegui remover o arquivo {}: {}", path, e);
    }
}

// Mantém só o nome base e troca qualquer caractere estranho, para o nome
// vindo do browser não escapar do diretório de uploads.
fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "arquivo".to_string());
    base.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[derive(Clone)]
pub struct AttachmentService {
    repo: AttachmentRepository,
    notification_repo: NotificationRepository,
    audit: AuditService,
    upload_dir: PathBuf,
}

impl AttachmentService {
    pub fn new(
        repo: AttachmentRepository,
        notification_repo: NotificationRepository,
        audit: AuditService,
        upload_dir: PathBuf,
    ) -> Self {
        Self { repo, notification_repo, audit, upload_dir }
    }

    pub async fn list(
        &self,
        owner_table: Option<OwnerTable>,
        record_id: Option<i64>,
        kind: Option<AttachmentKind>,
    ) -> Result<Vec<Attachment>, AppError> {
        self.repo.list(owner_table, record_id, kind).await
    }

    /// Salva o arquivo em disco e registra o anexo. Upload de foto também
    /// avisa o mural de notificações.
    pub async fn store_upload<'e, A>(
        &self,
        db: A,
        kind: AttachmentKind,
        owner_table: Option<OwnerTable>,
        record_id: Option<i64>,
        original_name: &str,
        bytes: &[u8],
        description: Option<&str>,
    ) -> Result<Attachment, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let file_name = sanitize_file_name(original_name);
        let stored_name = format!("{}-{}", Uuid::new_v4(), file_name);
        let full_path = self.upload_dir.join(&stored_name);

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| AppError::InternalServerError(e.into()))?;
        tokio::fs::write(&full_path, bytes)
            .await
            .map_err(|e| AppError::InternalServerError(e.into()))?;

        let file_path = full_path.to_string_lossy().to_string();

        let result: Result<Attachment, AppError> = async {
            let mut tx = db.begin().await?;

            let attachment = self
                .repo
                .insert(&mut *tx, kind, owner_table, record_id, &file_path, &file_name, description)
                .await?;

            if kind == AttachmentKind::Image {
                let project_id = match owner_table {
                    Some(OwnerTable::Projects) => record_id,
                    _ => None,
                };
                self.notification_repo
                    .insert(
                        &mut *tx,
                        project_id,
                        "photo",
                        "Nova foto enviada",
                        &format!("Arquivo {} anexado", file_name),
                    )
                    .await?;
            }

            self.audit
                .record(&mut tx, "attachments", attachment.id, AuditAction::Create, None, Some(&attachment))
                .await;

            tx.commit().await?;
            Ok(attachment)
        }
        .await;

        // Se o banco recusou, o arquivo recém-gravado vira lixo: recolhe.
        if result.is_err() {
            remove_file_best_effort(&file_path).await;
        }
        result
    }

    /// Apaga primeiro a linha (transacional), depois o arquivo (best effort).
    /// Ordem inversa deixaria uma linha apontando para arquivo nenhum.
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
            .record(&mut tx, "attachments", id, AuditAction::Delete, Some(&old), None)
            .await;

        tx.commit().await?;

        remove_file_best_effort(&old.file_path).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directories_and_odd_chars() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("nota fiscal (2).pdf"), "nota_fiscal__2_.pdf");
        assert_eq!(sanitize_file_name("fachada.jpg"), "fachada.jpg");
    }
}
