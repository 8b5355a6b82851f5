// src/services/project_service.rs

use chrono::NaiveDate;
use sqlx::{Acquire, Sqlite};

use crate::{
    common::error::AppError,
    db::ProjectRepository,
    models::{
        audit::AuditAction,
        project::{Project, ProjectStatus, ProjectWithStats},
    },
    services::audit_service::AuditService,
};

#[derive(Clone)]
pub struct ProjectService {
    repo: ProjectRepository,
    audit: AuditService,
}

impl ProjectService {
    pub fn new(repo: ProjectRepository, audit: AuditService) -> Self {
        Self { repo, audit }
    }

    pub async fn list(&self) -> Result<Vec<ProjectWithStats>, AppError> {
        self.repo.list_with_stats().await
    }

    pub async fn get(&self, id: i64) -> Result<Project, AppError> {
        self.repo.get(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn create<'e, A>(
        &self,
        db: A,
        name: &str,
        description: Option<&str>,
        status: ProjectStatus,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        budget: f64,
        responsible: Option<&str>,
        image_path: Option<&str>,
    ) -> Result<Project, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let mut tx = db.begin().await?;

        let project = self
            .repo
            .insert(
                &mut *tx,
                name,
                description,
                status,
                start_date,
                end_date,
                budget,
                responsible,
                image_path,
            )
            .await?;

        self.audit
            .record(&mut tx, "projects", project.id, AuditAction::Create, None, Some(&project))
            .await;

        tx.commit().await?;
        Ok(project)
    }

    pub async fn update<'e, A>(
        &self,
        db: A,
        id: i64,
        name: &str,
        description: Option<&str>,
        status: ProjectStatus,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        budget: f64,
        responsible: Option<&str>,
        image_path: Option<&str>,
    ) -> Result<Project, AppError>
    where
        A: Acquire<'e, Database = Sqlite>,
    {
        let old = self.repo.get(id).await?.ok_or(AppError::NotFound)?;

        let mut tx = db.begin().await?;

        let project = self
            .repo
            .update(
                &mut *tx,
                id,
                name,
                description,
                status,
                start_date,
                end_date,
                budget,
                responsible,
                image_path,
            )
            .await?
            .ok_or(AppError::NotFound)?;

        self.audit
            .record(&mut tx, "projects", id, AuditAction::Update, Some(&old), Some(&project))
            .await;

        tx.commit().await?;
        Ok(project)
    }

    /// Apaga a obra. Os filhos (materiais, lançamentos, fotos, chat...) caem
    /// em cascata pelas FKs; movimentações de estoque ficam com project_id nulo.
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
            .record(&mut tx, "projects", id, AuditAction::Delete, Some(&old), None)
            .await;

        tx.commit().await?;
        Ok(())
    }
}
