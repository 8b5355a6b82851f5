// src/db/project_repo.rs

use chrono::{NaiveDate, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::project::{Project, ProjectStatus, ProjectWithStats},
};

#[derive(Clone)]
pub struct ProjectRepository {
    pool: SqlitePool,
}

impl ProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura
    // ---

    /// Listagem do dashboard: cada obra com gasto total, tamanho da equipe e
    /// contagem de materiais.
    pub async fn list_with_stats(&self) -> Result<Vec<ProjectWithStats>, AppError> {
        let rows = sqlx::query_as::<_, ProjectWithStats>(
            r#"
            SELECT p.*,
                (SELECT COALESCE(SUM(t.amount), 0.0)
                   FROM transactions t
                  WHERE t.project_id = p.id AND t.kind = 'expense') AS total_spent,
                (SELECT COUNT(*)
                   FROM project_team_assignments a
                  WHERE a.project_id = p.id) AS team_count,
                (SELECT COUNT(*)
                   FROM materials m
                  WHERE m.project_id = p.id) AS material_count
            FROM projects p
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    // ---
    // Escrita (transacional)
    // ---

    pub async fn insert<'e, E>(
        &self,
        executor: E,
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
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects
                (name, description, status, start_date, end_date, budget, responsible, image_path, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(status)
        .bind(start_date)
        .bind(end_date)
        .bind(budget)
        .bind(responsible)
        .bind(image_path)
        .bind(now)
        .fetch_one(executor)
        .await?;
        Ok(project)
    }

    /// Substituição integral do registro (semântica PUT).
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        name: &str,
        description: Option<&str>,
        status: ProjectStatus,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        budget: f64,
        responsible: Option<&str>,
        image_path: Option<&str>,
    ) -> Result<Option<Project>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
               SET name = ?2, description = ?3, status = ?4, start_date = ?5,
                   end_date = ?6, budget = ?7, responsible = ?8, image_path = ?9,
                   updated_at = ?10
             WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(status)
        .bind(start_date)
        .bind(end_date)
        .bind(budget)
        .bind(responsible)
        .bind(image_path)
        .bind(Utc::now())
        .fetch_optional(executor)
        .await?;
        Ok(project)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
