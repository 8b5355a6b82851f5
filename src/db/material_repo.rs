// src/db/material_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::material::Material};

#[derive(Clone)]
pub struct MaterialRepository {
    pool: SqlitePool,
}

impl MaterialRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_by_project(&self, project_id: i64) -> Result<Vec<Material>, AppError> {
        let materials = sqlx::query_as::<_, Material>(
            "SELECT * FROM materials WHERE project_id = ?1 ORDER BY created_at DESC, id DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(materials)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Material>, AppError> {
        let material = sqlx::query_as::<_, Material>("SELECT * FROM materials WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(material)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        project_id: i64,
        inventory_id: Option<i64>,
        name: &str,
        description: Option<&str>,
        quantity: f64,
        unit: &str,
        cost: f64,
        transaction_code: Option<&str>,
        image_path: Option<&str>,
    ) -> Result<Material, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();
        let material = sqlx::query_as::<_, Material>(
            r#"
            INSERT INTO materials
                (project_id, inventory_id, name, description, quantity, unit, cost,
                 transaction_code, image_path, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
            RETURNING *
            "#,
        )
        .bind(project_id)
        .bind(inventory_id)
        .bind(name)
        .bind(description)
        .bind(quantity)
        .bind(unit)
        .bind(cost)
        .bind(transaction_code)
        .bind(image_path)
        .bind(now)
        .fetch_one(executor)
        .await?;
        Ok(material)
    }

    /// Edita o lançamento em si. Não mexe no estoque: o consumo já registrado
    /// fica valendo, só os dados cadastrais mudam.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        name: &str,
        description: Option<&str>,
        quantity: f64,
        unit: &str,
        cost: f64,
        image_path: Option<&str>,
    ) -> Result<Option<Material>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let material = sqlx::query_as::<_, Material>(
            r#"
            UPDATE materials
               SET name = ?2, description = ?3, quantity = ?4, unit = ?5,
                   cost = ?6, image_path = ?7, updated_at = ?8
             WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(quantity)
        .bind(unit)
        .bind(cost)
        .bind(image_path)
        .bind(Utc::now())
        .fetch_optional(executor)
        .await?;
        Ok(material)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM materials WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
