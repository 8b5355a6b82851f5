// src/models/project.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Situação da obra ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,    // Em andamento
    Paused,    // Pausada
    Completed, // Concluída
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Project {
    pub id: i64,

    #[schema(example = "Residencial Vila Nova")]
    pub name: String,

    #[schema(example = "Rua das Acácias, 120 - Bloco B")]
    pub description: Option<String>,

    pub status: ProjectStatus,

    #[schema(value_type = String, format = Date)]
    pub start_date: Option<NaiveDate>,

    #[schema(value_type = String, format = Date)]
    pub end_date: Option<NaiveDate>,

    #[schema(example = "250000.0")]
    pub budget: f64,

    #[schema(example = "Eng. Marcos Lima")]
    pub responsible: Option<String>,

    pub image_path: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha da listagem do dashboard: a obra com os agregados que a tela inicial mostra.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ProjectWithStats {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,

    /// Soma das despesas lançadas na obra.
    pub total_spent: f64,
    pub team_count: i64,
    pub material_count: i64,
}
