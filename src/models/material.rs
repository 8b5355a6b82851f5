// src/models/material.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Material lançado em uma obra. Quando `inventory_id` está preenchido, o
// material saiu do almoxarifado: a criação debita o saldo do item e gera uma
// movimentação de saída com o mesmo `transaction_code`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Material {
    pub id: i64,
    pub project_id: i64,
    pub inventory_id: Option<i64>,

    #[schema(example = "Areia média")]
    pub name: String,

    pub description: Option<String>,

    pub quantity: f64,

    #[schema(example = "m3")]
    pub unit: String,

    pub cost: f64,

    #[schema(example = "SAI-20250312-Q8W3E2")]
    pub transaction_code: Option<String>,

    pub image_path: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
