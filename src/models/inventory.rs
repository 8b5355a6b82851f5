// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Item de almoxarifado ---
// O saldo (`quantity`) só muda pelo livro-razão: movimentações, entregas
// ou consumo de material. O update de item não mexe em quantity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InventoryItem {
    pub id: i64,

    #[schema(example = "Cimento CP-II 50kg")]
    pub name: String,

    pub description: Option<String>,

    #[schema(example = "120.0")]
    pub quantity: f64,

    #[schema(example = "saco")]
    pub unit: String,

    #[schema(example = "38.5")]
    pub unit_cost: f64,

    /// Abaixo ou igual a este limite o item conta como "estoque baixo".
    pub min_quantity: f64,

    pub image_path: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Movimentação (entrada/saída) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    In,  // Entrada
    Out, // Saída
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InventoryMovement {
    pub id: i64,

    #[schema(example = "SAI-20250312-X7K2P9")]
    pub transaction_code: String,

    pub inventory_id: i64,
    pub project_id: Option<i64>,
    pub movement_type: MovementType,
    pub quantity: f64,

    #[schema(example = "Obra Vila Nova")]
    pub destination: Option<String>,

    pub notes: Option<String>,

    #[schema(value_type = String, format = Date)]
    pub movement_date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

// --- Entrega a cliente ---
// total_value é congelado na criação (quantity * unit_price) e nunca recalculado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InventoryDelivery {
    pub id: i64,

    #[schema(example = "ENT-20250312-A4B7C1")]
    pub delivery_code: String,

    pub inventory_id: i64,
    pub project_id: Option<i64>,

    #[schema(example = "Construtora Horizonte")]
    pub client_name: String,

    pub quantity: f64,
    pub unit_price: f64,
    pub total_value: f64,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

// --- Resumo do almoxarifado (?summary=1) ---
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InventorySummary {
    pub total_items: i64,
    /// Soma de quantity * unit_cost de todos os itens.
    pub total_value: f64,
    pub low_stock_items: i64,
}
