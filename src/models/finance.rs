// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Tipo de lançamento ---
// A coluna chama `kind` (TYPE é palavra reservada demais para o gosto de todo
// mundo), mas o JSON expõe `type`, que é o nome que o dashboard usa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense, // Despesa
    Revenue, // Receita
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Transaction {
    pub id: i64,
    pub project_id: i64,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    #[schema(example = "Compra de vergalhão 10mm")]
    pub description: String,

    #[schema(example = "1530.75")]
    pub amount: f64,

    #[schema(value_type = String, format = Date)]
    pub transaction_date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

// --- Resumo financeiro (?summary=1) ---
// Orçamento x gasto de uma obra (ou do conjunto, quando project_id não é passado).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransactionSummary {
    pub expense_total: f64,
    pub revenue_total: f64,
    pub budget: f64,
    /// budget - expense_total
    pub remaining_budget: f64,
}
