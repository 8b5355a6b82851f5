// src/handlers/history.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Filtra por tabela (ex.: inventory_items).
    pub table_name: Option<String>,

    /// Junto com table_name, filtra um registro específico.
    pub record_id: Option<i64>,

    /// Padrão 100.
    pub limit: Option<i64>,
}

// GET /api/history
#[utoipa::path(
    get,
    path = "/api/history",
    tag = "Auditoria",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Trilha de auditoria, mais recente primeiro", body = Vec<crate::models::audit::AuditEntry>)
    )
)]
pub async fn list_history(
    State(app_state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state
        .audit_service
        .history(query.table_name.as_deref(), query.record_id, query.limit.unwrap_or(100))
        .await?;
    Ok((StatusCode::OK, ApiResponse::ok(entries)))
}
