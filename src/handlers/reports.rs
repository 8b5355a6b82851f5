// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
};

#[derive(Debug, Clone, Copy, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    ProjectDetail,
    InventoryMaterials,
    TeamHours,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    #[serde(rename = "type")]
    #[param(inline)]
    pub report_type: ReportType,

    /// Obrigatório para project_detail; opcional em inventory_materials.
    pub project_id: Option<i64>,
}

// GET /api/reports?type=...
// Devolve a estrutura agregada pronta para o dashboard renderizar/imprimir.
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "Relatórios",
    params(ReportQuery),
    responses(
        (status = 200, description = "Relatório composto"),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 404, description = "Obra não existe")
    )
)]
pub async fn get_report(
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, AppError> {
    match query.report_type {
        ReportType::ProjectDetail => {
            let Some(project_id) = query.project_id else {
                let mut err = ValidationError::new("required");
                err.message = Some("O relatório de obra exige 'project_id'.".into());
                let mut errors = ValidationErrors::new();
                errors.add("project_id", err);
                return Err(AppError::ValidationError(errors));
            };
            let report = app_state.report_service.project_detail(project_id).await?;
            Ok((StatusCode::OK, ApiResponse::ok(report)).into_response())
        }
        ReportType::InventoryMaterials => {
            let report = app_state.report_service.inventory_materials(query.project_id).await?;
            Ok((StatusCode::OK, ApiResponse::ok(report)).into_response())
        }
        ReportType::TeamHours => {
            let report = app_state.report_service.team_hours().await?;
            Ok((StatusCode::OK, ApiResponse::ok(report)).into_response())
        }
    }
}
