// src/handlers/projects.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    models::{
        attachment::{AttachmentKind, OwnerTable},
        project::ProjectStatus,
    },
};

fn default_status() -> ProjectStatus {
    ProjectStatus::Active
}

// ---
// Payload: obra (create e update usam o mesmo formato, semântica PUT)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProjectPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Residencial Vila Nova")]
    pub name: String,

    pub description: Option<String>,

    #[serde(default = "default_status")]
    pub status: ProjectStatus,

    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,

    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "O orçamento não pode ser negativo."))]
    pub budget: f64,

    pub responsible: Option<String>,
    pub image_path: Option<String>,
}

// GET /api/projects
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Obras",
    responses(
        (status = 200, description = "Obras com gasto, equipe e materiais agregados", body = Vec<crate::models::project::ProjectWithStats>)
    )
)]
pub async fn list_projects(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let projects = app_state.project_service.list().await?;
    Ok((StatusCode::OK, ApiResponse::ok(projects)))
}

// GET /api/projects/{id}
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = "Obras",
    params(("id" = i64, Path, description = "ID da obra")),
    responses(
        (status = 200, description = "Obra encontrada", body = crate::models::project::Project),
        (status = 404, description = "Obra não existe")
    )
)]
pub async fn get_project(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let project = app_state.project_service.get(id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(project)))
}

// POST /api/projects
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Obras",
    request_body = ProjectPayload,
    responses(
        (status = 201, description = "Obra criada", body = crate::models::project::Project),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_project(
    State(app_state): State<AppState>,
    Json(payload): Json<ProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let project = app_state
        .project_service
        .create(
            &app_state.db_pool,
            &payload.name,
            payload.description.as_deref(),
            payload.status,
            payload.start_date,
            payload.end_date,
            payload.budget,
            payload.responsible.as_deref(),
            payload.image_path.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(project)))
}

// PUT /api/projects/{id}
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    tag = "Obras",
    params(("id" = i64, Path, description = "ID da obra")),
    request_body = ProjectPayload,
    responses(
        (status = 200, description = "Obra atualizada", body = crate::models::project::Project),
        (status = 404, description = "Obra não existe")
    )
)]
pub async fn update_project(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let project = app_state
        .project_service
        .update(
            &app_state.db_pool,
            id,
            &payload.name,
            payload.description.as_deref(),
            payload.status,
            payload.start_date,
            payload.end_date,
            payload.budget,
            payload.responsible.as_deref(),
            payload.image_path.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, ApiResponse::ok(project)))
}

// DELETE /api/projects/{id}
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    tag = "Obras",
    params(("id" = i64, Path, description = "ID da obra")),
    responses(
        (status = 200, description = "Obra removida"),
        (status = 404, description = "Obra não existe")
    )
)]
pub async fn delete_project(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.project_service.delete(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}

// GET /api/projects/{id}/photos
#[utoipa::path(
    get,
    path = "/api/projects/{id}/photos",
    tag = "Obras",
    params(("id" = i64, Path, description = "ID da obra")),
    responses(
        (status = 200, description = "Fotos da obra", body = Vec<crate::models::attachment::Attachment>)
    )
)]
pub async fn list_project_photos(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let photos = app_state
        .attachment_service
        .list(Some(OwnerTable::Projects), Some(id), Some(AttachmentKind::Image))
        .await?;
    Ok((StatusCode::OK, ApiResponse::ok(photos)))
}
