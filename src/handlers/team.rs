// src/handlers/team.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    models::team::PaymentType,
};

fn default_payment_type() -> PaymentType {
    PaymentType::Diaria
}

// ---
// Payload: funcionário (create e update, semântica PUT)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TeamMemberPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "José Carlos da Silva")]
    pub name: String,

    #[schema(example = "123.456.789-00")]
    pub cpf: Option<String>,

    #[schema(example = "Pedreiro")]
    pub role: Option<String>,

    #[serde(default = "default_payment_type")]
    pub payment_type: PaymentType,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "O valor não pode ser negativo."))]
    pub payment_value: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "A diária não pode ser negativa."))]
    pub daily_rate: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "O valor da empreita não pode ser negativo."))]
    pub contract_value: f64,

    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_path: Option<String>,

    /// Obra principal, opcional.
    pub project_id: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TeamQuery {
    pub project_id: Option<i64>,
}

// GET /api/team
#[utoipa::path(
    get,
    path = "/api/team",
    tag = "Equipe",
    params(TeamQuery),
    responses(
        (status = 200, description = "Funcionários", body = Vec<crate::models::team::TeamMember>)
    )
)]
pub async fn list_members(
    State(app_state): State<AppState>,
    Query(query): Query<TeamQuery>,
) -> Result<impl IntoResponse, AppError> {
    let members = app_state.team_service.list_members(query.project_id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(members)))
}

// GET /api/team/{id}
#[utoipa::path(
    get,
    path = "/api/team/{id}",
    tag = "Equipe",
    params(("id" = i64, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Funcionário encontrado", body = crate::models::team::TeamMember),
        (status = 404, description = "Funcionário não existe")
    )
)]
pub async fn get_member(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let member = app_state.team_service.get_member(id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(member)))
}

// POST /api/team
#[utoipa::path(
    post,
    path = "/api/team",
    tag = "Equipe",
    request_body = TeamMemberPayload,
    responses(
        (status = 201, description = "Funcionário cadastrado", body = crate::models::team::TeamMember),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_member(
    State(app_state): State<AppState>,
    Json(payload): Json<TeamMemberPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let member = app_state
        .team_service
        .create_member(
            &app_state.db_pool,
            &payload.name,
            payload.cpf.as_deref(),
            payload.role.as_deref(),
            payload.payment_type,
            payload.payment_value,
            payload.daily_rate,
            payload.contract_value,
            payload.description.as_deref(),
            payload.address.as_deref(),
            payload.phone.as_deref(),
            payload.image_path.as_deref(),
            payload.project_id,
        )
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(member)))
}

// PUT /api/team/{id}
#[utoipa::path(
    put,
    path = "/api/team/{id}",
    tag = "Equipe",
    params(("id" = i64, Path, description = "ID do funcionário")),
    request_body = TeamMemberPayload,
    responses(
        (status = 200, description = "Funcionário atualizado", body = crate::models::team::TeamMember),
        (status = 404, description = "Funcionário não existe")
    )
)]
pub async fn update_member(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TeamMemberPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let member = app_state
        .team_service
        .update_member(
            &app_state.db_pool,
            id,
            &payload.name,
            payload.cpf.as_deref(),
            payload.role.as_deref(),
            payload.payment_type,
            payload.payment_value,
            payload.daily_rate,
            payload.contract_value,
            payload.description.as_deref(),
            payload.address.as_deref(),
            payload.phone.as_deref(),
            payload.image_path.as_deref(),
            payload.project_id,
        )
        .await?;

    Ok((StatusCode::OK, ApiResponse::ok(member)))
}

// DELETE /api/team/{id}
#[utoipa::path(
    delete,
    path = "/api/team/{id}",
    tag = "Equipe",
    params(("id" = i64, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Funcionário removido"),
        (status = 404, description = "Funcionário não existe")
    )
)]
pub async fn delete_member(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.team_service.delete_member(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}

// ---
// Vínculos obra x funcionário
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssignmentPayload {
    #[validate(required(message = "O campo 'team_member_id' é obrigatório."))]
    pub team_member_id: Option<i64>,

    #[validate(required(message = "O campo 'project_id' é obrigatório."))]
    pub project_id: Option<i64>,

    pub payment_type: Option<PaymentType>,

    #[validate(range(min = 0.0, message = "O valor não pode ser negativo."))]
    pub payment_value: Option<f64>,

    pub role: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,

    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAssignmentPayload {
    pub payment_type: Option<PaymentType>,

    #[validate(range(min = 0.0, message = "O valor não pode ser negativo."))]
    pub payment_value: Option<f64>,

    pub role: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,

    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssignmentsQuery {
    pub member_id: Option<i64>,
    pub project_id: Option<i64>,
}

// GET /api/team/assignments
#[utoipa::path(
    get,
    path = "/api/team/assignments",
    tag = "Equipe",
    params(AssignmentsQuery),
    responses(
        (status = 200, description = "Vínculos", body = Vec<crate::models::team::ProjectTeamAssignment>)
    )
)]
pub async fn list_assignments(
    State(app_state): State<AppState>,
    Query(query): Query<AssignmentsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let assignments = app_state
        .team_service
        .list_assignments(query.member_id, query.project_id)
        .await?;
    Ok((StatusCode::OK, ApiResponse::ok(assignments)))
}

// POST /api/team/assignments
#[utoipa::path(
    post,
    path = "/api/team/assignments",
    tag = "Equipe",
    request_body = CreateAssignmentPayload,
    responses(
        (status = 201, description = "Vínculo criado", body = crate::models::team::ProjectTeamAssignment),
        (status = 409, description = "Funcionário já vinculado a esta obra")
    )
)]
pub async fn create_assignment(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateAssignmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let assignment = app_state
        .team_service
        .create_assignment(
            &app_state.db_pool,
            payload.team_member_id.unwrap(),
            payload.project_id.unwrap(),
            payload.payment_type,
            payload.payment_value,
            payload.role.as_deref(),
            payload.start_date,
            payload.end_date,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(assignment)))
}

// PUT /api/team/assignments/{id}
#[utoipa::path(
    put,
    path = "/api/team/assignments/{id}",
    tag = "Equipe",
    params(("id" = i64, Path, description = "ID do vínculo")),
    request_body = UpdateAssignmentPayload,
    responses(
        (status = 200, description = "Vínculo atualizado", body = crate::models::team::ProjectTeamAssignment),
        (status = 404, description = "Vínculo não existe")
    )
)]
pub async fn update_assignment(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAssignmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let assignment = app_state
        .team_service
        .update_assignment(
            &app_state.db_pool,
            id,
            payload.payment_type,
            payload.payment_value,
            payload.role.as_deref(),
            payload.start_date,
            payload.end_date,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, ApiResponse::ok(assignment)))
}

// DELETE /api/team/assignments/{id}
#[utoipa::path(
    delete,
    path = "/api/team/assignments/{id}",
    tag = "Equipe",
    params(("id" = i64, Path, description = "ID do vínculo")),
    responses(
        (status = 200, description = "Vínculo removido"),
        (status = 404, description = "Vínculo não existe")
    )
)]
pub async fn delete_assignment(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.team_service.delete_assignment(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}

// ---
// Apontamentos de horas
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTimeEntryPayload {
    #[validate(required(message = "O campo 'team_member_id' é obrigatório."))]
    pub team_member_id: Option<i64>,

    #[validate(required(message = "O campo 'project_id' é obrigatório."))]
    pub project_id: Option<i64>,

    #[validate(required(message = "O campo 'work_date' é obrigatório."))]
    #[schema(value_type = Option<String>, format = Date)]
    pub work_date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "As horas não podem ser negativas."))]
    pub hours_worked: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Os dias não podem ser negativos."))]
    pub days_worked: f64,

    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTimeEntryPayload {
    #[validate(required(message = "O campo 'work_date' é obrigatório."))]
    #[schema(value_type = Option<String>, format = Date)]
    pub work_date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "As horas não podem ser negativas."))]
    pub hours_worked: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Os dias não podem ser negativos."))]
    pub days_worked: f64,

    pub description: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TimeEntriesQuery {
    pub member_id: Option<i64>,
    pub project_id: Option<i64>,
    /// Início do período (inclusive).
    pub from: Option<NaiveDate>,
    /// Fim do período (inclusive).
    pub to: Option<NaiveDate>,
}

// GET /api/team/time-entries
#[utoipa::path(
    get,
    path = "/api/team/time-entries",
    tag = "Equipe",
    params(TimeEntriesQuery),
    responses(
        (status = 200, description = "Apontamentos", body = Vec<crate::models::team::TimeEntry>)
    )
)]
pub async fn list_time_entries(
    State(app_state): State<AppState>,
    Query(query): Query<TimeEntriesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state
        .team_service
        .list_time_entries(query.member_id, query.project_id, query.from, query.to)
        .await?;
    Ok((StatusCode::OK, ApiResponse::ok(entries)))
}

// POST /api/team/time-entries
#[utoipa::path(
    post,
    path = "/api/team/time-entries",
    tag = "Equipe",
    request_body = CreateTimeEntryPayload,
    responses(
        (status = 201, description = "Apontamento registrado", body = crate::models::team::TimeEntry),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_time_entry(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTimeEntryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let entry = app_state
        .team_service
        .create_time_entry(
            &app_state.db_pool,
            payload.team_member_id.unwrap(),
            payload.project_id.unwrap(),
            payload.work_date.unwrap(),
            payload.hours_worked,
            payload.days_worked,
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(entry)))
}

// PUT /api/team/time-entries/{id}
#[utoipa::path(
    put,
    path = "/api/team/time-entries/{id}",
    tag = "Equipe",
    params(("id" = i64, Path, description = "ID do apontamento")),
    request_body = UpdateTimeEntryPayload,
    responses(
        (status = 200, description = "Apontamento atualizado", body = crate::models::team::TimeEntry),
        (status = 404, description = "Apontamento não existe")
    )
)]
pub async fn update_time_entry(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTimeEntryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let entry = app_state
        .team_service
        .update_time_entry(
            &app_state.db_pool,
            id,
            payload.work_date.unwrap(),
            payload.hours_worked,
            payload.days_worked,
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, ApiResponse::ok(entry)))
}

// DELETE /api/team/time-entries/{id}
#[utoipa::path(
    delete,
    path = "/api/team/time-entries/{id}",
    tag = "Equipe",
    params(("id" = i64, Path, description = "ID do apontamento")),
    responses(
        (status = 200, description = "Apontamento removido"),
        (status = 404, description = "Apontamento não existe")
    )
)]
pub async fn delete_time_entry(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.team_service.delete_time_entry(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}
