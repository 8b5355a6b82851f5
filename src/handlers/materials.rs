// src/handlers/materials.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    models::attachment::{AttachmentKind, OwnerTable},
};

fn default_unit() -> String {
    "un".to_string()
}

// ---
// Payload: material
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaterialPayload {
    #[validate(required(message = "O campo 'project_id' é obrigatório."))]
    pub project_id: Option<i64>,

    /// Preenchido quando o material sai do almoxarifado: a criação debita o
    /// saldo do item e registra a movimentação de saída.
    pub inventory_id: Option<i64>,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Areia média")]
    pub name: String,

    pub description: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "A quantidade não pode ser negativa."))]
    pub quantity: f64,

    #[serde(default = "default_unit")]
    pub unit: String,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "O custo não pode ser negativo."))]
    pub cost: f64,

    pub image_path: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMaterialPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub description: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "A quantidade não pode ser negativa."))]
    pub quantity: f64,

    #[serde(default = "default_unit")]
    pub unit: String,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "O custo não pode ser negativo."))]
    pub cost: f64,

    pub image_path: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MaterialsQuery {
    pub project_id: Option<i64>,
}

// GET /api/materials?project_id=N
#[utoipa::path(
    get,
    path = "/api/materials",
    tag = "Materiais",
    params(MaterialsQuery),
    responses(
        (status = 200, description = "Materiais da obra", body = Vec<crate::models::material::Material>),
        (status = 400, description = "project_id ausente")
    )
)]
pub async fn list_materials(
    State(app_state): State<AppState>,
    Query(query): Query<MaterialsQuery>,
) -> Result<impl IntoResponse, AppError> {
    // A listagem é sempre por obra; sem project_id não há o que devolver.
    let Some(project_id) = query.project_id else {
        let mut err = ValidationError::new("required");
        err.message = Some("O parâmetro 'project_id' é obrigatório.".into());
        let mut errors = ValidationErrors::new();
        errors.add("project_id", err);
        return Err(AppError::ValidationError(errors));
    };

    let materials = app_state.material_service.list_by_project(project_id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(materials)))
}

// GET /api/materials/{id}
#[utoipa::path(
    get,
    path = "/api/materials/{id}",
    tag = "Materiais",
    params(("id" = i64, Path, description = "ID do material")),
    responses(
        (status = 200, description = "Material encontrado", body = crate::models::material::Material),
        (status = 404, description = "Material não existe")
    )
)]
pub async fn get_material(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let material = app_state.material_service.get(id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(material)))
}

// POST /api/materials
#[utoipa::path(
    post,
    path = "/api/materials",
    tag = "Materiais",
    request_body = CreateMaterialPayload,
    responses(
        (status = 201, description = "Material lançado (e estoque debitado, se veio do almoxarifado)", body = crate::models::material::Material),
        (status = 400, description = "Dados inválidos ou estoque insuficiente")
    )
)]
pub async fn create_material(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateMaterialPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let material = app_state
        .material_service
        .create(
            &app_state.db_pool,
            payload.project_id.unwrap(),
            payload.inventory_id,
            &payload.name,
            payload.description.as_deref(),
            payload.quantity,
            &payload.unit,
            payload.cost,
            payload.image_path.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(material)))
}

// PUT /api/materials/{id}
#[utoipa::path(
    put,
    path = "/api/materials/{id}",
    tag = "Materiais",
    params(("id" = i64, Path, description = "ID do material")),
    request_body = UpdateMaterialPayload,
    responses(
        (status = 200, description = "Material atualizado", body = crate::models::material::Material),
        (status = 404, description = "Material não existe")
    )
)]
pub async fn update_material(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateMaterialPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let material = app_state
        .material_service
        .update(
            &app_state.db_pool,
            id,
            &payload.name,
            payload.description.as_deref(),
            payload.quantity,
            &payload.unit,
            payload.cost,
            payload.image_path.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, ApiResponse::ok(material)))
}

// DELETE /api/materials/{id}
#[utoipa::path(
    delete,
    path = "/api/materials/{id}",
    tag = "Materiais",
    params(("id" = i64, Path, description = "ID do material")),
    responses(
        (status = 200, description = "Material removido"),
        (status = 404, description = "Material não existe")
    )
)]
pub async fn delete_material(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.material_service.delete(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}

// GET /api/materials/{id}/images
#[utoipa::path(
    get,
    path = "/api/materials/{id}/images",
    tag = "Materiais",
    params(("id" = i64, Path, description = "ID do material")),
    responses(
        (status = 200, description = "Imagens do material", body = Vec<crate::models::attachment::Attachment>)
    )
)]
pub async fn list_material_images(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let images = app_state
        .attachment_service
        .list(Some(OwnerTable::Materials), Some(id), Some(AttachmentKind::Image))
        .await?;
    Ok((StatusCode::OK, ApiResponse::ok(images)))
}
