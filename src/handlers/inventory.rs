// src/handlers/inventory.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    models::inventory::MovementType,
};

// ---
// Payload: item de almoxarifado
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Cimento CP-II 50kg")]
    pub name: String,

    pub description: Option<String>,

    /// Estoque inicial. Depois da criação, o saldo só muda por movimentação.
    #[serde(default)]
    #[validate(range(min = 0.0, message = "A quantidade não pode ser negativa."))]
    pub quantity: f64,

    #[serde(default = "default_unit")]
    pub unit: String,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "O custo não pode ser negativo."))]
    pub unit_cost: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "O limite de estoque baixo não pode ser negativo."))]
    pub min_quantity: f64,

    pub image_path: Option<String>,
}

fn default_unit() -> String {
    "un".to_string()
}

// Update não aceita quantity: edição direta de saldo furaria o livro-razão.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateItemPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub description: Option<String>,

    #[serde(default = "default_unit")]
    pub unit: String,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "O custo não pode ser negativo."))]
    pub unit_cost: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "O limite de estoque baixo não pode ser negativo."))]
    pub min_quantity: f64,

    pub image_path: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryListQuery {
    /// Com summary=1 devolve os agregados em vez da lista.
    pub summary: Option<i64>,
}

// GET /api/inventory (+?summary=1)
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Almoxarifado",
    params(InventoryListQuery),
    responses(
        (status = 200, description = "Itens do almoxarifado (ou resumo com summary=1)", body = Vec<crate::models::inventory::InventoryItem>)
    )
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    Query(query): Query<InventoryListQuery>,
) -> Result<Response, AppError> {
    if query.summary == Some(1) {
        let summary = app_state.inventory_service.summary().await?;
        return Ok((StatusCode::OK, ApiResponse::ok(summary)).into_response());
    }

    let items = app_state.inventory_service.list_items().await?;
    Ok((StatusCode::OK, ApiResponse::ok(items)).into_response())
}

// GET /api/inventory/{id}
#[utoipa::path(
    get,
    path = "/api/inventory/{id}",
    tag = "Almoxarifado",
    params(("id" = i64, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Item encontrado", body = crate::models::inventory::InventoryItem),
        (status = 404, description = "Item não existe")
    )
)]
pub async fn get_item(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state.inventory_service.get_item(id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(item)))
}

// POST /api/inventory
#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "Almoxarifado",
    request_body = CreateItemPayload,
    responses(
        (status = 201, description = "Item criado", body = crate::models::inventory::InventoryItem),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state
        .inventory_service
        .create_item(
            &app_state.db_pool,
            &payload.name,
            payload.description.as_deref(),
            payload.quantity,
            &payload.unit,
            payload.unit_cost,
            payload.min_quantity,
            payload.image_path.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(item)))
}

// PUT /api/inventory/{id}
#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    tag = "Almoxarifado",
    params(("id" = i64, Path, description = "ID do item")),
    request_body = UpdateItemPayload,
    responses(
        (status = 200, description = "Dados cadastrais atualizados", body = crate::models::inventory::InventoryItem),
        (status = 404, description = "Item não existe")
    )
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state
        .inventory_service
        .update_item(
            &app_state.db_pool,
            id,
            &payload.name,
            payload.description.as_deref(),
            &payload.unit,
            payload.unit_cost,
            payload.min_quantity,
            payload.image_path.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, ApiResponse::ok(item)))
}

// DELETE /api/inventory/{id}
#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    tag = "Almoxarifado",
    params(("id" = i64, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Item removido"),
        (status = 404, description = "Item não existe")
    )
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.delete_item(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}

// ---
// Movimentações
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMovementPayload {
    #[validate(required(message = "O campo 'inventory_id' é obrigatório."))]
    pub inventory_id: Option<i64>,

    pub project_id: Option<i64>,

    #[validate(required(message = "O campo 'movement_type' é obrigatório."))]
    pub movement_type: Option<MovementType>,

    #[validate(
        required(message = "O campo 'quantity' é obrigatório."),
        range(min = 0.0, message = "A quantidade não pode ser negativa.")
    )]
    pub quantity: Option<f64>,

    pub destination: Option<String>,
    pub notes: Option<String>,

    /// Se não vier, vale a data de hoje.
    #[schema(value_type = Option<String>, format = Date)]
    pub movement_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MovementsQuery {
    pub inventory_id: Option<i64>,
    pub project_id: Option<i64>,
    pub movement_type: Option<MovementType>,
}

// GET /api/inventory/movements
#[utoipa::path(
    get,
    path = "/api/inventory/movements",
    tag = "Almoxarifado",
    params(MovementsQuery),
    responses(
        (status = 200, description = "Movimentações, mais recentes primeiro", body = Vec<crate::models::inventory::InventoryMovement>)
    )
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    Query(query): Query<MovementsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let movements = app_state
        .inventory_service
        .list_movements(query.inventory_id, query.project_id, query.movement_type)
        .await?;
    Ok((StatusCode::OK, ApiResponse::ok(movements)))
}

// POST /api/inventory/movements
// Movimentações são imutáveis: não existe PUT nem DELETE aqui.
#[utoipa::path(
    post,
    path = "/api/inventory/movements",
    tag = "Almoxarifado",
    request_body = CreateMovementPayload,
    responses(
        (status = 201, description = "Movimentação registrada e saldo ajustado", body = crate::models::inventory::InventoryMovement),
        (status = 400, description = "Dados inválidos ou estoque insuficiente"),
        (status = 404, description = "Item não existe")
    )
)]
pub async fn create_movement(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateMovementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let movement = app_state
        .inventory_service
        .create_movement(
            &app_state.db_pool,
            payload.inventory_id.unwrap(),
            payload.project_id,
            payload.movement_type.unwrap(),
            payload.quantity.unwrap(),
            payload.destination.as_deref(),
            payload.notes.as_deref(),
            payload.movement_date.unwrap_or_else(|| Utc::now().date_naive()),
        )
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(movement)))
}

// ---
// Entregas
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDeliveryPayload {
    #[validate(required(message = "O campo 'inventory_id' é obrigatório."))]
    pub inventory_id: Option<i64>,

    pub project_id: Option<i64>,

    #[validate(length(min = 1, message = "O nome do cliente é obrigatório."))]
    #[schema(example = "Construtora Horizonte")]
    pub client_name: String,

    #[validate(
        required(message = "O campo 'quantity' é obrigatório."),
        range(min = 0.0, message = "A quantidade não pode ser negativa.")
    )]
    pub quantity: Option<f64>,

    #[validate(
        required(message = "O campo 'unit_price' é obrigatório."),
        range(min = 0.0, message = "O preço não pode ser negativo.")
    )]
    pub unit_price: Option<f64>,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeliveriesQuery {
    pub inventory_id: Option<i64>,
    pub project_id: Option<i64>,
}

// GET /api/inventory/deliveries
#[utoipa::path(
    get,
    path = "/api/inventory/deliveries",
    tag = "Almoxarifado",
    params(DeliveriesQuery),
    responses(
        (status = 200, description = "Entregas, mais recentes primeiro", body = Vec<crate::models::inventory::InventoryDelivery>)
    )
)]
pub async fn list_deliveries(
    State(app_state): State<AppState>,
    Query(query): Query<DeliveriesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let deliveries = app_state
        .inventory_service
        .list_deliveries(query.inventory_id, query.project_id)
        .await?;
    Ok((StatusCode::OK, ApiResponse::ok(deliveries)))
}

// GET /api/inventory/deliveries/{id}
#[utoipa::path(
    get,
    path = "/api/inventory/deliveries/{id}",
    tag = "Almoxarifado",
    params(("id" = i64, Path, description = "ID da entrega")),
    responses(
        (status = 200, description = "Entrega encontrada", body = crate::models::inventory::InventoryDelivery),
        (status = 404, description = "Entrega não existe")
    )
)]
pub async fn get_delivery(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let delivery = app_state.inventory_service.get_delivery(id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(delivery)))
}

// POST /api/inventory/deliveries
#[utoipa::path(
    post,
    path = "/api/inventory/deliveries",
    tag = "Almoxarifado",
    request_body = CreateDeliveryPayload,
    responses(
        (status = 201, description = "Entrega registrada e saldo debitado", body = crate::models::inventory::InventoryDelivery),
        (status = 400, description = "Dados inválidos ou estoque insuficiente"),
        (status = 404, description = "Item não existe")
    )
)]
pub async fn create_delivery(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateDeliveryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let delivery = app_state
        .inventory_service
        .create_delivery(
            &app_state.db_pool,
            payload.inventory_id.unwrap(),
            payload.project_id,
            &payload.client_name,
            payload.quantity.unwrap(),
            payload.unit_price.unwrap(),
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(delivery)))
}

// DELETE /api/inventory/deliveries/{id}
#[utoipa::path(
    delete,
    path = "/api/inventory/deliveries/{id}",
    tag = "Almoxarifado",
    params(("id" = i64, Path, description = "ID da entrega")),
    responses(
        (status = 200, description = "Entrega removida e saldo restituído"),
        (status = 404, description = "Entrega não existe")
    )
)]
pub async fn delete_delivery(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.delete_delivery(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}
