// src/handlers/transactions.rs

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
    models::finance::TransactionKind,
};

// ---
// Payload: lançamento financeiro
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTransactionPayload {
    #[validate(required(message = "O campo 'project_id' é obrigatório."))]
    pub project_id: Option<i64>,

    #[serde(rename = "type")]
    #[validate(required(message = "O campo 'type' é obrigatório."))]
    pub kind: Option<TransactionKind>,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    #[schema(example = "Compra de vergalhão 10mm")]
    pub description: String,

    #[validate(
        required(message = "O campo 'amount' é obrigatório."),
        range(min = 0.0, message = "O valor não pode ser negativo.")
    )]
    pub amount: Option<f64>,

    /// Se não vier, vale a data de hoje.
    #[schema(value_type = Option<String>, format = Date)]
    pub transaction_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTransactionPayload {
    #[serde(rename = "type")]
    #[validate(required(message = "O campo 'type' é obrigatório."))]
    pub kind: Option<TransactionKind>,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(
        required(message = "O campo 'amount' é obrigatório."),
        range(min = 0.0, message = "O valor não pode ser negativo.")
    )]
    pub amount: Option<f64>,

    #[schema(value_type = Option<String>, format = Date)]
    pub transaction_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransactionsQuery {
    pub project_id: Option<i64>,

    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,

    /// Com summary=1 devolve orçamento x realizado em vez da lista.
    pub summary: Option<i64>,
}

// GET /api/transactions (+?summary=1)
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Financeiro",
    params(TransactionsQuery),
    responses(
        (status = 200, description = "Lançamentos (ou resumo com summary=1)", body = Vec<crate::models::finance::Transaction>)
    )
)]
pub async fn list_transactions(
    State(app_state): State<AppState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, AppError> {
    if query.summary == Some(1) {
        let summary = app_state.finance_service.summary(query.project_id).await?;
        return Ok((StatusCode::OK, ApiResponse::ok(summary)).into_response());
    }

    let transactions = app_state.finance_service.list(query.project_id, query.kind).await?;
    Ok((StatusCode::OK, ApiResponse::ok(transactions)).into_response())
}

// GET /api/transactions/{id}
#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    tag = "Financeiro",
    params(("id" = i64, Path, description = "ID do lançamento")),
    responses(
        (status = 200, description = "Lançamento encontrado", body = crate::models::finance::Transaction),
        (status = 404, description = "Lançamento não existe")
    )
)]
pub async fn get_transaction(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let transaction = app_state.finance_service.get(id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(transaction)))
}

// POST /api/transactions
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Financeiro",
    request_body = CreateTransactionPayload,
    responses(
        (status = 201, description = "Lançamento criado", body = crate::models::finance::Transaction),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let transaction = app_state
        .finance_service
        .create(
            &app_state.db_pool,
            payload.project_id.unwrap(),
            payload.kind.unwrap(),
            &payload.description,
            payload.amount.unwrap(),
            payload.transaction_date.unwrap_or_else(|| Utc::now().date_naive()),
        )
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(transaction)))
}

// PUT /api/transactions/{id}
#[utoipa::path(
    put,
    path = "/api/transactions/{id}",
    tag = "Financeiro",
    params(("id" = i64, Path, description = "ID do lançamento")),
    request_body = UpdateTransactionPayload,
    responses(
        (status = 200, description = "Lançamento atualizado", body = crate::models::finance::Transaction),
        (status = 404, description = "Lançamento não existe")
    )
)]
pub async fn update_transaction(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let transaction = app_state
        .finance_service
        .update(
            &app_state.db_pool,
            id,
            payload.kind.unwrap(),
            &payload.description,
            payload.amount.unwrap(),
            payload.transaction_date.unwrap_or_else(|| Utc::now().date_naive()),
        )
        .await?;

    Ok((StatusCode::OK, ApiResponse::ok(transaction)))
}

// DELETE /api/transactions/{id}
#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    tag = "Financeiro",
    params(("id" = i64, Path, description = "ID do lançamento")),
    responses(
        (status = 200, description = "Lançamento removido"),
        (status = 404, description = "Lançamento não existe")
    )
)]
pub async fn delete_transaction(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.finance_service.delete(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}
