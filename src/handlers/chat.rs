// src/handlers/chat.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateChatMessagePayload {
    #[validate(required(message = "O campo 'project_id' é obrigatório."))]
    pub project_id: Option<i64>,

    #[validate(length(min = 1, message = "O remetente é obrigatório."))]
    #[schema(example = "Dona Cida")]
    pub sender_name: String,

    #[validate(length(min = 1, message = "A mensagem não pode ser vazia."))]
    pub message: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChatQuery {
    pub project_id: i64,

    /// Cursor: só mensagens com id maior que este. Padrão 0 (tudo).
    pub after: Option<i64>,

    pub limit: Option<i64>,
}

// GET /api/chat?project_id=P&after=N
// O dashboard faz polling com o último id que recebeu; a resposta vem em
// ordem de criação para anexar direto no fim da conversa.
#[utoipa::path(
    get,
    path = "/api/chat",
    tag = "Chat",
    params(ChatQuery),
    responses(
        (status = 200, description = "Mensagens com id > after, em ordem crescente", body = Vec<crate::models::chat::ChatMessage>)
    )
)]
pub async fn list_messages(
    State(app_state): State<AppState>,
    Query(query): Query<ChatQuery>,
) -> Result<impl IntoResponse, AppError> {
    let messages = app_state
        .chat_service
        .list_after(query.project_id, query.after.unwrap_or(0), query.limit.unwrap_or(100))
        .await?;
    Ok((StatusCode::OK, ApiResponse::ok(messages)))
}

// POST /api/chat
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Chat",
    request_body = CreateChatMessagePayload,
    responses(
        (status = 201, description = "Mensagem gravada (e notificação disparada)", body = crate::models::chat::ChatMessage),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_message(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateChatMessagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let message = app_state
        .chat_service
        .create(
            &app_state.db_pool,
            payload.project_id.unwrap(),
            &payload.sender_name,
            &payload.message,
        )
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(message)))
}

// DELETE /api/chat/{id}
#[utoipa::path(
    delete,
    path = "/api/chat/{id}",
    tag = "Chat",
    params(("id" = i64, Path, description = "ID da mensagem")),
    responses(
        (status = 200, description = "Mensagem removida"),
        (status = 404, description = "Mensagem não existe")
    )
)]
pub async fn delete_message(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.chat_service.delete(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}
