// src/handlers/notifications.rs

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

fn default_kind() -> String {
    "geral".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNotificationPayload {
    pub project_id: Option<i64>,

    #[serde(rename = "type", default = "default_kind")]
    #[schema(example = "aviso")]
    pub kind: String,

    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,

    #[validate(length(min = 1, message = "A mensagem é obrigatória."))]
    pub message: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationsQuery {
    pub project_id: Option<i64>,

    /// Com unread=1, devolve só as não lidas.
    pub unread: Option<i64>,
}

// GET /api/notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notificações",
    params(NotificationsQuery),
    responses(
        (status = 200, description = "Notificações, mais recentes primeiro", body = Vec<crate::models::notification::Notification>)
    )
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    Query(query): Query<NotificationsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let notifications = app_state
        .notification_service
        .list(query.project_id, query.unread == Some(1))
        .await?;
    Ok((StatusCode::OK, ApiResponse::ok(notifications)))
}

// POST /api/notifications
#[utoipa::path(
    post,
    path = "/api/notifications",
    tag = "Notificações",
    request_body = CreateNotificationPayload,
    responses(
        (status = 201, description = "Notificação criada", body = crate::models::notification::Notification),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_notification(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateNotificationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let notification = app_state
        .notification_service
        .create(
            &app_state.db_pool,
            payload.project_id,
            &payload.kind,
            &payload.title,
            &payload.message,
        )
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(notification)))
}

// PUT /api/notifications/{id}/read
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    tag = "Notificações",
    params(("id" = i64, Path, description = "ID da notificação")),
    responses(
        (status = 200, description = "Notificação marcada como lida"),
        (status = 404, description = "Notificação não existe")
    )
)]
pub async fn mark_read(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.notification_service.mark_read(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(serde_json::json!({ "read": id }))))
}

// PUT /api/notifications/read-all
#[utoipa::path(
    put,
    path = "/api/notifications/read-all",
    tag = "Notificações",
    responses(
        (status = 200, description = "Todas as notificações marcadas como lidas")
    )
)]
pub async fn mark_all_read(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let count = app_state.notification_service.mark_all_read(&app_state.db_pool).await?;
    Ok((StatusCode::OK, ApiResponse::ok(serde_json::json!({ "read": count }))))
}

// DELETE /api/notifications/{id}
#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    tag = "Notificações",
    params(("id" = i64, Path, description = "ID da notificação")),
    responses(
        (status = 200, description = "Notificação removida"),
        (status = 404, description = "Notificação não existe")
    )
)]
pub async fn delete_notification(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.notification_service.delete(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}
