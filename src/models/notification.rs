// src/models/notification.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Notificações nascem como efeito colateral de mensagens de chat e de
// uploads de foto. O dashboard faz polling e marca como lidas.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: i64,
    pub project_id: Option<i64>,

    #[serde(rename = "type")]
    #[schema(example = "chat")]
    pub kind: String,

    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
