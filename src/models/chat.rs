// src/models/chat.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ChatMessage {
    pub id: i64,
    pub project_id: i64,

    #[schema(example = "Dona Cida")]
    pub sender_name: String,

    pub message: String,
    pub created_at: DateTime<Utc>,
}
