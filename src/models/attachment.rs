// src/models/attachment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Dono polimórfico de um anexo ---
// Enum fechado em vez de nome de tabela em texto livre: um typo aqui viraria
// linha órfã silenciosa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OwnerTable {
    Projects,
    Materials,
    InventoryItems,
    TeamMembers,
    Transactions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Document,
}

// Fotos e documentos compartilham o mesmo formato de linha, então vivem na
// mesma tabela, separados por `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Attachment {
    pub id: i64,
    pub kind: AttachmentKind,
    /// Nulos quando o upload não foi vinculado a nenhum registro.
    pub owner_table: Option<OwnerTable>,
    pub record_id: Option<i64>,

    #[schema(example = "uploads/8f2c9e4a-fachada.jpg")]
    pub file_path: String,

    #[schema(example = "fachada.jpg")]
    pub file_name: String,

    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
