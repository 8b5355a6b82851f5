// src/handlers/attachments.rs

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    models::attachment::{AttachmentKind, OwnerTable},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttachmentsQuery {
    pub owner_table: Option<OwnerTable>,
    pub record_id: Option<i64>,
    pub kind: Option<AttachmentKind>,
}

fn validation_error(field: &'static str, message: &'static str) -> AppError {
    let mut err = ValidationError::new("invalid");
    err.message = Some(message.into());
    let mut errors = ValidationErrors::new();
    errors.add(field, err);
    AppError::ValidationError(errors)
}

// Quando o form não diz o tipo, decide pela extensão.
fn kind_from_name(name: &str) -> AttachmentKind {
    let ext = name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" | "png" | "gif" | "webp" => AttachmentKind::Image,
        _ => AttachmentKind::Document,
    }
}

// GET /api/attachments
#[utoipa::path(
    get,
    path = "/api/attachments",
    tag = "Anexos",
    params(AttachmentsQuery),
    responses(
        (status = 200, description = "Anexos filtrados por dono e tipo", body = Vec<crate::models::attachment::Attachment>)
    )
)]
pub async fn list_attachments(
    State(app_state): State<AppState>,
    Query(query): Query<AttachmentsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let attachments = app_state
        .attachment_service
        .list(query.owner_table, query.record_id, query.kind)
        .await?;
    Ok((StatusCode::OK, ApiResponse::ok(attachments)))
}

// POST /api/upload
// Multipart: campo `file` (obrigatório) + campos de texto opcionais
// `kind` (image|document), `table_name`, `record_id` e `description`.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "Anexos",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Arquivo salvo e anexo registrado", body = crate::models::attachment::Attachment),
        (status = 400, description = "Upload sem arquivo ou campos inválidos")
    )
)]
pub async fn upload(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut kind: Option<AttachmentKind> = None;
    let mut owner_table: Option<OwnerTable> = None;
    let mut record_id: Option<i64> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))?
    {
        // Copia o nome antes: ler o conteúdo consome o field.
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "file" => {
                let original_name = field.file_name().unwrap_or("arquivo").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InternalServerError(e.into()))?;
                file = Some((original_name, bytes.to_vec()));
            }
            "kind" => {
                let text = field.text().await.unwrap_or_default();
                kind = Some(
                    serde_json::from_value(json!(text))
                        .map_err(|_| validation_error("kind", "Tipo de anexo desconhecido."))?,
                );
            }
            "table_name" => {
                let text = field.text().await.unwrap_or_default();
                owner_table = Some(
                    serde_json::from_value(json!(text))
                        .map_err(|_| validation_error("table_name", "Tabela de destino desconhecida."))?,
                );
            }
            "record_id" => {
                let text = field.text().await.unwrap_or_default();
                record_id = Some(
                    text.parse()
                        .map_err(|_| validation_error("record_id", "record_id precisa ser numérico."))?,
                );
            }
            "description" => {
                description = Some(field.text().await.unwrap_or_default());
            }
            _ => {}
        }
    }

    let Some((original_name, bytes)) = file else {
        return Err(validation_error("file", "O campo 'file' é obrigatório."));
    };

    let kind = kind.unwrap_or_else(|| kind_from_name(&original_name));

    let attachment = app_state
        .attachment_service
        .store_upload(
            &app_state.db_pool,
            kind,
            owner_table,
            record_id,
            &original_name,
            &bytes,
            description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(attachment)))
}

// DELETE /api/attachments/{id}
#[utoipa::path(
    delete,
    path = "/api/attachments/{id}",
    tag = "Anexos",
    params(("id" = i64, Path, description = "ID do anexo")),
    responses(
        (status = 200, description = "Anexo removido (linha primeiro, arquivo depois)"),
        (status = 404, description = "Anexo não existe")
    )
)]
pub async fn delete_attachment(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.attachment_service.delete(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, ApiResponse::ok(serde_json::json!({ "deleted": id }))))
}
