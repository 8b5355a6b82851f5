use axum::Json;
use serde::Serialize;

// Envelope padrão das respostas de sucesso: { "success": true, "data": ... }
// O dashboard só desembrulha `data`, então o wrapper fica em um lugar só.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self { success: true, data })
    }
}
