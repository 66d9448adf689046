// src/utils/response.rs

use axum::Json;
use serde::Serialize;

/// Success envelope shared by every endpoint: `{ "success": true, "data": ... }`.
/// Failures use the same shape with `error` instead, see `AppError`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data,
    })
}
