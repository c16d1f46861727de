/*
 * Responsibility
 * - GET / (welcome), GET /api/health (疎通用)
 * - 未定義 route の fallback (404 Route Not Found)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::error::AppError;

pub async fn welcome() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "message": "Welcome to the REST API project!" })),
    )
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}
