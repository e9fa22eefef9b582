use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::app::errors::json_error;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

pub async fn not_found() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "no such route")
}
