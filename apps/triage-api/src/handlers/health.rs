use api_contract::ApiResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub async fn health() -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({ "ok": true }))),
    )
        .into_response()
}
