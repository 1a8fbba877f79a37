use axum::{
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use serde_json::{json, Value};

use crate::request_id::XRequestId;
use crate::ErrorResponse;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// JSON 404 for unknown paths, tagged with the request id.
pub async fn not_found(
    uri: Uri,
    rid: Option<Extension<XRequestId>>,
) -> (StatusCode, Json<ErrorResponse>) {
    let message = format!("No route for {}", uri.path());
    let body = match rid {
        Some(Extension(XRequestId(id))) => {
            ErrorResponse::with_request_id(message, StatusCode::NOT_FOUND.as_u16(), id)
        }
        None => ErrorResponse::new(message, StatusCode::NOT_FOUND.as_u16()),
    };
    (StatusCode::NOT_FOUND, Json(body))
}
