//! Router-level fallbacks answering in the [`ErrorResponse`] envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

fn envelope(status: StatusCode, code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::new(code, code.default_message()))).into_response()
}

/// Unknown route
pub async fn not_found() -> Response {
    envelope(StatusCode::NOT_FOUND, ErrorCode::NotFound)
}

/// Known route, wrong verb
pub async fn method_not_allowed() -> Response {
    envelope(StatusCode::METHOD_NOT_ALLOWED, ErrorCode::MethodNotAllowed)
}
