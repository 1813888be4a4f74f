// Export route modules
pub mod auth;
pub mod chat;
pub mod status;
pub mod webhook;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use courier::errors::RelayError;
use serde_json::json;

use crate::state::AppState;

// Function to configure all routes
pub fn configure(state: AppState) -> axum::Router {
    axum::Router::new()
        .merge(status::routes())
        .merge(auth::routes())
        .merge(chat::routes(state.clone()))
        .merge(webhook::routes(state))
}

/// Map a relay error onto the HTTP error envelope. Internal failures
/// are logged and answered with a generic message only.
pub(crate) fn relay_error_response(err: RelayError) -> Response {
    let (status, message) = match &err {
        RelayError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        RelayError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        _ => {
            tracing::error!(error = %err, "request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };

    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

/// A 400 carrying the same error envelope as every other failure path,
/// used where extractor rejections would otherwise answer in plain text.
pub(crate) fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "error": message })),
    )
        .into_response()
}
