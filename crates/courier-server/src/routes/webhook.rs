//! Agent-initiated callbacks: the asynchronous return channel for
//! fire-and-forget dispatches, and the way agents push unsolicited
//! messages into a conversation.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use courier::models::Attachment;
use serde::Deserialize;
use serde_json::json;

use super::{bad_request, relay_error_response};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CallbackRequest {
    /// Agents answer with either `message` or `content`; `message` wins.
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    attachments: Option<Vec<Attachment>>,
}

async fn receive_callback(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
    request: Result<Json<CallbackRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(_) => return bad_request("Invalid JSON body"),
    };

    // Blank fields fall through, same as the dispatcher's reply sniffing
    let content = request
        .message
        .filter(|m| !m.trim().is_empty())
        .or(request.content);
    match state
        .relay
        .receive_agent_callback(&agent_id, content, request.attachments)
    {
        Ok(message) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": message })),
        )
            .into_response(),
        Err(err) => relay_error_response(err),
    }
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/webhook/:agent_id", post(receive_callback))
        .with_state(state)
}
