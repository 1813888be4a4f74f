//! Agent management and the message send path.

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, FromRequest, Multipart, Path, Request, State};
use axum::http::{header::CONTENT_TYPE, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use courier::relay::UploadedFile;
use serde::Deserialize;
use serde_json::json;

use super::{bad_request, relay_error_response};
use crate::state::AppState;

/// Upper bound for a send request body, attachment included.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateChatRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    webhook_url: String,
}

#[derive(Debug, Deserialize)]
struct SendMessageRequest {
    #[serde(default)]
    content: String,
}

async fn create_chat(
    State(state): State<AppState>,
    request: Result<Json<CreateChatRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(_) => return bad_request("Invalid JSON body"),
    };

    match state.store.create_agent(&request.name, &request.webhook_url) {
        Ok(agent) => (
            StatusCode::CREATED,
            Json(json!({ "success": true, "chat": agent })),
        )
            .into_response(),
        Err(err) => relay_error_response(err),
    }
}

async fn list_chats(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "success": true, "chats": state.store.list_agents() }))
}

async fn get_messages(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> Json<serde_json::Value> {
    // An unknown agent reads as an empty conversation, never an error
    Json(json!({ "success": true, "messages": state.store.get_messages(&agent_id) }))
}

/// Accepts either a JSON `{content}` body or a multipart form carrying
/// `content` plus an `attachments` file field (first file only).
async fn send_message(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
    request: Request,
) -> Response {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let parsed = if is_multipart {
        read_multipart(request).await
    } else {
        read_json(request).await
    };
    let (content, file) = match parsed {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    match state.relay.send_message(&agent_id, &content, file).await {
        Ok(message) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": message })),
        )
            .into_response(),
        Err(err) => relay_error_response(err),
    }
}

async fn read_json(request: Request) -> Result<(String, Option<UploadedFile>), Response> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|_| bad_request("Unreadable request body"))?;
    let body: SendMessageRequest =
        serde_json::from_slice(&bytes).map_err(|_| bad_request("Invalid JSON body"))?;
    Ok((body.content, None))
}

async fn read_multipart(request: Request) -> Result<(String, Option<UploadedFile>), Response> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|_| bad_request("Invalid multipart body"))?;

    let mut content = String::new();
    let mut file = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => return Err(bad_request("Malformed multipart field")),
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "content" => {
                content = field
                    .text()
                    .await
                    .map_err(|_| bad_request("Unreadable content field"))?;
            }
            "attachments" if file.is_none() => {
                // One attachment per message; further files are ignored
                let filename = field.file_name().unwrap_or("attachment").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| bad_request("Unreadable attachment field"))?
                    .to_vec();
                file = Some(UploadedFile {
                    filename,
                    mime_type,
                    data,
                });
            }
            _ => {}
        }
    }

    Ok((content, file))
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(create_chat).get(list_chats))
        .route(
            "/chat/:agent_id/messages",
            get(get_messages).post(send_message),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
