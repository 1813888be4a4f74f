//! Stubbed credential check. Accepts any email/password pair and hands
//! back a mock bearer token; real authentication lives outside this
//! service.

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

const TOKEN_PREFIX: &str = "mock-jwt-token-";

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, Serialize)]
struct User {
    id: String,
    email: String,
    name: String,
}

async fn login(Json(request): Json<LoginRequest>) -> impl IntoResponse {
    if request.email.is_empty() || request.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "Email and password are required" })),
        );
    }

    let name = request
        .email
        .split('@')
        .next()
        .filter(|n| !n.is_empty())
        .unwrap_or("User")
        .to_string();
    let user = User {
        id: "1".to_string(),
        email: request.email,
        name,
    };

    let token = format!("{}{}", TOKEN_PREFIX, user.id);
    (
        StatusCode::OK,
        Json(json!({ "success": true, "user": user, "token": token })),
    )
}

async fn me(headers: HeaderMap) -> impl IntoResponse {
    let token = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) if token.starts_with(TOKEN_PREFIX) => {
            let user_id = token.trim_start_matches(TOKEN_PREFIX);
            let user = User {
                id: user_id.to_string(),
                email: "user@courier.dev".to_string(),
                name: "User".to_string(),
            };
            (
                StatusCode::OK,
                Json(json!({ "success": true, "user": user })),
            )
        }
        Some(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Invalid token" })),
        ),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Token not provided" })),
        ),
    }
}

// Configure routes for this module
pub fn routes() -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}
