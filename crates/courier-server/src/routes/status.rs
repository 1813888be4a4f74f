use axum::{routing::get, Json, Router};
use serde_json::json;

async fn root() -> &'static str {
    "courier relay"
}

async fn hello() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello from courier!", "success": true }))
}

// Configure routes for this module
pub fn routes() -> Router {
    Router::new().route("/", get(root)).route("/hello", get(hello))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_hello() {
        let app = routes();
        let response = app
            .oneshot(Request::builder().uri("/hello").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["success"], true);
    }
}
