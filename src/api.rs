//! REST API for the command interpreter
//!
//! Lets a front-end (or a speech gateway) classify assistant commands over
//! HTTP. Stateless: the caller supplies mode and balance with each request.

use axum::{http::StatusCode, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::classifier::{ClassificationInput, CommandInterpreter, Intent, Mode};
use crate::models::Tab;

/// =============================
/// Request / Response Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClassifyRequest {
    pub text: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub balance: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub intent: Intent,
    pub response: String,
    pub tab: Option<Tab>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModeInfo {
    pub id: Mode,
    pub name: String,
    pub description: String,
    pub placeholder: String,
    pub commands: Vec<String>,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// Handlers
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn modes() -> Json<ApiResponse> {
    let modes: Vec<ModeInfo> = Mode::ALL
        .iter()
        .map(|mode| ModeInfo {
            id: *mode,
            name: mode.display_name().to_string(),
            description: mode.description().to_string(),
            placeholder: mode.placeholder().to_string(),
            commands: mode.command_hints().into_iter().map(String::from).collect(),
        })
        .collect();

    Json(ApiResponse::success(modes))
}

async fn classify(Json(req): Json<ClassifyRequest>) -> (StatusCode, Json<ApiResponse>) {
    if req.balance.is_some_and(|b| !b.is_finite()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("balance must be a finite number".into())),
        );
    }

    let input = ClassificationInput::new(req.text, req.mode).with_balance(req.balance);
    let result = CommandInterpreter::classify(&input);
    info!(intent = ?result.intent, mode = %req.mode, "Classified command");

    (
        StatusCode::OK,
        Json(ApiResponse::success(ClassifyResponse {
            intent: result.intent,
            tab: result.intent.target_tab(),
            response: result.response,
        })),
    )
}

/// =============================
/// Router
/// =============================

pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/modes", get(modes))
        .route("/api/classify", post(classify))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(port: u16) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn call(request: Request<Body>) -> (StatusCode, Value) {
        let response = create_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn classify_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/classify")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_classify_balance_with_mode() {
        let (status, body) = call(classify_request(json!({
            "text": "Баланс",
            "mode": "adult",
            "balance": 1234.5
        })))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["intent"], "report_balance");
        assert!(body["data"]["tab"].is_null());
        assert!(body["data"]["response"].as_str().unwrap().contains("1234.50"));
    }

    #[tokio::test]
    async fn test_classify_defaults_to_standard_mode() {
        let (status, body) = call(classify_request(json!({"text": "перевод кредит"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["intent"], "navigate_transfer");
        assert_eq!(body["data"]["tab"], "transfer");
    }

    #[tokio::test]
    async fn test_classify_rejects_unknown_mode() {
        let response = create_router()
            .oneshot(classify_request(json!({"text": "баланс", "mode": "robot"})))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_modes_lists_all_four() {
        let (status, body) = call(Request::get("/api/modes").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        let modes = body["data"].as_array().unwrap();
        assert_eq!(modes.len(), 4);
        assert!(modes.iter().any(|m| m["id"] == "child" && m["name"] == "Детский"));
    }
}
