pub mod assist;
pub mod config;
pub mod correlation;
pub mod submission;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use sanad_core::ChatClient;
use serde_json::json;

use config::Config;

pub struct AppState {
    pub config: Config,
    /// Absent when no API key is configured; the assist route then rejects
    /// requests while the rest of the service keeps working.
    pub assist_client: Option<ChatClient>,
}

pub fn service_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

async fn health_check() -> Result<Json<serde_json::Value>, StatusCode> {
    Ok(Json(json!({
        "status": "healthy",
        "service": "sanad"
    })))
}

async fn help_handler() -> Json<serde_json::Value> {
    Json(json!({
        "service": "sanad",
        "version": service_version(),
        "description": "Backend routes for the bilingual social-support application form",
        "endpoints": [
            {
                "path": "/health",
                "method": "GET",
                "description": "Health check endpoint",
                "authentication": "None",
                "response_format": "application/json"
            },
            {
                "path": "/api/submit-application",
                "method": "POST",
                "description": "Accepts a complete application draft and answers with a reference number after a simulated processing delay",
                "authentication": "Optional guest bearer token (correlation only)",
                "response_format": "application/json"
            },
            {
                "path": "/api/ai-assist",
                "method": "POST",
                "description": "Forwards free text to the language-model API and relays a drafting suggestion",
                "authentication": "Optional guest bearer token (correlation only)",
                "response_format": "application/json"
            },
            {
                "path": "/help",
                "method": "GET",
                "description": "API documentation and service information",
                "authentication": "None",
                "response_format": "application/json"
            }
        ],
        "configuration": {
            "required_env_vars": [],
            "optional_env_vars": [
                "PORT (default: 3000)",
                "OPENAI_API_KEY (assist route disabled when unset)",
                "ASSIST_SCOPE (financial | hardship | open, default: financial)",
                "ASSIST_MODEL (default: gpt-3.5-turbo)",
                "SUBMIT_DELAY_MS (default: 3000)",
                "SUBMIT_FAILURE_RATE (default: 0.05)"
            ]
        }
    }))
}

/// The service router. `main` wraps it in a `TraceLayer`.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/help", get(help_handler))
        .route("/api/submit-application", post(submission::submit_application))
        .route("/api/ai-assist", post(assist::ai_assist))
        .layer(middleware::from_fn(correlation::correlation_middleware))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;
    use sanad_core::AssistScope;
    use std::time::Duration;
    use tower::ServiceExt;

    pub fn test_config() -> Config {
        Config {
            port: 0,
            openai_api_key: None,
            assist_scope: AssistScope::FinancialOnly,
            assist_model: sanad_core::DEFAULT_ASSIST_MODEL.to_string(),
            submit_delay: Duration::ZERO,
            submit_failure_rate: 0.0,
        }
    }

    pub fn test_state(tweak: impl FnOnce(&mut Config)) -> Arc<AppState> {
        let mut config = test_config();
        tweak(&mut config);
        Arc::new(AppState {
            config,
            assist_client: None,
        })
    }

    pub fn test_state_with_client(client: ChatClient) -> Arc<AppState> {
        Arc::new(AppState {
            config: test_config(),
            assist_client: Some(client),
        })
    }

    pub async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = app_router(test_state(|_| {}))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "sanad");
    }

    #[tokio::test]
    async fn test_help_lists_every_route() {
        let response = app_router(test_state(|_| {}))
            .oneshot(Request::builder().uri("/help").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_json(response).await;
        let paths: Vec<_> = body["endpoints"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["path"].as_str().unwrap().to_string())
            .collect();
        assert!(paths.contains(&"/api/submit-application".to_string()));
        assert!(paths.contains(&"/api/ai-assist".to_string()));
    }

    #[tokio::test]
    async fn test_guest_token_is_echoed_as_correlation_id() {
        let response = app_router(test_state(|_| {}))
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("authorization", "Bearer guest_1234")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let header = response
            .headers()
            .get(correlation::CORRELATION_ID_HEADER)
            .and_then(|h| h.to_str().ok());
        assert_eq!(header, Some("guest_1234"));
    }

    #[tokio::test]
    async fn test_anonymous_requests_get_a_fresh_correlation_id() {
        let response = app_router(test_state(|_| {}))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = response
            .headers()
            .get(correlation::CORRELATION_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .expect("correlation id should be set");
        assert!(!header.starts_with("guest_"));
        assert!(!header.is_empty());
    }
}
