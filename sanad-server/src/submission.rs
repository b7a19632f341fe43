//! Simulated application submission endpoint.
//!
//! Accepts the full draft, waits the configured processing delay, and
//! acknowledges with a generated reference number. A small configurable
//! fraction of requests is answered with a synthetic server error so client
//! retry handling can be exercised. Nothing is stored server-side; the
//! draft remains owned by the client, which resets its store only after a
//! success response.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use chrono::{SecondsFormat, Utc};
use rand::Rng;
use sanad_core::ApplicationDraft;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::AppState;

pub const SUBMISSION_MESSAGE: &str = "Your application has been successfully submitted.";
pub const ESTIMATED_PROCESSING_TIME: &str = "5-7 business days";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub success: bool,
    pub reference_number: String,
    pub message: String,
    pub submitted_at: String,
    pub estimated_processing_time: String,
}

/// Reference numbers look like `APP-<millis>-<n>`.
pub fn generate_reference_number() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1000);
    format!("APP-{}-{}", Utc::now().timestamp_millis(), n)
}

pub async fn submit_application(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ApplicationDraft>,
) -> Response {
    tokio::time::sleep(state.config.submit_delay).await;

    let roll: f64 = rand::thread_rng().gen();
    if roll < state.config.submit_failure_rate {
        warn!("answering submission with a synthetic failure");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to submit application" })),
        )
            .into_response();
    }

    let reference_number = generate_reference_number();
    info!(
        reference = %reference_number,
        applicant = %draft.name,
        "application accepted"
    );

    Json(SubmissionReceipt {
        success: true,
        reference_number,
        message: SUBMISSION_MESSAGE.to_string(),
        submitted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        estimated_processing_time: ESTIMATED_PROCESSING_TIME.to_string(),
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{body_json, test_state};
    use crate::app_router;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn draft_body() -> Body {
        let mut draft = ApplicationDraft::default();
        draft.name = "Jane Doe".to_string();
        Body::from(serde_json::to_vec(&draft).unwrap())
    }

    fn submit_request() -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/submit-application")
            .header("content-type", "application/json")
            .body(draft_body())
            .unwrap()
    }

    #[test]
    fn test_reference_number_shape() {
        let reference = generate_reference_number();
        let parts: Vec<_> = reference.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "APP");
        assert!(parts[1].parse::<i64>().is_ok(), "millis part: {reference}");
        assert!(parts[2].parse::<u32>().unwrap() < 1000);
    }

    #[tokio::test]
    async fn test_successful_submission_receipt() {
        let state = test_state(|config| config.submit_failure_rate = 0.0);
        let response = app_router(state).oneshot(submit_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], SUBMISSION_MESSAGE);
        assert_eq!(body["estimatedProcessingTime"], ESTIMATED_PROCESSING_TIME);
        assert!(body["referenceNumber"]
            .as_str()
            .unwrap()
            .starts_with("APP-"));
        assert!(body["submittedAt"].as_str().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn test_synthetic_failure_keeps_error_contract() {
        let state = test_state(|config| config.submit_failure_rate = 1.0);
        let response = app_router(state).oneshot(submit_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to submit application");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected_without_delay() {
        let state = test_state(|_| {});
        let request = Request::builder()
            .method("POST")
            .uri("/api/submit-application")
            .header("content-type", "application/json")
            .body(Body::from("not json"))
            .unwrap();

        let response = app_router(state).oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }
}
