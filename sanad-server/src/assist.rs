//! Draft-assist proxy endpoint.
//!
//! Forwards the applicant's text to the chat-completion API under a system
//! instruction picked by language and configured scope, and relays the first
//! completion verbatim. Upstream failures surface as the upstream status
//! with a generic error body; the client shows its own guidance message and
//! leaves the underlying field value untouched.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use sanad_core::{
    assist::system_prompt, ApiStatusError, ChatCompletionRequest, ChatMessage, Language,
    ASSIST_MAX_TOKENS, ASSIST_TEMPERATURE, FALLBACK_SUGGESTION,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistRequest {
    pub prompt: String,
    /// The applicant's current answer. Carried for parity with the client
    /// contract; the suggestion is generated from `prompt` alone.
    #[serde(default)]
    pub current_text: String,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Serialize)]
pub struct AssistResponse {
    pub suggestion: String,
}

pub async fn ai_assist(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AssistRequest>,
) -> Response {
    let Some(client) = &state.assist_client else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "OpenAI API key not configured" })),
        )
            .into_response();
    };

    let chat_request = ChatCompletionRequest {
        model: state.config.assist_model.clone(),
        messages: vec![
            ChatMessage::system(system_prompt(request.language, state.config.assist_scope)),
            ChatMessage::user(request.prompt),
        ],
        max_tokens: ASSIST_MAX_TOKENS,
        temperature: ASSIST_TEMPERATURE,
    };

    match client.chat(&chat_request).await {
        Ok(response) => {
            let suggestion = response
                .first_content()
                .unwrap_or_else(|| FALLBACK_SUGGESTION.to_string());
            Json(AssistResponse { suggestion }).into_response()
        }
        Err(e) => {
            if let Some(api) = e.downcast_ref::<ApiStatusError>() {
                error!("OpenAI API error: {api}");
                let status = StatusCode::from_u16(api.status).unwrap_or(StatusCode::BAD_GATEWAY);
                (
                    status,
                    Json(json!({ "error": "Failed to get AI assistance" })),
                )
                    .into_response()
            } else {
                error!("AI assist error: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
