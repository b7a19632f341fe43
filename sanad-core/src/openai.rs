//! OpenAI chat-completions client for the draft-assist feature.

use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Model used for draft suggestions unless configured otherwise.
pub const DEFAULT_ASSIST_MODEL: &str = "gpt-3.5-turbo";

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// A non-success answer from the API, preserved so callers can relay the
/// upstream status instead of flattening everything to 500.
#[derive(Debug)]
pub struct ApiStatusError {
    pub status: u16,
    pub body: String,
}

impl fmt::Display for ApiStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpenAI API error: {} - {}", self.status, self.body)
    }
}

impl std::error::Error for ApiStatusError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    /// Content of the first completion, if the API returned one.
    pub fn first_content(self) -> Option<String> {
        self.choices.into_iter().next().map(|c| c.message.content)
    }
}

/// Async OpenAI client for chat completions.
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ChatClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENAI_API_BASE.to_string())
    }

    /// Point the client at a different API base (used by tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sanad/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            base_url,
        }
    }

    pub async fn chat(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .context("Failed to send chat completion request")?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .context("Failed to read error response body")?;
            return Err(anyhow::Error::new(ApiStatusError { status, body }));
        }

        response
            .json::<ChatCompletionResponse>()
            .await
            .context("Failed to parse chat completion response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: DEFAULT_ASSIST_MODEL.to_string(),
            messages: vec![
                ChatMessage::system("You are a test."),
                ChatMessage::user("hello"),
            ],
            max_tokens: 16,
            temperature: 0.0,
        }
    }

    #[test]
    fn test_request_serializes_expected_shape() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["model"], DEFAULT_ASSIST_MODEL);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 16);
    }

    #[tokio::test]
    async fn test_chat_returns_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"message": {"role": "assistant", "content": "A suggestion."}}]}"#,
            )
            .create_async()
            .await;

        let client = ChatClient::with_base_url("test-key".to_string(), server.url());
        let response = client.chat(&request()).await.unwrap();

        assert_eq!(response.first_content().as_deref(), Some("A suggestion."));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_chat_surfaces_upstream_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error": {"message": "rate limited"}}"#)
            .create_async()
            .await;

        let client = ChatClient::with_base_url("test-key".to_string(), server.url());
        let err = client.chat(&request()).await.unwrap_err();

        let api = err
            .downcast_ref::<ApiStatusError>()
            .expect("should preserve the API status");
        assert_eq!(api.status, 429);
    }

    #[test]
    fn test_empty_choices_has_no_content() {
        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(response.first_content(), None);
    }
}
