/// LLM Gateway — the single point of entry for all completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the completion API directly.
/// Workflows depend on `dyn LlmGateway` only; `OpenAiGateway` is the production backend.
///
/// Model and temperature are hardcoded so evaluations stay comparable across runs.
/// One request per prompt: no retries, no backoff, no response caching.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
pub mod stub;

/// The model used for all LLM calls.
pub const MODEL: &str = "gpt-4o-mini";
/// Low temperature for near-deterministic output.
pub const TEMPERATURE: f32 = 0.2;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Text-in/text-out completion capability.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Sends `prompt` as a single user message and returns the raw response text, unmodified.
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl ChatResponse {
    /// Takes the text of the first choice.
    fn into_text(self) -> Option<String> {
        self.choices.into_iter().next().and_then(|c| c.message.content)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions client for OpenAI or any OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct OpenAiGateway {
    client: Client,
    api_key: String,
    completions_url: String,
}

impl OpenAiGateway {
    pub fn new(api_key: String, base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            completions_url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.completions_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let chat: ChatResponse = response.json().await?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat.into_text().ok_or(GatewayError::EmptyContent)
    }
}

/// Pulls `error.message` out of an API error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_fixed_model_and_temperature() {
        let body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        assert!((json["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_response_text_is_first_choice_verbatim() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "  1. What is a trait?\n"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;
        let chat: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(chat.into_text().as_deref(), Some("  1. What is a trait?\n"));
    }

    #[test]
    fn test_null_content_is_none() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let chat: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(chat.into_text().is_none());
    }

    #[test]
    fn test_no_choices_is_none() {
        let chat: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(chat.into_text().is_none());
    }

    #[test]
    fn test_api_error_message_parsed() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(api_error_message(body.to_string()), "Incorrect API key provided");
    }

    #[test]
    fn test_api_error_message_falls_back_to_body() {
        assert_eq!(api_error_message("Bad Gateway".to_string()), "Bad Gateway");
    }

    #[test]
    fn test_completions_url_normalizes_trailing_slash() {
        let gateway = OpenAiGateway::new("k".to_string(), "http://localhost:9999/v1/");
        assert_eq!(gateway.completions_url, "http://localhost:9999/v1/chat/completions");
    }
}
