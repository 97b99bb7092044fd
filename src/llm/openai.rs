// OpenAI-compatible chat completions over plain reqwest
// API Reference: https://platform.openai.com/docs/api-reference/chat/create

use crate::config::{LLMConfig, DEFAULT_API_BASE};
use crate::llm::provider::{ChatCompletion, ChatResponse, CompletionRequest};
use crate::types::CompletionFailure;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub struct OpenAIAdapter {
    client: Client,
    api_key: String,
    api_base: String,
}

// Request types
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// Response types
#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAIAdapter {
    pub fn new(api_key: &str) -> Self {
        Self::with_api_base(api_key, DEFAULT_API_BASE)
    }

    /// Target any OpenAI-compatible endpoint, e.g. `http://localhost:8080/v1`.
    pub fn with_api_base(api_key: &str, api_base: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &LLMConfig) -> Self {
        Self::with_api_base(&config.openai_api_key, &config.api_base)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    /// Pull `choices[0].message.content` out of a response body.
    fn parse_answer(body: &str) -> ChatResponse {
        let response: ChatCompletionResponse = serde_json::from_str(body)
            .map_err(|e| CompletionFailure::MalformedPayload(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionFailure::MalformedPayload("response has no choices".to_string()))?;

        choice
            .message
            .content
            .ok_or_else(|| CompletionFailure::MalformedPayload("first choice has no content".to_string()))
    }
}

#[async_trait]
impl ChatCompletion for OpenAIAdapter {
    async fn create_chat_completion(&self, request: &CompletionRequest) -> ChatResponse {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: request.max_tokens,
        };

        debug!(
            "POST {} (model={}, prompt={} chars)",
            self.endpoint(),
            request.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionFailure::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CompletionFailure::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(CompletionFailure::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Self::parse_answer(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn request(prompt: &str) -> CompletionRequest {
        CompletionRequest::new("gpt-4-1106-preview", prompt, 1000)
    }

    #[test]
    fn test_parse_answer() {
        let answer = OpenAIAdapter::parse_answer(r#"{"choices":[{"message":{"content":"Hello"}}]}"#);
        assert_eq!(answer, Ok("Hello".to_string()));
    }

    #[test]
    fn test_parse_answer_uses_first_choice() {
        let answer = OpenAIAdapter::parse_answer(
            r#"{"choices":[{"message":{"content":"first"}},{"message":{"content":"second"}}]}"#,
        );
        assert_eq!(answer, Ok("first".to_string()));
    }

    #[test]
    fn test_parse_answer_failures() {
        for body in [
            "{}",
            r#"{"choices":[]}"#,
            r#"{"choices":[{"message":{}}]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            "not json",
        ] {
            assert!(
                matches!(OpenAIAdapter::parse_answer(body), Err(CompletionFailure::MalformedPayload(_))),
                "expected failure for {body}"
            );
        }
    }

    #[tokio::test]
    async fn test_request_shape_and_answer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({
                "model": "gpt-4-1106-preview",
                "messages": [{"role": "user", "content": "What is BLS?"}],
                "max_tokens": 1000
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"Hello"}}]}"#)
            .create_async()
            .await;

        let adapter = OpenAIAdapter::with_api_base("test-key", &server.url());
        let answer = adapter.create_chat_completion(&request("What is BLS?")).await;

        assert_eq!(answer, Ok("Hello".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_choices_is_failure() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let adapter = OpenAIAdapter::with_api_base("test-key", &server.url());
        let answer = adapter.create_chat_completion(&request("hi")).await;

        assert!(matches!(answer, Err(CompletionFailure::MalformedPayload(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_failure() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
            .expect(1)
            .create_async()
            .await;

        let adapter = OpenAIAdapter::with_api_base("bad-key", &server.url());
        let answer = adapter.create_chat_completion(&request("hi")).await;

        match answer {
            Err(CompletionFailure::Status { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("Incorrect API key"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        // Exactly one attempt: no retries.
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_failure() {
        // Port 9 (discard) on localhost is closed in test environments.
        let adapter = OpenAIAdapter::with_api_base("test-key", "http://127.0.0.1:9");
        let answer = adapter.create_chat_completion(&request("hi")).await;
        assert!(matches!(answer, Err(CompletionFailure::Transport(_))));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let adapter = OpenAIAdapter::with_api_base("k", "http://localhost:8080/v1/");
        assert_eq!(adapter.endpoint(), "http://localhost:8080/v1/chat/completions");
    }
}
