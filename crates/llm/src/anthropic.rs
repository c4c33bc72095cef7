//! Anthropic Messages API client.

use async_trait::async_trait;
use pipeline::{CompletionRequest, LlmError, LlmProvider};
use serde::{Deserialize, Serialize};

/// Production Anthropic API host.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Value of the `anthropic-version` request header.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// [`LlmProvider`] backed by Anthropic's `/v1/messages` endpoint.
///
/// Each completion is a single user-role message; the text of the first content
/// block in the reply is returned.
pub struct AnthropicProvider {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL. Useful for a local mock server or a proxy.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = MessagesRequest {
            model: &request.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: [Message {
                role: "user",
                content: &request.prompt,
            }],
        };

        tracing::debug!(model = %request.model, max_tokens = request.max_tokens, "Sending completion request");

        let response = self
            .http
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::Decode {
                message: e.to_string(),
            })?;

        parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or(LlmError::EmptyResponse)
    }
}

fn transport_error(err: reqwest::Error) -> LlmError {
    LlmError::Transport {
        message: err.to_string(),
    }
}

impl std::fmt::Debug for AnthropicProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicProvider")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url_is_set() {
        assert_eq!(AnthropicProvider::new("k").base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn messages_url_includes_path() {
        let provider = AnthropicProvider::new("k").with_base_url("http://localhost:9999/");
        assert_eq!(provider.messages_url(), "http://localhost:9999/v1/messages");
    }

    #[test]
    fn request_body_is_a_single_user_message() {
        let body = MessagesRequest {
            model: "m",
            max_tokens: 150,
            temperature: 0.5,
            messages: [Message {
                role: "user",
                content: "hi",
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["max_tokens"], 150);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
    }

    #[test]
    fn debug_output_hides_the_key() {
        let provider = AnthropicProvider::new("sk-secret");
        assert!(!format!("{provider:?}").contains("sk-secret"));
    }
}
