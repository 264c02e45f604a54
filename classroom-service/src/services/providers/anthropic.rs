//! Anthropic Messages API provider.

use super::{AnalysisPrompt, ProviderError, TextProvider};
use crate::config::AnthropicConfig;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;

/// Output budget per completion.
const MAX_TOKENS: u32 = 4096;

/// Low temperature: brief reviews should be near-deterministic.
const TEMPERATURE: f32 = 0.2;

pub struct AnthropicTextProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicTextProvider {
    pub fn new(config: AnthropicConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextProvider for AnthropicTextProvider {
    async fn analyze(&self, prompt: &AnalysisPrompt) -> Result<Value, ProviderError> {
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: &prompt.system_prompt,
            messages: vec![Message {
                role: "user",
                content: &prompt.user_prompt,
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.user_prompt.len(),
            "Sending request to Anthropic API"
        );

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key.expose_secret())
            .header("anthropic-version", &self.config.api_version)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        tracing::debug!(status = %status, "Anthropic API response");

        if !status.is_success() {
            // Relay whatever the API sent; non-JSON bodies are wrapped as a
            // plain string.
            let details: Value =
                serde_json::from_str(&body).unwrap_or_else(|_| Value::String(body));
            tracing::error!(status = %status, "Anthropic API error");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body: details,
            });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn provider(base_url: &str) -> AnthropicTextProvider {
        AnthropicTextProvider::new(AnthropicConfig {
            api_key: Secret::new("test-key".to_string()),
            api_version: "2023-06-01".to_string(),
            model: "claude-3-5-sonnet".to_string(),
            base_url: base_url.to_string(),
        })
    }

    #[test]
    fn messages_url_tolerates_trailing_slash() {
        assert_eq!(
            provider("https://api.anthropic.com/").messages_url(),
            "https://api.anthropic.com/v1/messages"
        );
        assert_eq!(
            provider("https://api.anthropic.com").messages_url(),
            "https://api.anthropic.com/v1/messages"
        );
    }

    #[test]
    fn request_serializes_with_single_user_message() {
        let request = MessagesRequest {
            model: "claude-3-5-sonnet",
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: "be brief",
            messages: vec![Message {
                role: "user",
                content: "review this",
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "claude-3-5-sonnet");
        assert_eq!(json["max_tokens"], 4096);
        assert_eq!(json["system"], "be brief");
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
