//! Hosted chat-completions backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Provider;
use crate::error::{ConfigError, ProviderError};

use super::{CompletionProvider, HOSTED_TIMEOUT, endpoint, http_client, send_json};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const CHAT_PATH: &str = "/v1/chat/completions";

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

pub struct OpenAiClient {
    client: Client,
    url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// `base_url` replaces `https://api.openai.com` when set.
    pub fn new(api_key: &str, model: &str, base_url: Option<&str>) -> Result<Self, ConfigError> {
        Self::with_timeout(api_key, model, base_url, HOSTED_TIMEOUT)
    }

    pub(crate) fn with_timeout(
        api_key: &str,
        model: &str,
        base_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            client: http_client(timeout)?,
            url: endpoint(base_url.unwrap_or(DEFAULT_BASE_URL), CHAT_PATH),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
        };

        let body = send_json(
            Provider::OpenAi,
            self.client.post(&self.url).bearer_auth(&self.api_key),
            &request,
        )
        .await?;

        parse_chat_response(&body)
    }
}

/// Extract the first choice's message content from a chat-completions body.
pub fn parse_chat_response(body: &str) -> Result<String, ProviderError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|source| ProviderError::InvalidJson {
            provider: Provider::OpenAi,
            source,
        })?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse(Provider::OpenAi))?;

    Ok(choice
        .message
        .content
        .unwrap_or_default()
        .trim()
        .to_string())
}
