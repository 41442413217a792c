//! Hosted messages backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::Provider;
use crate::error::{ConfigError, ProviderError};

use super::{
    CompletionProvider, HOSTED_TIMEOUT, endpoint, http_client, parse_value, send_json,
};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const MESSAGES_PATH: &str = "/v1/messages";
pub const API_VERSION: &str = "2023-06-01";

/// A commit message never needs more than this.
pub const MAX_TOKENS: u32 = 150;

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

pub struct AnthropicClient {
    client: Client,
    url: String,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    /// `base_url` replaces `https://api.anthropic.com` when set.
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
            url: endpoint(base_url.unwrap_or(DEFAULT_BASE_URL), MESSAGES_PATH),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl CompletionProvider for AnthropicClient {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let builder = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION);

        let body = send_json(Provider::Anthropic, builder, &request).await?;
        parse_messages_response(&body)
    }
}

/// Extract the text of the first content block from a messages body.
///
/// An empty or missing `content` list, a first block that is not an object,
/// and a missing or non-string `text` field are reported separately.
pub fn parse_messages_response(body: &str) -> Result<String, ProviderError> {
    let value = parse_value(Provider::Anthropic, body)?;

    let first = value
        .get("content")
        .and_then(Value::as_array)
        .and_then(|blocks| blocks.first())
        .ok_or(ProviderError::EmptyResponse(Provider::Anthropic))?;

    let block = first
        .as_object()
        .ok_or(ProviderError::InvalidFormat(Provider::Anthropic))?;

    let text = block
        .get("text")
        .and_then(Value::as_str)
        .ok_or(ProviderError::MissingText(Provider::Anthropic))?;

    Ok(text.trim().to_string())
}
