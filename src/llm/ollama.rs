//! Local Ollama generation backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::Provider;
use crate::error::{ConfigError, ProviderError};

use super::{CompletionProvider, LOCAL_TIMEOUT, endpoint, http_client, parse_value, send_json};

const GENERATE_PATH: &str = "/api/generate";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

pub struct OllamaClient {
    client: Client,
    url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Result<Self, ConfigError> {
        Self::with_timeout(base_url, model, LOCAL_TIMEOUT)
    }

    pub(crate) fn with_timeout(
        base_url: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            client: http_client(timeout)?,
            url: endpoint(base_url, GENERATE_PATH),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OllamaClient {
    fn provider(&self) -> Provider {
        Provider::Ollama
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let body = send_json(Provider::Ollama, self.client.post(&self.url), &request).await?;
        parse_generate_response(&body)
    }
}

/// Extract the string `response` field from a non-streaming generate body.
pub fn parse_generate_response(body: &str) -> Result<String, ProviderError> {
    let value = parse_value(Provider::Ollama, body)?;

    value
        .get("response")
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
        .ok_or(ProviderError::MissingText(Provider::Ollama))
}
