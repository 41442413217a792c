//! Text-generation backends.
//!
//! Each backend sends one JSON request and pulls one text field out of the
//! response. The backend is chosen once, from the loaded [`Config`], by
//! [`provider_for`].

pub mod anthropic;
pub mod ollama;
pub mod openai;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::{Config, DEFAULT_OLLAMA_BASE_URL, Provider};
use crate::error::{ConfigError, ProviderError};

pub use anthropic::AnthropicClient;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;

/// Request timeout for hosted backends.
pub const HOSTED_TIMEOUT: Duration = Duration::from_secs(30);

/// Request timeout for the local backend.
pub const LOCAL_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest error body kept in [`ProviderError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// A backend that turns a prompt into a completion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Which backend this is.
    fn provider(&self) -> Provider;

    /// Send `prompt` and return the generated text, trimmed. No retries.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Build the client for the backend named in `config`.
///
/// Hosted backends require an API key. Ollama falls back to the default
/// base URL when none is stored.
pub fn provider_for(config: &Config) -> Result<Box<dyn CompletionProvider>, ConfigError> {
    debug!("Selected {} backend (model {})", config.provider, config.model);

    match config.provider {
        Provider::OpenAi => {
            let key = require_api_key(config)?;
            Ok(Box::new(OpenAiClient::new(
                key,
                &config.model,
                config.base_url.as_deref(),
            )?))
        }
        Provider::Anthropic => {
            let key = require_api_key(config)?;
            Ok(Box::new(AnthropicClient::new(
                key,
                &config.model,
                config.base_url.as_deref(),
            )?))
        }
        Provider::Ollama => {
            let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_OLLAMA_BASE_URL);
            Ok(Box::new(OllamaClient::new(base_url, &config.model)?))
        }
    }
}

fn require_api_key(config: &Config) -> Result<&str, ConfigError> {
    config
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or(ConfigError::MissingApiKey(config.provider))
}

/// HTTP client with the per-request timeout applied.
pub(crate) fn http_client(timeout: Duration) -> Result<Client, ConfigError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(ConfigError::HttpClient)
}

/// Join a base URL and an API path, ignoring a trailing slash on the base.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Send `body` as JSON and return the response text.
///
/// Transport failures are passed through unchanged. Non-2xx responses
/// become [`ProviderError::Status`].
pub(crate) async fn send_json<B: Serialize + ?Sized>(
    provider: Provider,
    request: RequestBuilder,
    body: &B,
) -> Result<String, ProviderError> {
    let response = request
        .json(body)
        .send()
        .await
        .map_err(ProviderError::Transport)?;

    let status = response.status();
    let text = response.text().await.map_err(ProviderError::Transport)?;
    debug!("{} responded with status {}", provider, status);

    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
            body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    Ok(text)
}

/// Parse a response body as untyped JSON.
pub(crate) fn parse_value(provider: Provider, body: &str) -> Result<Value, ProviderError> {
    serde_json::from_str(body).map_err(|source| ProviderError::InvalidJson { provider, source })
}
