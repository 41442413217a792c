//! Interactive `easy-commits config` flow.

use crate::config::{Config, Provider};
use crate::console::Console;
use crate::error::ConfigError;

/// Ask the user for provider settings and build a [`Config`].
///
/// Nothing is written here; the caller saves the result.
pub fn run_setup(console: &dyn Console) -> Result<Config, ConfigError> {
    let answer = console
        .read_line("Select AI provider (openai/anthropic/ollama)")
        .map_err(ConfigError::Input)?;
    let provider: Provider = answer.trim().parse()?;

    if provider.is_local() {
        let base_url = console
            .read_line("Enter Ollama base URL (default: http://localhost:11434)")
            .map_err(ConfigError::Input)?;
        let model = console
            .read_line("Enter model name (e.g., llama2, codellama)")
            .map_err(ConfigError::Input)?;
        return Ok(Config::local(non_empty(base_url), non_empty(model)));
    }

    let api_key = console
        .read_secret("Enter API key")
        .map_err(ConfigError::Input)?;
    let api_key = non_empty(api_key).ok_or(ConfigError::MissingApiKey(provider))?;

    let model = console
        .read_line(&format!("Enter model name (default: {})", provider.default_model()))
        .map_err(ConfigError::Input)?;

    Ok(Config::hosted(provider, api_key, non_empty(model)))
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
