//! Persisted provider settings.
//!
//! The whole record lives in a single JSON file under the user's home
//! directory. It is read and written wholesale; there is no partial update.

pub mod setup;

use std::env;
use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::ConfigError;

pub use setup::run_setup;

/// File name of the config file inside the home directory.
pub const CONFIG_FILE_NAME: &str = ".easy-commits-config.json";

/// Environment variable to override the config file location.
pub const CONFIG_ENV_VAR: &str = "EASY_COMMITS_CONFIG";

/// Base URL used for Ollama when none is configured.
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Model used for Ollama when the user does not name one.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama2";

/// Supported text-generation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Hosted chat-completions API.
    OpenAi,
    /// Hosted messages API.
    Anthropic,
    /// Local generation API.
    Ollama,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::Ollama => "Ollama",
        }
    }

    /// Value stored in the config file.
    pub fn key(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Ollama => "ollama",
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Provider::Ollama)
    }

    /// Model written to the config when the user accepts the default.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-3.5-turbo",
            Provider::Anthropic => "claude-3-haiku-20240307",
            Provider::Ollama => DEFAULT_OLLAMA_MODEL,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            "ollama" => Ok(Provider::Ollama),
            _ => Err(ConfigError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// The settings record written by `easy-commits config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub provider: Provider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// On-disk shape before the provider string is resolved.
#[derive(Deserialize)]
struct RawConfig {
    provider: String,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    model: String,
    #[serde(default)]
    base_url: Option<String>,
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Ok(Config {
            provider: raw.provider.parse()?,
            api_key: raw.api_key,
            model: raw.model,
            base_url: raw.base_url,
        })
    }
}

impl Config {
    /// Settings for a hosted backend, defaulting the model when none is given.
    pub fn hosted(provider: Provider, api_key: String, model: Option<String>) -> Self {
        Self {
            provider,
            api_key: Some(api_key),
            model: model.unwrap_or_else(|| provider.default_model().to_string()),
            base_url: None,
        }
    }

    /// Settings for a local Ollama server. The base URL is always filled in.
    pub fn local(base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            provider: Provider::Ollama,
            api_key: None,
            model: model.unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            base_url: Some(base_url.unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string())),
        }
    }

    /// Load the config from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path()?)
    }

    /// Load the config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::ReadFailed(e),
        })?;

        let raw: RawConfig = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        let config = Config::try_from(raw)?;
        if config.model.trim().is_empty() {
            warn!("No model set in {}; the {} request will likely be rejected", path.display(), config.provider);
        }
        debug!("Loaded {} config from {}", config.provider, path.display());
        Ok(config)
    }

    /// Save the config to the default location, returning the path written.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save the config to an explicit path, replacing any existing file.
    ///
    /// The record is written to a temp file in the same directory and then
    /// renamed over the destination, so a failed write never leaves a
    /// truncated config behind. The file is readable by its owner only.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut file = NamedTempFile::new_in(dir).map_err(ConfigError::WriteFailed)?;
        file.write_all(json.as_bytes())
            .map_err(ConfigError::WriteFailed)?;
        restrict_permissions(&file)?;

        file.persist(path)
            .map_err(|e| ConfigError::WriteFailed(e.error))?;

        debug!("Wrote config to {}", path.display());
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(file: &NamedTempFile) -> Result<(), ConfigError> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    file.as_file()
        .set_permissions(Permissions::from_mode(0o600))
        .map_err(ConfigError::WriteFailed)
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &NamedTempFile) -> Result<(), ConfigError> {
    Ok(())
}

/// Resolve the config file path.
///
/// Reads from EASY_COMMITS_CONFIG if set, otherwise
/// `<home>/.easy-commits-config.json`.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    match env::var(CONFIG_ENV_VAR) {
        Ok(v) if !v.is_empty() => Ok(PathBuf::from(v)),
        _ => dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::HomeDirNotFound),
    }
}
