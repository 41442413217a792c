//! Error types for easy-commits modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Provider;

/// Errors from reading, writing, or interpreting the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    HomeDirNotFound,

    #[error("Config file not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to write config file")]
    WriteFailed(#[source] std::io::Error),

    #[error("Config file is malformed")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to serialize config")]
    Serialize(#[source] serde_json::Error),

    #[error("Unsupported provider: {0} (expected openai, anthropic, or ollama)")]
    UnsupportedProvider(String),

    #[error("No API key configured for {0}")]
    MissingApiKey(Provider),

    #[error("Failed to read input")]
    Input(#[source] std::io::Error),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Errors from invoking the `git` binary.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to run git {operation}")]
    SpawnFailed {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed: {stderr}")]
    CommandFailed {
        operation: &'static str,
        stderr: String,
    },

    #[error("Failed to stage changes")]
    StagingFailed(#[source] Box<GitError>),

    #[error("Failed to create commit")]
    CommitFailed(#[source] Box<GitError>),
}

/// Errors from a text-generation backend.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Connection failures and timeouts, passed through as reqwest reports them.
    #[error(transparent)]
    Transport(reqwest::Error),

    #[error("{provider} API returned status {status}: {body}")]
    Status {
        provider: Provider,
        status: u16,
        body: String,
    },

    #[error("{provider} returned invalid JSON")]
    InvalidJson {
        provider: Provider,
        #[source]
        source: serde_json::Error,
    },

    #[error("No response from {0}")]
    EmptyResponse(Provider),

    #[error("Invalid response format from {0}")]
    InvalidFormat(Provider),

    #[error("No text in {0} response")]
    MissingText(Provider),
}

/// Errors from the commit generation flow.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Not in a git repository")]
    NotARepository,

    #[error("Failed to get git diff")]
    Diff(#[source] GitError),

    #[error("Failed to load config")]
    Config(#[from] ConfigError),

    #[error("Failed to generate commit message")]
    Provider(#[from] ProviderError),

    #[error("Failed to read confirmation")]
    Input(#[source] std::io::Error),

    #[error("Failed to create commit")]
    Commit(#[source] GitError),
}

impl CommitError {
    /// Whether the user should be pointed at `easy-commits config`.
    pub fn needs_setup(&self) -> bool {
        matches!(
            self,
            CommitError::Config(
                ConfigError::NotFound(_)
                    | ConfigError::Parse(_)
                    | ConfigError::HomeDirNotFound
                    | ConfigError::UnsupportedProvider(_)
                    | ConfigError::MissingApiKey(_)
            )
        )
    }
}
