//! easy-commits - drafts conventional commit messages from pending changes.
//!
//! # Overview
//!
//! easy-commits reads the staged diff (or the unstaged one when nothing is
//! staged), asks a configured backend (OpenAI, Anthropic, or a local Ollama
//! server) for a commit message, shows it, and commits on approval.

pub mod commit;
pub mod config;
pub mod console;
pub mod error;
pub mod git;
pub mod llm;

// Re-export commonly used types
pub use commit::{CommitOptions, CommitSession, Outcome};
pub use config::{Config, Provider};
pub use console::{Console, TerminalConsole};
pub use error::{CommitError, ConfigError, GitError, ProviderError};
pub use git::{GitCli, Vcs};
pub use llm::{CompletionProvider, provider_for};
