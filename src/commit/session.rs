//! The `easy-commits commit` flow.
//!
//! check repository -> read diff -> (nothing to do | build prompt) ->
//! call backend -> show and confirm -> (commit | cancel)

use std::path::PathBuf;

use tracing::debug;

use crate::commit::lint::lint_message;
use crate::commit::prompt::build_commit_prompt;
use crate::config::Config;
use crate::console::Console;
use crate::error::CommitError;
use crate::git::Vcs;
use crate::llm::{CompletionProvider, provider_for};

/// Width of the separator lines around the generated message.
const SEPARATOR_WIDTH: usize = 51;

/// Options for one run, derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct CommitOptions {
    /// Extra context passed to the backend after the diff.
    pub context: Option<String>,
    /// Show the generated message and stop before confirmation.
    pub dry_run: bool,
}

/// How a run ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The diff was empty; no backend was called.
    NoChanges,
    /// Dry run: the message was shown and nothing else happened.
    Previewed(String),
    /// The user declined the message; the working tree was not touched.
    Cancelled,
    /// Changes were staged and committed with this message.
    Committed(String),
}

/// Drives one commit generation run against a repository and a console.
pub struct CommitSession<V, C> {
    vcs: V,
    console: C,
    config_path: PathBuf,
}

impl<V: Vcs, C: Console> CommitSession<V, C> {
    pub fn new(vcs: V, console: C, config_path: PathBuf) -> Self {
        Self {
            vcs,
            console,
            config_path,
        }
    }

    /// Run the full flow, loading the backend from the config file.
    ///
    /// The config is only read once there is a diff to describe.
    pub async fn run(&self, options: &CommitOptions) -> Result<Outcome, CommitError> {
        let Some(diff) = self.pending_diff()? else {
            return Ok(Outcome::NoChanges);
        };

        let config = Config::load_from(&self.config_path)?;
        let backend = provider_for(&config)?;

        self.propose(backend.as_ref(), &diff, options).await
    }

    /// Check for a repository and read its pending diff.
    ///
    /// Returns `None` when the diff is empty after trimming.
    pub fn pending_diff(&self) -> Result<Option<String>, CommitError> {
        if !self.vcs.is_repository() {
            return Err(CommitError::NotARepository);
        }

        let diff = self.vcs.change_set().map_err(CommitError::Diff)?;
        if diff.trim().is_empty() {
            println!("No changes to commit");
            return Ok(None);
        }

        debug!("Diff length: {} bytes", diff.len());
        Ok(Some(diff))
    }

    /// Generate a message for `diff`, show it, and commit on approval.
    pub async fn propose(
        &self,
        backend: &dyn CompletionProvider,
        diff: &str,
        options: &CommitOptions,
    ) -> Result<Outcome, CommitError> {
        let prompt = build_commit_prompt(diff, options.context.as_deref());
        debug!(
            "Commit prompt length: {} chars, backend: {}",
            prompt.len(),
            backend.provider()
        );

        let message = backend.complete(&prompt).await?;

        self.show(&message);

        if options.dry_run {
            println!("Dry run complete. No changes made.");
            return Ok(Outcome::Previewed(message));
        }

        let answer = self
            .console
            .read_line("Use this commit message? (y/n)")
            .map_err(CommitError::Input)?;

        if !parse_confirmation(&answer) {
            println!("Commit cancelled");
            return Ok(Outcome::Cancelled);
        }

        self.vcs.commit_all(&message).map_err(CommitError::Commit)?;
        println!("Commit created successfully!");

        Ok(Outcome::Committed(message))
    }

    fn show(&self, message: &str) {
        let separator = "=".repeat(SEPARATOR_WIDTH);
        println!("Generated commit message:");
        println!("{separator}");
        println!("{message}");
        println!("{separator}");

        for warning in lint_message(message) {
            println!("warning: {warning}");
        }
    }
}

/// Whether a confirmation answer means yes.
///
/// Only `y` and `yes` count, ignoring case and surrounding whitespace.
pub fn parse_confirmation(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
