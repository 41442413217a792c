//! AI-generated commit messages.

pub mod lint;
pub mod prompt;
pub mod session;

pub use lint::{LintWarning, lint_message};
pub use prompt::build_commit_prompt;
pub use session::{CommitOptions, CommitSession, Outcome, parse_confirmation};
