//! Version-control operations needed by the commit flow.

pub mod cli;

pub use cli::GitCli;

use crate::error::GitError;

/// The three things the commit flow asks of the version-control tool.
///
/// [`GitCli`] shells out to the `git` binary; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
pub trait Vcs {
    /// Whether the working directory is inside a repository.
    fn is_repository(&self) -> bool;

    /// The staged diff, or the unstaged diff when nothing is staged.
    ///
    /// The text is returned verbatim; an empty string means there is
    /// nothing to commit.
    fn change_set(&self) -> Result<String, GitError>;

    /// Stage every change in the working tree and commit it with `message`.
    ///
    /// Staging is not rolled back if the commit step fails.
    fn commit_all(&self, message: &str) -> Result<(), GitError>;
}
