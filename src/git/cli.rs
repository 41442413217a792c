//! [`Vcs`] implementation backed by the system `git` binary.
//!
//! All operations use `std::process::Command`, inheriting the user's git
//! config, hooks, and credential setup.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::GitError;

use super::Vcs;

/// Runs `git` in the current directory, or in a fixed one when given.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Use the process's current working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every command inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(dir.into()),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Run a git command and return its stdout, or a descriptive error.
    fn run_git(&self, args: &[&str], operation: &'static str) -> Result<String, GitError> {
        debug!("Running git {}", args.join(" "));

        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GitError::SpawnFailed { operation, source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::CommandFailed { operation, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Vcs for GitCli {
    fn is_repository(&self) -> bool {
        self.command(&["rev-parse", "--git-dir"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }

    fn change_set(&self) -> Result<String, GitError> {
        let staged = self.run_git(&["diff", "--cached"], "diff --cached")?;
        if !staged.trim().is_empty() {
            return Ok(staged);
        }

        debug!("No staged changes, falling back to unstaged diff");
        self.run_git(&["diff"], "diff")
    }

    fn commit_all(&self, message: &str) -> Result<(), GitError> {
        self.run_git(&["add", "."], "add")
            .map_err(|e| GitError::StagingFailed(Box::new(e)))?;

        self.run_git(&["commit", "-m", message], "commit")
            .map_err(|e| GitError::CommitFailed(Box::new(e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use git2::{Repository, Signature};

    use super::*;

    /// Repo with one committed file and a local identity for `git commit`.
    fn repo_with_tracked_file() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@test.com").unwrap();
        config.set_bool("commit.gpgsign", false).unwrap();

        std::fs::write(dir.path().join("file.txt"), "original\n").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("file.txt")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        {
            let tree = repo.find_tree(tree_id).unwrap();
            let sig = Signature::now("Test User", "test@test.com").unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[]).unwrap();
        }

        (dir, repo)
    }

    fn stage(repo: &Repository, name: &str) {
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
    }

    #[test]
    fn test_is_repository_inside_repo() {
        let (dir, _repo) = repo_with_tracked_file();
        assert!(GitCli::in_dir(dir.path()).is_repository());
    }

    #[test]
    fn test_is_repository_outside_repo() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!GitCli::in_dir(dir.path()).is_repository());
    }

    #[test]
    fn test_is_repository_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!GitCli::in_dir(dir.path().join("gone")).is_repository());
    }

    #[test]
    fn test_change_set_clean_tree_is_empty() {
        let (dir, _repo) = repo_with_tracked_file();
        let diff = GitCli::in_dir(dir.path()).change_set().unwrap();
        assert!(diff.trim().is_empty());
    }

    #[test]
    fn test_change_set_falls_back_to_unstaged() {
        let (dir, _repo) = repo_with_tracked_file();
        std::fs::write(dir.path().join("file.txt"), "unstaged edit\n").unwrap();

        let diff = GitCli::in_dir(dir.path()).change_set().unwrap();
        assert!(diff.contains("+unstaged edit"));
        assert!(diff.contains("-original"));
    }

    #[test]
    fn test_change_set_prefers_staged() {
        let (dir, repo) = repo_with_tracked_file();
        std::fs::write(dir.path().join("other.txt"), "staged file\n").unwrap();
        stage(&repo, "other.txt");
        std::fs::write(dir.path().join("file.txt"), "unstaged edit\n").unwrap();

        let diff = GitCli::in_dir(dir.path()).change_set().unwrap();
        assert!(diff.contains("+staged file"));
        assert!(!diff.contains("unstaged edit"));
    }

    #[test]
    fn test_change_set_ignores_untracked_files() {
        let (dir, _repo) = repo_with_tracked_file();
        std::fs::write(dir.path().join("untracked.txt"), "new\n").unwrap();

        let diff = GitCli::in_dir(dir.path()).change_set().unwrap();
        assert!(diff.trim().is_empty());
    }

    #[test]
    fn test_commit_all_stages_and_commits() {
        let (dir, repo) = repo_with_tracked_file();
        std::fs::write(dir.path().join("file.txt"), "changed\n").unwrap();
        std::fs::write(dir.path().join("new.txt"), "brand new\n").unwrap();

        GitCli::in_dir(dir.path())
            .commit_all("fix: correct null check")
            .unwrap();

        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.message().unwrap().trim_end(), "fix: correct null check");
        let tree = head.tree().unwrap();
        assert!(tree.get_name("new.txt").is_some());
        assert!(repo.statuses(None).unwrap().is_empty());
    }

    #[test]
    fn test_commit_all_with_nothing_to_commit_fails_on_commit_step() {
        let (dir, _repo) = repo_with_tracked_file();
        let result = GitCli::in_dir(dir.path()).commit_all("chore: nothing");
        assert!(matches!(result, Err(GitError::CommitFailed(_))));
    }

    #[test]
    fn test_commit_all_outside_repo_fails_on_staging() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::in_dir(dir.path().join("does-not-exist"));
        let result = git.commit_all("feat: anything");
        assert!(matches!(result, Err(GitError::StagingFailed(_))));
    }

    #[test]
    fn test_run_git_invalid_command_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = GitCli::in_dir(dir.path()).run_git(&["not-a-real-command"], "invalid");
        assert!(matches!(result, Err(GitError::CommandFailed { .. })));
    }
}
