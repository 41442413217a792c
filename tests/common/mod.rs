//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

use git2::{Oid, Repository, Signature};

use easy_commits::console::Console;
use easy_commits::{Config, Provider};

/// A throwaway git repository with one committed file.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a repository containing `file.txt` in a single commit.
    ///
    /// A local user identity is configured so the `git` binary can commit.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        let mut config = repo.config().expect("Failed to open repo config");
        config
            .set_str("user.name", "Test User")
            .expect("Failed to set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Failed to set user.email");
        config
            .set_bool("commit.gpgsign", false)
            .expect("Failed to disable signing");

        let test_repo = Self { dir, repo };
        test_repo.write("file.txt", "original\n");
        test_repo.stage("file.txt");
        test_repo.commit_index("init");
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the repository root.
    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("Failed to write file");
    }

    /// Add a file to the index.
    pub fn stage(&self, name: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Commit the current index on HEAD. Returns the commit OID.
    pub fn commit_index(&self, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Message of the commit HEAD points at, without the trailing newline.
    pub fn head_message(&self) -> String {
        let head = self
            .repo
            .head()
            .expect("No HEAD")
            .peel_to_commit()
            .expect("HEAD is not a commit");
        head.message().unwrap_or("").trim_end().to_string()
    }

    /// Whether `git status` would report nothing.
    pub fn is_clean(&self) -> bool {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true);
        self.repo
            .statuses(Some(&mut opts))
            .expect("Failed to read status")
            .is_empty()
    }
}

/// Console that replays fixed answers in order.
pub struct ScriptedConsole {
    answers: RefCell<VecDeque<String>>,
    pub prompts: RefCell<Vec<String>>,
}

impl ScriptedConsole {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl Console for ScriptedConsole {
    fn read_line(&self, prompt: &str) -> io::Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left"))
    }

    fn read_secret(&self, prompt: &str) -> io::Result<String> {
        self.read_line(prompt)
    }
}

/// Write an Ollama config pointing at `base_url` into `dir`.
pub fn write_ollama_config(dir: &Path, base_url: &str) -> PathBuf {
    let path = dir.join("easy-commits-config.json");
    let config = Config::local(Some(base_url.to_string()), Some("llama2".to_string()));
    config.save_to(&path).expect("Failed to write config");
    path
}

/// Write a hosted-backend config whose endpoint is redirected to `base_url`.
pub fn write_hosted_config(dir: &Path, provider: Provider, base_url: &str) -> PathBuf {
    let path = dir.join("easy-commits-config.json");
    let mut config = Config::hosted(provider, "sk-test".to_string(), None);
    config.base_url = Some(base_url.to_string());
    config.save_to(&path).expect("Failed to write config");
    path
}
