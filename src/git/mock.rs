use crate::error::{ReleaseError, Result};
use crate::git::LocalRepository;
use std::collections::HashMap;
use std::path::PathBuf;

/// Mock repository for testing without an actual working copy
pub struct MockRepository {
    inside: bool,
    current_branch: Option<String>,
    remotes: HashMap<String, String>,
    git_dir: PathBuf,
}

impl MockRepository {
    /// Create a mock that is inside a repository with no branch or remote
    pub fn new() -> Self {
        MockRepository {
            inside: true,
            current_branch: None,
            remotes: HashMap::new(),
            git_dir: PathBuf::from(".git"),
        }
    }

    /// Mark the mock as being outside any repository
    pub fn outside(mut self) -> Self {
        self.inside = false;
        self
    }

    /// Set the checked-out branch
    pub fn with_current_branch(mut self, branch: impl Into<String>) -> Self {
        self.current_branch = Some(branch.into());
        self
    }

    /// Add a remote with its URL
    pub fn with_remote(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.remotes.insert(name.into(), url.into());
        self
    }

    /// Set the metadata directory
    pub fn with_git_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.git_dir = dir.into();
        self
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRepository for MockRepository {
    fn is_inside_repository(&self) -> bool {
        self.inside
    }

    fn current_branch_name(&self) -> Result<String> {
        self.current_branch
            .clone()
            .ok_or_else(|| ReleaseError::config("HEAD is detached"))
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        self.remotes
            .get(remote)
            .cloned()
            .ok_or_else(|| ReleaseError::config(format!("cannot find remote '{}'", remote)))
    }

    fn git_dir(&self) -> PathBuf {
        self.git_dir.clone()
    }
}
