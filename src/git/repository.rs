use crate::error::{ReleaseError, Result};
use git2::Repository as Git2Repo;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the repository metadata directory
pub const GIT_DIR_ENV: &str = "GIT_DIR";

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)
            .map_err(|e| ReleaseError::config(format!("not a git repo: {}", e.message())))?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::LocalRepository for Git2Repository {
    fn is_inside_repository(&self) -> bool {
        !self.repo.is_bare()
    }

    fn current_branch_name(&self) -> Result<String> {
        if self.repo.head_detached()? {
            return Err(ReleaseError::config("HEAD is detached"));
        }

        let head = self.repo.head()?;
        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| ReleaseError::config("current branch name is not valid UTF-8"))
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        let found = self
            .repo
            .find_remote(remote)
            .map_err(|e| ReleaseError::config(format!("cannot find remote '{}': {}", remote, e.message())))?;

        found
            .url()
            .map(str::to_string)
            .ok_or_else(|| ReleaseError::config(format!("remote '{}' has no URL", remote)))
    }

    fn git_dir(&self) -> PathBuf {
        env::var_os(GIT_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| self.repo.path().to_path_buf())
    }
}
