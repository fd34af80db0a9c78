//! Local repository abstraction layer
//!
//! git-release only needs a few facts from the working copy: whether we are
//! inside a repository, the checked-out branch, the URL of a remote and the
//! metadata directory holding the release message scratch file.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! ```rust
//! # use git_release::git::{LocalRepository, RepoSlug};
//! # fn example<R: LocalRepository>(repo: &R) -> git_release::Result<()> {
//! let url = repo.remote_url("origin")?;
//! let slug = RepoSlug::parse(&url);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;

static REPO_SLUG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[:/])([a-z-]+)/([a-z-]+)(?:\.git)?/?$").expect("valid slug pattern")
});

/// Read-only view of the local working copy
pub trait LocalRepository {
    /// Whether the working directory belongs to a non-bare repository
    fn is_inside_repository(&self) -> bool;

    /// Name of the checked-out branch
    ///
    /// # Returns
    /// * `Ok(String)` - Short branch name (e.g., "main")
    /// * `Err` - If HEAD is detached or cannot be read
    fn current_branch_name(&self) -> Result<String>;

    /// URL configured for the named remote
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    ///
    /// # Returns
    /// * `Ok(String)` - The fetch URL of the remote
    /// * `Err` - If the remote doesn't exist or has no URL
    fn remote_url(&self, remote: &str) -> Result<String>;

    /// Metadata directory (`.git`) of the repository
    fn git_dir(&self) -> PathBuf;
}

/// Owner and name of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        RepoSlug {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Extract `owner/name` from a remote URL.
    ///
    /// Accepts `owner/repo`, `host:owner/repo` and `scheme://host/owner/repo`
    /// forms, with an optional `.git` suffix. Both segments are lowercase
    /// letters and hyphens; anything else yields `None`.
    pub fn parse(url: &str) -> Option<Self> {
        let captures = REPO_SLUG.captures(url.trim())?;
        Some(RepoSlug::new(&captures[1], &captures[2]))
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scp_style() {
        assert_eq!(
            RepoSlug::parse("git@github.com:hassansin/gh-release.git"),
            Some(RepoSlug::new("hassansin", "gh-release"))
        );
    }

    #[test]
    fn test_parse_https() {
        assert_eq!(
            RepoSlug::parse("https://github.com/rust-lang/cargo\n"),
            Some(RepoSlug::new("rust-lang", "cargo"))
        );
    }

    #[test]
    fn test_parse_https_with_suffix_and_slash() {
        assert_eq!(
            RepoSlug::parse("https://github.com/owner/repo.git/"),
            Some(RepoSlug::new("owner", "repo"))
        );
    }

    #[test]
    fn test_parse_bare_pair() {
        assert_eq!(
            RepoSlug::parse("owner/repo"),
            Some(RepoSlug::new("owner", "repo"))
        );
    }

    #[test]
    fn test_parse_rejects_unsupported_names() {
        assert_eq!(RepoSlug::parse("git@github.com:Owner/Repo2.git"), None);
        assert_eq!(RepoSlug::parse("https://github.com/owner"), None);
        assert_eq!(RepoSlug::parse(""), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(RepoSlug::new("a", "b").to_string(), "a/b");
    }
}
