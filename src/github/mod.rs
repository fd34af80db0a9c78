//! Remote repository service abstraction
//!
//! The release workflow talks to the hosting service through the
//! [RemoteService] trait:
//!
//! - [client::GithubClient]: GitHub implementation over GraphQL and REST
//! - [mock::MockRemoteService]: scripted implementation for testing

pub mod client;
pub mod mock;

pub use client::GithubClient;
pub use mock::MockRemoteService;

use std::fmt;

use crate::domain::{Branch, Commit, Release};
use crate::error::Result;

/// How `head` relates to `base` in a commit comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareStatus {
    Ahead,
    Behind,
    Identical,
    Diverged,
}

impl CompareStatus {
    /// Parse the status string reported by the GitHub compare API
    pub fn parse(status: &str) -> Option<Self> {
        match status {
            "ahead" => Some(CompareStatus::Ahead),
            "behind" => Some(CompareStatus::Behind),
            "identical" => Some(CompareStatus::Identical),
            "diverged" => Some(CompareStatus::Diverged),
            _ => None,
        }
    }
}

impl fmt::Display for CompareStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompareStatus::Ahead => "ahead",
            CompareStatus::Behind => "behind",
            CompareStatus::Identical => "identical",
            CompareStatus::Diverged => "diverged",
        };
        f.write_str(s)
    }
}

/// Result of comparing two references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub status: CompareStatus,
    /// Commits reachable from head but not from base
    pub commits: Vec<Commit>,
}

/// Operations the release workflow needs from the hosting service
///
/// Implementors must be `Sync`: the latest release and the branch list are
/// fetched from two threads at once.
pub trait RemoteService: Sync {
    /// Most recent published release, `None` when the repository has none
    fn latest_release(&self) -> Result<Option<Release>>;

    /// Every branch of the repository, in the order the service reports them
    fn list_branches(&self) -> Result<Vec<Branch>>;

    /// Compare `base` with `head` (commit ids or ref names)
    fn compare_commits(&self, base: &str, head: &str) -> Result<Comparison>;

    /// Create a release titled `title` tagging `target` as `tag_name`.
    ///
    /// Returns the created release with its web URL populated.
    fn create_release(
        &self,
        title: &str,
        tag_name: &str,
        target: &str,
        body: &str,
    ) -> Result<Release>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_status_parse() {
        assert_eq!(CompareStatus::parse("ahead"), Some(CompareStatus::Ahead));
        assert_eq!(CompareStatus::parse("behind"), Some(CompareStatus::Behind));
        assert_eq!(
            CompareStatus::parse("identical"),
            Some(CompareStatus::Identical)
        );
        assert_eq!(
            CompareStatus::parse("diverged"),
            Some(CompareStatus::Diverged)
        );
        assert_eq!(CompareStatus::parse("sideways"), None);
    }

    #[test]
    fn test_compare_status_display() {
        assert_eq!(CompareStatus::Identical.to_string(), "identical");
    }
}
