//! Commit range between the last release and a candidate target

use tracing::debug;

use crate::domain::Commit;
use crate::error::Result;
use crate::github::{CompareStatus, RemoteService};

/// What a target branch holds beyond the last release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitDiff {
    /// Head is strictly ahead; commits are ordered oldest first
    Ahead(Vec<Commit>),
    /// Nothing to release: identical, behind, or diverged without new commits
    NothingNew(CompareStatus),
}

impl CommitDiff {
    /// Commits to release, empty when there is nothing new
    pub fn commits(&self) -> &[Commit] {
        match self {
            CommitDiff::Ahead(commits) => commits,
            CommitDiff::NothingNew(_) => &[],
        }
    }
}

/// Determine which commits `head` adds on top of `base`.
///
/// Only an `ahead` status with at least one commit yields
/// [CommitDiff::Ahead]; every other relationship is reported as
/// [CommitDiff::NothingNew]. Transport failures are returned as errors.
pub fn diff_commits<S: RemoteService + ?Sized>(
    remote: &S,
    base: &str,
    head: &str,
) -> Result<CommitDiff> {
    let comparison = remote.compare_commits(base, head)?;
    debug!(
        base,
        head,
        status = %comparison.status,
        commits = comparison.commits.len(),
        "compared release range"
    );

    match comparison.status {
        CompareStatus::Ahead if !comparison.commits.is_empty() => {
            Ok(CommitDiff::Ahead(comparison.commits))
        }
        status => Ok(CommitDiff::NothingNew(status)),
    }
}
