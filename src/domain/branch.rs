use crate::domain::{Commit, Tag};

/// A candidate release target branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    /// Tip commit, absent for an empty branch
    pub head: Option<Commit>,
    /// Number of commits reachable from the head
    pub commit_count: usize,
}

impl Branch {
    /// Create a branch with no resolved head
    pub fn new(name: impl Into<String>) -> Self {
        Branch {
            name: name.into(),
            head: None,
            commit_count: 0,
        }
    }

    /// Set the head commit and its history size
    pub fn with_head(mut self, head: Commit, commit_count: usize) -> Self {
        self.head = Some(head);
        self.commit_count = commit_count;
        self
    }

    /// Reference used when comparing or releasing: the head commit id when
    /// resolved, otherwise the branch name
    pub fn reference(&self) -> &str {
        self.head
            .as_ref()
            .map(|c| c.id.as_str())
            .unwrap_or(&self.name)
    }

    /// How many more commits this branch has than `tag`, if any
    pub fn commits_beyond(&self, tag: &Tag) -> Option<usize> {
        self.commit_count
            .checked_sub(tag.commit_count)
            .filter(|n| *n > 0)
    }
}

/// Orders candidate branches for the target menu.
///
/// The checked-out branch always comes first, the rest follow by name
/// length. The sort is stable, so equal keys keep their input order.
pub fn rank_branches(mut branches: Vec<Branch>, current_branch: &str) -> Vec<Branch> {
    branches.sort_by_key(|b| {
        if b.name == current_branch {
            0
        } else {
            b.name.len()
        }
    });
    branches
}
