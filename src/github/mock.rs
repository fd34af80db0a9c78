use crate::domain::{Branch, Release, Tag};
use crate::error::{ReleaseError, Result};
use crate::github::{Comparison, RemoteService};
use std::collections::HashMap;
use std::sync::Mutex;

/// Scripted remote service for testing without network access
///
/// Failures are scripted per operation as the message of a remote error.
pub struct MockRemoteService {
    latest_release: Option<Release>,
    branches: Vec<Branch>,
    comparisons: HashMap<(String, String), Comparison>,
    failures: HashMap<&'static str, String>,
    created: Mutex<Vec<Release>>,
    compare_calls: Mutex<Vec<(String, String)>>,
}

impl MockRemoteService {
    /// Create a service with no release, no branches and no comparisons
    pub fn new() -> Self {
        MockRemoteService {
            latest_release: None,
            branches: Vec::new(),
            comparisons: HashMap::new(),
            failures: HashMap::new(),
            created: Mutex::new(Vec::new()),
            compare_calls: Mutex::new(Vec::new()),
        }
    }

    /// Set the latest release
    pub fn with_latest_release(mut self, release: Release) -> Self {
        self.latest_release = Some(release);
        self
    }

    /// Add a branch, kept in insertion order
    pub fn with_branch(mut self, branch: Branch) -> Self {
        self.branches.push(branch);
        self
    }

    /// Script the answer for comparing `base` with `head`
    pub fn with_comparison(
        mut self,
        base: impl Into<String>,
        head: impl Into<String>,
        comparison: Comparison,
    ) -> Self {
        self.comparisons
            .insert((base.into(), head.into()), comparison);
        self
    }

    /// Make `operation` fail with `message`.
    ///
    /// `operation` is one of `latest_release`, `list_branches`,
    /// `compare_commits` or `create_release`.
    pub fn failing(mut self, operation: &'static str, message: impl Into<String>) -> Self {
        self.failures.insert(operation, message.into());
        self
    }

    /// Releases created so far
    pub fn created_releases(&self) -> Vec<Release> {
        self.created.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// `(base, head)` pairs passed to `compare_commits` so far
    pub fn compare_calls(&self) -> Vec<(String, String)> {
        self.compare_calls
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    fn check(&self, operation: &'static str, context: &str) -> Result<()> {
        match self.failures.get(operation) {
            Some(message) => Err(ReleaseError::remote(context, message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockRemoteService {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteService for MockRemoteService {
    fn latest_release(&self) -> Result<Option<Release>> {
        self.check("latest_release", "unable to get latest release")?;
        Ok(self.latest_release.clone())
    }

    fn list_branches(&self) -> Result<Vec<Branch>> {
        self.check("list_branches", "unable to list branches")?;
        Ok(self.branches.clone())
    }

    fn compare_commits(&self, base: &str, head: &str) -> Result<Comparison> {
        if let Ok(mut calls) = self.compare_calls.lock() {
            calls.push((base.to_string(), head.to_string()));
        }
        self.check("compare_commits", "unable to compare commits")?;

        self.comparisons
            .get(&(base.to_string(), head.to_string()))
            .cloned()
            .ok_or_else(|| {
                ReleaseError::remote(
                    "unable to compare commits",
                    format!("no comparison scripted for {}...{}", base, head),
                )
            })
    }

    fn create_release(
        &self,
        title: &str,
        tag_name: &str,
        target: &str,
        body: &str,
    ) -> Result<Release> {
        if title.trim().is_empty() || body.trim().is_empty() {
            return Err(ReleaseError::validation("empty release title and message"));
        }
        self.check("create_release", "unable to create new release")?;

        let release = Release {
            name: title.to_string(),
            description: body.to_string(),
            tag: Tag::new(tag_name),
            html_url: Some(format!(
                "https://github.example/releases/tag/{}?target={}",
                tag_name, target
            )),
        };

        if let Ok(mut created) = self.created.lock() {
            created.push(release.clone());
        }
        Ok(release)
    }
}
