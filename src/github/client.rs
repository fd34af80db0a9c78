use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::domain::{Branch, Commit, Release, Tag};
use crate::error::{ReleaseError, Result};
use crate::git::RepoSlug;
use crate::github::{CompareStatus, Comparison, RemoteService};

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("git-release/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const BRANCH_PAGE_SIZE: i64 = 100;

const CONTEXT_LATEST_RELEASE: &str = "unable to get latest release";
const CONTEXT_LIST_BRANCHES: &str = "unable to list branches";
const CONTEXT_COMPARE: &str = "unable to compare commits";
const CONTEXT_CREATE_RELEASE: &str = "unable to create new release";

const COMMIT_FIELDS: &str = r#"
fragment CommitFields on Commit {
  oid
  message
  author { name }
  history(first: 1) { totalCount }
}"#;

const LATEST_RELEASE_QUERY: &str = r#"
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    latestRelease {
      name
      tagName
      url
      description
      tagCommit { ...CommitFields }
    }
  }
}"#;

const BRANCHES_QUERY: &str = r#"
query($owner: String!, $name: String!, $first: Int!, $after: String) {
  repository(owner: $owner, name: $name) {
    refs(refPrefix: "refs/heads/", first: $first, after: $after) {
      nodes {
        name
        target { ... on Commit { ...CommitFields } }
      }
      pageInfo { hasNextPage endCursor }
    }
  }
}"#;

/// GitHub implementation of [RemoteService]
///
/// Reads go through GraphQL, which exposes tag commits and history sizes in
/// one round trip; compare and create use the REST API.
pub struct GithubClient {
    http: Client,
    api_url: String,
    slug: RepoSlug,
}

impl GithubClient {
    /// Build an authenticated client for `slug`
    ///
    /// # Arguments
    /// * `api_url` - REST base URL; GraphQL is served from `<api_url>/graphql`
    /// * `slug` - Repository owner and name
    /// * `token` - Personal access token
    pub fn new(api_url: impl Into<String>, slug: RepoSlug, token: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ReleaseError::config("access token contains invalid characters"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ReleaseError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(GithubClient {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            slug,
        })
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url, self.slug.owner, self.slug.name, path
        )
    }

    fn graphql<T: DeserializeOwned>(&self, context: &str, query: &str, variables: Value) -> Result<T> {
        let payload = json!({
            "query": format!("{}\n{}", query, COMMIT_FIELDS),
            "variables": variables,
        });

        let response = self
            .http
            .post(format!("{}/graphql", self.api_url))
            .json(&payload)
            .send()
            .map_err(|e| ReleaseError::remote(context, e.to_string()))?;

        let envelope: GraphqlResponse<T> = read_json(context, response)?;
        envelope.into_data(context)
    }
}

impl RemoteService for GithubClient {
    fn latest_release(&self) -> Result<Option<Release>> {
        debug!(repo = %self.slug, "fetching latest release");

        let data: LatestReleaseData = self.graphql(
            CONTEXT_LATEST_RELEASE,
            LATEST_RELEASE_QUERY,
            json!({ "owner": self.slug.owner, "name": self.slug.name }),
        )?;

        let repository = data
            .repository
            .ok_or_else(|| ReleaseError::remote(CONTEXT_LATEST_RELEASE, "repository not found"))?;

        Ok(repository.latest_release.map(ReleaseNode::into_release))
    }

    fn list_branches(&self) -> Result<Vec<Branch>> {
        let mut branches = Vec::new();
        let mut after: Option<String> = None;

        loop {
            debug!(repo = %self.slug, cursor = ?after, "fetching branch page");

            let data: BranchesData = self.graphql(
                CONTEXT_LIST_BRANCHES,
                BRANCHES_QUERY,
                json!({
                    "owner": self.slug.owner,
                    "name": self.slug.name,
                    "first": BRANCH_PAGE_SIZE,
                    "after": after,
                }),
            )?;

            let refs = data
                .repository
                .ok_or_else(|| ReleaseError::remote(CONTEXT_LIST_BRANCHES, "repository not found"))?
                .refs;

            branches.extend(refs.nodes.into_iter().map(RefNode::into_branch));

            match refs.page_info.end_cursor {
                Some(cursor) if refs.page_info.has_next_page => after = Some(cursor),
                _ => break,
            }
        }

        Ok(branches)
    }

    fn compare_commits(&self, base: &str, head: &str) -> Result<Comparison> {
        debug!(repo = %self.slug, base, head, "comparing commits");

        let response = self
            .http
            .get(self.repo_url(&format!("compare/{}...{}", base, head)))
            .send()
            .map_err(|e| ReleaseError::remote(CONTEXT_COMPARE, e.to_string()))?;

        let compare: CompareResponse = read_json(CONTEXT_COMPARE, response)?;
        compare.into_comparison()
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

        debug!(repo = %self.slug, tag_name, target, "creating release");

        let request = CreateReleaseRequest {
            tag_name,
            target_commitish: target,
            name: title,
            body,
        };

        let response = self
            .http
            .post(self.repo_url("releases"))
            .json(&request)
            .send()
            .map_err(|e| ReleaseError::remote(CONTEXT_CREATE_RELEASE, e.to_string()))?;

        let created: CreatedRelease = read_json(CONTEXT_CREATE_RELEASE, response)?;

        Ok(Release {
            name: created.name.unwrap_or_else(|| title.to_string()),
            description: created.body.unwrap_or_else(|| body.to_string()),
            tag: Tag::new(created.tag_name),
            html_url: Some(created.html_url),
        })
    }
}

/// Decode a JSON response, turning HTTP failures into remote errors that
/// carry the service's own message
fn read_json<T: DeserializeOwned>(context: &str, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ApiError>()
            .map(|e| e.message)
            .unwrap_or_default();
        return Err(ReleaseError::remote(
            context,
            format!("{} {}", status, message).trim_end(),
        ));
    }

    response
        .json::<T>()
        .map_err(|e| ReleaseError::remote(context, e.to_string()))
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

impl<T> GraphqlResponse<T> {
    fn into_data(self, context: &str) -> Result<T> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ReleaseError::remote(context, message));
        }

        self.data
            .ok_or_else(|| ReleaseError::remote(context, "empty response"))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitNode {
    oid: String,
    message: String,
    author: Option<AuthorNode>,
    history: HistoryNode,
}

#[derive(Debug, Deserialize)]
struct AuthorNode {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryNode {
    total_count: usize,
}

impl CommitNode {
    fn into_commit(self) -> (Commit, usize) {
        let author = self.author.and_then(|a| a.name).unwrap_or_default();
        (
            Commit::new(self.oid, self.message, author),
            self.history.total_count,
        )
    }
}

#[derive(Debug, Deserialize)]
struct LatestReleaseData {
    repository: Option<LatestReleaseRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestReleaseRepository {
    latest_release: Option<ReleaseNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseNode {
    name: Option<String>,
    tag_name: String,
    url: Option<String>,
    description: Option<String>,
    tag_commit: Option<CommitNode>,
}

impl ReleaseNode {
    fn into_release(self) -> Release {
        let mut tag = Tag::new(self.tag_name);
        if let Some(node) = self.tag_commit {
            let (commit, count) = node.into_commit();
            tag = tag.with_target(commit, count);
        }

        Release {
            name: self.name.unwrap_or_else(|| tag.name.clone()),
            description: self.description.unwrap_or_default(),
            tag,
            html_url: self.url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BranchesData {
    repository: Option<BranchesRepository>,
}

#[derive(Debug, Deserialize)]
struct BranchesRepository {
    refs: RefConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefConnection {
    nodes: Vec<RefNode>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RefNode {
    name: String,
    target: Option<CommitNode>,
}

impl RefNode {
    fn into_branch(self) -> Branch {
        let branch = Branch::new(self.name);
        match self.target {
            Some(node) => {
                let (head, count) = node.into_commit();
                branch.with_head(head, count)
            }
            None => branch,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    status: String,
    #[serde(default)]
    total_commits: usize,
    #[serde(default)]
    commits: Vec<RestCommit>,
}

#[derive(Debug, Deserialize)]
struct RestCommit {
    sha: String,
    commit: RestCommitDetail,
}

#[derive(Debug, Deserialize)]
struct RestCommitDetail {
    message: String,
    author: Option<AuthorNode>,
}

impl CompareResponse {
    /// Commits in the range that the response left out; the API caps one
    /// comparison at 250 commits
    fn omitted_commits(&self) -> usize {
        self.total_commits.saturating_sub(self.commits.len())
    }

    fn into_comparison(self) -> Result<Comparison> {
        let status = CompareStatus::parse(&self.status).ok_or_else(|| {
            ReleaseError::remote(
                CONTEXT_COMPARE,
                format!("unknown comparison status '{}'", self.status),
            )
        })?;

        let omitted = self.omitted_commits();
        if omitted > 0 {
            warn!(
                total = self.total_commits,
                listed = self.commits.len(),
                "comparison truncated, {} commits missing from the release notes",
                omitted
            );
        }

        let commits = self
            .commits
            .into_iter()
            .map(|c| {
                let author = c.commit.author.and_then(|a| a.name).unwrap_or_default();
                Commit::new(c.sha, c.commit.message, author)
            })
            .collect();

        Ok(Comparison { status, commits })
    }
}

#[derive(Debug, Serialize)]
struct CreateReleaseRequest<'a> {
    tag_name: &'a str,
    target_commitish: &'a str,
    name: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedRelease {
    html_url: String,
    tag_name: String,
    name: Option<String>,
    body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug() -> RepoSlug {
        RepoSlug::new("owner", "repo")
    }

    #[test]
    fn test_new_trims_api_url() {
        let client = GithubClient::new("https://ghe.example.com/api/v3/", slug(), "token").unwrap();
        assert_eq!(
            client.repo_url("releases"),
            "https://ghe.example.com/api/v3/repos/owner/repo/releases"
        );
    }

    #[test]
    fn test_new_rejects_header_unsafe_token() {
        assert!(GithubClient::new(DEFAULT_API_URL, slug(), "bad\ntoken").is_err());
    }

    #[test]
    fn test_create_release_refuses_empty_fields() {
        let client = GithubClient::new(DEFAULT_API_URL, slug(), "token").unwrap();
        let err = client.create_release("", "v1.0.1", "abc", "body").unwrap_err();
        assert!(matches!(err, ReleaseError::Validation(_)));
        let err = client.create_release("title", "v1.0.1", "abc", "").unwrap_err();
        assert!(matches!(err, ReleaseError::Validation(_)));
    }

    #[test]
    fn test_latest_release_mapping() {
        let raw = r#"{
            "data": {
                "repository": {
                    "latestRelease": {
                        "name": "First",
                        "tagName": "v1.0.0",
                        "url": "https://github.com/owner/repo/releases/tag/v1.0.0",
                        "description": "notes",
                        "tagCommit": {
                            "oid": "0123456789abcdef0123456789abcdef01234567",
                            "message": "Release 1.0.0",
                            "author": { "name": "Alice" },
                            "history": { "totalCount": 10 }
                        }
                    }
                }
            }
        }"#;

        let envelope: GraphqlResponse<LatestReleaseData> = serde_json::from_str(raw).unwrap();
        let release = envelope
            .into_data(CONTEXT_LATEST_RELEASE)
            .unwrap()
            .repository
            .unwrap()
            .latest_release
            .unwrap()
            .into_release();

        assert_eq!(release.name, "First");
        assert_eq!(release.tag.name, "v1.0.0");
        assert_eq!(release.tag.commit_count, 10);
        let target = release.tag.target.unwrap();
        assert_eq!(target.short_id, "0123456");
        assert_eq!(target.author, "Alice");
    }

    #[test]
    fn test_no_latest_release() {
        let raw = r#"{ "data": { "repository": { "latestRelease": null } } }"#;
        let envelope: GraphqlResponse<LatestReleaseData> = serde_json::from_str(raw).unwrap();
        let data = envelope.into_data(CONTEXT_LATEST_RELEASE).unwrap();
        assert!(data.repository.unwrap().latest_release.is_none());
    }

    #[test]
    fn test_graphql_errors_become_remote_errors() {
        let raw = r#"{
            "data": null,
            "errors": [{ "message": "Could not resolve to a Repository" }]
        }"#;
        let envelope: GraphqlResponse<LatestReleaseData> = serde_json::from_str(raw).unwrap();
        let err = envelope.into_data(CONTEXT_LATEST_RELEASE).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unable to get latest release: Could not resolve to a Repository"
        );
    }

    #[test]
    fn test_branch_page_mapping() {
        let raw = r#"{
            "data": {
                "repository": {
                    "refs": {
                        "nodes": [
                            {
                                "name": "main",
                                "target": {
                                    "oid": "aaaaaaaaaa",
                                    "message": "Add feature",
                                    "author": { "name": "Bob" },
                                    "history": { "totalCount": 12 }
                                }
                            },
                            { "name": "empty", "target": null }
                        ],
                        "pageInfo": { "hasNextPage": true, "endCursor": "Y3Vyc29y" }
                    }
                }
            }
        }"#;

        let envelope: GraphqlResponse<BranchesData> = serde_json::from_str(raw).unwrap();
        let refs = envelope
            .into_data(CONTEXT_LIST_BRANCHES)
            .unwrap()
            .repository
            .unwrap()
            .refs;
        assert!(refs.page_info.has_next_page);
        assert_eq!(refs.page_info.end_cursor.as_deref(), Some("Y3Vyc29y"));

        let branches: Vec<Branch> = refs.nodes.into_iter().map(RefNode::into_branch).collect();
        assert_eq!(branches[0].name, "main");
        assert_eq!(branches[0].commit_count, 12);
        assert_eq!(branches[0].reference(), "aaaaaaaaaa");
        assert!(branches[1].head.is_none());
        assert_eq!(branches[1].reference(), "empty");
    }

    #[test]
    fn test_compare_mapping() {
        let raw = r#"{
            "status": "ahead",
            "ahead_by": 2,
            "commits": [
                { "sha": "abc1234ffff", "commit": { "message": "Fix bug", "author": { "name": "Alice" } } },
                { "sha": "def4567ffff", "commit": { "message": "Add feature\n\nDetails", "author": { "name": "Bob" } } }
            ]
        }"#;

        let response: CompareResponse = serde_json::from_str(raw).unwrap();
        let comparison = response.into_comparison().unwrap();
        assert_eq!(comparison.status, CompareStatus::Ahead);
        assert_eq!(comparison.commits.len(), 2);
        assert_eq!(comparison.commits[0].short_id, "abc1234");
        assert_eq!(comparison.commits[1].subject(), "Add feature");
        assert_eq!(comparison.commits[1].author, "Bob");
    }

    #[test]
    fn test_compare_reports_truncated_range() {
        let raw = r#"{
            "status": "ahead",
            "total_commits": 300,
            "commits": [
                { "sha": "abc1234ffff", "commit": { "message": "Fix bug", "author": { "name": "Alice" } } }
            ]
        }"#;

        let response: CompareResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.omitted_commits(), 299);
        assert_eq!(response.into_comparison().unwrap().commits.len(), 1);
    }

    #[test]
    fn test_compare_without_total_is_complete() {
        let raw = r#"{ "status": "identical", "commits": [] }"#;
        let response: CompareResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.omitted_commits(), 0);
    }

    #[test]
    fn test_compare_unknown_status() {
        let raw = r#"{ "status": "weird", "commits": [] }"#;
        let response: CompareResponse = serde_json::from_str(raw).unwrap();
        let err = response.into_comparison().unwrap_err();
        assert!(err.to_string().starts_with("unable to compare commits"));
    }

    #[test]
    fn test_create_request_shape() {
        let request = CreateReleaseRequest {
            tag_name: "v1.0.1",
            target_commitish: "abc",
            name: "v1.0.1",
            body: "* fix",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["tag_name"], "v1.0.1");
        assert_eq!(value["target_commitish"], "abc");
        assert_eq!(value["name"], "v1.0.1");
        assert_eq!(value["body"], "* fix");
    }
}
