//! github::types
//!
//! Serde projections of the GitHub API resources this crate reads.
//!
//! These are transient, read-mostly views fetched per call. Nothing here is
//! cached between capability invocations, and unknown response fields are
//! ignored rather than rejected so API additions cannot break parsing.

use serde::Deserialize;

/// A repository identified as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoRef {
    /// Parse an `owner/name` identifier.
    ///
    /// Returns `None` when the separator is missing or either side is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use hubcap::github::RepoRef;
    ///
    /// let repo = RepoRef::parse("rust-lang/cargo").unwrap();
    /// assert_eq!(repo.owner, "rust-lang");
    /// assert_eq!(repo.name, "cargo");
    /// assert!(RepoRef::parse("no-separator").is_none());
    /// ```
    pub fn parse(full_name: &str) -> Option<Self> {
        let (owner, name) = full_name.split_once('/')?;
        if owner.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One file addition or update staged for a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Path within the repository
    pub path: String,
    /// Full new file content
    pub content: String,
}

/// Repository details.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub full_name: String,
    pub description: Option<String>,
    pub owner: Account,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub default_branch: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    /// Size in kilobytes, as reported by the API
    #[serde(default)]
    pub size: u64,
    pub homepage: Option<String>,
    pub html_url: String,
    pub clone_url: Option<String>,
    pub ssh_url: Option<String>,
    pub license: Option<License>,
}

/// Repository owner (user or organization).
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub login: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// License metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct License {
    pub name: String,
}

/// One repository search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRepo {
    pub full_name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub updated_at: Option<String>,
    pub html_url: String,
}

/// Repository search response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    pub total_count: u64,
    pub items: Vec<SearchRepo>,
}

/// A branch with its head commit.
#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: CommitPointer,
}

/// Minimal commit reference carried by branch listings.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitPointer {
    pub sha: String,
}

/// One entry of a directory listing from the contents API.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub html_url: Option<String>,
}

/// A file fetched from the contents API.
#[derive(Debug, Clone, Deserialize)]
pub struct FileContent {
    pub name: String,
    pub path: String,
    pub sha: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub html_url: Option<String>,
    pub encoding: Option<String>,
    /// Base64 blob body; newlines inside are permitted by the API
    pub content: Option<String>,
}

/// A commit from the git data API.
#[derive(Debug, Clone, Deserialize)]
pub struct GitCommit {
    pub sha: String,
    pub tree: TreeInfo,
    #[serde(default)]
    pub parents: Vec<CommitPointer>,
    pub message: Option<String>,
}

/// A tree reference from the git data API.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeInfo {
    pub sha: String,
}

/// A git reference (branch pointer).
#[derive(Debug, Clone, Deserialize)]
pub struct GitRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub url: Option<String>,
    pub object: RefObject,
}

/// Object a git reference points at.
#[derive(Debug, Clone, Deserialize)]
pub struct RefObject {
    pub sha: String,
}

/// A pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub merged: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub closed_at: Option<String>,
    pub merged_at: Option<String>,
    pub html_url: String,
    pub body: Option<String>,
    pub user: Option<Account>,
    pub head: PrRef,
    pub base: PrRef,
    /// Observed merge readiness; owned by the remote, never interpreted here
    pub mergeable_state: Option<String>,
}

/// Head or base side of a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct PrRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
}

/// One changed file within a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestFile {
    pub filename: String,
    pub status: String,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    /// Unified diff hunk; absent for binary or oversized files
    pub patch: Option<String>,
}

/// A pull request review.
#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub id: u64,
    pub user: Option<Account>,
    pub state: String,
    pub body: Option<String>,
}

/// Response from merging a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeResult {
    #[serde(default)]
    pub merged: bool,
    pub sha: Option<String>,
    pub message: Option<String>,
}

/// Response from a single-file contents PUT.
#[derive(Debug, Clone, Deserialize)]
pub struct PutFileResult {
    pub content: Option<PutFileContent>,
    pub commit: CommitPointer,
}

/// File half of a contents PUT response.
#[derive(Debug, Clone, Deserialize)]
pub struct PutFileContent {
    pub path: String,
    pub html_url: Option<String>,
}

/// Result of a directory-or-file contents fetch. The API returns a JSON
/// array for directories and an object for files.
#[derive(Debug, Clone)]
pub enum Contents {
    Dir(Vec<ContentEntry>),
    File(Box<FileContent>),
}

#[cfg(test)]
mod tests {
    use super::*;

    mod repo_ref {
        use super::*;

        #[test]
        fn parses_owner_and_name() {
            let repo = RepoRef::parse("octocat/hello-world").unwrap();
            assert_eq!(repo.owner, "octocat");
            assert_eq!(repo.name, "hello-world");
        }

        #[test]
        fn splits_on_first_separator_only() {
            // Paths like owner/repo/sub must not be accepted as a repo name
            // by this parser; callers strip path segments first. The raw
            // split keeps everything after the first slash.
            let repo = RepoRef::parse("owner/repo.name").unwrap();
            assert_eq!(repo.name, "repo.name");
        }

        #[test]
        fn rejects_missing_separator() {
            assert!(RepoRef::parse("just-a-name").is_none());
        }

        #[test]
        fn rejects_empty_sides() {
            assert!(RepoRef::parse("/repo").is_none());
            assert!(RepoRef::parse("owner/").is_none());
            assert!(RepoRef::parse("/").is_none());
        }

        #[test]
        fn display_round_trips() {
            let repo = RepoRef::parse("a/b").unwrap();
            assert_eq!(repo.to_string(), "a/b");
        }
    }

    #[test]
    fn pull_request_deserializes_minimal_payload() {
        let pr: PullRequest = serde_json::from_value(serde_json::json!({
            "number": 7,
            "title": "Add parser",
            "state": "open",
            "html_url": "https://github.com/o/r/pull/7",
            "head": {"ref": "feature"},
            "base": {"ref": "main"}
        }))
        .unwrap();
        assert_eq!(pr.number, 7);
        assert_eq!(pr.head.ref_name, "feature");
        assert!(pr.merged.is_none());
        assert!(pr.mergeable_state.is_none());
    }
}
