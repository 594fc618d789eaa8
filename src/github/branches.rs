//! github::branches
//!
//! Branch listing, head resolution, and reference creation.

use reqwest::Method;
use serde_json::json;

use super::client::GitHubClient;
use super::error::GitHubError;
use super::types::{Branch, GitRef, RepoRef};

impl GitHubClient {
    /// List all branches of a repository.
    pub async fn list_branches(&self, repo: &RepoRef) -> Result<Vec<Branch>, GitHubError> {
        self.request_as(
            Method::GET,
            &format!("/repos/{}/{}/branches", repo.owner, repo.name),
            &[],
            None,
        )
        .await
    }

    /// Fetch one branch, including its head commit sha.
    pub async fn get_branch(&self, repo: &RepoRef, branch: &str) -> Result<Branch, GitHubError> {
        self.request_as(
            Method::GET,
            &format!("/repos/{}/{}/branches/{}", repo.owner, repo.name, branch),
            &[],
            None,
        )
        .await
    }

    /// Create a new branch pointing at `sha`.
    ///
    /// `branch` is the bare branch name; the `refs/heads/` prefix is added
    /// here.
    pub async fn create_branch_ref(
        &self,
        repo: &RepoRef,
        branch: &str,
        sha: &str,
    ) -> Result<GitRef, GitHubError> {
        self.request_as(
            Method::POST,
            &format!("/repos/{}/{}/git/refs", repo.owner, repo.name),
            &[],
            Some(&json!({
                "ref": format!("refs/heads/{}", branch),
                "sha": sha,
            })),
        )
        .await
    }
}
