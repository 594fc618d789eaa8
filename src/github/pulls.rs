//! github::pulls
//!
//! Pull request and review operations.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::GitHubClient;
use super::error::GitHubError;
use super::types::{MergeResult, PullRequest, PullRequestFile, RepoRef, Review};

/// Request to open a pull request.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePullRequest {
    pub title: String,
    /// Branch carrying the changes
    pub head: String,
    /// Branch the changes merge into
    pub base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Request to merge a pull request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
}

/// One line comment attached to a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewComment {
    pub path: String,
    /// Position within the diff, not a file line number
    pub position: u64,
    pub body: String,
}

/// Request to submit a review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRequest {
    /// One of APPROVE, REQUEST_CHANGES, COMMENT
    pub event: String,
    pub body: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<ReviewComment>,
}

impl GitHubClient {
    /// Open a pull request.
    pub async fn create_pull_request(
        &self,
        repo: &RepoRef,
        request: &CreatePullRequest,
    ) -> Result<PullRequest, GitHubError> {
        let body = serde_json::to_value(request)
            .map_err(|e| GitHubError::Shape(format!("serializing request: {}", e)))?;
        self.request_as(
            Method::POST,
            &format!("/repos/{}/{}/pulls", repo.owner, repo.name),
            &[],
            Some(&body),
        )
        .await
    }

    /// Fetch one pull request.
    pub async fn get_pull_request(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<PullRequest, GitHubError> {
        self.request_as(
            Method::GET,
            &format!("/repos/{}/{}/pulls/{}", repo.owner, repo.name, number),
            &[],
            None,
        )
        .await
    }

    /// List the files changed by a pull request.
    pub async fn list_pull_request_files(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<Vec<PullRequestFile>, GitHubError> {
        self.request_as(
            Method::GET,
            &format!(
                "/repos/{}/{}/pulls/{}/files",
                repo.owner, repo.name, number
            ),
            &[],
            None,
        )
        .await
    }

    /// Merge a pull request.
    pub async fn merge_pull_request(
        &self,
        repo: &RepoRef,
        number: u64,
        request: &MergeRequest,
    ) -> Result<MergeResult, GitHubError> {
        let body = serde_json::to_value(request)
            .map_err(|e| GitHubError::Shape(format!("serializing request: {}", e)))?;
        self.request_as(
            Method::PUT,
            &format!(
                "/repos/{}/{}/pulls/{}/merge",
                repo.owner, repo.name, number
            ),
            &[],
            Some(&body),
        )
        .await
    }

    /// Submit a review on a pull request.
    pub async fn submit_review(
        &self,
        repo: &RepoRef,
        number: u64,
        request: &ReviewRequest,
    ) -> Result<Review, GitHubError> {
        let body = serde_json::to_value(request)
            .map_err(|e| GitHubError::Shape(format!("serializing request: {}", e)))?;
        self.request_as(
            Method::POST,
            &format!(
                "/repos/{}/{}/pulls/{}/reviews",
                repo.owner, repo.name, number
            ),
            &[],
            Some(&body),
        )
        .await
    }

    /// List the reviews on a pull request.
    pub async fn list_reviews(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<Vec<Review>, GitHubError> {
        self.request_as(
            Method::GET,
            &format!(
                "/repos/{}/{}/pulls/{}/reviews",
                repo.owner, repo.name, number
            ),
            &[],
            None,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn to_body<T: Serialize>(request: &T) -> Value {
        serde_json::to_value(request).unwrap()
    }

    #[test]
    fn create_request_omits_absent_body() {
        let value = to_body(&CreatePullRequest {
            title: "t".into(),
            head: "feature".into(),
            base: "main".into(),
            body: None,
        });
        assert!(value.get("body").is_none());
        assert_eq!(value["head"], "feature");
    }

    #[test]
    fn merge_request_serializes_only_set_fields() {
        let value = to_body(&MergeRequest {
            merge_method: Some("squash".into()),
            commit_title: None,
            commit_message: None,
        });
        assert_eq!(value["merge_method"], "squash");
        assert!(value.get("commit_title").is_none());
        assert!(value.get("commit_message").is_none());
    }

    #[test]
    fn review_request_omits_empty_comments() {
        let value = to_body(&ReviewRequest {
            event: "APPROVE".into(),
            body: "Ship it".into(),
            comments: Vec::new(),
        });
        assert!(value.get("comments").is_none());

        let value = to_body(&ReviewRequest {
            event: "REQUEST_CHANGES".into(),
            body: "See notes".into(),
            comments: vec![ReviewComment {
                path: "src/lib.rs".into(),
                position: 4,
                body: "Rename this".into(),
            }],
        });
        assert_eq!(value["comments"][0]["position"], 4);
    }
}
