//! capability::review
//!
//! Submitting and listing pull request reviews.

use std::sync::Arc;

use async_trait::async_trait;

use super::input::{
    parse_object, parse_pull_target, require_fields, str_field, u64_field,
};
use super::traits::{Capability, CapabilityError};
use crate::github::{GitHubClient, ReviewComment, ReviewRequest};

/// Review events the API accepts.
const REVIEW_EVENTS: [&str; 3] = ["APPROVE", "REQUEST_CHANGES", "COMMENT"];

/// Submit a review on a pull request.
pub struct ReviewPullRequest {
    client: Arc<GitHubClient>,
}

impl ReviewPullRequest {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Capability for ReviewPullRequest {
    fn name(&self) -> &'static str {
        "review_pull_request"
    }

    fn summary(&self) -> &'static str {
        "Approve, request changes on, or comment on a pull request"
    }

    fn input_spec(&self) -> &'static str {
        r#"Submit a review on a pull request.
Input is a JSON object:
- repo_full_name: "owner/repo" (required)
- pull_number: the pull request number (required)
- event: "APPROVE", "REQUEST_CHANGES", or "COMMENT" (required)
- body: review comment text (required)
- comments: optional list of line comments, each with:
  - path: file path
  - position: position in the diff
  - body: comment text

Example:
  {"repo_full_name": "octocat/hello-world", "pull_number": 5,
   "event": "APPROVE", "body": "Looks good."}

Example with line comments:
  {"repo_full_name": "octocat/hello-world", "pull_number": 5,
   "event": "REQUEST_CHANGES", "body": "See inline notes.",
   "comments": [{"path": "src/app.js", "position": 4,
                 "body": "Rename this for clarity."}]}
"#
    }

    async fn run(&self, input: &str) -> Result<String, CapabilityError> {
        let map = parse_object(input)?;
        require_fields(&map, &["repo_full_name", "pull_number", "event", "body"])?;

        let event = str_field(&map, "event")?;
        if !REVIEW_EVENTS.contains(&event) {
            return Err(CapabilityError::Validation(format!(
                "Invalid event type. Must be one of: {}.",
                REVIEW_EVENTS.join(", ")
            )));
        }

        let repo = super::input::parse_repo(str_field(&map, "repo_full_name")?)?;
        let number = u64_field(&map, "pull_number")?;

        let comments: Vec<ReviewComment> = match map.get("comments") {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(value) => serde_json::from_value(value.clone()).map_err(|_| {
                CapabilityError::validation(
                    "Each comment must have 'path', 'position', and 'body' fields.",
                )
            })?,
        };

        let request = ReviewRequest {
            event: event.to_string(),
            body: str_field(&map, "body")?.to_string(),
            comments,
        };

        let review = self.client.submit_review(&repo, number, &request).await?;

        let verb = match event {
            "APPROVE" => "approved",
            "REQUEST_CHANGES" => "requested changes to",
            _ => "commented on",
        };
        Ok(format!(
            "Successfully {} pull request #{} in {}.\nReview ID: {}",
            verb, number, repo, review.id
        ))
    }
}

/// List the reviews on a pull request.
pub struct ListReviews {
    client: Arc<GitHubClient>,
}

impl ListReviews {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Capability for ListReviews {
    fn name(&self) -> &'static str {
        "list_reviews"
    }

    fn summary(&self) -> &'static str {
        "List the reviews on a pull request"
    }

    fn input_spec(&self) -> &'static str {
        r#"List all reviews on a pull request.
Input is "owner/repo/pull_number" or
{"repo_full_name": "owner/repo", "pull_number": N}.

Example: "octocat/hello-world/5"
"#
    }

    async fn run(&self, input: &str) -> Result<String, CapabilityError> {
        let target = parse_pull_target(input)?;
        let reviews = self
            .client
            .list_reviews(&target.repo, target.number)
            .await?;

        if reviews.is_empty() {
            return Ok(format!(
                "No reviews found for pull request #{} in {}.",
                target.number, target.repo
            ));
        }

        let mut out = format!(
            "# Reviews for Pull Request #{} in {}\n\n",
            target.number, target.repo
        );
        for review in &reviews {
            let user = review
                .user
                .as_ref()
                .map(|u| u.login.as_str())
                .unwrap_or("Unknown");
            out.push_str(&format!(
                "## Review by {} - {}\n\n",
                user,
                state_label(&review.state)
            ));
            out.push_str(&format!(
                "{}\n\n---\n\n",
                review
                    .body
                    .as_deref()
                    .map(str::trim)
                    .filter(|b| !b.is_empty())
                    .unwrap_or("(No comment)")
            ));
        }
        Ok(out)
    }
}

/// Human-readable label for a review state.
fn state_label(state: &str) -> String {
    match state.to_uppercase().as_str() {
        "APPROVED" => "APPROVED".to_string(),
        "CHANGES_REQUESTED" => "CHANGES REQUESTED".to_string(),
        "COMMENTED" => "COMMENTED".to_string(),
        other => other.to_string(),
    }
}
