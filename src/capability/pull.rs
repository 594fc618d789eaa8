//! capability::pull
//!
//! Pull request creation, inspection, and merging.

use std::sync::Arc;

use async_trait::async_trait;

use super::input::{
    opt_str_field, parse_object, parse_pull_target, require_fields, str_field, u64_field,
};
use super::traits::{Capability, CapabilityError};
use crate::github::{CreatePullRequest as CreatePrBody, GitHubClient, GitHubError, MergeRequest};
use crate::render;

/// Open a pull request.
pub struct CreatePullRequest {
    client: Arc<GitHubClient>,
}

impl CreatePullRequest {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Capability for CreatePullRequest {
    fn name(&self) -> &'static str {
        "create_pull_request"
    }

    fn summary(&self) -> &'static str {
        "Open a pull request between two branches"
    }

    fn input_spec(&self) -> &'static str {
        r#"Create a pull request.
Input is a JSON object:
- repo_full_name: "owner/repo" (required)
- title: pull request title (required)
- head: branch carrying the changes (required)
- base: branch to merge into (required)
- body: description (optional)

Example:
  {"repo_full_name": "octocat/hello-world", "title": "Add search",
   "head": "feature/search", "base": "main",
   "body": "Adds the search capability."}
"#
    }

    async fn run(&self, input: &str) -> Result<String, CapabilityError> {
        let map = parse_object(input)?;
        require_fields(&map, &["repo_full_name", "title", "head", "base"])?;

        let repo = super::input::parse_repo(str_field(&map, "repo_full_name")?)?;
        let request = CreatePrBody {
            title: str_field(&map, "title")?.to_string(),
            head: str_field(&map, "head")?.to_string(),
            base: str_field(&map, "base")?.to_string(),
            body: opt_str_field(&map, "body")?.map(str::to_string),
        };

        let pr = self.client.create_pull_request(&repo, &request).await?;
        Ok(format!(
            "Successfully created pull request #{}: {}",
            pr.number, pr.html_url
        ))
    }
}

/// Fetch a pull request with its changed files.
pub struct GetPullRequest {
    client: Arc<GitHubClient>,
}

impl GetPullRequest {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Capability for GetPullRequest {
    fn name(&self) -> &'static str {
        "get_pull_request"
    }

    fn summary(&self) -> &'static str {
        "Get a pull request's details and changed files"
    }

    fn input_spec(&self) -> &'static str {
        r#"Get detailed information about a pull request.
Input is "owner/repo/pull_number" or
{"repo_full_name": "owner/repo", "pull_number": N}.

Example: "octocat/hello-world/5"
"#
    }

    async fn run(&self, input: &str) -> Result<String, CapabilityError> {
        let target = parse_pull_target(input)?;
        let pr = self
            .client
            .get_pull_request(&target.repo, target.number)
            .await?;
        let files = self
            .client
            .list_pull_request_files(&target.repo, target.number)
            .await?;

        let mut out = format!("# Pull Request #{}: {}\n\n", pr.number, pr.title);

        out.push_str(&format!("**Status**: {}", pr.state.to_uppercase()));
        if pr.merged == Some(true) {
            out.push_str(" (MERGED)");
        }
        out.push('\n');

        if let Some(user) = &pr.user {
            out.push_str(&format!("**Author**: {}\n", user.login));
        }
        if let Some(created) = &pr.created_at {
            out.push_str(&format!("**Created**: {}\n", created));
        }
        if let Some(updated) = &pr.updated_at {
            out.push_str(&format!("**Updated**: {}\n", updated));
        }
        if let Some(closed) = &pr.closed_at {
            out.push_str(&format!("**Closed**: {}\n", closed));
        }
        if let Some(merged) = &pr.merged_at {
            out.push_str(&format!("**Merged**: {}\n", merged));
        }
        if let Some(state) = &pr.mergeable_state {
            out.push_str(&format!("**Mergeable State**: {}\n", state));
        }
        out.push_str(&format!("**URL**: {}\n\n", pr.html_url));

        out.push_str(&format!("**Base Branch**: {}\n", pr.base.ref_name));
        out.push_str(&format!("**Head Branch**: {}\n\n", pr.head.ref_name));

        if let Some(body) = pr.body.as_deref().filter(|b| !b.is_empty()) {
            out.push_str("## Description\n\n");
            out.push_str(&format!("{}\n\n", body));
        }

        if !files.is_empty() {
            out.push_str("## Files Changed\n\n");
            for file in &files {
                out.push_str(&format!(
                    "- **{}** ({}, +{}/-{})\n",
                    file.filename, file.status, file.additions, file.deletions
                ));
            }
        }
        Ok(out)
    }
}

/// Merge a pull request.
pub struct MergePullRequest {
    client: Arc<GitHubClient>,
}

impl MergePullRequest {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

/// Merge methods the API accepts.
const MERGE_METHODS: [&str; 3] = ["merge", "squash", "rebase"];

#[async_trait]
impl Capability for MergePullRequest {
    fn name(&self) -> &'static str {
        "merge_pull_request"
    }

    fn summary(&self) -> &'static str {
        "Merge a pull request"
    }

    fn input_spec(&self) -> &'static str {
        r#"Merge a pull request.
Input is a JSON object:
- repo_full_name: "owner/repo" (required)
- pull_number: the pull request number (required)
- merge_method: one of "merge", "squash", "rebase" (optional,
  defaults to "merge")
- commit_title: title for the merge commit (optional)
- commit_message: extra detail for the merge commit (optional)

Example:
  {"repo_full_name": "octocat/hello-world", "pull_number": 5,
   "merge_method": "squash"}
"#
    }

    async fn run(&self, input: &str) -> Result<String, CapabilityError> {
        let map = parse_object(input)?;
        require_fields(&map, &["repo_full_name", "pull_number"])?;

        let repo = super::input::parse_repo(str_field(&map, "repo_full_name")?)?;
        let number = u64_field(&map, "pull_number")?;

        let merge_method = opt_str_field(&map, "merge_method")?;
        if let Some(method) = merge_method {
            if !MERGE_METHODS.contains(&method) {
                return Err(CapabilityError::Validation(format!(
                    "Invalid merge method. Must be one of: {}.",
                    MERGE_METHODS.join(", ")
                )));
            }
        }

        let request = MergeRequest {
            merge_method: merge_method.map(str::to_string),
            commit_title: opt_str_field(&map, "commit_title")?.map(str::to_string),
            commit_message: opt_str_field(&map, "commit_message")?.map(str::to_string),
        };

        let result = match self.client.merge_pull_request(&repo, number, &request).await {
            Ok(result) => result,
            Err(GitHubError::Api { message, .. }) => {
                return Ok(describe_merge_failure(&repo.to_string(), number, &message));
            }
            Err(e) => return Err(e.into()),
        };

        if result.merged {
            Ok(format!(
                "Successfully merged pull request #{} in {} using the {} method.\n\
                 Commit SHA: {}\n\
                 Message: {}",
                number,
                repo,
                merge_method.unwrap_or("merge"),
                result.sha.as_deref().map(render::short_sha).unwrap_or("unknown"),
                result.message.as_deref().unwrap_or("")
            ))
        } else {
            Ok(format!(
                "Failed to merge pull request #{} in {}: {}",
                number,
                repo,
                result.message.as_deref().unwrap_or("no reason given")
            ))
        }
    }
}

/// Translate the API's merge rejection into a more actionable message.
fn describe_merge_failure(repo: &str, number: u64, message: &str) -> String {
    if message.contains("not mergeable") {
        format!(
            "Error: pull request #{} in {} cannot be merged. It may have conflicts \
             that need to be resolved.",
            number, repo
        )
    } else if message.contains("status check") {
        format!(
            "Error: cannot merge pull request #{} because required status checks \
             have not passed.",
            number
        )
    } else if message.contains("review") {
        format!(
            "Error: cannot merge pull request #{} because it requires reviews.",
            number
        )
    } else {
        format!("Error merging pull request #{}: {}", number, message)
    }
}
