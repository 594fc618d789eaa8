//! capability::branch
//!
//! Branch listing and branch creation.

use std::sync::Arc;

use async_trait::async_trait;

use super::input::{
    opt_str_field, parse_object, parse_repo, parse_shape, require_fields, str_field, Shape,
};
use super::traits::{Capability, CapabilityError};
use crate::github::GitHubClient;
use crate::render;

/// List the branches of a repository.
pub struct ListBranches {
    client: Arc<GitHubClient>,
}

impl ListBranches {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Capability for ListBranches {
    fn name(&self) -> &'static str {
        "list_branches"
    }

    fn summary(&self) -> &'static str {
        "List branches, default branch first"
    }

    fn input_spec(&self) -> &'static str {
        r#"List the branches of a repository. The default branch is listed
first, the rest alphabetically.
Input is "owner/repo" or {"repo_full_name": "owner/repo"}.

Example: "rust-lang/cargo"
"#
    }

    async fn run(&self, input: &str) -> Result<String, CapabilityError> {
        let repo = match parse_shape(input, &["repo_full_name"]) {
            Shape::Structured(map) => parse_repo(str_field(&map, "repo_full_name")?)?,
            Shape::Positional(text) => parse_repo(text.trim())?,
        };

        let default_branch = self.client.get_repository(&repo).await?.default_branch;
        let mut branches = self.client.list_branches(&repo).await?;

        if branches.is_empty() {
            return Ok(format!("No branches found in repository {}.", repo));
        }

        render::sort_branches(&mut branches, &default_branch);

        let mut out = format!("# Branches in {}\n\n", repo);
        for branch in &branches {
            let marker = if branch.name == default_branch {
                " (default)"
            } else {
                ""
            };
            out.push_str(&format!(
                "- {}{} - latest commit: {}\n",
                branch.name,
                marker,
                render::short_sha(&branch.commit.sha)
            ));
        }
        Ok(out)
    }
}

/// Create a branch from an existing one.
pub struct CreateBranch {
    client: Arc<GitHubClient>,
}

impl CreateBranch {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Capability for CreateBranch {
    fn name(&self) -> &'static str {
        "create_branch"
    }

    fn summary(&self) -> &'static str {
        "Create a branch from another branch's head"
    }

    fn input_spec(&self) -> &'static str {
        r#"Create a new branch.
Input is a JSON object:
- repo_full_name: "owner/repo" (required)
- branch_name: name for the new branch (required)
- from_branch: source branch (optional, defaults to the repository's
  default branch)

Example:
  {"repo_full_name": "octocat/hello-world", "branch_name": "feature/search"}
"#
    }

    async fn run(&self, input: &str) -> Result<String, CapabilityError> {
        let map = parse_object(input)?;
        require_fields(&map, &["repo_full_name", "branch_name"])?;

        let repo = parse_repo(str_field(&map, "repo_full_name")?)?;
        let branch_name = str_field(&map, "branch_name")?;
        let from_branch = match opt_str_field(&map, "from_branch")? {
            Some(name) => name.to_string(),
            None => self.client.get_repository(&repo).await?.default_branch,
        };

        let source_sha = self.client.get_branch(&repo, &from_branch).await?.commit.sha;
        self.client
            .create_branch_ref(&repo, branch_name, &source_sha)
            .await?;

        Ok(format!(
            "Successfully created branch '{}' in repository {}\n\
             Created from: {} ({})",
            branch_name,
            repo,
            from_branch,
            render::short_sha(&source_sha)
        ))
    }
}
