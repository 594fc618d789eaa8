//! capability::commit
//!
//! Single-file and multi-file commit capabilities.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::input::{opt_str_field, parse_object, require_fields, str_field};
use super::traits::{Capability, CapabilityError};
use crate::github::{FileChange, GitHubClient, PutFileRequest};
use crate::render;

/// Create or update one file with a single API-native commit.
pub struct WriteFile {
    client: Arc<GitHubClient>,
}

impl WriteFile {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Capability for WriteFile {
    fn name(&self) -> &'static str {
        "write_file"
    }

    fn summary(&self) -> &'static str {
        "Create or update one file as a commit"
    }

    fn input_spec(&self) -> &'static str {
        r#"Create or update a single file.
Input is a JSON object:
- repo_full_name: "owner/repo" (required)
- path: file path to write (required)
- content: full new file content (required)
- message: commit message (required)
- branch: branch to commit to (required)
- sha: blob sha of the file being replaced (required when updating an
  existing file; get it from file_metadata). Omitting it on an update is
  rejected by the API so a concurrent edit is never silently overwritten.

Example (new file):
  {"repo_full_name": "octocat/hello-world", "path": "docs/note.md",
   "content": "# Note", "message": "Add note", "branch": "main"}

Example (update):
  {"repo_full_name": "octocat/hello-world", "path": "docs/note.md",
   "content": "# Updated", "message": "Update note", "branch": "main",
   "sha": "abc123..."}
"#
    }

    async fn run(&self, input: &str) -> Result<String, CapabilityError> {
        let map = parse_object(input)?;
        require_fields(
            &map,
            &["repo_full_name", "path", "content", "message", "branch"],
        )?;

        let repo = super::input::parse_repo(str_field(&map, "repo_full_name")?)?;
        let path = str_field(&map, "path")?;
        let request = PutFileRequest {
            message: str_field(&map, "message")?.to_string(),
            content: str_field(&map, "content")?.to_string(),
            branch: str_field(&map, "branch")?.to_string(),
            sha: opt_str_field(&map, "sha")?.map(str::to_string),
        };
        let updating = request.sha.is_some();

        let result = self.client.put_file(&repo, path, &request).await?;

        let action = if updating { "updated" } else { "created" };
        let mut out = format!(
            "Successfully {} file '{}' in commit {}",
            action,
            result
                .content
                .as_ref()
                .map(|c| c.path.as_str())
                .unwrap_or(path),
            render::short_sha(&result.commit.sha)
        );
        if let Some(url) = result.content.as_ref().and_then(|c| c.html_url.as_deref()) {
            out.push_str(&format!("\nFile URL: {}", url));
        }
        Ok(out)
    }
}

/// Commit multiple files to a branch as one atomic commit.
pub struct CommitFiles {
    client: Arc<GitHubClient>,
}

impl CommitFiles {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Capability for CommitFiles {
    fn name(&self) -> &'static str {
        "commit_files"
    }

    fn summary(&self) -> &'static str {
        "Commit several files to a branch in one atomic commit"
    }

    fn input_spec(&self) -> &'static str {
        r#"Create or update multiple files with a single commit.
Input is a JSON object:
- repo_full_name: "owner/repo" (required)
- files: non-empty array of {"path": ..., "content": ...} (required)
- message: commit message (required)
- branch: existing branch to commit to (required)

Paths not listed keep their current content. Either the branch advances to
the new commit or, if anything fails, it is left exactly where it was. If
the branch moves while the commit is being staged, the operation reports a
lost race and must be re-issued.

Example:
  {"repo_full_name": "octocat/hello-world",
   "files": [{"path": "a.md", "content": "# A"},
             {"path": "b.md", "content": "# B"}],
   "message": "Add docs", "branch": "main"}
"#
    }

    async fn run(&self, input: &str) -> Result<String, CapabilityError> {
        let map = parse_object(input)?;
        require_fields(&map, &["repo_full_name", "files", "message", "branch"])?;

        let repo = super::input::parse_repo(str_field(&map, "repo_full_name")?)?;
        let message = str_field(&map, "message")?;
        let branch = str_field(&map, "branch")?;
        let files = parse_file_changes(map.get("files").unwrap_or(&Value::Null))?;

        let outcome = self
            .client
            .commit_files(&repo, branch, &files, message)
            .await?;

        let file_list = files
            .iter()
            .map(|f| format!("'{}'", f.path))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!(
            "Successfully committed {} file(s) to {} on branch '{}'.\n\
             Commit message: '{}'\n\
             Commit SHA: {}\n\
             Parent: {}\n\
             Files: {}",
            files.len(),
            repo,
            branch,
            message,
            render::short_sha(&outcome.commit_sha),
            render::short_sha(&outcome.parent_sha),
            file_list
        ))
    }
}

/// Validate and convert the `files` field.
fn parse_file_changes(value: &Value) -> Result<Vec<FileChange>, CapabilityError> {
    let entries = value.as_array().filter(|a| !a.is_empty()).ok_or_else(|| {
        CapabilityError::validation("'files' must be a non-empty array of file objects.")
    })?;

    let mut files = Vec::with_capacity(entries.len());
    for entry in entries {
        let path = entry.get("path").and_then(Value::as_str);
        let content = entry.get("content").and_then(Value::as_str);
        match (path, content) {
            (Some(path), Some(content)) if !path.is_empty() => files.push(FileChange {
                path: path.to_string(),
                content: content.to_string(),
            }),
            _ => {
                return Err(CapabilityError::validation(
                    "Each file object must have 'path' and 'content' fields.",
                ))
            }
        }
    }
    Ok(files)
}
