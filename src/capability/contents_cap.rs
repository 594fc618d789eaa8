//! capability::contents_cap
//!
//! Directory listing, file content, and file metadata capabilities.

use std::sync::Arc;

use async_trait::async_trait;

use super::input::{
    opt_str_field, parse_repo, parse_shape, split_repo_path, str_field, Shape,
};
use super::traits::{Capability, CapabilityError};
use crate::github::{decode_blob_text, Contents, GitHubClient, RepoRef};
use crate::render;

/// Resolve the common `(repo, path, ref)` triple used by all three
/// capabilities here.
fn parse_target(input: &str) -> Result<(RepoRef, String, Option<String>), CapabilityError> {
    match parse_shape(input, &["repo_full_name", "path"]) {
        Shape::Structured(map) => {
            let repo = parse_repo(str_field(&map, "repo_full_name")?)?;
            let path = str_field(&map, "path")?.to_string();
            let ref_name = opt_str_field(&map, "branch")?.map(str::to_string);
            Ok((repo, path, ref_name))
        }
        Shape::Positional(text) => {
            let (repo, path) = split_repo_path(text.trim())?;
            Ok((repo, path, None))
        }
    }
}

/// List a repository directory.
pub struct ListContents {
    client: Arc<GitHubClient>,
}

impl ListContents {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Capability for ListContents {
    fn name(&self) -> &'static str {
        "list_contents"
    }

    fn summary(&self) -> &'static str {
        "List a repository directory, directories first"
    }

    fn input_spec(&self) -> &'static str {
        r#"List the contents of a repository or a directory within it.
Input is "owner/repo" (root) or "owner/repo/path", or a JSON object with
repo_full_name, path, and optional branch.

Examples:
  "tokio-rs/tokio"
  "tokio-rs/tokio/tokio/src"
  {"repo_full_name": "tokio-rs/tokio", "path": "tokio/src", "branch": "master"}
"#
    }

    async fn run(&self, input: &str) -> Result<String, CapabilityError> {
        let (repo, path, ref_name) = parse_target(input)?;
        let contents = self
            .client
            .get_contents(&repo, &path, ref_name.as_deref())
            .await?;

        let mut entries = match contents {
            Contents::File(_) => {
                return Ok(format!(
                    "'{}' is a file, not a directory. Use read_file to view its contents.",
                    path
                ));
            }
            Contents::Dir(entries) => entries,
        };

        render::sort_entries(&mut entries);

        let full_path = if path.is_empty() {
            repo.to_string()
        } else {
            format!("{}/{}", repo, path)
        };
        let mut out = format!("# Contents of {}\n\n", full_path);

        let dirs: Vec<_> = entries.iter().filter(|e| e.kind == "dir").collect();
        let files: Vec<_> = entries.iter().filter(|e| e.kind != "dir").collect();

        if !dirs.is_empty() {
            out.push_str("## Directories\n\n");
            for dir in &dirs {
                out.push_str(&format!("- {}/\n", dir.name));
            }
            out.push('\n');
        }
        if !files.is_empty() {
            out.push_str("## Files\n\n");
            for file in &files {
                out.push_str(&format!("- {}\n", file.name));
            }
            out.push('\n');
        }
        if dirs.is_empty() && files.is_empty() {
            out.push_str("(empty directory)\n\n");
        }

        out.push_str("## Navigation\n\n");
        if let Some(dir) = dirs.first() {
            out.push_str(&format!(
                "- View a subdirectory: list_contents(\"{}/{}\")\n",
                full_path, dir.name
            ));
        }
        if let Some(file) = files.first() {
            out.push_str(&format!(
                "- View a file: read_file(\"{}/{}\")\n",
                full_path, file.name
            ));
        }
        Ok(out)
    }
}

/// Read a file's content.
pub struct ReadFile {
    client: Arc<GitHubClient>,
}

impl ReadFile {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Capability for ReadFile {
    fn name(&self) -> &'static str {
        "read_file"
    }

    fn summary(&self) -> &'static str {
        "Read a file, truncated past 5000 characters"
    }

    fn input_spec(&self) -> &'static str {
        r#"Get the content of a file.
Input is "owner/repo/path_to_file", or a JSON object with repo_full_name,
path, and optional branch. Binary files and files over 1 MiB are described
rather than shown; text beyond 5000 characters is truncated with a marker.

Examples:
  "rust-lang/cargo/README.md"
  {"repo_full_name": "rust-lang/cargo", "path": "src/bin/cargo/main.rs"}
"#
    }

    async fn run(&self, input: &str) -> Result<String, CapabilityError> {
        let (repo, path, ref_name) = parse_target(input)?;
        if path.is_empty() {
            return Err(CapabilityError::validation(
                "Invalid input. Please provide 'owner/repo/path_to_file'.",
            ));
        }

        let file = match self
            .client
            .get_contents(&repo, &path, ref_name.as_deref())
            .await?
        {
            Contents::Dir(_) => {
                return Ok(format!(
                    "'{}' is a directory, not a file. Use list_contents to list it.",
                    path
                ));
            }
            Contents::File(file) => file,
        };

        let mut out = format!("# File: {}\n\n", file.name);
        out.push_str(&format!("**Size**: {} bytes\n", file.size));
        if let Some(url) = &file.html_url {
            out.push_str(&format!("**URL**: {}\n", url));
        }
        out.push('\n');

        // Large and non-base64 entries carry no renderable body.
        if file.encoding.as_deref() != Some("base64") || file.size > render::MAX_TEXT_BYTES {
            out.push_str("This file is too large or binary and cannot be displayed.\n");
            return Ok(out);
        }

        let Some(decoded) = file.content.as_deref().and_then(decode_blob_text) else {
            return Ok(format!(
                "{}The file appears to be binary and cannot be displayed as text.\n",
                out
            ));
        };

        let rendered = render::truncate_content(&decoded);
        let language = render::language_for_path(&file.name);
        out.push_str(&format!("```{}\n{}\n```", language, rendered));
        Ok(out)
    }
}

/// Fetch a file's metadata, including the blob sha needed for updates.
pub struct FileMetadata {
    client: Arc<GitHubClient>,
}

impl FileMetadata {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Capability for FileMetadata {
    fn name(&self) -> &'static str {
        "file_metadata"
    }

    fn summary(&self) -> &'static str {
        "Get file metadata, including the sha needed to update it"
    }

    fn input_spec(&self) -> &'static str {
        r#"Get metadata about a file, including its blob sha. The sha is
required by write_file when updating an existing file.
Input is "owner/repo/path_to_file" or a JSON object:
- repo_full_name, path (required)
- branch (optional)

Examples:
  "octocat/hello-world/README.md"
  {"repo_full_name": "octocat/hello-world", "path": "README.md", "branch": "dev"}
"#
    }

    async fn run(&self, input: &str) -> Result<String, CapabilityError> {
        let (repo, path, ref_name) = parse_target(input)?;
        if path.is_empty() {
            return Err(CapabilityError::validation(
                "Invalid input. Please provide 'owner/repo/path_to_file'.",
            ));
        }

        let result = self
            .client
            .get_contents(&repo, &path, ref_name.as_deref())
            .await;

        let file = match result {
            Ok(Contents::File(file)) => file,
            Ok(Contents::Dir(_)) => {
                return Ok(format!("'{}' is a directory, not a file.", path));
            }
            Err(e) if e.is_not_found() => {
                // Distinguish a missing file from a missing branch.
                if let Some(branch) = ref_name.as_deref() {
                    if self.client.get_branch(&repo, branch).await.is_ok() {
                        return Ok(format!(
                            "File '{}' not found in branch '{}' of repository {}.",
                            path, branch, repo
                        ));
                    }
                }
                return Ok(format!(
                    "File '{}' not found in repository {} or branch '{}' does not exist.",
                    path,
                    repo,
                    ref_name.as_deref().unwrap_or("default")
                ));
            }
            Err(e) => return Err(e.into()),
        };

        let mut out = format!("# File Metadata: {}\n\n", path);
        out.push_str(&format!("**Repository**: {}\n", repo));
        if let Some(branch) = ref_name.as_deref() {
            out.push_str(&format!("**Branch**: {}\n", branch));
        }
        out.push_str(&format!("**Name**: {}\n", file.name));
        out.push_str(&format!("**Path**: {}\n", file.path));
        out.push_str(&format!("**SHA**: {}\n", file.sha));
        out.push_str(&format!("**Size**: {} bytes\n", file.size));
        out.push_str(&format!("**Type**: {}\n", file.kind));
        if let Some(url) = &file.html_url {
            out.push_str(&format!("**URL**: {}\n", url));
        }
        if let Some(encoding) = &file.encoding {
            out.push_str(&format!("**Encoding**: {}\n", encoding));
        }
        Ok(out)
    }
}
