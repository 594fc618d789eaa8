//! github::contents
//!
//! Contents API: directory listings, file reads, and the single-file
//! create/update commit.

use base64::Engine;
use reqwest::Method;
use serde_json::{json, Value};

use super::client::GitHubClient;
use super::error::GitHubError;
use super::types::{Contents, PutFileResult, RepoRef};

/// Request for a single-file create or update.
///
/// The remote performs the tree/commit/ref steps internally for this
/// variant. `sha` must carry the current blob sha when updating an existing
/// file; the API rejects the write otherwise, which is what protects
/// against clobbering a concurrent edit.
#[derive(Debug, Clone)]
pub struct PutFileRequest {
    /// Commit message
    pub message: String,
    /// Raw (unencoded) file content
    pub content: String,
    /// Branch to commit to
    pub branch: String,
    /// Current blob sha of the file being replaced, when updating
    pub sha: Option<String>,
}

impl GitHubClient {
    /// Fetch a path via the contents API.
    ///
    /// The API returns an array for directories and an object for files;
    /// the distinction is preserved in [`Contents`]. `ref_name` selects a
    /// branch, tag, or commit; `None` reads the default branch.
    pub async fn get_contents(
        &self,
        repo: &RepoRef,
        path: &str,
        ref_name: Option<&str>,
    ) -> Result<Contents, GitHubError> {
        let mut query = Vec::new();
        if let Some(r) = ref_name {
            query.push(("ref", r.to_string()));
        }

        let value = self
            .request(
                Method::GET,
                &format!("/repos/{}/{}/contents/{}", repo.owner, repo.name, path),
                &query,
                None,
            )
            .await?;

        match value {
            Value::Array(_) => {
                let entries = serde_json::from_value(value)
                    .map_err(|e| GitHubError::Shape(format!("directory listing: {}", e)))?;
                Ok(Contents::Dir(entries))
            }
            Value::Object(_) => {
                let file = serde_json::from_value(value)
                    .map_err(|e| GitHubError::Shape(format!("file entry: {}", e)))?;
                Ok(Contents::File(Box::new(file)))
            }
            other => Err(GitHubError::Shape(format!(
                "contents response was neither array nor object: {}",
                other
            ))),
        }
    }

    /// Create or update one file with a single API call.
    pub async fn put_file(
        &self,
        repo: &RepoRef,
        path: &str,
        request: &PutFileRequest,
    ) -> Result<PutFileResult, GitHubError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(request.content.as_bytes());

        let mut body = json!({
            "message": request.message,
            "content": encoded,
            "branch": request.branch,
        });
        if let Some(ref sha) = request.sha {
            body["sha"] = json!(sha);
        }

        self.request_as(
            Method::PUT,
            &format!("/repos/{}/{}/contents/{}", repo.owner, repo.name, path),
            &[],
            Some(&body),
        )
        .await
    }
}

/// Decode a base64 blob body as UTF-8 text.
///
/// The API wraps blob bodies at 60 columns, so embedded newlines are
/// stripped before decoding. Returns `None` for invalid base64 or content
/// that is not valid UTF-8 (binary files).
pub fn decode_blob_text(content: &str) -> Option<String> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .ok()?;
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wrapped_base64() {
        // "hello world" split across lines the way the API wraps blobs
        let wrapped = "aGVsbG8g\nd29ybGQ=\n";
        assert_eq!(decode_blob_text(wrapped).unwrap(), "hello world");
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(decode_blob_text("!!not base64!!").is_none());
    }

    #[test]
    fn rejects_non_utf8_payload() {
        let binary = base64::engine::general_purpose::STANDARD.encode([0xff, 0xfe, 0x00, 0x01]);
        assert!(decode_blob_text(&binary).is_none());
    }
}
