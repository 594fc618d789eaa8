//! github::commits
//!
//! Git data API operations and the multi-file commit sequence.
//!
//! # Design
//!
//! A multi-file commit is staged against the content-addressed object graph
//! in five causally dependent remote calls: resolve the branch head, read
//! its tree, create a delta tree, create a commit, then fast-forward the
//! branch reference. The reference moves only when every step succeeds; a
//! failure anywhere earlier leaves the branch untouched (objects created
//! along the way are unreferenced and never traversed). The final update
//! never forces: if the branch moved after head resolution, the update is
//! rejected and surfaced as [`GitHubError::RaceLost`], and the whole
//! sequence must be re-issued by the caller.

use reqwest::Method;
use serde_json::json;

use super::client::GitHubClient;
use super::error::GitHubError;
use super::types::{FileChange, GitCommit, RepoRef, TreeInfo};

/// Tree entry mode for regular files. All writes performed by this crate
/// use it; executable and symlink modes are not supported.
const FILE_MODE: &str = "100644";

/// Result of a successful multi-file commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Sha of the new commit the branch now points at
    pub commit_sha: String,
    /// Head sha observed before the commit; always the new commit's parent
    pub parent_sha: String,
    /// Sha of the new tree
    pub tree_sha: String,
}

impl GitHubClient {
    /// Fetch a commit from the git data API.
    pub async fn get_git_commit(
        &self,
        repo: &RepoRef,
        sha: &str,
    ) -> Result<GitCommit, GitHubError> {
        self.request_as(
            Method::GET,
            &format!("/repos/{}/{}/git/commits/{}", repo.owner, repo.name, sha),
            &[],
            None,
        )
        .await
    }

    /// Create a tree as a delta on top of `base_tree`.
    ///
    /// Paths not mentioned in `files` are carried over from the base tree
    /// by the remote, so untouched files are preserved. Returns the new
    /// tree's sha.
    pub async fn create_tree(
        &self,
        repo: &RepoRef,
        base_tree: &str,
        files: &[FileChange],
    ) -> Result<String, GitHubError> {
        let entries: Vec<_> = files
            .iter()
            .map(|f| {
                json!({
                    "path": f.path,
                    "mode": FILE_MODE,
                    "type": "blob",
                    "content": f.content,
                })
            })
            .collect();

        let tree: TreeInfo = self
            .request_as(
                Method::POST,
                &format!("/repos/{}/{}/git/trees", repo.owner, repo.name),
                &[],
                Some(&json!({
                    "base_tree": base_tree,
                    "tree": entries,
                })),
            )
            .await?;
        Ok(tree.sha)
    }

    /// Create a commit object pointing at `tree_sha` with a single parent.
    ///
    /// Returns the new commit's sha.
    pub async fn create_git_commit(
        &self,
        repo: &RepoRef,
        message: &str,
        tree_sha: &str,
        parent_sha: &str,
    ) -> Result<String, GitHubError> {
        let commit: GitCommit = self
            .request_as(
                Method::POST,
                &format!("/repos/{}/{}/git/commits", repo.owner, repo.name),
                &[],
                Some(&json!({
                    "message": message,
                    "tree": tree_sha,
                    "parents": [parent_sha],
                })),
            )
            .await?;
        Ok(commit.sha)
    }

    /// Fast-forward a branch reference to `sha`.
    ///
    /// `force` is always false: the remote rejects the update when the
    /// branch no longer points where it did at head resolution. That
    /// rejection (409 or 422) is mapped to [`GitHubError::RaceLost`];
    /// the losing caller must re-issue the whole commit sequence.
    pub async fn update_branch_ref(
        &self,
        repo: &RepoRef,
        branch: &str,
        sha: &str,
    ) -> Result<(), GitHubError> {
        let result = self
            .request(
                Method::PATCH,
                &format!(
                    "/repos/{}/{}/git/refs/heads/{}",
                    repo.owner, repo.name, branch
                ),
                &[],
                Some(&json!({
                    "sha": sha,
                    "force": false,
                })),
            )
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(GitHubError::Api { status, message }) if status == 409 || status == 422 => {
                Err(GitHubError::RaceLost {
                    branch: branch.to_string(),
                    message,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Commit one or many file additions/updates to `branch` as a single
    /// atomic commit, without a working tree.
    ///
    /// The branch must already exist, and each entry must carry a path and
    /// content. The branch reference changes if and only if all five steps
    /// succeed; any earlier failure leaves the repository's visible state
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` before any network call for an empty change set
    ///   or an entry with an empty path
    /// - `Api` from whichever step the remote rejected
    /// - `RaceLost` when the branch moved between resolution and update
    pub async fn commit_files(
        &self,
        repo: &RepoRef,
        branch: &str,
        files: &[FileChange],
        message: &str,
    ) -> Result<CommitOutcome, GitHubError> {
        if files.is_empty() {
            return Err(GitHubError::InvalidRequest(
                "at least one file change is required".to_string(),
            ));
        }
        for file in files {
            if file.path.is_empty() {
                return Err(GitHubError::InvalidRequest(
                    "every file change needs a non-empty path".to_string(),
                ));
            }
        }

        // 1. Resolve the branch head. A failure here (branch not found)
        //    aborts with no side effect at all.
        let head_sha = self.get_branch(repo, branch).await?.commit.sha;

        // 2. Read the tree the head commit points at.
        let base_tree = self.get_git_commit(repo, &head_sha).await?.tree.sha;

        // 3. Create the delta tree.
        let tree_sha = self.create_tree(repo, &base_tree, files).await?;

        // 4. Create the commit, parented on the head from step 1.
        let commit_sha = self
            .create_git_commit(repo, message, &tree_sha, &head_sha)
            .await?;

        // 5. Fast-forward the branch. Loses cleanly if the head moved.
        self.update_branch_ref(repo, branch, &commit_sha).await?;

        Ok(CommitOutcome {
            commit_sha,
            parent_sha: head_sha,
            tree_sha,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn client() -> GitHubClient {
        GitHubClient::new(&Config {
            token: None,
            api_base: "http://127.0.0.1:1".to_string(),
        })
    }

    #[tokio::test]
    async fn empty_change_set_rejected_before_network() {
        // api_base points at a closed port; reaching the network would fail
        // with Network, so an InvalidRequest proves no call was made.
        let err = client()
            .commit_files(
                &RepoRef::parse("o/r").unwrap(),
                "main",
                &[],
                "msg",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn empty_path_rejected_before_network() {
        let files = [FileChange {
            path: String::new(),
            content: "body".to_string(),
        }];
        let err = client()
            .commit_files(&RepoRef::parse("o/r").unwrap(), "main", &files, "msg")
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::InvalidRequest(_)));
    }
}
