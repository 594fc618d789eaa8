//! github
//!
//! Typed operations over the GitHub REST API.
//!
//! # Architecture
//!
//! [`GitHubClient`] owns transport and error mapping; each resource gets an
//! `impl` block in its own module extending the client:
//!
//! - `client`: request execution, headers, status-to-error mapping
//! - `error`: the [`GitHubError`] taxonomy
//! - `types`: serde projections of API resources
//! - `repos`: repository metadata, languages, search
//! - `contents`: directory/file reads and single-file commits
//! - `branches`: branch listing and reference creation
//! - `commits`: git data operations and the multi-file commit sequence
//! - `pulls`: pull requests and reviews
//!
//! Every operation is a single network round trip except
//! [`GitHubClient::commit_files`], which chains five causally dependent
//! calls and documents its consistency guarantee.

mod branches;
mod client;
mod commits;
mod contents;
mod error;
mod pulls;
mod repos;
mod types;

pub use client::GitHubClient;
pub use commits::CommitOutcome;
pub use contents::{decode_blob_text, PutFileRequest};
pub use error::GitHubError;
pub use pulls::{CreatePullRequest, MergeRequest, ReviewComment, ReviewRequest};
pub use types::{
    Account, Branch, CommitPointer, ContentEntry, Contents, FileChange, FileContent, GitCommit,
    GitRef, License, MergeResult, PrRef, PullRequest, PullRequestFile, PutFileContent,
    PutFileResult, RefObject, RepoRef, Repository, Review, SearchRepo, SearchResults, TreeInfo,
};
