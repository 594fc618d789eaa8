//! capability::registry
//!
//! The fixed, enumerable set of capabilities exposed to callers.
//!
//! # Design
//!
//! Callers (a reasoning loop, the CLI) go through the registry rather than
//! constructing capabilities directly, so the exposed surface is defined in
//! exactly one place. All capabilities share one [`GitHubClient`] built
//! from the configuration handed in at construction.

use std::sync::Arc;

use super::analyze::AnalyzePullRequest;
use super::branch::{CreateBranch, ListBranches};
use super::commit::{CommitFiles, WriteFile};
use super::contents_cap::{FileMetadata, ListContents, ReadFile};
use super::pull::{CreatePullRequest, GetPullRequest, MergePullRequest};
use super::repo::{RepositoryDetails, SearchRepositories};
use super::review::{ListReviews, ReviewPullRequest};
use super::traits::Capability;
use crate::config::Config;
use crate::github::GitHubClient;

/// The capability registry.
pub struct Registry {
    capabilities: Vec<Box<dyn Capability>>,
}

impl Registry {
    /// Build the registry from a resolved configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_client(Arc::new(GitHubClient::new(config)))
    }

    /// Build the registry around an existing client.
    pub fn with_client(client: Arc<GitHubClient>) -> Self {
        let capabilities: Vec<Box<dyn Capability>> = vec![
            Box::new(SearchRepositories::new(client.clone())),
            Box::new(RepositoryDetails::new(client.clone())),
            Box::new(ListContents::new(client.clone())),
            Box::new(ReadFile::new(client.clone())),
            Box::new(FileMetadata::new(client.clone())),
            Box::new(ListBranches::new(client.clone())),
            Box::new(CreateBranch::new(client.clone())),
            Box::new(WriteFile::new(client.clone())),
            Box::new(CommitFiles::new(client.clone())),
            Box::new(CreatePullRequest::new(client.clone())),
            Box::new(GetPullRequest::new(client.clone())),
            Box::new(MergePullRequest::new(client.clone())),
            Box::new(ReviewPullRequest::new(client.clone())),
            Box::new(ListReviews::new(client.clone())),
            Box::new(AnalyzePullRequest::new(client)),
        ];
        Self { capabilities }
    }

    /// Look up a capability by name.
    pub fn get(&self, name: &str) -> Option<&dyn Capability> {
        self.capabilities
            .iter()
            .find(|c| c.name() == name)
            .map(|c| &**c)
    }

    /// Iterate capabilities in their stable registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Capability> {
        self.capabilities.iter().map(|c| &**c)
    }

    /// Names of every registered capability, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.capabilities.iter().map(|c| c.name()).collect()
    }

    /// Number of registered capabilities.
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// True when the registry is empty (it never is in practice).
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::new(&Config::default())
    }

    #[test]
    fn exposes_the_full_fixed_set() {
        let names = registry().names();
        assert_eq!(
            names,
            vec![
                "search_repositories",
                "repository_details",
                "list_contents",
                "read_file",
                "file_metadata",
                "list_branches",
                "create_branch",
                "write_file",
                "commit_files",
                "create_pull_request",
                "get_pull_request",
                "merge_pull_request",
                "review_pull_request",
                "list_reviews",
                "analyze_pull_request",
            ]
        );
    }

    #[test]
    fn lookup_by_name() {
        let registry = registry();
        assert!(registry.get("commit_files").is_some());
        assert_eq!(
            registry.get("read_file").unwrap().name(),
            "read_file"
        );
        assert!(registry.get("no_such_capability").is_none());
    }

    #[test]
    fn every_capability_documents_its_input() {
        for capability in registry().iter() {
            assert!(
                !capability.input_spec().trim().is_empty(),
                "{} has an empty input spec",
                capability.name()
            );
            assert!(
                !capability.summary().trim().is_empty(),
                "{} has an empty summary",
                capability.name()
            );
        }
    }
}
