//! github::repos
//!
//! Repository metadata, language breakdown, and repository search.

use std::collections::HashMap;

use reqwest::Method;

use super::client::GitHubClient;
use super::error::GitHubError;
use super::types::{RepoRef, Repository, SearchResults};

impl GitHubClient {
    /// Fetch repository details.
    pub async fn get_repository(&self, repo: &RepoRef) -> Result<Repository, GitHubError> {
        self.request_as(
            Method::GET,
            &format!("/repos/{}/{}", repo.owner, repo.name),
            &[],
            None,
        )
        .await
    }

    /// Fetch the language byte breakdown for a repository.
    ///
    /// The map is keyed by language name with byte counts as values;
    /// callers sort for display.
    pub async fn get_languages(&self, repo: &RepoRef) -> Result<HashMap<String, u64>, GitHubError> {
        self.request_as(
            Method::GET,
            &format!("/repos/{}/{}/languages", repo.owner, repo.name),
            &[],
            None,
        )
        .await
    }

    /// Search repositories.
    ///
    /// `per_page` is passed through as given; clamping to the API's bounds
    /// happens at the capability layer so the rule lives in one place.
    pub async fn search_repositories(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<SearchResults, GitHubError> {
        self.request_as(
            Method::GET,
            "/search/repositories",
            &[("q", query.to_string()), ("per_page", per_page.to_string())],
            None,
        )
        .await
    }
}
