//! capability::repo
//!
//! Repository search and repository details.

use std::sync::Arc;

use async_trait::async_trait;

use super::input::{parse_repo, parse_shape, str_field, Shape};
use super::traits::{Capability, CapabilityError};
use crate::github::GitHubClient;
use crate::render;

/// Search repositories by query string.
pub struct SearchRepositories {
    client: Arc<GitHubClient>,
}

impl SearchRepositories {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Capability for SearchRepositories {
    fn name(&self) -> &'static str {
        "search_repositories"
    }

    fn summary(&self) -> &'static str {
        "Search repositories by query, with optional result count"
    }

    fn input_spec(&self) -> &'static str {
        r#"Search for repositories.
Input is either a bare query string or a JSON object:
- query: the search query (required)
- per_page: number of results, 1-100 (optional, default 5)

Useful query qualifiers: language:<lang>, stars:><n>, created:><date>,
user:<name>, org:<name>.

Examples:
  "language:rust stars:>1000"
  {"query": "http client language:rust", "per_page": 10}
"#
    }

    async fn run(&self, input: &str) -> Result<String, CapabilityError> {
        let (query, per_page) = match parse_shape(input, &["query"]) {
            Shape::Structured(map) => {
                let query = str_field(&map, "query")?.to_string();
                let per_page = match map.get("per_page") {
                    None | Some(serde_json::Value::Null) => None,
                    Some(value) => Some(value.as_u64().unwrap_or(0) as u32),
                };
                (query, per_page)
            }
            Shape::Positional(text) => {
                let query = text.trim();
                if query.is_empty() {
                    return Err(CapabilityError::validation(
                        "Search query must not be empty.",
                    ));
                }
                (query.to_string(), None)
            }
        };

        let per_page = render::clamp_per_page(per_page);
        let results = self.client.search_repositories(&query, per_page).await?;

        if results.total_count == 0 {
            return Ok("No repositories found matching your query.".to_string());
        }

        let mut out = format!(
            "Found {} repositories matching your query. Here are the top {} results:\n\n",
            results.total_count,
            results.items.len()
        );
        for (i, repo) in results.items.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, repo.full_name));
            out.push_str(&format!(
                "   Description: {}\n",
                repo.description.as_deref().unwrap_or("No description")
            ));
            out.push_str(&format!(
                "   Language: {}\n",
                repo.language.as_deref().unwrap_or("Not specified")
            ));
            out.push_str(&format!(
                "   Stars: {}, Forks: {}\n",
                repo.stargazers_count, repo.forks_count
            ));
            if let Some(updated) = &repo.updated_at {
                out.push_str(&format!("   Updated: {}\n", updated));
            }
            out.push_str(&format!("   URL: {}\n\n", repo.html_url));
        }
        Ok(out)
    }
}

/// Detailed information about one repository.
pub struct RepositoryDetails {
    client: Arc<GitHubClient>,
}

impl RepositoryDetails {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Capability for RepositoryDetails {
    fn name(&self) -> &'static str {
        "repository_details"
    }

    fn summary(&self) -> &'static str {
        "Get details, stats, and language breakdown for a repository"
    }

    fn input_spec(&self) -> &'static str {
        r#"Get detailed information about a repository.
Input is "owner/repo" or {"repo_full_name": "owner/repo"}.

Examples:
  "rust-lang/cargo"
  {"repo_full_name": "tokio-rs/tokio"}
"#
    }

    async fn run(&self, input: &str) -> Result<String, CapabilityError> {
        let repo_ref = match parse_shape(input, &["repo_full_name"]) {
            Shape::Structured(map) => parse_repo(str_field(&map, "repo_full_name")?)?,
            Shape::Positional(text) => parse_repo(text.trim())?,
        };

        let details = self.client.get_repository(&repo_ref).await?;
        let languages = self.client.get_languages(&repo_ref).await?;

        let mut out = format!("# {}\n\n", details.full_name);
        out.push_str(&format!(
            "**Description**: {}\n\n",
            details.description.as_deref().unwrap_or("No description")
        ));
        out.push_str(&format!(
            "**Owner**: {} ({})\n",
            details.owner.login,
            details.owner.kind.as_deref().unwrap_or("Unknown")
        ));
        if let Some(created) = &details.created_at {
            out.push_str(&format!("**Created**: {}\n", created));
        }
        if let Some(updated) = &details.updated_at {
            out.push_str(&format!("**Last Updated**: {}\n", updated));
        }
        out.push_str(&format!(
            "**Default Branch**: {}\n\n",
            details.default_branch
        ));

        out.push_str("## Stats\n\n");
        out.push_str(&format!("**Stars**: {}\n", details.stargazers_count));
        out.push_str(&format!("**Watchers**: {}\n", details.watchers_count));
        out.push_str(&format!("**Forks**: {}\n", details.forks_count));
        out.push_str(&format!(
            "**Open Issues**: {}\n",
            details.open_issues_count
        ));
        out.push_str(&format!("**Size**: {} KB\n\n", details.size));

        out.push_str("## Languages\n\n");
        out.push_str(&format!("{}\n\n", format_languages(&languages)));

        out.push_str("## URLs\n\n");
        out.push_str(&format!(
            "**Homepage**: {}\n",
            details
                .homepage
                .as_deref()
                .filter(|h| !h.is_empty())
                .unwrap_or("N/A")
        ));
        out.push_str(&format!("**GitHub URL**: {}\n", details.html_url));
        if let Some(clone_url) = &details.clone_url {
            out.push_str(&format!("**Clone URL**: {}\n", clone_url));
        }
        if let Some(ssh_url) = &details.ssh_url {
            out.push_str(&format!("**SSH URL**: {}\n", ssh_url));
        }
        if let Some(license) = &details.license {
            out.push_str(&format!("\n**License**: {}\n", license.name));
        }
        Ok(out)
    }
}

/// Render a language byte map as shares, largest first. Ties break on name
/// so the output is stable.
fn format_languages(languages: &std::collections::HashMap<String, u64>) -> String {
    let total: u64 = languages.values().sum();
    if total == 0 {
        return "No language data available".to_string();
    }
    let mut pairs: Vec<_> = languages.iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    pairs
        .iter()
        .map(|(lang, bytes)| {
            format!(
                "{} ({:.1}%)",
                lang,
                (**bytes as f64 / total as f64) * 100.0
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn languages_sorted_by_share_then_name() {
        let mut languages = HashMap::new();
        languages.insert("Rust".to_string(), 7500_u64);
        languages.insert("Shell".to_string(), 1250);
        languages.insert("Make".to_string(), 1250);
        let rendered = format_languages(&languages);
        assert_eq!(rendered, "Rust (75.0%), Make (12.5%), Shell (12.5%)");
    }

    #[test]
    fn empty_language_map() {
        assert_eq!(
            format_languages(&HashMap::new()),
            "No language data available"
        );
    }
}
