//! capability::analyze
//!
//! Heuristic pull request analysis: diff statistics, suspicious-pattern
//! detection, and rough complexity signals. Produces observations, not a
//! formal review.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use regex::Regex;

use super::input::{
    opt_str_field, parse_pull_target, parse_shape, str_field, u64_field, Shape,
};
use super::traits::{Capability, CapabilityError};
use crate::github::{Contents, GitHubClient, RepoRef};
use crate::render;

/// Analysis depths.
const DEPTHS: [&str; 2] = ["basic", "detailed"];

/// What one file's diff looked like.
#[derive(Debug, Default)]
struct DiffStats {
    added: u64,
    removed: u64,
    issues: Vec<String>,
}

/// Line metrics computed from full file content in detailed mode.
#[derive(Debug, Default)]
struct FileMetrics {
    max_line_length: usize,
    complexity: usize,
}

/// Analyze a pull request without submitting a review.
pub struct AnalyzePullRequest {
    client: Arc<GitHubClient>,
}

impl AnalyzePullRequest {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }

    /// Best-effort fetch of a file's text at a ref; analysis proceeds
    /// without it on any failure.
    async fn file_text(&self, repo: &RepoRef, path: &str, ref_name: &str) -> Option<String> {
        match self.client.get_contents(repo, path, Some(ref_name)).await {
            Ok(Contents::File(file)) => file
                .content
                .as_deref()
                .and_then(crate::github::decode_blob_text),
            _ => None,
        }
    }
}

#[async_trait]
impl Capability for AnalyzePullRequest {
    fn name(&self) -> &'static str {
        "analyze_pull_request"
    }

    fn summary(&self) -> &'static str {
        "Analyze a pull request's diff for issues and complexity"
    }

    fn input_spec(&self) -> &'static str {
        r#"Analyze a pull request and report insights without submitting a
formal review: per-file change statistics, suspicious patterns in added
lines, and complexity signals.
Input is "owner/repo/pull_number" or a JSON object:
- repo_full_name, pull_number (required)
- depth: "basic" (default) or "detailed" (also inspects file contents on
  the head branch)

Example: "octocat/hello-world/5"
Example: {"repo_full_name": "octocat/hello-world", "pull_number": 5,
          "depth": "detailed"}
"#
    }

    async fn run(&self, input: &str) -> Result<String, CapabilityError> {
        let (target, depth) = match parse_shape(input, &["repo_full_name", "pull_number"]) {
            Shape::Structured(map) => {
                let repo = super::input::parse_repo(str_field(&map, "repo_full_name")?)?;
                let number = u64_field(&map, "pull_number")?;
                let depth = opt_str_field(&map, "depth")?.unwrap_or("basic").to_string();
                if !DEPTHS.contains(&depth.as_str()) {
                    return Err(CapabilityError::Validation(format!(
                        "Invalid depth. Must be one of: {}.",
                        DEPTHS.join(", ")
                    )));
                }
                (super::input::PullTarget { repo, number }, depth)
            }
            Shape::Positional(_) => (parse_pull_target(input)?, "basic".to_string()),
        };
        let detailed = depth == "detailed";

        let pr = self
            .client
            .get_pull_request(&target.repo, target.number)
            .await?;
        let files = self
            .client
            .list_pull_request_files(&target.repo, target.number)
            .await?;

        let mut out = format!(
            "# Analysis of Pull Request #{}: {}\n\n",
            target.number, pr.title
        );
        if let Some(user) = &pr.user {
            out.push_str(&format!("**Author**: {}\n", user.login));
        }
        out.push_str(&format!("**Base Branch**: {}\n", pr.base.ref_name));
        out.push_str(&format!("**Head Branch**: {}\n", pr.head.ref_name));
        out.push_str(&format!("**Changed Files**: {}\n\n", files.len()));

        if let Some(body) = pr.body.as_deref().filter(|b| !b.is_empty()) {
            out.push_str("## PR Description\n\n");
            out.push_str(&format!("{}\n\n", body));
        }

        out.push_str("## File Analysis\n\n");

        let mut total_added = 0;
        let mut total_removed = 0;
        let mut complexity_by_file: Vec<(String, usize)> = Vec::new();
        let mut suggestions: Vec<String> = Vec::new();

        for file in &files {
            total_added += file.additions;
            total_removed += file.deletions;

            let Some(patch) = file.patch.as_deref() else {
                if file.status != "removed" {
                    out.push_str(&format!(
                        "- **{}**: {} (binary file or too large to display)\n",
                        file.filename, file.status
                    ));
                }
                continue;
            };

            let stats = analyze_patch(patch);
            let language = render::language_for_path(&file.filename);
            let lang_info = if language.is_empty() {
                String::new()
            } else {
                format!(" ({})", language)
            };
            out.push_str(&format!(
                "- **{}**{}: {}, +{}/-{} lines\n",
                file.filename, lang_info, file.status, file.additions, file.deletions
            ));

            if !stats.issues.is_empty() {
                out.push_str("  - **Potential issues:**\n");
                for issue in stats.issues.iter().take(3) {
                    out.push_str(&format!("    - {}\n", issue));
                }
                for issue in &stats.issues {
                    suggestions.push(format!("Address potential issue: {}", issue));
                }
            }

            if detailed && file.status != "removed" && !language.is_empty() {
                if let Some(text) = self
                    .file_text(&target.repo, &file.filename, &pr.head.ref_name)
                    .await
                {
                    let metrics = file_metrics(&text);
                    complexity_by_file.push((file.filename.clone(), metrics.complexity));
                    if metrics.complexity > 10 {
                        out.push_str(&format!(
                            "  - **Complexity score:** {} (relatively high)\n",
                            metrics.complexity
                        ));
                    }
                    if metrics.max_line_length > 100 {
                        suggestions.push(format!(
                            "Some lines in {} exceed 100 characters; consider breaking them up",
                            file.filename
                        ));
                    }
                    if metrics.complexity > 20 {
                        suggestions.push(format!(
                            "Consider refactoring {} to reduce complexity",
                            file.filename
                        ));
                    }
                }
            }
        }
        out.push('\n');

        out.push_str("## Summary of Changes\n\n");
        out.push_str(&format!("Total lines added: {}\n", total_added));
        out.push_str(&format!("Total lines deleted: {}\n", total_removed));
        out.push_str(&format!(
            "Net change: {} lines\n\n",
            total_added as i64 - total_removed as i64
        ));

        if total_added > 100 && total_added > total_removed.saturating_mul(3) {
            out.push_str(&format!(
                "Large addition of code ({} lines added vs {} removed).\n\n",
                total_added, total_removed
            ));
        } else if total_removed > 100 && total_removed > total_added.saturating_mul(3) {
            out.push_str(&format!(
                "Large removal of code ({} lines removed vs {} added).\n\n",
                total_removed, total_added
            ));
        }

        complexity_by_file.retain(|(_, score)| *score > 0);
        if !complexity_by_file.is_empty() {
            complexity_by_file.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            out.push_str("### Most Complex Files\n\n");
            for (filename, score) in complexity_by_file.iter().take(3) {
                out.push_str(&format!("- **{}** - complexity: {}\n", filename, score));
            }
            out.push('\n');
        }

        if !suggestions.is_empty() {
            out.push_str("## Suggestions\n\n");
            for suggestion in &suggestions {
                out.push_str(&format!("- {}\n", suggestion));
            }
            out.push('\n');
        }

        out.push_str("## Review Note\n\n");
        out.push_str(
            "This is an automated analysis based on diff statistics and simple \
             pattern matching. A human review is still needed to judge business \
             logic and context-specific concerns.",
        );
        Ok(out)
    }
}

/// Patterns flagged when they appear in added lines.
fn issue_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            (
                Regex::new(r"\b(TODO|FIXME)\b").unwrap(),
                "contains a TODO or FIXME comment",
            ),
            (
                Regex::new(r"console\.log").unwrap(),
                "contains a console.log statement",
            ),
            (
                Regex::new(r"printStackTrace").unwrap(),
                "contains a printStackTrace call",
            ),
            (
                Regex::new(r"\bdebugger\b").unwrap(),
                "contains a debugger statement",
            ),
            (
                Regex::new(r#"(?i)\b(password|secret|api_?key|token)\b\s*[:=]\s*["'][^"'{}$]{4,}["']"#)
                    .unwrap(),
                "may contain a hardcoded credential",
            ),
        ]
    })
}

/// Count added/removed lines and flag suspicious additions in a unified
/// diff hunk.
fn analyze_patch(patch: &str) -> DiffStats {
    let mut stats = DiffStats::default();
    for line in patch.lines() {
        if let Some(added) = line.strip_prefix('+') {
            if line.starts_with("+++") {
                continue;
            }
            stats.added += 1;
            for (pattern, description) in issue_patterns() {
                if pattern.is_match(added) {
                    stats
                        .issues
                        .push(format!("{}: {}", description, added.trim()));
                }
            }
        } else if line.starts_with('-') && !line.starts_with("---") {
            stats.removed += 1;
        }
    }
    stats
}

/// Control-flow and definition keywords counted as a rough complexity
/// signal across the languages this heuristic cares about.
fn complexity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"\b(fn|def|function|class|impl|if|else|for|while|loop|match|switch|try|catch|except)\b",
        )
        .unwrap()
    })
}

/// Compute line metrics and the complexity signal for full file content.
fn file_metrics(content: &str) -> FileMetrics {
    let mut metrics = FileMetrics::default();
    for line in content.lines() {
        metrics.max_line_length = metrics.max_line_length.max(line.chars().count());
    }
    metrics.complexity = complexity_pattern().find_iter(content).count();
    metrics
}
