//! render
//!
//! Shared formatting and limit rules used by every capability.
//!
//! These rules are deterministic on purpose: the consumer of rendered text
//! is a reasoning loop that re-reads its own observations, so the same
//! inputs must always produce the same text.

use crate::github::{Branch, ContentEntry};

/// Maximum number of characters of file content rendered inline.
pub const MAX_RENDERED_CHARS: usize = 5000;

/// Files larger than this many bytes are described, not rendered.
pub const MAX_TEXT_BYTES: u64 = 1024 * 1024;

/// Fallback search page size when none (or zero) is requested.
pub const DEFAULT_PER_PAGE: u32 = 5;

/// Upper bound on the search page size; larger requests are clamped.
pub const MAX_PER_PAGE: u32 = 100;

/// Order branches for display: the default branch first, the rest
/// alphabetical ignoring case.
pub fn sort_branches(branches: &mut [Branch], default_branch: &str) {
    branches.sort_by_key(|b| {
        (
            b.name != default_branch,
            b.name.to_lowercase(),
        )
    });
}

/// Order directory entries for display: directories before files, each
/// group alphabetical ignoring case.
pub fn sort_entries(entries: &mut [ContentEntry]) {
    entries.sort_by_key(|e| (e.kind != "dir", e.name.to_lowercase()));
}

/// Clamp a requested search page size into the supported range.
///
/// Absent or zero requests fall back to [`DEFAULT_PER_PAGE`]; oversized
/// requests are clamped to [`MAX_PER_PAGE`] rather than rejected.
pub fn clamp_per_page(requested: Option<u32>) -> u32 {
    match requested {
        None | Some(0) => DEFAULT_PER_PAGE,
        Some(n) if n > MAX_PER_PAGE => MAX_PER_PAGE,
        Some(n) => n,
    }
}

/// Truncate file content for rendering.
///
/// Content of at most [`MAX_RENDERED_CHARS`] characters is returned
/// unchanged; longer content is cut at the threshold and a marker naming
/// the shown and original sizes is appended.
pub fn truncate_content(content: &str) -> String {
    let total = content.chars().count();
    if total <= MAX_RENDERED_CHARS {
        return content.to_string();
    }
    let shown: String = content.chars().take(MAX_RENDERED_CHARS).collect();
    format!(
        "{}\n\n... [content truncated: showing {} of {} characters] ...\n",
        shown, MAX_RENDERED_CHARS, total
    )
}

/// Abbreviate a sha for display.
pub fn short_sha(sha: &str) -> &str {
    if sha.len() >= 7 {
        &sha[..7]
    } else {
        sha
    }
}

/// Fenced-code language tag for a file path, empty when unknown.
pub fn language_for_path(path: &str) -> &'static str {
    let extension = path.rsplit('.').next().unwrap_or("").to_lowercase();
    match extension.as_str() {
        "py" => "python",
        "js" => "javascript",
        "ts" => "typescript",
        "jsx" => "jsx",
        "tsx" => "tsx",
        "java" => "java",
        "c" => "c",
        "h" => "c",
        "cpp" | "cc" | "hpp" => "cpp",
        "cs" => "csharp",
        "go" => "go",
        "rb" => "ruby",
        "php" => "php",
        "rs" => "rust",
        "swift" => "swift",
        "kt" => "kotlin",
        "scala" => "scala",
        "html" => "html",
        "css" => "css",
        "scss" => "scss",
        "json" => "json",
        "yml" | "yaml" => "yaml",
        "toml" => "toml",
        "md" => "markdown",
        "sh" | "bash" => "bash",
        "sql" => "sql",
        "dockerfile" => "dockerfile",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::CommitPointer;

    fn branch(name: &str) -> Branch {
        Branch {
            name: name.to_string(),
            commit: CommitPointer {
                sha: "0123456789abcdef".to_string(),
            },
        }
    }

    fn entry(name: &str, kind: &str) -> ContentEntry {
        ContentEntry {
            name: name.to_string(),
            path: name.to_string(),
            kind: kind.to_string(),
            html_url: None,
        }
    }

    #[test]
    fn default_branch_sorts_first() {
        let mut branches = vec![branch("zeta"), branch("main"), branch("alpha")];
        sort_branches(&mut branches, "main");
        let names: Vec<_> = branches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["main", "alpha", "zeta"]);
    }

    #[test]
    fn branch_sort_ignores_case() {
        let mut branches = vec![branch("Beta"), branch("alpha"), branch("main")];
        sort_branches(&mut branches, "main");
        let names: Vec<_> = branches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["main", "alpha", "Beta"]);
    }

    #[test]
    fn directories_before_files_each_alphabetical() {
        let mut entries = vec![
            entry("zebra.txt", "file"),
            entry("src", "dir"),
            entry("Apple.md", "file"),
            entry("docs", "dir"),
        ];
        sort_entries(&mut entries);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["docs", "src", "Apple.md", "zebra.txt"]);
    }

    #[test]
    fn per_page_defaults_and_clamps() {
        assert_eq!(clamp_per_page(None), 5);
        assert_eq!(clamp_per_page(Some(0)), 5);
        assert_eq!(clamp_per_page(Some(30)), 30);
        assert_eq!(clamp_per_page(Some(100)), 100);
        assert_eq!(clamp_per_page(Some(500)), 100);
    }

    #[test]
    fn short_content_untouched() {
        let content = "fn main() {}";
        assert_eq!(truncate_content(content), content);
    }

    #[test]
    fn exactly_at_threshold_untouched() {
        let content = "x".repeat(MAX_RENDERED_CHARS);
        assert_eq!(truncate_content(&content), content);
    }

    #[test]
    fn long_content_gets_marker_with_sizes() {
        let content = "y".repeat(12345);
        let rendered = truncate_content(&content);
        assert!(rendered.starts_with(&"y".repeat(MAX_RENDERED_CHARS)));
        assert!(rendered.contains("showing 5000 of 12345 characters"));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        // Multi-byte characters must not be split
        let content = "é".repeat(6000);
        let rendered = truncate_content(&content);
        assert!(rendered.contains("showing 5000 of 6000 characters"));
    }

    #[test]
    fn sha_abbreviation() {
        assert_eq!(short_sha("0123456789abcdef"), "0123456");
        assert_eq!(short_sha("abc"), "abc");
    }

    #[test]
    fn language_mapping() {
        assert_eq!(language_for_path("src/main.rs"), "rust");
        assert_eq!(language_for_path("setup.py"), "python");
        assert_eq!(language_for_path("LICENSE"), "");
    }
}
