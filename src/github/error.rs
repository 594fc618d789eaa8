//! github::error
//!
//! Error types for GitHub API operations.

use thiserror::Error;

/// Errors from GitHub API operations.
///
/// These map the failure modes of a single API round trip. Operations
/// return `Result<T, GitHubError>` and never panic on remote misbehavior.
#[derive(Debug, Clone, Error)]
pub enum GitHubError {
    /// The API returned a status of 400 or above.
    #[error("GitHub API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the API response body
        message: String,
    },

    /// The connection failed before a response was received.
    #[error("network error: {0}")]
    Network(String),

    /// A branch reference moved between head resolution and the
    /// fast-forward update. The whole commit sequence must be re-issued;
    /// no partial state was applied.
    #[error("branch '{branch}' was updated concurrently: {message}")]
    RaceLost {
        /// Branch whose ref update was rejected
        branch: String,
        /// Rejection message from the API
        message: String,
    },

    /// A successful response had an unexpected shape (missing field,
    /// wrong type). Treated as a local defect, not a remote failure.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// The request was rejected locally before any network call.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GitHubError {
    /// True when the error is a 404 from the API.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GitHubError::Api { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        assert_eq!(
            format!(
                "{}",
                GitHubError::Api {
                    status: 422,
                    message: "Validation Failed".into()
                }
            ),
            "GitHub API error (422): Validation Failed"
        );
        assert_eq!(
            format!("{}", GitHubError::Network("connection refused".into())),
            "network error: connection refused"
        );
        assert_eq!(
            format!(
                "{}",
                GitHubError::RaceLost {
                    branch: "main".into(),
                    message: "Update is not a fast forward".into()
                }
            ),
            "branch 'main' was updated concurrently: Update is not a fast forward"
        );
    }

    #[test]
    fn is_not_found() {
        assert!(GitHubError::Api {
            status: 404,
            message: "Not Found".into()
        }
        .is_not_found());
        assert!(!GitHubError::Api {
            status: 500,
            message: "oops".into()
        }
        .is_not_found());
        assert!(!GitHubError::Network("down".into()).is_not_found());
    }
}
