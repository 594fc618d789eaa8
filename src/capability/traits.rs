//! capability::traits
//!
//! The capability contract every exposed operation implements.
//!
//! # Design
//!
//! A capability is one operation (or a short sequence of operations)
//! behind a uniform surface: a stable machine-selectable name, a
//! human-readable input specification with worked examples, and an
//! `invoke` that always returns rendered text. `invoke` never raises:
//! every API failure and every validation failure is converted into an
//! `Error: ...` string, so a reasoning loop driving the registry stays
//! alive across individual failures and can read the message to
//! self-correct.

use async_trait::async_trait;
use thiserror::Error;

use crate::github::GitHubError;

/// Errors a capability can hit internally. None of these escape
/// [`Capability::invoke`]; they exist so the operations underneath can
/// stay typed.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// Malformed or incomplete input, detected before any network call.
    #[error("{0}")]
    Validation(String),

    /// A remote operation failed.
    #[error(transparent)]
    Api(#[from] GitHubError),
}

impl CapabilityError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        CapabilityError::Validation(message.into())
    }
}

/// One independently invocable operation against the remote API.
///
/// # Error containment
///
/// Implementations put their fallible logic in [`run`]; the provided
/// [`invoke`] converts any failure into descriptive text. Callers only
/// ever see a `String`.
///
/// [`run`]: Capability::run
/// [`invoke`]: Capability::invoke
#[async_trait]
pub trait Capability: Send + Sync {
    /// Stable identifier the caller selects this capability by.
    fn name(&self) -> &'static str;

    /// One-line summary for listings.
    fn summary(&self) -> &'static str;

    /// Documentation of accepted input shapes, including worked examples.
    fn input_spec(&self) -> &'static str;

    /// Execute against the raw input and produce rendered text.
    async fn run(&self, input: &str) -> Result<String, CapabilityError>;

    /// Execute, converting any failure into rendered text.
    async fn invoke(&self, input: &str) -> String {
        match self.run(input).await {
            Ok(text) => text,
            Err(error) => render_failure(&error),
        }
    }
}

/// Convert a capability failure into the text handed back to the caller.
fn render_failure(error: &CapabilityError) -> String {
    match error {
        CapabilityError::Validation(message) => format!("Error: {}", message),
        CapabilityError::Api(GitHubError::RaceLost { branch, message }) => format!(
            "Error: branch '{}' moved while the commit was being staged ({}). \
             No changes were applied; re-issue the commit to retry.",
            branch, message
        ),
        CapabilityError::Api(GitHubError::Shape(message)) => {
            format!("Unexpected error: {}", message)
        }
        CapabilityError::Api(api) => format!("Error: {}", api),
    }
}
