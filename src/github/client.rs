//! github::client
//!
//! Shared request execution and error mapping for the GitHub REST API.
//!
//! # Design
//!
//! All resource operations funnel through [`GitHubClient::request`], which
//! performs exactly one network round trip: no retry, no redirect games, no
//! request is ever silently duplicated. Callers that want resilience layer
//! it on top. Responses with status 400 and above are mapped to
//! [`GitHubError::Api`] carrying the body's conventional `message` field
//! when one is present, the raw body text otherwise.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::GitHubError;
use crate::config::Config;

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "hubcap";

/// Client for the GitHub REST API.
///
/// Holds the HTTP connection pool, the bearer token, and the API base URL
/// (configurable for GitHub Enterprise). Resource operations are implemented
/// as `impl` blocks in the sibling modules; this type owns only transport
/// and error mapping.
pub struct GitHubClient {
    http: Client,
    token: Option<String>,
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("has_token", &self.token.is_some())
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitHubClient {
    /// Create a client from a resolved configuration.
    ///
    /// The configuration is read once here; the client never consults
    /// process-wide state afterwards.
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            token: config.token.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }

    /// The API base URL this client targets.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Whether a bearer token is configured.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Build the common header set for one request.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(ref token) = self.token {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers
    }

    /// Execute one API request and return the response JSON.
    ///
    /// `path` is relative to the API base and must start with `/`. Query
    /// pairs are appended as-is; `body` is sent as JSON when present.
    ///
    /// # Errors
    ///
    /// - `GitHubError::Network` when the transport fails
    /// - `GitHubError::Api` for any response status of 400 or above
    /// - `GitHubError::Shape` when a success body is not valid JSON
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, GitHubError> {
        let url = format!("{}{}", self.api_base, path);

        let mut req = self.http.request(method, &url).headers(self.headers());
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()))?;

        if status.as_u16() >= 400 {
            return Err(GitHubError::Api {
                status: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| GitHubError::Shape(format!("invalid JSON in response: {}", e)))
    }

    /// Execute a request and deserialize the response into `T`.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<T, GitHubError> {
        let value = self.request(method, path, query, body).await?;
        serde_json::from_value(value)
            .map_err(|e| GitHubError::Shape(format!("missing or mistyped field: {}", e)))
    }
}

/// Pull the conventional `message` field out of an error body, falling back
/// to the raw text when the body is not JSON or carries no message.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    body.to_string()
}
