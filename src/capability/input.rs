//! capability::input
//!
//! Input parsing shared by all capabilities.
//!
//! # Shapes
//!
//! Where a capability accepts both, input comes in two shapes: a compact
//! slash-delimited positional string (`"owner/repo/path"`) and a structured
//! JSON object with named fields. The parse order is deterministic: the
//! structured shape is attempted first and wins only when it is a JSON
//! object carrying all of the capability's required named fields; anything
//! else, including JSON that fails to parse, falls through to positional
//! parsing rather than failing immediately.
//!
//! # Validation
//!
//! Required fields are checked in declared order and the error names
//! exactly the first missing field, so a caller that reads the message can
//! self-correct one field at a time.

use serde_json::{Map, Value};

use super::traits::CapabilityError;
use crate::github::RepoRef;

/// A parsed input, normalized to one of the two accepted shapes.
#[derive(Debug)]
pub enum Shape<'a> {
    /// JSON object carrying the capability's required named fields
    Structured(Map<String, Value>),
    /// Raw positional string
    Positional(&'a str),
}

/// Parse input into its shape given the required named fields of the
/// structured form.
pub fn parse_shape<'a>(input: &'a str, required: &[&str]) -> Shape<'a> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(input) {
        if required.iter().all(|field| map.contains_key(*field)) {
            return Shape::Structured(map);
        }
    }
    Shape::Positional(input)
}

/// Parse input that must be a JSON object (no positional form).
pub fn parse_object(input: &str) -> Result<Map<String, Value>, CapabilityError> {
    match serde_json::from_str::<Value>(input) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(CapabilityError::validation(
            "Invalid JSON format. Please provide a valid JSON object.",
        )),
    }
}

/// Check required fields in declared order, naming the first one missing.
pub fn require_fields(
    object: &Map<String, Value>,
    required: &[&str],
) -> Result<(), CapabilityError> {
    for field in required {
        if !object.contains_key(*field) {
            return Err(CapabilityError::Validation(format!(
                "Missing required field '{}'.",
                field
            )));
        }
    }
    Ok(())
}

/// Read a string field.
pub fn str_field<'a>(
    object: &'a Map<String, Value>,
    name: &str,
) -> Result<&'a str, CapabilityError> {
    object
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| CapabilityError::Validation(format!("Field '{}' must be a string.", name)))
}

/// Read an optional string field; present-but-mistyped is an error.
pub fn opt_str_field<'a>(
    object: &'a Map<String, Value>,
    name: &str,
) -> Result<Option<&'a str>, CapabilityError> {
    match object.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_str().map(Some).ok_or_else(|| {
            CapabilityError::Validation(format!("Field '{}' must be a string.", name))
        }),
    }
}

/// Read an unsigned integer field, accepting a numeric string as well.
pub fn u64_field(object: &Map<String, Value>, name: &str) -> Result<u64, CapabilityError> {
    let value = object.get(name).ok_or_else(|| {
        CapabilityError::Validation(format!("Missing required field '{}'.", name))
    })?;
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| {
            CapabilityError::Validation(format!("Field '{}' must be a non-negative integer.", name))
        }),
        Value::String(s) => s.parse().map_err(|_| {
            CapabilityError::Validation(format!("Field '{}' must be a non-negative integer.", name))
        }),
        _ => Err(CapabilityError::Validation(format!(
            "Field '{}' must be a non-negative integer.",
            name
        ))),
    }
}

/// Parse an `owner/repo` identifier.
pub fn parse_repo(full_name: &str) -> Result<RepoRef, CapabilityError> {
    RepoRef::parse(full_name).ok_or_else(|| {
        CapabilityError::validation(
            "Invalid repository name. Please provide it in the format 'owner/repo'.",
        )
    })
}

/// Split a positional `owner/repo[/path...]` string into the repository
/// and the remaining path (empty when absent).
pub fn split_repo_path(input: &str) -> Result<(RepoRef, String), CapabilityError> {
    let mut parts = input.splitn(3, '/');
    let owner = parts.next().unwrap_or("");
    let name = parts.next().unwrap_or("");
    if owner.is_empty() || name.is_empty() {
        return Err(CapabilityError::validation(
            "Invalid input. Please provide at least 'owner/repo'.",
        ));
    }
    let path = parts.next().unwrap_or("").to_string();
    Ok((
        RepoRef {
            owner: owner.to_string(),
            name: name.to_string(),
        },
        path,
    ))
}

/// A pull request target, normalized from either input shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullTarget {
    pub repo: RepoRef,
    pub number: u64,
}

/// Parse `"owner/repo/N"` or `{"repo_full_name": ..., "pull_number": N}`.
pub fn parse_pull_target(input: &str) -> Result<PullTarget, CapabilityError> {
    match parse_shape(input, &["repo_full_name", "pull_number"]) {
        Shape::Structured(map) => {
            let repo = parse_repo(str_field(&map, "repo_full_name")?)?;
            let number = u64_field(&map, "pull_number")?;
            Ok(PullTarget { repo, number })
        }
        Shape::Positional(text) => {
            let (repo, rest) = split_repo_path(text)?;
            if rest.is_empty() {
                return Err(CapabilityError::validation(
                    "Invalid input. Use 'owner/repo/pull_number' or the JSON form.",
                ));
            }
            let number = rest.parse().map_err(|_| {
                CapabilityError::validation("Pull request number must be an integer.")
            })?;
            Ok(PullTarget { repo, number })
        }
    }
}
