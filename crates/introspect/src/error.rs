use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntrospectionError>;

/// Message used when a payload carries no usable `types` sequence.
pub const TYPES_NOT_FOUND: &str = "types not found or not an array";

#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    #[error("Failed to parse introspection response: {0}")]
    Parse(String),

    #[error("GraphQL errors: {}", join_messages(.0))]
    GraphQL(Vec<GraphQLError>),

    #[error("Invalid introspection payload: {0}")]
    Structure(String),
}

/// Broad failure category, used by callers to pick exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The payload could not be obtained.
    Fetch,
    /// The payload was obtained but has no usable shape.
    Structure,
}

impl IntrospectionError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) | Self::Http(..) | Self::Parse(_) | Self::GraphQL(_) => {
                ErrorKind::Fetch
            }
            Self::Structure(_) => ErrorKind::Structure,
        }
    }

    pub(crate) fn types_not_found() -> Self {
        Self::Structure(TYPES_NOT_FOUND.to_string())
    }
}

/// A single entry of a GraphQL response's `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

fn join_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            IntrospectionError::Network("refused".into()).kind(),
            ErrorKind::Fetch
        );
        assert_eq!(
            IntrospectionError::Http(502, String::new()).kind(),
            ErrorKind::Fetch
        );
        assert_eq!(
            IntrospectionError::Parse("eof".into()).kind(),
            ErrorKind::Fetch
        );
        assert_eq!(
            IntrospectionError::GraphQL(vec![]).kind(),
            ErrorKind::Fetch
        );
        assert_eq!(
            IntrospectionError::types_not_found().kind(),
            ErrorKind::Structure
        );
    }

    #[test]
    fn test_graphql_error_message_lists_upstream_messages() {
        let err = IntrospectionError::GraphQL(vec![
            GraphQLError {
                message: "boom".to_string(),
                path: None,
                extensions: None,
            },
            GraphQLError {
                message: "bang".to_string(),
                path: None,
                extensions: None,
            },
        ]);
        assert_eq!(err.to_string(), "GraphQL errors: boom; bang");
    }

    #[test]
    fn test_structure_error_message() {
        let err = IntrospectionError::types_not_found();
        assert_eq!(
            err.to_string(),
            "Invalid introspection payload: types not found or not an array"
        );
    }
}
