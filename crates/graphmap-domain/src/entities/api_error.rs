//! Typed API errors
//!
//! A closed set of variants sharing one [`ErrorContainer`]. Callers branch on
//! the variant (or [`ApiErrorKind`]) and fall back to the raw payload for
//! anything the container does not model.

use super::ErrorContainer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Error returned by the remote API
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Legacy key/value error (`error_code` / `error_msg`)
    #[error("API response status error: {}", .0.summary())]
    ResponseStatus(ErrorContainer),

    /// Failure of one call inside a batch request
    #[error("API batch error: {}", .0.summary())]
    Batch(ErrorContainer),

    /// Access token or authorization failure
    #[error("API OAuth error: {}", .0.summary())]
    OAuth(ErrorContainer),

    /// The request's query could not be parsed by the API
    #[error("API query parse error: {}", .0.summary())]
    QueryParse(ErrorContainer),

    /// Any other structured graph error
    #[error("API graph error: {}", .0.summary())]
    Graph(ErrorContainer),
}

/// Discriminant of [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// See [`ApiError::ResponseStatus`]
    ResponseStatus,
    /// See [`ApiError::Batch`]
    Batch,
    /// See [`ApiError::OAuth`]
    #[serde(rename = "oauth")]
    OAuth,
    /// See [`ApiError::QueryParse`]
    QueryParse,
    /// See [`ApiError::Graph`]
    Graph,
}

impl ApiErrorKind {
    /// Wrap a container into the variant this kind names
    pub fn wrap(self, container: ErrorContainer) -> ApiError {
        match self {
            ApiErrorKind::ResponseStatus => ApiError::ResponseStatus(container),
            ApiErrorKind::Batch => ApiError::Batch(container),
            ApiErrorKind::OAuth => ApiError::OAuth(container),
            ApiErrorKind::QueryParse => ApiError::QueryParse(container),
            ApiErrorKind::Graph => ApiError::Graph(container),
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiErrorKind::ResponseStatus => "response_status",
            ApiErrorKind::Batch => "batch",
            ApiErrorKind::OAuth => "oauth",
            ApiErrorKind::QueryParse => "query_parse",
            ApiErrorKind::Graph => "graph",
        };
        f.write_str(name)
    }
}

impl ApiError {
    /// Variant discriminant
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::ResponseStatus(_) => ApiErrorKind::ResponseStatus,
            ApiError::Batch(_) => ApiErrorKind::Batch,
            ApiError::OAuth(_) => ApiErrorKind::OAuth,
            ApiError::QueryParse(_) => ApiErrorKind::QueryParse,
            ApiError::Graph(_) => ApiErrorKind::Graph,
        }
    }

    /// Shared error details
    pub fn container(&self) -> &ErrorContainer {
        match self {
            ApiError::ResponseStatus(c)
            | ApiError::Batch(c)
            | ApiError::OAuth(c)
            | ApiError::QueryParse(c)
            | ApiError::Graph(c) => c,
        }
    }

    /// Take the shared error details
    pub fn into_container(self) -> ErrorContainer {
        match self {
            ApiError::ResponseStatus(c)
            | ApiError::Batch(c)
            | ApiError::OAuth(c)
            | ApiError::QueryParse(c)
            | ApiError::Graph(c) => c,
        }
    }

    /// Numeric error code
    pub fn error_code(&self) -> Option<i64> {
        self.container().error_code()
    }

    /// Error subcode
    pub fn error_subcode(&self) -> Option<i64> {
        self.container().error_subcode()
    }

    /// HTTP status of the failed response
    pub fn http_status_code(&self) -> Option<u16> {
        self.container().http_status_code()
    }

    /// Human readable message
    pub fn message(&self) -> &str {
        self.container().message()
    }

    /// Original JSON payload
    pub fn raw_error(&self) -> &Value {
        self.container().raw_error()
    }

    /// Whether the failure concerns the access token
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::OAuth(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_wrap_roundtrip() {
        for kind in [
            ApiErrorKind::ResponseStatus,
            ApiErrorKind::Batch,
            ApiErrorKind::OAuth,
            ApiErrorKind::QueryParse,
            ApiErrorKind::Graph,
        ] {
            let error = kind.wrap(ErrorContainer::new("m", json!({})));
            assert_eq!(error.kind(), kind);
        }
    }

    #[test]
    fn test_display_includes_summary() {
        let error = ApiError::OAuth(
            ErrorContainer::new("Invalid token", json!({}))
                .with_code(Some(190))
                .with_subcode(Some(458))
                .with_http_status(Some(403))
                .with_error_type(Some("OAuthException".to_string())),
        );
        assert_eq!(
            error.to_string(),
            "API OAuth error: OAuthException: Invalid token (code 190, subcode 458, HTTP 403)"
        );
    }
}
