//! Error container carried by every API error

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything the API told us about a failed call
///
/// Built once per failed call and never mutated afterwards. The raw error
/// node is kept so callers can read fields this type does not model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorContainer {
    error_code: Option<i64>,
    error_subcode: Option<i64>,
    http_status_code: Option<u16>,
    message: String,
    error_type: Option<String>,
    user_title: Option<String>,
    user_message: Option<String>,
    trace_id: Option<String>,
    is_transient: Option<bool>,
    raw_error: Value,
}

impl ErrorContainer {
    /// Create a container with a message and the raw error payload
    pub fn new(message: impl Into<String>, raw_error: Value) -> Self {
        Self {
            error_code: None,
            error_subcode: None,
            http_status_code: None,
            message: message.into(),
            error_type: None,
            user_title: None,
            user_message: None,
            trace_id: None,
            is_transient: None,
            raw_error,
        }
    }

    /// Set the numeric error code
    #[must_use]
    pub fn with_code(mut self, code: Option<i64>) -> Self {
        self.error_code = code;
        self
    }

    /// Set the error subcode
    #[must_use]
    pub fn with_subcode(mut self, subcode: Option<i64>) -> Self {
        self.error_subcode = subcode;
        self
    }

    /// Set the HTTP status code of the response
    #[must_use]
    pub fn with_http_status(mut self, status: Option<u16>) -> Self {
        self.http_status_code = status;
        self
    }

    /// Set the API error type string (e.g. `OAuthException`)
    #[must_use]
    pub fn with_error_type(mut self, error_type: Option<String>) -> Self {
        self.error_type = error_type;
        self
    }

    /// Set the user-facing title and message
    #[must_use]
    pub fn with_user_text(mut self, title: Option<String>, message: Option<String>) -> Self {
        self.user_title = title;
        self.user_message = message;
        self
    }

    /// Set the server trace identifier
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: Option<String>) -> Self {
        self.trace_id = trace_id;
        self
    }

    /// Set whether the API marked the failure as transient
    #[must_use]
    pub fn with_transient(mut self, is_transient: Option<bool>) -> Self {
        self.is_transient = is_transient;
        self
    }

    /// Numeric error code
    pub fn error_code(&self) -> Option<i64> {
        self.error_code
    }

    /// Error subcode
    pub fn error_subcode(&self) -> Option<i64> {
        self.error_subcode
    }

    /// HTTP status code of the failed response
    pub fn http_status_code(&self) -> Option<u16> {
        self.http_status_code
    }

    /// Human readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// API error type string
    pub fn error_type(&self) -> Option<&str> {
        self.error_type.as_deref()
    }

    /// Title meant for end users
    pub fn user_title(&self) -> Option<&str> {
        self.user_title.as_deref()
    }

    /// Message meant for end users
    pub fn user_message(&self) -> Option<&str> {
        self.user_message.as_deref()
    }

    /// Server trace identifier
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Transient flag reported by the API
    pub fn is_transient(&self) -> Option<bool> {
        self.is_transient
    }

    /// Original JSON payload of the error response
    pub fn raw_error(&self) -> &Value {
        &self.raw_error
    }

    /// One-line description used in error messages
    ///
    /// `OAuthException: Invalid token (code 190, subcode 458, HTTP 403)`
    pub fn summary(&self) -> String {
        let mut details = Vec::with_capacity(3);
        if let Some(code) = self.error_code {
            details.push(format!("code {code}"));
        }
        if let Some(subcode) = self.error_subcode {
            details.push(format!("subcode {subcode}"));
        }
        if let Some(status) = self.http_status_code {
            details.push(format!("HTTP {status}"));
        }

        let mut text = match &self.error_type {
            Some(error_type) => format!("{error_type}: {}", self.message),
            None => self.message.clone(),
        };
        if !details.is_empty() {
            text.push_str(&format!(" ({})", details.join(", ")));
        }
        text
    }

    /// Look up a field of the raw payload that this type does not model
    ///
    /// Searches the nested `error` object first, then the top level.
    pub fn raw_field(&self, key: &str) -> Option<&Value> {
        self.raw_error
            .get("error")
            .and_then(|inner| inner.get(key))
            .or_else(|| self.raw_error.get(key))
    }
}
