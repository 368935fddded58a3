//! Error payload shapes recognized by the classifier

use crate::coerce::to_long;
use crate::config::limits::OAUTH_LEGACY_ERROR_CODE;
use graphmap_domain::{ApiError, ApiErrorKind, ErrorContainer};
use serde_json::{Map, Value};

/// One recognizer in the classification chain
///
/// A stage inspects the top-level object of a response body and either claims
/// it (returning the typed error) or passes.
pub trait ErrorStage: Send + Sync {
    /// Stage name for diagnostics
    fn name(&self) -> &'static str;

    /// Classify `body`, whose parsed form is `raw`
    fn classify(&self, body: &Map<String, Value>, raw: &Value, http_status: Option<u16>)
    -> Option<ApiError>;
}

/// `{"error_code": 190, "error_msg": "..."}`
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyStage;

impl ErrorStage for LegacyStage {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn classify(
        &self,
        body: &Map<String, Value>,
        raw: &Value,
        http_status: Option<u16>,
    ) -> Option<ApiError> {
        let code = integer_field(body, "error_code")?;
        let message = text_field(body, "error_msg").unwrap_or("");
        let container = ErrorContainer::new(message, raw.clone())
            .with_code(Some(code))
            .with_http_status(http_status);
        Some(legacy_kind(code, ApiErrorKind::ResponseStatus).wrap(container))
    }
}

/// `{"error": 190, "error_description": "..."}`, as returned inside batch responses
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchStage;

impl ErrorStage for BatchStage {
    fn name(&self) -> &'static str {
        "batch"
    }

    fn classify(
        &self,
        body: &Map<String, Value>,
        raw: &Value,
        http_status: Option<u16>,
    ) -> Option<ApiError> {
        let code = integer_field(body, "error")?;
        let message = text_field(body, "error_description")?;
        let container = ErrorContainer::new(message, raw.clone())
            .with_code(Some(code))
            .with_http_status(http_status);
        Some(legacy_kind(code, ApiErrorKind::Batch).wrap(container))
    }
}

/// `{"error": {"message": ..., "type": ..., "code": ..., ...}}`
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphStage;

impl ErrorStage for GraphStage {
    fn name(&self) -> &'static str {
        "graph"
    }

    fn classify(
        &self,
        body: &Map<String, Value>,
        raw: &Value,
        http_status: Option<u16>,
    ) -> Option<ApiError> {
        let error = body.get("error")?.as_object()?;
        let error_type = text_field(error, "type");
        let kind = match error_type {
            Some("OAuthException") => ApiErrorKind::OAuth,
            Some("QueryParseException") => ApiErrorKind::QueryParse,
            _ => ApiErrorKind::Graph,
        };

        let container = ErrorContainer::new(text_field(error, "message").unwrap_or(""), raw.clone())
            .with_code(integer_field(error, "code"))
            .with_subcode(integer_field(error, "error_subcode"))
            .with_http_status(http_status)
            .with_error_type(error_type.map(str::to_owned))
            .with_user_text(
                text_field(error, "error_user_title").map(str::to_owned),
                text_field(error, "error_user_msg").map(str::to_owned),
            )
            .with_trace_id(text_field(error, "fbtrace_id").map(str::to_owned))
            .with_transient(bool_field(error, "is_transient"));
        Some(kind.wrap(container))
    }
}

fn legacy_kind(code: i64, fallback: ApiErrorKind) -> ApiErrorKind {
    if code == OAUTH_LEGACY_ERROR_CODE {
        ApiErrorKind::OAuth
    } else {
        fallback
    }
}

/// Integer property given as a number or a numeric string
fn integer_field(object: &Map<String, Value>, key: &str) -> Option<i64> {
    match object.get(key)? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => to_long(text),
        _ => None,
    }
}

fn text_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key)?.as_str()
}

fn bool_field(object: &Map<String, Value>, key: &str) -> Option<bool> {
    match object.get(key)? {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}
