//! Per-field error policy
//!
//! Decides whether a field or list element that failed to map aborts the
//! whole call or is replaced by its absent value.

use crate::config::ErrorPolicyKind;
use crate::error::MappingError;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Details of one failed field or element handed to a [`MappingErrorHandler`]
#[derive(Debug)]
pub struct MappingFailure<'a> {
    /// Target type of the failing node
    pub target: &'static str,
    /// JSON node that could not be mapped
    pub node: &'a Value,
    /// JSON path of the node
    pub path: String,
    /// The failure
    pub error: &'a MappingError,
}

/// Caller supplied decision hook
///
/// Return `true` to swallow the failure and continue with the absent value,
/// `false` to propagate it.
pub trait MappingErrorHandler: Send + Sync {
    /// Decide what to do with a failure
    fn handle(&self, failure: &MappingFailure<'_>) -> bool;
}

impl<F> MappingErrorHandler for F
where
    F: Fn(&MappingFailure<'_>) -> bool + Send + Sync,
{
    fn handle(&self, failure: &MappingFailure<'_>) -> bool {
        self(failure)
    }
}

/// Error policy applied to fields and list elements
#[derive(Clone, Default)]
pub enum FieldErrorPolicy {
    /// Abort the mapping call
    #[default]
    Propagate,
    /// Use the absent value (`None`, empty list, default object) and continue
    SwallowAsNull,
    /// Ask a handler for each failure
    Custom(Arc<dyn MappingErrorHandler>),
}

impl FieldErrorPolicy {
    /// Build a custom policy from a handler
    pub fn custom(handler: impl MappingErrorHandler + 'static) -> Self {
        Self::Custom(Arc::new(handler))
    }

    /// Whether a failure should be swallowed
    pub fn swallows(&self, failure: &MappingFailure<'_>) -> bool {
        match self {
            FieldErrorPolicy::Propagate => false,
            FieldErrorPolicy::SwallowAsNull => true,
            FieldErrorPolicy::Custom(handler) => handler.handle(failure),
        }
    }
}

impl From<ErrorPolicyKind> for FieldErrorPolicy {
    fn from(kind: ErrorPolicyKind) -> Self {
        match kind {
            ErrorPolicyKind::Propagate => FieldErrorPolicy::Propagate,
            ErrorPolicyKind::SwallowAsNull => FieldErrorPolicy::SwallowAsNull,
        }
    }
}

impl fmt::Debug for FieldErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldErrorPolicy::Propagate => f.write_str("Propagate"),
            FieldErrorPolicy::SwallowAsNull => f.write_str("SwallowAsNull"),
            FieldErrorPolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn failure<'a>(node: &'a Value, error: &'a MappingError) -> MappingFailure<'a> {
        MappingFailure {
            target: "i32",
            node,
            path: "$.count".to_string(),
            error,
        }
    }

    #[test]
    fn test_builtin_policies() {
        let node = json!("x");
        let error = MappingError::EmptyInput;
        assert!(!FieldErrorPolicy::Propagate.swallows(&failure(&node, &error)));
        assert!(FieldErrorPolicy::SwallowAsNull.swallows(&failure(&node, &error)));
    }

    #[test]
    fn test_custom_policy_sees_failure() {
        let policy = FieldErrorPolicy::custom(|failure: &MappingFailure<'_>| {
            failure.path.ends_with("count")
        });
        let node = json!("x");
        let error = MappingError::EmptyInput;
        assert!(policy.swallows(&failure(&node, &error)));
        assert_eq!(format!("{policy:?}"), "Custom(..)");
    }

    #[test]
    fn test_from_config_kind() {
        assert!(matches!(
            FieldErrorPolicy::from(ErrorPolicyKind::SwallowAsNull),
            FieldErrorPolicy::SwallowAsNull
        ));
    }
}
