//! Mapper configuration
//!
//! `MapperConfig` can be built in code or loaded from JSON; unknown keys are
//! rejected so typos do not silently fall back to defaults.

pub mod limits;

use crate::error::{MappingError, MappingResult};
use serde::{Deserialize, Serialize};

/// What to do when one field or list element fails to map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicyKind {
    /// Abort the whole mapping call with the error
    #[default]
    Propagate,
    /// Reset the failing field (or element) to its absent value and continue
    SwallowAsNull,
}

/// Configuration of a [`crate::JsonMapper`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperConfig {
    /// Per-field error policy
    pub error_policy: ErrorPolicyKind,
    /// Skip null-valued fields when serializing
    pub ignore_null_values: bool,
    /// Bytes scanned by the error classifier pre-filter
    pub error_prefix_window: usize,
    /// Maximum cached registry entries (`None` = unbounded)
    pub registry_capacity: Option<usize>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicyKind::Propagate,
            ignore_null_values: false,
            error_prefix_window: limits::ERROR_PREFIX_WINDOW,
            registry_capacity: limits::DEFAULT_REGISTRY_CAPACITY,
        }
    }
}

impl MapperConfig {
    /// Load configuration from JSON text
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns `MappingError::MalformedJson` for invalid JSON or unknown keys,
    /// and `MappingError::Configuration` for out-of-range values.
    pub fn from_json(text: &str) -> MappingResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| MappingError::malformed(&err))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `MappingError::Configuration` when a limit is zero.
    pub fn validate(&self) -> MappingResult<()> {
        if self.error_prefix_window == 0 {
            return Err(MappingError::configuration(
                "MapperConfig",
                "error_prefix_window",
                "must be greater than zero",
            ));
        }
        if self.registry_capacity == Some(0) {
            return Err(MappingError::configuration(
                "MapperConfig",
                "registry_capacity",
                "must be greater than zero when set",
            ));
        }
        Ok(())
    }

    /// Builder: set the per-field error policy
    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicyKind) -> Self {
        self.error_policy = policy;
        self
    }

    /// Builder: skip null-valued fields when serializing
    #[must_use]
    pub fn with_ignore_null_values(mut self, ignore: bool) -> Self {
        self.ignore_null_values = ignore;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MapperConfig::default();
        assert_eq!(config.error_policy, ErrorPolicyKind::Propagate);
        assert!(!config.ignore_null_values);
        assert_eq!(config.error_prefix_window, 50);
        assert_eq!(config.registry_capacity, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = MapperConfig::from_json(r#"{"error_policy": "swallow_as_null"}"#).unwrap();
        assert_eq!(config.error_policy, ErrorPolicyKind::SwallowAsNull);
        assert_eq!(config.error_prefix_window, 50);
    }

    #[test]
    fn test_from_json_rejects_unknown_keys() {
        let result = MapperConfig::from_json(r#"{"error_polcy": "propagate"}"#);
        assert!(matches!(result, Err(MappingError::MalformedJson { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let result = MapperConfig::from_json(r#"{"error_prefix_window": 0}"#);
        assert!(matches!(result, Err(MappingError::Configuration { .. })));

        let config = MapperConfig {
            registry_capacity: Some(0),
            ..MapperConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
