//! The JSON mapper
//!
//! [`JsonMapper`] is the entry point for turning API responses into declared
//! types and back. It is cheap to clone and safe to share between threads:
//! per-call state lives in a [`MappingContext`] created for each call.

pub mod builder;
mod context;
pub mod lifecycle;
mod policy;
pub mod serializer;

pub use context::{MappingContext, SerializeContext};
pub use policy::{FieldErrorPolicy, MappingErrorHandler, MappingFailure};

use crate::coerce::{FromGraph, ToGraph};
use crate::config::MapperConfig;
use crate::error::{MappingError, MappingResult};
use crate::registry::{self, TagRegistry};
use crate::tree;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Options for one serialization call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Leave null-valued fields out of objects
    pub ignore_null_values: bool,
}

/// Maps JSON text to declared types and declared types to JSON text
#[derive(Debug, Clone)]
pub struct JsonMapper {
    config: MapperConfig,
    policy: FieldErrorPolicy,
    registry: Arc<TagRegistry>,
}

impl JsonMapper {
    /// Mapper with default configuration and the process-wide registry
    pub fn new() -> Self {
        Self {
            config: MapperConfig::default(),
            policy: FieldErrorPolicy::Propagate,
            registry: registry::global(),
        }
    }

    /// Mapper built from a configuration
    ///
    /// A bounded `registry_capacity` gets a registry of its own; otherwise the
    /// process-wide registry is used.
    ///
    /// # Errors
    ///
    /// Returns `MappingError::Configuration` if the configuration is invalid.
    pub fn with_config(config: MapperConfig) -> MappingResult<Self> {
        config.validate()?;
        let registry = match config.registry_capacity {
            Some(capacity) => Arc::new(TagRegistry::with_capacity(Some(capacity))),
            None => registry::global(),
        };
        debug!(
            error_policy = ?config.error_policy,
            ignore_null_values = config.ignore_null_values,
            "created JSON mapper"
        );
        Ok(Self {
            policy: config.error_policy.into(),
            config,
            registry,
        })
    }

    /// Use a specific registry
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<TagRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the per-field error policy
    #[must_use]
    pub fn with_error_policy(mut self, policy: FieldErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Decide per failure with a handler
    #[must_use]
    pub fn with_error_handler(self, handler: impl MappingErrorHandler + 'static) -> Self {
        self.with_error_policy(FieldErrorPolicy::custom(handler))
    }

    /// Active configuration
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Registry used for declared types
    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    /// Active per-field error policy
    pub fn error_policy(&self) -> &FieldErrorPolicy {
        &self.policy
    }

    /// Map JSON text to `T`
    ///
    /// # Errors
    ///
    /// `EmptyInput` for blank text, `MalformedJson` for invalid JSON, and any
    /// mapping failure the error policy does not swallow.
    #[instrument(level = "trace", skip_all, fields(target_type = T::target_name()))]
    pub fn to_object<T: FromGraph>(&self, json: &str) -> MappingResult<T> {
        let node = tree::parse(json)?;
        self.from_value(&node)
    }

    /// Map JSON text to a list of `T`
    ///
    /// Accepts the same list shapes as list fields (`[...]`, `{}`,
    /// `{"data": [...]}`). `null` elements become `None`.
    ///
    /// # Errors
    ///
    /// Same as [`JsonMapper::to_object`].
    pub fn to_list<T: FromGraph>(&self, json: &str) -> MappingResult<Vec<Option<T>>> {
        self.to_object(json)
    }

    /// Map an already parsed tree to `T`
    ///
    /// # Errors
    ///
    /// Any mapping failure the error policy does not swallow.
    pub fn from_value<T: FromGraph>(&self, node: &Value) -> MappingResult<T> {
        let mut cx = MappingContext::new(self);
        builder::build_or_recover::<T>(node, &mut cx)
    }

    /// Map an already parsed tree to a list of `T`
    ///
    /// # Errors
    ///
    /// Same as [`JsonMapper::from_value`].
    pub fn list_from_value<T: FromGraph>(&self, node: &Value) -> MappingResult<Vec<Option<T>>> {
        self.from_value(node)
    }

    /// Options derived from the configuration
    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            ignore_null_values: self.config.ignore_null_values,
        }
    }

    /// Render `value` as compact JSON text
    ///
    /// # Errors
    ///
    /// `Unrepresentable` for values with no JSON form.
    pub fn to_json<T: ToGraph + ?Sized>(&self, value: &T) -> MappingResult<String> {
        self.to_json_with(value, self.serialize_options())
    }

    /// Render `value` as compact JSON text with explicit options
    ///
    /// # Errors
    ///
    /// `Unrepresentable` for values with no JSON form.
    pub fn to_json_with<T: ToGraph + ?Sized>(
        &self,
        value: &T,
        options: SerializeOptions,
    ) -> MappingResult<String> {
        let node = self.to_value_with(value, options)?;
        serde_json::to_string(&node).map_err(|err| MappingError::unrepresentable(err.to_string()))
    }

    /// Render `value` as a tree
    ///
    /// # Errors
    ///
    /// `Unrepresentable` for values with no JSON form.
    pub fn to_value<T: ToGraph + ?Sized>(&self, value: &T) -> MappingResult<Value> {
        self.to_value_with(value, self.serialize_options())
    }

    /// Render `value` as a tree with explicit options
    ///
    /// # Errors
    ///
    /// `Unrepresentable` for values with no JSON form.
    pub fn to_value_with<T: ToGraph + ?Sized>(
        &self,
        value: &T,
        options: SerializeOptions,
    ) -> MappingResult<Value> {
        let cx = SerializeContext::new(self, options.ignore_null_values);
        value.to_graph(&cx)
    }
}

impl Default for JsonMapper {
    fn default() -> Self {
        Self::new()
    }
}
