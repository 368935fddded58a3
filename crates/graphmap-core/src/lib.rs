//! # graphmap
//!
//! Lenient JSON mapping for graph-style REST APIs.
//!
//! Responses from these APIs are loosely shaped: `false` stands in for
//! missing values, lists arrive wrapped in `{"data": [...]}` envelopes or as
//! `{}`, numbers come as strings and dates in several formats. This crate
//! maps such payloads onto plain Rust structs declared with
//! [`graph_object!`], renders them back to JSON, and recognizes the API's
//! error payloads.
//!
//! ## Layout
//!
//! - [`mapper`]: [`JsonMapper`], the per-call context and the error policy
//! - [`registry`]: per-type field metadata, resolved once and cached
//! - [`coerce`]: scalar, date and container conversions
//! - [`classifier`]: API error detection in response bodies
//! - [`config`]: [`MapperConfig`] and limits
//!
//! ## Example
//!
//! ```
//! use graphmap::{graph_object, ErrorClassifier, JsonMapper};
//!
//! #[derive(Debug, Default)]
//! struct User {
//!     id: Option<String>,
//!     name: Option<String>,
//!     friends: Vec<User>,
//! }
//!
//! graph_object!(User { id, name, friends });
//!
//! let body = r#"{"id": "4", "name": "Mark", "friends": {"data": [{"id": "5"}]}}"#;
//! assert_eq!(ErrorClassifier::new().check(body, Some(200)).ok(), Some(()));
//!
//! let user: User = JsonMapper::new().to_object(body).unwrap();
//! assert_eq!(user.friends[0].id.as_deref(), Some("5"));
//! ```

#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod classifier;
pub mod coerce;
pub mod config;
pub mod dynamic;
pub mod error;
mod macros;
pub mod mapper;
pub mod registry;
pub mod tree;

pub use classifier::{ErrorClassifier, ErrorStage};
pub use coerce::{FromGraph, TargetKind, ToGraph, to_integer, to_long};
pub use config::{ErrorPolicyKind, MapperConfig};
pub use dynamic::DynamicValue;
pub use error::{Error, MappingError, MappingResult, Result};
pub use mapper::{
    FieldErrorPolicy, JsonMapper, MappingContext, MappingErrorHandler, MappingFailure,
    SerializeContext, SerializeOptions,
};
pub use registry::{GraphObject, TagRegistry};

// Domain re-exports
pub use graphmap_domain::{
    ApiError, ApiErrorKind, DateConvention, ElementType, ErrorContainer, JsonKey,
};

#[doc(hidden)]
pub mod __private {
    pub use serde_json::Value;
}
