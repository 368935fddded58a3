//! graphmap Domain Layer - Pure Types
//!
//! This crate contains the value types shared by the graphmap mapping engine
//! and its callers, with no dependency on the engine itself.
//!
//! ## Contents
//!
//! - **Value Objects**: validated, immutable concepts (`JsonKey`, `ElementType`,
//!   `DateConvention`)
//! - **Entities**: the API error taxonomy (`ErrorContainer`, `ApiError`)
//!
//! Callers that only need to branch on API failures can depend on this crate
//! alone.

#![warn(missing_docs)]

pub mod entities;
pub mod value_objects;

// Re-export core types
pub use entities::{ApiError, ApiErrorKind, ErrorContainer};
pub use value_objects::{DateConvention, ElementType, JsonKey};

/// Domain Result type
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-specific errors
///
/// Raised when a value object is constructed from input that breaks its
/// invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DomainError {
    /// JSON key is empty or otherwise unusable
    #[error("Invalid JSON key: {0}")]
    InvalidJsonKey(String),
}

impl DomainError {
    /// Create an invalid JSON key error
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidJsonKey(message.into())
    }
}
