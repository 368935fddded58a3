//! Domain entities

pub mod api_error;
pub mod error_container;

pub use api_error::{ApiError, ApiErrorKind};
pub use error_container::ErrorContainer;
