//! Domain Value Objects
//!
//! Immutable objects that describe how a field is addressed in JSON and how
//! its contents are interpreted.

mod date_convention;
mod element_type;
mod json_key;

pub use date_convention::DateConvention;
pub use element_type::ElementType;
pub use json_key::JsonKey;
