//! Tag registry: per-type field metadata, resolved once and cached
//!
//! A type becomes mappable by implementing [`GraphObject`], usually through
//! [`crate::graph_object!`]. The first time a type is mapped its descriptor is
//! flattened with its ancestors, validated and stored in a [`TagRegistry`];
//! later calls reuse the stored [`RegistryEntry`].

mod cache;
mod descriptor;
mod entry;

pub use cache::{RegistryStats, TagRegistry, global};
pub use descriptor::{FieldAccess, FieldTag, TypeDescriptor};
pub use entry::RegistryEntry;

/// A type with tagged fields
pub trait GraphObject: Default + Send + Sync + 'static {
    /// Type name used in diagnostics
    const NAME: &'static str;

    /// Declare the type's fields, parent and hooks
    fn describe() -> TypeDescriptor<Self>;
}
