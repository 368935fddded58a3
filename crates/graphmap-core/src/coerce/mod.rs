//! Conversions between JSON nodes and Rust values
//!
//! [`FromGraph`] and [`ToGraph`] are the two seams every mappable type goes
//! through. Scalars, dates, containers and the dynamic value implement them
//! here; declared object types get them from [`crate::graph_object!`].

mod containers;
pub mod dates;
mod scalars;

use crate::error::MappingResult;
use crate::mapper::{MappingContext, SerializeContext};
use graphmap_domain::ElementType;
use serde_json::Value;

pub use dates::{format_long_date, format_short_date, parse_long_date, parse_short_date};

/// Shape a target type expects, used by the builder to apply tree quirks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// Text, numbers, dates, enums
    Scalar,
    /// `bool`; `false` is a real value here
    Boolean,
    /// Sequences
    List,
    /// String keyed maps
    Map,
    /// Declared object types
    Object,
    /// The raw tree node, handed over untouched
    Passthrough,
    /// Schema-less values
    Dynamic,
}

/// Build a value from a JSON node
///
/// Implementations only see nodes that survived the builder's quirk handling:
/// `null` and the `false` stand-in never reach `from_graph` for non-boolean
/// targets.
pub trait FromGraph: Sized + 'static {
    /// Expected shape
    const KIND: TargetKind;

    /// Name used in error messages
    fn target_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Convert a non-null node
    fn from_graph(node: &Value, cx: &mut MappingContext<'_>) -> MappingResult<Self>;

    /// Value used for `null` nodes, or `None` if the type cannot be absent
    fn absent() -> Option<Self> {
        None
    }

    /// Type reported as the element type when this is the item of a collection
    fn value_type() -> ElementType {
        ElementType::of::<Self>()
    }

    /// Element type if this is a collection
    fn element_type() -> Option<ElementType> {
        None
    }
}

/// Render a value as a JSON node
pub trait ToGraph {
    /// Convert to a tree node
    fn to_graph(&self, cx: &SerializeContext<'_>) -> MappingResult<Value>;
}

impl<T: ToGraph + ?Sized> ToGraph for &T {
    fn to_graph(&self, cx: &SerializeContext<'_>) -> MappingResult<Value> {
        (**self).to_graph(cx)
    }
}

/// Parse a decimal integer, tolerating surrounding whitespace
///
/// Returns `None` for anything that is not a valid `i32`.
pub fn to_integer(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}

/// Parse a decimal integer, tolerating surrounding whitespace
///
/// Returns `None` for anything that is not a valid `i64`.
pub fn to_long(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}
