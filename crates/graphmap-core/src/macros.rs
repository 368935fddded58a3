//! Declaration macros for mappable types
//!
//! # Overview
//!
//! `graph_object!` turns a plain struct into a mappable type by generating its
//! [`GraphObject`](crate::GraphObject), [`FromGraph`](crate::FromGraph) and
//! [`ToGraph`](crate::ToGraph) impls. `graph_enum!` does the same for a
//! fieldless enum with wire names.
//!
//! # Example
//!
//! ```
//! use graphmap::{graph_object, JsonMapper};
//!
//! #[derive(Debug, Default)]
//! pub struct NamedObject {
//!     pub id: Option<String>,
//!     pub name: Option<String>,
//! }
//!
//! graph_object!(NamedObject { id, name });
//!
//! #[derive(Debug, Default)]
//! pub struct Page {
//!     pub named: NamedObject,
//!     pub likes: Option<i64>,
//!     pub emails: Vec<String>,
//!     pub r#type: Option<String>,
//! }
//!
//! impl Page {
//!     fn normalize(&mut self) {
//!         self.emails.sort();
//!     }
//! }
//!
//! graph_object!(Page : NamedObject => named {
//!     likes => "fan_count",
//!     emails as String,
//!     r#type,
//! } hooks { normalize });
//!
//! let mapper = JsonMapper::new();
//! let page: Page = mapper
//!     .to_object(r#"{"id": "1", "fan_count": 7, "emails": ["b", "a"], "type": "x"}"#)
//!     .unwrap();
//! assert_eq!(page.named.id.as_deref(), Some("1"));
//! assert_eq!(page.likes, Some(7));
//! assert_eq!(page.emails, ["a", "b"]);
//! assert_eq!(page.r#type.as_deref(), Some("x"));
//! ```

/// Declare the tagged fields of a struct
///
/// # Syntax
///
/// ```ignore
/// graph_object!(Type { field, field => "json_key", list_field as Element, ... });
/// graph_object!(Type : Parent => parent_field { ... } hooks { method, ... });
/// ```
///
/// - `field` maps the JSON key named like the field (`r#` prefixes dropped)
/// - `=> "key"` maps a different key
/// - `as Element` declares the element type of a list or map field; a
///   mismatch is reported as a configuration error on first use
/// - `: Parent => parent_field` inherits the fields and hooks of the embedded
///   `Parent`
/// - `hooks { ... }` names methods run after mapping, in order; accepted
///   signatures are `fn(&mut self)`, `fn(&mut self, &JsonMapper)` and
///   `fn(&mut self, &JsonMapper) -> MappingResult<()>`
///
/// The struct must implement `Default` and be `Send + Sync + 'static`.
#[macro_export]
macro_rules! graph_object {
    (
        $ty:ident $(: $parent:ty => $base:ident)? {
            $( $field:ident $(=> $key:literal)? $(as $elem:ty)? ),* $(,)?
        }
        $( hooks { $( $hook:ident ),* $(,)? } )?
    ) => {
        impl $crate::GraphObject for $ty {
            const NAME: &'static str = stringify!($ty);

            fn describe() -> $crate::registry::TypeDescriptor<Self> {
                let descriptor = $crate::registry::TypeDescriptor::<Self>::new(stringify!($ty));
                $(
                    let descriptor = descriptor.extends::<$parent>(
                        |object: &$ty| &object.$base,
                        |object: &mut $ty| &mut object.$base,
                    );
                )?
                $(
                    let descriptor = descriptor.field(
                        $crate::registry::FieldTag::<Self>::new(
                            stringify!($ty),
                            stringify!($field),
                            $crate::__graph_key!($($key)?),
                            |object: &$ty| &object.$field,
                            |object: &mut $ty| &mut object.$field,
                        )
                        $( .with_element::<$elem>() )?
                    );
                )*
                $( $(
                    let descriptor = descriptor.hook(stringify!($hook), <$ty>::$hook);
                )* )?
                descriptor
            }
        }

        impl $crate::FromGraph for $ty {
            const KIND: $crate::TargetKind = $crate::TargetKind::Object;

            fn target_name() -> &'static str {
                stringify!($ty)
            }

            fn from_graph(
                node: &$crate::__private::Value,
                cx: &mut $crate::MappingContext<'_>,
            ) -> $crate::MappingResult<Self> {
                $crate::mapper::builder::build_object::<Self>(node, cx)
            }

            fn absent() -> ::std::option::Option<Self> {
                ::std::option::Option::Some(<Self as ::std::default::Default>::default())
            }
        }

        impl $crate::ToGraph for $ty {
            fn to_graph(
                &self,
                cx: &$crate::SerializeContext<'_>,
            ) -> $crate::MappingResult<$crate::__private::Value> {
                $crate::mapper::serializer::serialize_object(self, cx)
            }
        }
    };
}

/// Declare a fieldless enum read from and written as strings
///
/// Matching is case-insensitive against the wire name and the variant name.
///
/// ```
/// use graphmap::{graph_enum, JsonMapper};
///
/// graph_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum Privacy {
///         Everyone => "EVERYONE",
///         FriendsOnly => "ALL_FRIENDS",
///     }
/// }
///
/// let mapper = JsonMapper::new();
/// let privacy: Privacy = mapper.to_object(r#""all_friends""#).unwrap();
/// assert_eq!(privacy, Privacy::FriendsOnly);
/// assert_eq!(mapper.to_json(&privacy).unwrap(), r#""ALL_FRIENDS""#);
/// ```
#[macro_export]
macro_rules! graph_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $(#[$variant_meta])* $variant ),+
        }

        impl $name {
            /// Name used on the wire
            pub fn wire_name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }

            /// Look up a variant by wire or variant name, ignoring case
            pub fn from_wire(text: &str) -> ::std::option::Option<Self> {
                let text = text.trim();
                $(
                    if text.eq_ignore_ascii_case($wire)
                        || text.eq_ignore_ascii_case(stringify!($variant))
                    {
                        return ::std::option::Option::Some($name::$variant);
                    }
                )+
                ::std::option::Option::None
            }
        }

        impl $crate::FromGraph for $name {
            const KIND: $crate::TargetKind = $crate::TargetKind::Scalar;

            fn target_name() -> &'static str {
                stringify!($name)
            }

            fn from_graph(
                node: &$crate::__private::Value,
                cx: &mut $crate::MappingContext<'_>,
            ) -> $crate::MappingResult<Self> {
                match node.as_str() {
                    ::std::option::Option::Some(text) => Self::from_wire(text)
                        .ok_or_else(|| cx.coercion::<Self>(node, "unknown enum value")),
                    ::std::option::Option::None => ::std::result::Result::Err(cx.type_mismatch::<Self>(node)),
                }
            }
        }

        impl $crate::ToGraph for $name {
            fn to_graph(
                &self,
                _cx: &$crate::SerializeContext<'_>,
            ) -> $crate::MappingResult<$crate::__private::Value> {
                ::std::result::Result::Ok($crate::__private::Value::String(
                    self.wire_name().to_owned(),
                ))
            }
        }
    };
}

/// Explicit JSON key or the empty string (field name default)
#[doc(hidden)]
#[macro_export]
macro_rules! __graph_key {
    () => {
        ""
    };
    ($key:literal) => {
        $key
    };
}
