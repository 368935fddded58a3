//! Tree to object building
//!
//! `build` applies the API's tree quirks before a target type sees a node:
//!
//! - `null` becomes the target's absent value
//! - `false` is read as `null` unless the target is a boolean or dynamic value
//! - a list target accepts `{}` (empty list), an object whose first property
//!   is an array, or an object with a single property, unwrapping to that
//!   property's value

use super::context::MappingContext;
use super::lifecycle;
use crate::coerce::{FromGraph, TargetKind};
use crate::error::{MappingError, MappingResult};
use crate::registry::GraphObject;
use serde_json::{Map, Value};
use tracing::{debug, trace};

static EMPTY_LIST: Value = Value::Array(Vec::new());

/// Build `T` from a node
///
/// # Errors
///
/// Returns the first mapping failure the error policy did not swallow.
pub fn build<T: FromGraph>(node: &Value, cx: &mut MappingContext<'_>) -> MappingResult<T> {
    if T::KIND == TargetKind::Passthrough {
        return T::from_graph(node, cx);
    }

    match node {
        Value::Null => absent_or_null::<T>(cx),
        Value::Bool(false) if !matches!(T::KIND, TargetKind::Boolean | TargetKind::Dynamic) => {
            trace!(
                target_type = T::target_name(),
                path = %cx.path(),
                "false in place of a value, treating as null"
            );
            absent_or_null::<T>(cx)
        }
        Value::Object(properties) if T::KIND == TargetKind::List => {
            let unwrapped = unwrap_list(properties, cx)?;
            build::<T>(unwrapped, cx)
        }
        _ => T::from_graph(node, cx),
    }
}

/// Build `T`, falling back to its absent value when the policy swallows the failure
///
/// # Errors
///
/// Propagates configuration errors, failures the policy keeps, and failures of
/// types with no absent value.
pub fn build_or_recover<T: FromGraph>(
    node: &Value,
    cx: &mut MappingContext<'_>,
) -> MappingResult<T> {
    match build::<T>(node, cx) {
        Ok(value) => Ok(value),
        Err(error) => recover::<T>(node, error, cx),
    }
}

/// Build every element of an array
///
/// # Errors
///
/// Returns the first element failure that could not be recovered.
pub fn build_elements<T: FromGraph>(
    items: &[Value],
    cx: &mut MappingContext<'_>,
) -> MappingResult<Vec<T>> {
    let mut elements = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        cx.push_index(index);
        let element = build_or_recover::<T>(item, cx);
        cx.pop();
        elements.push(element?);
    }
    Ok(elements)
}

/// Build a declared object type from an object node
///
/// Fields whose key is missing keep their default. Hooks run once every field
/// is assigned.
///
/// # Errors
///
/// `ArrayAsObject` for array nodes, `TypeMismatch` for other non-objects, any
/// field failure the policy keeps, registry configuration errors and hook
/// failures.
pub fn build_object<T: GraphObject>(node: &Value, cx: &mut MappingContext<'_>) -> MappingResult<T> {
    let properties = match node {
        Value::Object(properties) => properties,
        Value::Array(_) => {
            return Err(MappingError::ArrayAsObject {
                target: T::NAME,
                path: cx.path(),
            });
        }
        other => {
            return Err(MappingError::TypeMismatch {
                target: T::NAME,
                found: crate::tree::kind_name(other),
                path: cx.path(),
            });
        }
    };

    let entry = cx.mapper().registry().entry::<T>()?;
    let mut instance = T::default();

    for tag in entry.tags() {
        let Some(value) = properties.get(tag.json_key().as_str()) else {
            continue;
        };

        cx.push_key(tag.json_key().clone().into_inner());
        let outcome = match tag.assign(&mut instance, value, cx) {
            Ok(()) => Ok(()),
            Err(error) if error.is_configuration() => Err(error),
            Err(error) if entry.is_shared_key(tag.json_key()) => {
                debug!(
                    owner = tag.owner(),
                    field = tag.field_name(),
                    key = %tag.json_key(),
                    %error,
                    "field sharing its JSON key could not be mapped, leaving it unset"
                );
                Ok(())
            }
            Err(error) => {
                if cx.should_swallow(tag.target_name(), value, &error) {
                    debug!(
                        owner = tag.owner(),
                        field = tag.field_name(),
                        path = %cx.path(),
                        %error,
                        "swallowed field mapping failure, field reset"
                    );
                    tag.reset(&mut instance);
                    Ok(())
                } else {
                    Err(error)
                }
            }
        };
        cx.pop();
        outcome?;
    }

    lifecycle::run_hooks(&entry, &mut instance, cx.mapper())?;
    Ok(instance)
}

fn absent_or_null<T: FromGraph>(cx: &MappingContext<'_>) -> MappingResult<T> {
    T::absent().ok_or_else(|| MappingError::UnexpectedNull {
        target: T::target_name(),
        path: cx.path(),
    })
}

fn recover<T: FromGraph>(
    node: &Value,
    error: MappingError,
    cx: &mut MappingContext<'_>,
) -> MappingResult<T> {
    if error.is_configuration() || !cx.should_swallow(T::target_name(), node, &error) {
        return Err(error);
    }
    match T::absent() {
        Some(absent) => {
            debug!(
                target_type = T::target_name(),
                path = %cx.path(),
                %error,
                "swallowed element mapping failure"
            );
            Ok(absent)
        }
        None => Err(error),
    }
}

fn unwrap_list<'a>(
    properties: &'a Map<String, Value>,
    cx: &MappingContext<'_>,
) -> MappingResult<&'a Value> {
    let Some((first_key, first_value)) = properties.iter().next() else {
        return Ok(&EMPTY_LIST);
    };
    if first_value.is_array() || properties.len() == 1 {
        trace!(key = %first_key, path = %cx.path(), "unwrapping object into list");
        return Ok(first_value);
    }
    Err(MappingError::ObjectAsList {
        keys: properties
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        path: cx.path(),
    })
}
