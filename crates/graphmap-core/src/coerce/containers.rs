//! Optional, boxed, list and map conversions

use super::{FromGraph, TargetKind, ToGraph};
use crate::error::MappingResult;
use crate::mapper::builder;
use crate::mapper::{MappingContext, SerializeContext};
use graphmap_domain::ElementType;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

impl<T: FromGraph> FromGraph for Option<T> {
    const KIND: TargetKind = T::KIND;

    fn target_name() -> &'static str {
        T::target_name()
    }

    // Passthrough targets skip the builder's null handling, so `null` is caught here
    fn from_graph(node: &Value, cx: &mut MappingContext<'_>) -> MappingResult<Self> {
        if node.is_null() {
            return Ok(None);
        }
        builder::build::<T>(node, cx).map(Some)
    }

    fn absent() -> Option<Self> {
        Some(None)
    }

    fn value_type() -> ElementType {
        T::value_type()
    }

    fn element_type() -> Option<ElementType> {
        T::element_type()
    }
}

impl<T: ToGraph> ToGraph for Option<T> {
    fn to_graph(&self, cx: &SerializeContext<'_>) -> MappingResult<Value> {
        match self {
            Some(value) => value.to_graph(cx),
            None => Ok(Value::Null),
        }
    }
}

impl<T: FromGraph> FromGraph for Box<T> {
    const KIND: TargetKind = T::KIND;

    fn target_name() -> &'static str {
        T::target_name()
    }

    fn from_graph(node: &Value, cx: &mut MappingContext<'_>) -> MappingResult<Self> {
        T::from_graph(node, cx).map(Box::new)
    }

    fn absent() -> Option<Self> {
        T::absent().map(Box::new)
    }

    fn value_type() -> ElementType {
        T::value_type()
    }

    fn element_type() -> Option<ElementType> {
        T::element_type()
    }
}

impl<T: ToGraph + ?Sized> ToGraph for Box<T> {
    fn to_graph(&self, cx: &SerializeContext<'_>) -> MappingResult<Value> {
        (**self).to_graph(cx)
    }
}

impl<T: FromGraph> FromGraph for Vec<T> {
    const KIND: TargetKind = TargetKind::List;

    fn from_graph(node: &Value, cx: &mut MappingContext<'_>) -> MappingResult<Self> {
        let Value::Array(items) = node else {
            return Err(cx.type_mismatch::<Self>(node));
        };
        builder::build_elements::<T>(items, cx)
    }

    fn absent() -> Option<Self> {
        Some(Vec::new())
    }

    fn element_type() -> Option<ElementType> {
        Some(T::value_type())
    }
}

impl<T: ToGraph> ToGraph for [T] {
    fn to_graph(&self, cx: &SerializeContext<'_>) -> MappingResult<Value> {
        self.iter()
            .map(|item| item.to_graph(cx))
            .collect::<MappingResult<Vec<_>>>()
            .map(Value::Array)
    }
}

impl<T: ToGraph> ToGraph for Vec<T> {
    fn to_graph(&self, cx: &SerializeContext<'_>) -> MappingResult<Value> {
        self.as_slice().to_graph(cx)
    }
}

/// Map every property of an object node, applying the element error policy
fn build_entries<V, C>(node: &Value, cx: &mut MappingContext<'_>) -> MappingResult<C>
where
    V: FromGraph,
    C: FromGraph + FromIterator<(String, V)>,
{
    let Value::Object(properties) = node else {
        return Err(cx.type_mismatch::<C>(node));
    };
    properties
        .iter()
        .map(|(key, value)| {
            cx.push_key(key.clone());
            let entry = builder::build_or_recover::<V>(value, cx);
            cx.pop();
            entry.map(|entry| (key.clone(), entry))
        })
        .collect()
}

fn render_entries<'v, V: ToGraph + 'v>(
    entries: impl Iterator<Item = (&'v String, &'v V)>,
    cx: &SerializeContext<'_>,
) -> MappingResult<Value> {
    let mut object = Map::new();
    for (key, value) in entries {
        let rendered = value.to_graph(cx)?;
        if rendered.is_null() && cx.ignore_null_values() {
            continue;
        }
        object.insert(key.clone(), rendered);
    }
    Ok(Value::Object(object))
}

impl<V, S> FromGraph for HashMap<String, V, S>
where
    V: FromGraph,
    S: BuildHasher + Default + 'static,
{
    const KIND: TargetKind = TargetKind::Map;

    fn from_graph(node: &Value, cx: &mut MappingContext<'_>) -> MappingResult<Self> {
        build_entries::<V, Self>(node, cx)
    }

    fn absent() -> Option<Self> {
        Some(HashMap::default())
    }

    fn element_type() -> Option<ElementType> {
        Some(V::value_type())
    }
}

impl<V: ToGraph, S> ToGraph for HashMap<String, V, S> {
    fn to_graph(&self, cx: &SerializeContext<'_>) -> MappingResult<Value> {
        render_entries(self.iter(), cx)
    }
}

impl<V: FromGraph> FromGraph for BTreeMap<String, V> {
    const KIND: TargetKind = TargetKind::Map;

    fn from_graph(node: &Value, cx: &mut MappingContext<'_>) -> MappingResult<Self> {
        build_entries::<V, Self>(node, cx)
    }

    fn absent() -> Option<Self> {
        Some(BTreeMap::new())
    }

    fn element_type() -> Option<ElementType> {
        Some(V::value_type())
    }
}

impl<V: ToGraph> ToGraph for BTreeMap<String, V> {
    fn to_graph(&self, cx: &SerializeContext<'_>) -> MappingResult<Value> {
        render_entries(self.iter(), cx)
    }
}

impl FromGraph for Value {
    const KIND: TargetKind = TargetKind::Passthrough;

    fn target_name() -> &'static str {
        "Value"
    }

    fn from_graph(node: &Value, _cx: &mut MappingContext<'_>) -> MappingResult<Self> {
        Ok(node.clone())
    }
}

impl ToGraph for Value {
    fn to_graph(&self, _cx: &SerializeContext<'_>) -> MappingResult<Value> {
        Ok(self.clone())
    }
}
