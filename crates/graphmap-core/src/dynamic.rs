//! Schema-less values
//!
//! [`DynamicValue`] is what a field gets when its shape is not known up front
//! (e.g. `metadata` or app-defined properties). Unlike a raw tree node it goes
//! through the mapper, so `null` is kept as [`DynamicValue::Null`] and `false`
//! stays a boolean.

use crate::coerce::{FromGraph, TargetKind, ToGraph};
use crate::error::{MappingError, MappingResult};
use crate::mapper::{MappingContext, SerializeContext};
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

/// JSON value with insertion-ordered objects
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DynamicValue {
    /// `null`
    #[default]
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer that fits in `i64`
    Integer(i64),
    /// Positive integer above `i64::MAX`
    Unsigned(u64),
    /// Any other number
    Float(f64),
    /// String
    Text(String),
    /// Array
    List(Vec<DynamicValue>),
    /// Object, in document order
    Map(IndexMap<String, DynamicValue>),
}

impl DynamicValue {
    /// Property of an object value
    pub fn get(&self, key: &str) -> Option<&DynamicValue> {
        match self {
            DynamicValue::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Element of a list value
    pub fn at(&self, index: usize) -> Option<&DynamicValue> {
        match self {
            DynamicValue::List(items) => items.get(index),
            _ => None,
        }
    }

    /// Whether this is `null`
    pub fn is_null(&self) -> bool {
        matches!(self, DynamicValue::Null)
    }

    /// Boolean content
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DynamicValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Integer content
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DynamicValue::Integer(number) => Some(*number),
            _ => None,
        }
    }

    /// Unsigned integer content
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            DynamicValue::Integer(number) => u64::try_from(*number).ok(),
            DynamicValue::Unsigned(number) => Some(*number),
            _ => None,
        }
    }

    /// Numeric content, integers widened
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DynamicValue::Integer(number) => Some(*number as f64),
            DynamicValue::Unsigned(number) => Some(*number as f64),
            DynamicValue::Float(number) => Some(*number),
            _ => None,
        }
    }

    /// Text content
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynamicValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// List content
    pub fn as_list(&self) -> Option<&[DynamicValue]> {
        match self {
            DynamicValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Object content
    pub fn as_map(&self) -> Option<&IndexMap<String, DynamicValue>> {
        match self {
            DynamicValue::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<&Value> for DynamicValue {
    fn from(node: &Value) -> Self {
        match node {
            Value::Null => DynamicValue::Null,
            Value::Bool(flag) => DynamicValue::Bool(*flag),
            Value::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    DynamicValue::Integer(integer)
                } else if let Some(unsigned) = number.as_u64() {
                    DynamicValue::Unsigned(unsigned)
                } else {
                    DynamicValue::Float(number.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(text) => DynamicValue::Text(text.clone()),
            Value::Array(items) => DynamicValue::List(items.iter().map(Self::from).collect()),
            Value::Object(properties) => DynamicValue::Map(
                properties
                    .iter()
                    .map(|(key, value)| (key.clone(), Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<&DynamicValue> for Value {
    type Error = MappingError;

    fn try_from(value: &DynamicValue) -> MappingResult<Self> {
        Ok(match value {
            DynamicValue::Null => Value::Null,
            DynamicValue::Bool(flag) => Value::Bool(*flag),
            DynamicValue::Integer(number) => Value::Number((*number).into()),
            DynamicValue::Unsigned(number) => Value::Number((*number).into()),
            DynamicValue::Float(number) => Number::from_f64(*number)
                .map(Value::Number)
                .ok_or_else(|| MappingError::unrepresentable(format!("float {number}")))?,
            DynamicValue::Text(text) => Value::String(text.clone()),
            DynamicValue::List(items) => Value::Array(
                items
                    .iter()
                    .map(Value::try_from)
                    .collect::<MappingResult<_>>()?,
            ),
            DynamicValue::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| Ok((key.clone(), Value::try_from(value)?)))
                    .collect::<MappingResult<Map<_, _>>>()?,
            ),
        })
    }
}

impl FromGraph for DynamicValue {
    const KIND: TargetKind = TargetKind::Dynamic;

    fn target_name() -> &'static str {
        "DynamicValue"
    }

    fn from_graph(node: &Value, _cx: &mut MappingContext<'_>) -> MappingResult<Self> {
        Ok(Self::from(node))
    }

    fn absent() -> Option<Self> {
        Some(DynamicValue::Null)
    }
}

impl ToGraph for DynamicValue {
    fn to_graph(&self, _cx: &SerializeContext<'_>) -> MappingResult<Value> {
        Value::try_from(self)
    }
}
