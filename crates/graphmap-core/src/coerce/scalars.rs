//! Text, boolean and numeric conversions

use super::{FromGraph, TargetKind, ToGraph};
use crate::error::{MappingError, MappingResult};
use crate::mapper::{MappingContext, SerializeContext};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Number, Value};
use std::str::FromStr;

impl FromGraph for String {
    const KIND: TargetKind = TargetKind::Scalar;

    fn target_name() -> &'static str {
        "String"
    }

    // Anything can be read as text: containers become their compact JSON.
    fn from_graph(node: &Value, _cx: &mut MappingContext<'_>) -> MappingResult<Self> {
        Ok(match node {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}

impl ToGraph for String {
    fn to_graph(&self, _cx: &SerializeContext<'_>) -> MappingResult<Value> {
        Ok(Value::String(self.clone()))
    }
}

impl ToGraph for str {
    fn to_graph(&self, _cx: &SerializeContext<'_>) -> MappingResult<Value> {
        Ok(Value::String(self.to_owned()))
    }
}

impl FromGraph for bool {
    const KIND: TargetKind = TargetKind::Boolean;

    fn from_graph(node: &Value, cx: &mut MappingContext<'_>) -> MappingResult<Self> {
        match node {
            Value::Bool(flag) => Ok(*flag),
            Value::String(text) => {
                let text = text.trim();
                if text.eq_ignore_ascii_case("true") {
                    Ok(true)
                } else if text.eq_ignore_ascii_case("false") {
                    Ok(false)
                } else {
                    Err(cx.coercion::<Self>(node, "expected \"true\" or \"false\""))
                }
            }
            other => Err(cx.type_mismatch::<Self>(other)),
        }
    }
}

impl ToGraph for bool {
    fn to_graph(&self, _cx: &SerializeContext<'_>) -> MappingResult<Value> {
        Ok(Value::Bool(*self))
    }
}

/// Text of a numeric node, or of a string holding a number
fn numeric_text<'a, T: FromGraph>(
    node: &'a Value,
    cx: &MappingContext<'_>,
) -> MappingResult<std::borrow::Cow<'a, str>> {
    match node {
        Value::Number(number) => Ok(std::borrow::Cow::Owned(number.to_string())),
        Value::String(text) => Ok(std::borrow::Cow::Borrowed(text.trim())),
        other => Err(cx.type_mismatch::<T>(other)),
    }
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl FromGraph for $ty {
            const KIND: TargetKind = TargetKind::Scalar;

            fn from_graph(node: &Value, cx: &mut MappingContext<'_>) -> MappingResult<Self> {
                let text = numeric_text::<Self>(node, cx)?;
                text.parse::<$ty>()
                    .map_err(|err| cx.coercion::<Self>(node, err.to_string()))
            }
        }

        impl ToGraph for $ty {
            fn to_graph(&self, _cx: &SerializeContext<'_>) -> MappingResult<Value> {
                serde_json::to_value(self).map_err(|err| {
                    MappingError::unrepresentable(format!("{} {self}: {err}", stringify!($ty)))
                })
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {$(
        impl FromGraph for $ty {
            const KIND: TargetKind = TargetKind::Scalar;

            fn from_graph(node: &Value, cx: &mut MappingContext<'_>) -> MappingResult<Self> {
                let text = numeric_text::<Self>(node, cx)?;
                let value = text
                    .parse::<$ty>()
                    .map_err(|err| cx.coercion::<Self>(node, err.to_string()))?;
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(cx.coercion::<Self>(node, "value is not finite"))
                }
            }
        }

        impl ToGraph for $ty {
            fn to_graph(&self, _cx: &SerializeContext<'_>) -> MappingResult<Value> {
                Number::from_f64(f64::from(*self))
                    .map(Value::Number)
                    .ok_or_else(|| {
                        MappingError::unrepresentable(format!("{} {self}", stringify!($ty)))
                    })
            }
        }
    )*};
}

impl_float!(f32, f64);

impl FromGraph for Decimal {
    const KIND: TargetKind = TargetKind::Scalar;

    fn target_name() -> &'static str {
        "Decimal"
    }

    fn from_graph(node: &Value, cx: &mut MappingContext<'_>) -> MappingResult<Self> {
        let text = numeric_text::<Self>(node, cx)?;
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|err| cx.coercion::<Self>(node, err.to_string()))
    }
}

impl ToGraph for Decimal {
    // Without arbitrary precision numbers the tree holds i64/u64/f64 only.
    fn to_graph(&self, _cx: &SerializeContext<'_>) -> MappingResult<Value> {
        if self.fract().is_zero() {
            if let Some(whole) = self.to_i64() {
                return Ok(Value::Number(whole.into()));
            }
        }
        self.to_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| MappingError::unrepresentable(format!("Decimal {self}")))
    }
}
