//! State threaded through one mapping or serialization call

use super::JsonMapper;
use super::policy::{FieldErrorPolicy, MappingFailure};
use crate::coerce::FromGraph;
use crate::error::MappingError;
use crate::tree;
use serde_json::Value;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt::Write as _;

/// Longest JSON excerpt quoted in a coercion error
const EXCERPT_LIMIT: usize = 80;

#[derive(Debug, Clone)]
enum PathSegment {
    Key(Cow<'static, str>),
    Index(usize),
}

/// Mapping state: the owning mapper, its error policy and the current JSON path
pub struct MappingContext<'m> {
    mapper: &'m JsonMapper,
    path: SmallVec<[PathSegment; 8]>,
}

impl<'m> MappingContext<'m> {
    pub(crate) fn new(mapper: &'m JsonMapper) -> Self {
        Self {
            mapper,
            path: SmallVec::new(),
        }
    }

    /// Mapper driving this call
    pub fn mapper(&self) -> &'m JsonMapper {
        self.mapper
    }

    /// Error policy in effect
    pub fn policy(&self) -> &'m FieldErrorPolicy {
        self.mapper.error_policy()
    }

    /// Current JSON path, `$` at the root
    pub fn path(&self) -> String {
        let mut out = String::from("$");
        for segment in &self.path {
            match segment {
                PathSegment::Key(key) => {
                    out.push('.');
                    out.push_str(key);
                }
                PathSegment::Index(index) => {
                    let _ = write!(out, "[{index}]");
                }
            }
        }
        out
    }

    /// Nesting depth below the root
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub(crate) fn push_key(&mut self, key: impl Into<Cow<'static, str>>) {
        self.path.push(PathSegment::Key(key.into()));
    }

    pub(crate) fn push_index(&mut self, index: usize) {
        self.path.push(PathSegment::Index(index));
    }

    pub(crate) fn pop(&mut self) {
        self.path.pop();
    }

    /// Ask the policy whether a failure at the current path should be swallowed
    pub fn should_swallow(&self, target: &'static str, node: &Value, error: &MappingError) -> bool {
        let failure = MappingFailure {
            target,
            node,
            path: self.path(),
            error,
        };
        self.policy().swallows(&failure)
    }

    /// Node kind cannot be mapped to `T`
    pub fn type_mismatch<T: FromGraph>(&self, node: &Value) -> MappingError {
        MappingError::TypeMismatch {
            target: T::target_name(),
            found: tree::kind_name(node),
            path: self.path(),
        }
    }

    /// Node has the right kind but its content does not convert to `T`
    pub fn coercion<T: FromGraph>(&self, node: &Value, reason: impl Into<String>) -> MappingError {
        MappingError::coercion(T::target_name(), excerpt(node), self.path(), reason)
    }
}

/// Serialization state
#[derive(Debug, Clone, Copy)]
pub struct SerializeContext<'m> {
    mapper: &'m JsonMapper,
    ignore_null_values: bool,
}

impl<'m> SerializeContext<'m> {
    pub(crate) fn new(mapper: &'m JsonMapper, ignore_null_values: bool) -> Self {
        Self {
            mapper,
            ignore_null_values,
        }
    }

    /// Mapper driving this call
    pub fn mapper(&self) -> &'m JsonMapper {
        self.mapper
    }

    /// Whether null-valued fields are left out of objects
    pub fn ignore_null_values(&self) -> bool {
        self.ignore_null_values
    }
}

fn excerpt(node: &Value) -> String {
    let text = node.to_string();
    if text.len() <= EXCERPT_LIMIT {
        return text;
    }
    let mut cut = EXCERPT_LIMIT;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &text[..cut])
}
