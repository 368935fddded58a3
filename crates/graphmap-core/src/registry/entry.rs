//! Resolved, validated field metadata of one type

use super::GraphObject;
use super::descriptor::FieldTag;
use crate::error::MappingResult;
use crate::mapper::lifecycle::Hook;
use graphmap_domain::JsonKey;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Everything the mapper needs to know about `T`
///
/// Tags are ordered most-derived type first, declaration order within a type.
pub struct RegistryEntry<T> {
    type_name: &'static str,
    ancestry: Vec<&'static str>,
    tags: Vec<FieldTag<T>>,
    hooks: Vec<Hook<T>>,
    shared_keys: HashSet<JsonKey>,
}

impl<T: GraphObject> RegistryEntry<T> {
    /// Flatten and validate the declaration of `T`
    ///
    /// # Errors
    ///
    /// Returns the first `MappingError::Configuration` found among the fields.
    pub fn resolve() -> MappingResult<Self> {
        let flat = T::describe().flatten();
        for tag in &flat.tags {
            tag.validate()?;
        }

        let mut key_counts: HashMap<&JsonKey, usize> = HashMap::with_capacity(flat.tags.len());
        for tag in &flat.tags {
            *key_counts.entry(tag.json_key()).or_default() += 1;
        }
        let shared_keys = key_counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(key, _)| key.clone())
            .collect();

        Ok(Self {
            type_name: T::NAME,
            ancestry: flat.ancestry,
            tags: flat.tags,
            hooks: flat.hooks,
            shared_keys,
        })
    }
}

impl<T> RegistryEntry<T> {
    /// Name of the registered type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The type followed by its ancestors, nearest first
    pub fn ancestry(&self) -> &[&'static str] {
        &self.ancestry
    }

    /// Tagged fields in mapping order
    pub fn tags(&self) -> &[FieldTag<T>] {
        &self.tags
    }

    /// Post-mapping hooks in run order
    pub fn hooks(&self) -> &[Hook<T>] {
        &self.hooks
    }

    /// Whether more than one field maps `key`
    pub fn is_shared_key(&self, key: &JsonKey) -> bool {
        self.shared_keys.contains(key)
    }

    /// Tags mapping `key`, in mapping order
    pub fn tags_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a FieldTag<T>> + 'a {
        self.tags
            .iter()
            .filter(move |tag| tag.json_key().as_str() == key)
    }
}

impl<T> fmt::Debug for RegistryEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("type_name", &self.type_name)
            .field("ancestry", &self.ancestry)
            .field("tags", &self.tags)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
