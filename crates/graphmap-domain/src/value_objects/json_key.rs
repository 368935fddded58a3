//! JSON key value object
//!
//! The name under which a tagged field appears in a JSON object.

use crate::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Non-empty JSON object key
///
/// Keys declared at compile time are borrowed; keys built at runtime are owned.
///
/// # Examples
///
/// ```
/// # use graphmap_domain::value_objects::JsonKey;
/// let key = JsonKey::new("fan_count").unwrap();
/// assert_eq!(key.as_str(), "fan_count");
///
/// // Empty explicit keys fall back to the field name
/// let key = JsonKey::resolve("", "r#type");
/// assert_eq!(key.as_str(), "type");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JsonKey(Cow<'static, str>);

impl JsonKey {
    /// Create a key from any string
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidJsonKey` if the key is empty.
    pub fn new(key: impl Into<Cow<'static, str>>) -> DomainResult<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(DomainError::invalid_key("JSON key cannot be empty"));
        }
        Ok(Self(key))
    }

    /// Resolve the key of a declared field
    ///
    /// An empty explicit key defaults to the field name. Raw identifier
    /// prefixes (`r#type`) are stripped from the field name.
    pub fn resolve(explicit: &'static str, field_name: &'static str) -> Self {
        if !explicit.is_empty() {
            return Self(Cow::Borrowed(explicit));
        }
        Self::from_field_name(field_name)
    }

    /// Derive a key from a Rust field name
    pub fn from_field_name(field_name: &'static str) -> Self {
        let name = field_name.strip_prefix("r#").unwrap_or(field_name);
        if name.is_empty() {
            // Field names are identifiers and never empty; keep the invariant anyway.
            return Self(Cow::Borrowed("_"));
        }
        Self(Cow::Borrowed(name))
    }

    /// Get the key text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the key text
    pub fn into_inner(self) -> Cow<'static, str> {
        self.0
    }
}

impl fmt::Display for JsonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for JsonKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for JsonKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JsonKey> for String {
    fn from(key: JsonKey) -> Self {
        key.0.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert!(JsonKey::new("").is_err());
        assert!(JsonKey::new(String::new()).is_err());
        assert_eq!(JsonKey::new("id").unwrap().as_str(), "id");
    }

    #[test]
    fn test_resolve_prefers_explicit_key() {
        assert_eq!(JsonKey::resolve("likes", "fan_count").as_str(), "likes");
        assert_eq!(JsonKey::resolve("", "fan_count").as_str(), "fan_count");
    }

    #[test]
    fn test_raw_identifier_is_stripped() {
        assert_eq!(JsonKey::from_field_name("r#type").as_str(), "type");
        assert_eq!(JsonKey::from_field_name("type_").as_str(), "type_");
    }

    #[test]
    fn test_into_inner_keeps_borrowed_text() {
        let key = JsonKey::from_field_name("id").into_inner();
        assert!(matches!(key, Cow::Borrowed("id")));
        assert_eq!(JsonKey::new("name").unwrap().into_inner(), "name");
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let key: JsonKey = serde_json::from_str("\"name\"").unwrap();
        assert_eq!(key.as_str(), "name");
        assert!(serde_json::from_str::<JsonKey>("\"\"").is_err());
    }
}
