//! Field and type declarations
//!
//! A [`TypeDescriptor`] lists the tagged fields and hooks of one type. When a
//! type embeds a parent (`extends`), the parent's fields and hooks are lifted
//! through the embedding accessor so the child can read and write them as its
//! own.

use super::GraphObject;
use crate::coerce::{FromGraph, ToGraph};
use crate::error::{MappingError, MappingResult};
use crate::mapper::builder;
use crate::mapper::lifecycle::{Hook, IntoHook};
use crate::mapper::{MappingContext, SerializeContext};
use graphmap_domain::{ElementType, JsonKey};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Type-erased read/write access to one field of `T`
pub trait FieldAccess<T>: Send + Sync {
    /// Build the field value from a node and store it
    fn assign(&self, target: &mut T, node: &Value, cx: &mut MappingContext<'_>)
    -> MappingResult<()>;

    /// Put the field back to its default
    fn reset(&self, target: &mut T);

    /// Render the current field value
    fn render(&self, source: &T, cx: &SerializeContext<'_>) -> MappingResult<Value>;

    /// Name of the field's value type
    fn target_name(&self) -> &'static str;
}

struct Direct<T, F> {
    get: fn(&T) -> &F,
    get_mut: fn(&mut T) -> &mut F,
}

impl<T: 'static, F> FieldAccess<T> for Direct<T, F>
where
    F: FromGraph + ToGraph + Default,
{
    fn assign(
        &self,
        target: &mut T,
        node: &Value,
        cx: &mut MappingContext<'_>,
    ) -> MappingResult<()> {
        let value = builder::build::<F>(node, cx)?;
        *(self.get_mut)(target) = value;
        Ok(())
    }

    fn reset(&self, target: &mut T) {
        *(self.get_mut)(target) = F::default();
    }

    fn render(&self, source: &T, cx: &SerializeContext<'_>) -> MappingResult<Value> {
        (self.get)(source).to_graph(cx)
    }

    fn target_name(&self) -> &'static str {
        F::target_name()
    }
}

struct Lifted<T, P> {
    inner: Arc<dyn FieldAccess<P>>,
    get: fn(&T) -> &P,
    get_mut: fn(&mut T) -> &mut P,
}

impl<T: 'static, P: 'static> FieldAccess<T> for Lifted<T, P> {
    fn assign(
        &self,
        target: &mut T,
        node: &Value,
        cx: &mut MappingContext<'_>,
    ) -> MappingResult<()> {
        self.inner.assign((self.get_mut)(target), node, cx)
    }

    fn reset(&self, target: &mut T) {
        self.inner.reset((self.get_mut)(target));
    }

    fn render(&self, source: &T, cx: &SerializeContext<'_>) -> MappingResult<Value> {
        self.inner.render((self.get)(source), cx)
    }

    fn target_name(&self) -> &'static str {
        self.inner.target_name()
    }
}

/// One tagged field: where it lives in JSON and how to reach it in Rust
pub struct FieldTag<T> {
    owner: &'static str,
    field_name: &'static str,
    json_key: JsonKey,
    element_type: Option<ElementType>,
    declared_element: Option<ElementType>,
    access: Arc<dyn FieldAccess<T>>,
}

impl<T> FieldTag<T> {
    /// Type that declared the field
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// Rust field name
    pub fn field_name(&self) -> &'static str {
        self.field_name
    }

    /// JSON key
    pub fn json_key(&self) -> &JsonKey {
        &self.json_key
    }

    /// Element type of a collection field
    pub fn element_type(&self) -> Option<ElementType> {
        self.element_type
    }
}

impl<T: 'static> FieldTag<T> {
    /// Tag a field
    ///
    /// An empty `json_key` defaults to the field name.
    pub fn new<F>(
        owner: &'static str,
        field_name: &'static str,
        json_key: &'static str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self
    where
        F: FromGraph + ToGraph + Default,
    {
        Self {
            owner,
            field_name,
            json_key: JsonKey::resolve(json_key, field_name),
            element_type: F::element_type(),
            declared_element: None,
            access: Arc::new(Direct { get, get_mut }),
        }
    }

    /// Declare the element type of a collection field
    ///
    /// Checked against the field's real element type when the owning type is
    /// first registered.
    #[must_use]
    pub fn with_element<E: 'static>(mut self) -> Self {
        self.declared_element = Some(ElementType::of::<E>());
        self
    }

    /// Name of the field's value type
    pub fn target_name(&self) -> &'static str {
        self.access.target_name()
    }

    pub(crate) fn assign(
        &self,
        target: &mut T,
        node: &Value,
        cx: &mut MappingContext<'_>,
    ) -> MappingResult<()> {
        self.access.assign(target, node, cx)
    }

    pub(crate) fn reset(&self, target: &mut T) {
        self.access.reset(target);
    }

    pub(crate) fn render(&self, source: &T, cx: &SerializeContext<'_>) -> MappingResult<Value> {
        self.access.render(source, cx)
    }

    /// Check the declared element type against the field's real one
    ///
    /// # Errors
    ///
    /// `MappingError::Configuration` when an element type is declared on a
    /// field that is not a collection, or does not match the collection.
    pub fn validate(&self) -> MappingResult<()> {
        match (self.declared_element, self.element_type) {
            (Some(declared), None) => Err(MappingError::configuration(
                self.owner,
                self.field_name,
                format!(
                    "element type {declared} declared on {}, which is not a list or map",
                    self.target_name()
                ),
            )),
            (Some(declared), Some(actual)) if declared != actual => {
                Err(MappingError::configuration(
                    self.owner,
                    self.field_name,
                    format!("declared element type {declared} but the field holds {actual}"),
                ))
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn lift<C: 'static>(
        self,
        get: fn(&C) -> &T,
        get_mut: fn(&mut C) -> &mut T,
    ) -> FieldTag<C> {
        FieldTag {
            owner: self.owner,
            field_name: self.field_name,
            json_key: self.json_key,
            element_type: self.element_type,
            declared_element: self.declared_element,
            access: Arc::new(Lifted {
                inner: self.access,
                get,
                get_mut,
            }),
        }
    }
}

impl<T> fmt::Debug for FieldTag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldTag")
            .field("owner", &self.owner)
            .field("field_name", &self.field_name)
            .field("json_key", &self.json_key)
            .field("element_type", &self.element_type)
            .finish_non_exhaustive()
    }
}

/// Declaration of a mappable type
///
/// Built by [`crate::graph_object!`], or by hand:
///
/// ```
/// use graphmap::registry::{FieldTag, TagRegistry, TypeDescriptor};
/// use graphmap::GraphObject;
///
/// #[derive(Default)]
/// struct Place {
///     name: Option<String>,
///     tags: Vec<String>,
/// }
///
/// impl GraphObject for Place {
///     const NAME: &'static str = "Place";
///
///     fn describe() -> TypeDescriptor<Self> {
///         TypeDescriptor::new(Self::NAME)
///             .field(FieldTag::new(Self::NAME, "name", "", |p: &Place| &p.name, |p: &mut Place| &mut p.name))
///             .field(FieldTag::new(Self::NAME, "tags", "labels", |p: &Place| &p.tags, |p: &mut Place| &mut p.tags))
///     }
/// }
///
/// let entry = TagRegistry::new().entry::<Place>().unwrap();
/// let keys: Vec<&str> = entry.tags().iter().map(|t| t.json_key().as_str()).collect();
/// assert_eq!(keys, ["name", "labels"]);
/// ```
pub struct TypeDescriptor<T> {
    name: &'static str,
    tags: Vec<FieldTag<T>>,
    hooks: Vec<Hook<T>>,
    parent: Option<Flattened<T>>,
}

/// A descriptor with its ancestors folded in, most-derived first
pub(crate) struct Flattened<T> {
    pub(crate) tags: Vec<FieldTag<T>>,
    pub(crate) hooks: Vec<Hook<T>>,
    pub(crate) ancestry: Vec<&'static str>,
}

impl<T: GraphObject> TypeDescriptor<T> {
    /// Start a descriptor for the type called `name`
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            tags: Vec::new(),
            hooks: Vec::new(),
            parent: None,
        }
    }

    /// Embed a parent type whose fields and hooks this type inherits
    #[must_use]
    pub fn extends<P: GraphObject>(mut self, get: fn(&T) -> &P, get_mut: fn(&mut T) -> &mut P) -> Self {
        let parent = P::describe().flatten();
        self.parent = Some(Flattened {
            tags: parent
                .tags
                .into_iter()
                .map(|tag| tag.lift(get, get_mut))
                .collect(),
            hooks: parent
                .hooks
                .into_iter()
                .map(|hook| hook.lift(get_mut))
                .collect(),
            ancestry: parent.ancestry,
        });
        self
    }

    /// Add a tagged field
    #[must_use]
    pub fn field(mut self, tag: FieldTag<T>) -> Self {
        self.tags.push(tag);
        self
    }

    /// Add a post-mapping hook
    #[must_use]
    pub fn hook<M>(mut self, name: &'static str, hook: impl IntoHook<T, M>) -> Self {
        self.hooks.push(Hook::new(self.name, name, hook));
        self
    }

    /// Type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn flatten(self) -> Flattened<T> {
        let mut flat = Flattened {
            tags: self.tags,
            hooks: self.hooks,
            ancestry: vec![self.name],
        };
        if let Some(parent) = self.parent {
            flat.tags.extend(parent.tags);
            flat.hooks.extend(parent.hooks);
            flat.ancestry.extend(parent.ancestry);
        }
        flat
    }
}
