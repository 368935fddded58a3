//! Post-mapping lifecycle hooks
//!
//! A hook runs once on a freshly built object, after every field has been
//! assigned. Three signatures are accepted:
//!
//! - `fn(&mut T)`
//! - `fn(&mut T, &JsonMapper)`
//! - `fn(&mut T, &JsonMapper) -> MappingResult<()>`
//!
//! Anything else does not implement [`IntoHook`] and fails to compile.

use super::JsonMapper;
use crate::error::{MappingError, MappingResult};
use crate::registry::{GraphObject, RegistryEntry};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Normalized hook callable
pub type HookFn<T> = Arc<dyn Fn(&mut T, &JsonMapper) -> MappingResult<()> + Send + Sync>;

/// Marker types telling the accepted hook signatures apart
pub mod signature {
    /// `fn(&mut T)`
    pub struct Plain;
    /// `fn(&mut T, &JsonMapper)`
    pub struct WithMapper;
    /// `fn(&mut T, &JsonMapper) -> MappingResult<()>`
    pub struct Fallible;
}

/// Conversion of an accepted hook signature into a [`HookFn`]
pub trait IntoHook<T, Marker> {
    /// Normalize the callable
    fn into_hook_fn(self) -> HookFn<T>;
}

impl<T: 'static, F> IntoHook<T, signature::Plain> for F
where
    F: Fn(&mut T) + Send + Sync + 'static,
{
    fn into_hook_fn(self) -> HookFn<T> {
        Arc::new(move |target: &mut T, _mapper: &JsonMapper| {
            self(target);
            Ok(())
        })
    }
}

impl<T: 'static, F> IntoHook<T, signature::WithMapper> for F
where
    F: Fn(&mut T, &JsonMapper) + Send + Sync + 'static,
{
    fn into_hook_fn(self) -> HookFn<T> {
        Arc::new(move |target: &mut T, mapper: &JsonMapper| {
            self(target, mapper);
            Ok(())
        })
    }
}

impl<T: 'static, F> IntoHook<T, signature::Fallible> for F
where
    F: Fn(&mut T, &JsonMapper) -> MappingResult<()> + Send + Sync + 'static,
{
    fn into_hook_fn(self) -> HookFn<T> {
        Arc::new(self)
    }
}

/// Named hook bound to the type that declared it
pub struct Hook<T> {
    owner: &'static str,
    name: &'static str,
    call: HookFn<T>,
}

impl<T: 'static> Hook<T> {
    /// Create a hook from any accepted signature
    pub fn new<M>(owner: &'static str, name: &'static str, hook: impl IntoHook<T, M>) -> Self {
        Self {
            owner,
            name,
            call: hook.into_hook_fn(),
        }
    }

    /// Type that declared the hook
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// Hook name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the hook
    ///
    /// # Errors
    ///
    /// Returns `MappingError::Hook` when a fallible hook fails.
    pub fn invoke(&self, target: &mut T, mapper: &JsonMapper) -> MappingResult<()> {
        (self.call)(target, mapper).map_err(|error| match error {
            MappingError::Hook { .. } => error,
            other => MappingError::hook(self.owner, self.name, other.to_string()),
        })
    }

    /// Re-target the hook at a type that embeds `T`
    pub(crate) fn lift<C: 'static>(self, get_mut: fn(&mut C) -> &mut T) -> Hook<C> {
        let call = self.call;
        Hook {
            owner: self.owner,
            name: self.name,
            call: Arc::new(move |outer: &mut C, mapper: &JsonMapper| {
                call(get_mut(outer), mapper)
            }),
        }
    }
}

impl<T> Clone for Hook<T> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner,
            name: self.name,
            call: Arc::clone(&self.call),
        }
    }
}

impl<T> fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("owner", &self.owner)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Run every hook of a registry entry, most-derived type first
pub(crate) fn run_hooks<T: GraphObject>(
    entry: &RegistryEntry<T>,
    instance: &mut T,
    mapper: &JsonMapper,
) -> MappingResult<()> {
    for hook in entry.hooks() {
        trace!(owner = hook.owner(), hook = hook.name(), "running post-mapping hook");
        hook.invoke(instance, mapper)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        value: u32,
    }

    struct Outer {
        inner: Counter,
    }

    fn bump(counter: &mut Counter) {
        counter.value += 1;
    }

    fn bump_with_mapper(counter: &mut Counter, _mapper: &JsonMapper) {
        counter.value += 10;
    }

    fn reject(_counter: &mut Counter, _mapper: &JsonMapper) -> MappingResult<()> {
        Err(MappingError::unrepresentable("nothing"))
    }

    #[test]
    fn test_all_signatures_accepted() {
        let mapper = JsonMapper::new();
        let mut counter = Counter::default();
        Hook::<Counter>::new("Counter", "bump", bump)
            .invoke(&mut counter, &mapper)
            .unwrap();
        Hook::<Counter>::new("Counter", "bump_with_mapper", bump_with_mapper)
            .invoke(&mut counter, &mapper)
            .unwrap();
        assert_eq!(counter.value, 11);
    }

    #[test]
    fn test_fallible_hook_error_is_wrapped() {
        let mapper = JsonMapper::new();
        let err = Hook::<Counter>::new("Counter", "reject", reject)
            .invoke(&mut Counter::default(), &mapper)
            .unwrap_err();
        assert!(matches!(
            err,
            MappingError::Hook {
                owner: "Counter",
                hook: "reject",
                ..
            }
        ));
    }

    #[test]
    fn test_lifted_hook_reaches_embedded_value() {
        let mapper = JsonMapper::new();
        let hook: Hook<Outer> =
            Hook::<Counter>::new("Counter", "bump", bump).lift(|outer: &mut Outer| &mut outer.inner);
        let mut outer = Outer {
            inner: Counter::default(),
        };
        hook.invoke(&mut outer, &mapper).unwrap();
        assert_eq!(outer.inner.value, 1);
        assert_eq!(hook.owner(), "Counter");
    }
}
