//! Concurrent registry of resolved type metadata

use super::GraphObject;
use super::entry::RegistryEntry;
use crate::error::{MappingError, MappingResult};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::{Any, TypeId};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

type StoredEntry = Arc<dyn Any + Send + Sync>;

static GLOBAL: Lazy<Arc<TagRegistry>> = Lazy::new(|| Arc::new(TagRegistry::new()));

/// Process-wide registry shared by mappers that were not given their own
pub fn global() -> Arc<TagRegistry> {
    Arc::clone(&GLOBAL)
}

/// Thread-safe cache of [`RegistryEntry`] values keyed by type
///
/// Lookups are read-through: a miss resolves the type's declaration and
/// stores it. Two threads missing at once may both resolve, but only one
/// entry is kept and both get that one. Failed resolutions are not cached.
///
/// # Examples
/// ```
/// # use graphmap::registry::TagRegistry;
/// let registry = TagRegistry::with_capacity(Some(128));
/// assert!(registry.is_empty());
/// assert_eq!(registry.capacity(), Some(128));
/// ```
pub struct TagRegistry {
    entries: DashMap<TypeId, StoredEntry>,
    capacity: Option<usize>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

/// Snapshot of registry counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Cached entries
    pub entries: usize,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that resolved a declaration
    pub misses: u64,
    /// Entries dropped to stay within capacity
    pub evictions: u64,
}

impl TagRegistry {
    /// Create an unbounded registry
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// Create a registry holding at most `capacity` entries
    ///
    /// When full, an arbitrary entry is dropped to make room; it is resolved
    /// again on its next use.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.filter(|max| *max > 0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Entry for `T`, resolving and caching it on first use
    ///
    /// # Errors
    ///
    /// Returns `MappingError::Configuration` if the declaration of `T` is
    /// invalid.
    pub fn entry<T: GraphObject>(&self) -> MappingResult<Arc<RegistryEntry<T>>> {
        let key = TypeId::of::<T>();

        // Clone out of the guard so the shard lock is released before any insert.
        let cached = self.entries.get(&key).map(|stored| Arc::clone(stored.value()));
        if let Some(stored) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return downcast::<T>(stored);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let resolved: StoredEntry = Arc::new(RegistryEntry::<T>::resolve()?);
        trace!(type_name = T::NAME, "resolved tag registry entry");

        self.make_room(&key);
        let stored = Arc::clone(self.entries.entry(key).or_insert(resolved).value());
        downcast::<T>(stored)
    }

    /// Whether `T` is cached
    pub fn contains<T: GraphObject>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured bound, if any
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        self.entries.clear();
        debug!("tag registry cleared");
    }

    /// Counter snapshot
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    fn make_room(&self, incoming: &TypeId) {
        let Some(capacity) = self.capacity else {
            return;
        };
        while self.entries.len() >= capacity && !self.entries.contains_key(incoming) {
            let victim = self.entries.iter().next().map(|stored| *stored.key());
            let Some(victim) = victim else {
                return;
            };
            if self.entries.remove(&victim).is_some() {
                self.evictions.fetch_add(1, Ordering::Relaxed);
                debug!(capacity, "evicted tag registry entry");
            }
        }
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagRegistry")
            .field("capacity", &self.capacity)
            .field("stats", &self.stats())
            .finish()
    }
}

fn downcast<T: GraphObject>(stored: StoredEntry) -> MappingResult<Arc<RegistryEntry<T>>> {
    stored.downcast::<RegistryEntry<T>>().map_err(|_| {
        MappingError::configuration(T::NAME, "<registry>", "cached entry has an unexpected type")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FieldTag, TypeDescriptor};
    use std::thread;

    macro_rules! simple_type {
        ($name:ident) => {
            #[derive(Default)]
            struct $name {
                value: Option<i64>,
            }

            impl GraphObject for $name {
                const NAME: &'static str = stringify!($name);

                fn describe() -> TypeDescriptor<Self> {
                    TypeDescriptor::new(Self::NAME).field(FieldTag::new(
                        Self::NAME,
                        "value",
                        "",
                        |t: &$name| &t.value,
                        |t: &mut $name| &mut t.value,
                    ))
                }
            }
        };
    }

    simple_type!(First);
    simple_type!(Second);
    simple_type!(Third);

    #[test]
    fn test_read_through_and_hits() {
        let registry = TagRegistry::new();
        assert!(!registry.contains::<First>());

        let a = registry.entry::<First>().unwrap();
        let b = registry.entry::<First>().unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let stats = registry.stats();
        assert_eq!((stats.entries, stats.hits, stats.misses), (1, 1, 1));
    }

    #[test]
    fn test_concurrent_first_use_keeps_single_entry() {
        let registry = Arc::new(TagRegistry::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.entry::<Second>().unwrap())
            })
            .collect();
        let entries: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(registry.len(), 1);
        let kept = registry.entry::<Second>().unwrap();
        assert!(entries.iter().all(|entry| Arc::ptr_eq(entry, &kept)));
    }

    #[test]
    fn test_capacity_evicts() {
        let registry = TagRegistry::with_capacity(Some(2));
        registry.entry::<First>().unwrap();
        registry.entry::<Second>().unwrap();
        registry.entry::<Third>().unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains::<Third>());
        assert_eq!(registry.stats().evictions, 1);

        // Evicted types resolve again transparently.
        registry.entry::<First>().unwrap();
        registry.entry::<Second>().unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_clear() {
        let registry = TagRegistry::new();
        registry.entry::<First>().unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.entry::<First>().unwrap().tags().len(), 1);
    }
}
