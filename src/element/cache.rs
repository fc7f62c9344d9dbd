use core::any::TypeId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use log::debug;

use crate::element::Element;
use crate::util::{HashMap, TypeIdMap};

/// The shared element table of one declaring type.
pub type ElementMap = Arc<ElementTable>;

/// An insertion-ordered table of elements, keyed by name.
///
/// Enumeration follows insertion order, so element tables built from
/// declaration-ordered metadata enumerate deterministically.
#[derive(Default)]
pub struct ElementTable {
    elements: Vec<Element>,
    indices: HashMap<String, usize>,
}

impl ElementTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `element` under `name`.
    ///
    /// A name already present keeps its slot and gets the new element.
    pub fn insert(&mut self, name: String, element: Element) {
        match self.indices.get(&name) {
            Some(&index) => self.elements[index] = element,
            None => {
                self.indices.insert(name, self.elements.len());
                self.elements.push(element);
            }
        }
    }

    /// Returns the element stored under `name`.
    pub fn get(&self, name: &str) -> Option<&Element> {
        self.indices.get(name).map(|&index| &self.elements[index])
    }

    /// Returns `true` if an element is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Returns the elements in insertion order.
    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Returns the number of stored elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

struct CacheEntry {
    map: ElementMap,
    // Tick of the most recent lookup, for eviction ordering.
    stamp: AtomicU64,
}

/// A bounded, thread-safe cache of per-type element tables.
///
/// Enumerating the elements of a type walks its whole metadata, so the
/// result is computed once per declaring type and shared. Tables are
/// built outside the lock; two racing first-time lookups may both build,
/// but readers never observe a partial table. When the cache grows past
/// its capacity the least recently used table is dropped.
pub struct ElementsCache {
    entries: RwLock<TypeIdMap<CacheEntry>>,
    ticks: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    capacity: usize,
}

impl ElementsCache {
    /// The capacity of the [global](Self::global) cache.
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Creates an empty cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty cache holding at most `capacity` tables.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(TypeIdMap::new()),
            ticks: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            capacity: capacity.max(1),
        }
    }

    /// Returns the process-wide cache used by the element finders.
    pub fn global() -> &'static ElementsCache {
        static CACHE: OnceLock<ElementsCache> = OnceLock::new();
        CACHE.get_or_init(ElementsCache::new)
    }

    /// Returns the cached table for `type_id`, building it with `build` on
    /// the first lookup.
    pub fn get_or_populate(
        &self,
        type_id: TypeId,
        build: impl FnOnce() -> ElementTable,
    ) -> ElementMap {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed);

        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = entries.get(&type_id) {
                entry.stamp.store(tick, Ordering::Relaxed);
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Arc::clone(&entry.map);
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        // Built outside the lock: enumeration may itself consult the cache
        // (base types), and slow builds must not block readers.
        let map = Arc::new(build());
        debug!("cached {} element(s) for {type_id:?}", map.len());

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = entries.get(&type_id) {
            // A racing populator won; keep its table.
            entry.stamp.store(tick, Ordering::Relaxed);
            return Arc::clone(&entry.map);
        }
        if entries.len() >= self.capacity {
            let evict = entries
                .iter()
                .min_by_key(|(_, entry)| entry.stamp.load(Ordering::Relaxed))
                .map(|(id, _)| *id);
            if let Some(id) = evict {
                entries.remove(&id);
            }
        }
        entries.insert(
            type_id,
            CacheEntry {
                map: Arc::clone(&map),
                stamp: AtomicU64::new(tick),
            },
        );
        map
    }

    /// Returns the number of cached tables.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no tables are cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of lookups answered from the cache.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of lookups that had to build a table.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Drops every cached table and resets the counters.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        *entries = TypeIdMap::new();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

impl Default for ElementsCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;
    use std::sync::Arc;

    use super::{ElementTable, ElementsCache};

    #[test]
    fn second_lookup_is_a_hit() {
        let cache = ElementsCache::new();
        let key = TypeId::of::<u8>();

        let first = cache.get_or_populate(key, ElementTable::new);
        let second = cache.get_or_populate(key, || panic!("must not rebuild"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn full_cache_evicts_the_least_recently_used() {
        let cache = ElementsCache::with_capacity(2);
        let (a, b, c) = (
            TypeId::of::<u8>(),
            TypeId::of::<u16>(),
            TypeId::of::<u32>(),
        );

        cache.get_or_populate(a, ElementTable::new);
        cache.get_or_populate(b, ElementTable::new);
        cache.get_or_populate(a, ElementTable::new); // refresh `a`
        cache.get_or_populate(c, ElementTable::new); // evicts `b`
        assert_eq!(cache.len(), 2);

        cache.get_or_populate(a, ElementTable::new);
        assert_eq!(cache.misses(), 3);

        cache.get_or_populate(b, ElementTable::new);
        assert_eq!(cache.misses(), 4);
    }
}
