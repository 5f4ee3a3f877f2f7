//! Least-recently-touched record cache with dirty tracking.
//!
//! The cache only bookkeeps: it never talks to storage. The owning store
//! decides when to write a dirty entry back and when to drop it, so a failed
//! write never loses the only copy of a record.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

/// Counters describing how a store's record caches have behaved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to go to the backing store.
    pub misses: u64,
    /// Entries dropped to stay within capacity.
    pub evictions: u64,
    /// Dirty records written to the backing store.
    pub write_backs: u64,
}

impl CacheStats {
    /// Get the total number of lookups.
    #[must_use]
    pub const fn total_lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Get the hit rate as a percentage (0.0 to 100.0).
    ///
    /// Returns `None` if there have been no lookups.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> Option<f64> {
        let total = self.total_lookups();
        if total == 0 {
            None
        } else {
            Some((self.hits as f64 / total as f64) * 100.0)
        }
    }

    /// Sum two sets of counters.
    #[must_use]
    pub const fn merged(self, other: Self) -> Self {
        Self {
            hits: self.hits + other.hits,
            misses: self.misses + other.misses,
            evictions: self.evictions + other.evictions,
            write_backs: self.write_backs + other.write_backs,
        }
    }
}

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    touched: u64,
}

/// Decoded records keyed by ID, ordered by last touch.
///
/// A capacity of zero disables the cache: nothing is ever inserted.
#[derive(Debug)]
pub(crate) struct RecordCache<K, V> {
    capacity: usize,
    /// Monotonic touch counter.
    clock: u64,
    entries: HashMap<K, CacheEntry<V>>,
    /// Touch time to key, oldest first.
    order: BTreeMap<u64, K>,
    dirty: HashSet<K>,
    stats: CacheStats,
}

impl<K, V> RecordCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            clock: 0,
            entries: HashMap::new(),
            order: BTreeMap::new(),
            dirty: HashSet::new(),
            stats: CacheStats::default(),
        }
    }

    pub(crate) const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity. The caller must evict down to it afterwards.
    pub(crate) fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub(crate) const fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_over_capacity(&self) -> bool {
        self.entries.len() > self.capacity
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    #[cfg(test)]
    pub(crate) fn is_dirty(&self, key: &K) -> bool {
        self.dirty.contains(key)
    }

    /// Look a record up, refreshing its touch time on a hit.
    pub(crate) fn get(&mut self, key: &K) -> Option<&V> {
        if self.entries.contains_key(key) {
            self.stats.hits += 1;
            self.touch(key);
            self.entries.get(key).map(|entry| &entry.value)
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Look a record up without touching it or counting the lookup.
    pub(crate) fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Insert or replace a record and mark it most recently touched.
    ///
    /// A clean insert is a copy of what the backing store already holds; a
    /// dirty one must be written back before it is dropped.
    pub(crate) fn insert(&mut self, key: K, value: V, dirty: bool) {
        if !self.is_enabled() {
            return;
        }
        self.clock += 1;
        let touched = self.clock;
        if let Some(old) = self.entries.insert(key.clone(), CacheEntry { value, touched }) {
            self.order.remove(&old.touched);
        }
        self.order.insert(touched, key.clone());
        if dirty {
            self.dirty.insert(key);
        }
    }

    /// Drop a record from every structure. Returns whether it was cached.
    pub(crate) fn remove(&mut self, key: &K) -> bool {
        self.dirty.remove(key);
        match self.entries.remove(key) {
            Some(entry) => {
                self.order.remove(&entry.touched);
                true
            }
            None => false,
        }
    }

    /// The least recently touched entry and whether it is dirty.
    pub(crate) fn oldest(&self) -> Option<(&K, &V, bool)> {
        let (_, key) = self.order.iter().next()?;
        let entry = self.entries.get(key)?;
        Some((key, &entry.value, self.dirty.contains(key)))
    }

    /// Drop the least recently touched entry as a capacity eviction.
    pub(crate) fn evict_oldest(&mut self, written_back: bool) -> Option<K> {
        let (_, key) = self.order.pop_first()?;
        self.entries.remove(&key);
        self.dirty.remove(&key);
        self.stats.evictions += 1;
        if written_back {
            self.stats.write_backs += 1;
        }
        Some(key)
    }

    /// Every entry from least to most recently touched, with its dirty flag.
    pub(crate) fn iter_by_age(&self) -> impl Iterator<Item = (&K, &V, bool)> + '_ {
        self.order.values().filter_map(move |key| {
            self.entries.get(key).map(|entry| (key, &entry.value, self.dirty.contains(key)))
        })
    }

    /// Keys whose cached copy differs from the backing store.
    pub(crate) fn dirty_keys(&self) -> Vec<K> {
        self.dirty.iter().cloned().collect()
    }

    /// Record that the cached copies of `keys` were written back.
    pub(crate) fn mark_clean<'k>(&mut self, keys: impl IntoIterator<Item = &'k K>)
    where
        K: 'k,
    {
        for key in keys {
            if self.dirty.remove(key) {
                self.stats.write_backs += 1;
            }
        }
    }

    /// Drop everything after the dirty entries have been written back.
    pub(crate) fn clear_written(&mut self) {
        let written = self.dirty.len() as u64;
        self.stats.write_backs += written;
        self.entries.clear();
        self.order.clear();
        self.dirty.clear();
    }

    pub(crate) const fn stats(&self) -> CacheStats {
        self.stats
    }

    fn touch(&mut self, key: &K) {
        self.clock += 1;
        let touched = self.clock;
        if let Some(entry) = self.entries.get_mut(key) {
            self.order.remove(&entry.touched);
            entry.touched = touched;
            self.order.insert(touched, key.clone());
        }
    }
}
