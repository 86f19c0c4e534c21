use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hash index enforcing one row per key (email lookups).
///
/// Uniqueness itself is checked by the constraint layer before any mutation;
/// this structure only answers point lookups without touching the base table.
#[derive(Debug)]
pub struct UniqueIndex<K, V> {
    entries: HashMap<K, V>,
    seeks: AtomicU64,
    track: bool,
}

impl<K: Eq + Hash, V: Copy> UniqueIndex<K, V> {
    pub fn new(capacity: usize, track: bool) -> Self {
        UniqueIndex {
            entries: HashMap::with_capacity(capacity),
            seeks: AtomicU64::new(0),
            track,
        }
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    /// Point lookup, counted as one index seek.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.track {
            self.seeks.fetch_add(1, Ordering::Relaxed);
        }
        self.entries.get(key).copied()
    }

    /// Membership probe for constraint checks; not counted as a seek.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn seek_count(&self) -> u64 {
        self.seeks.load(Ordering::Relaxed)
    }
}
