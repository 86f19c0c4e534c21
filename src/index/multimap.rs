use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hash multimap from a foreign-key value to the rows carrying it.
///
/// One entry per distinct key; postings keep insertion order, callers sort
/// when they need a total order.
#[derive(Debug)]
pub struct KeyIndex<K, Id> {
    postings: HashMap<K, Vec<Id>>,
    seeks: AtomicU64,
    track: bool,
}

impl<K: Eq + Hash, Id: Copy + PartialEq> KeyIndex<K, Id> {
    pub fn new(capacity: usize, track: bool) -> Self {
        KeyIndex {
            postings: HashMap::with_capacity(capacity),
            seeks: AtomicU64::new(0),
            track,
        }
    }

    pub fn insert(&mut self, key: K, id: Id) {
        self.postings.entry(key).or_default().push(id);
    }

    pub fn remove(&mut self, key: &K, id: Id) {
        if let Some(ids) = self.postings.get_mut(key) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                self.postings.remove(key);
            }
        }
    }

    /// All row ids under `key`, counted as one index seek.
    pub fn get(&self, key: &K) -> &[Id] {
        if self.track {
            self.seeks.fetch_add(1, Ordering::Relaxed);
        }
        self.postings.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Posting count without counting a seek; used by restrict checks.
    pub fn cardinality(&self, key: &K) -> usize {
        self.postings.get(key).map(Vec::len).unwrap_or(0)
    }

    pub fn seek_count(&self) -> u64 {
        self.seeks.load(Ordering::Relaxed)
    }
}
