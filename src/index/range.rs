use std::collections::BTreeMap;
use std::ops::RangeBounds;
use std::sync::atomic::{AtomicU64, Ordering};

/// Ordered index over a sortable key (dates, composite location+price).
///
/// B-tree postings give range queries without visiting the base table; like
/// [`KeyIndex`](crate::index::multimap::KeyIndex), postings keep insertion
/// order within one key.
#[derive(Debug)]
pub struct RangeIndex<K, Id> {
    postings: BTreeMap<K, Vec<Id>>,
    seeks: AtomicU64,
    track: bool,
}

impl<K: Ord, Id: Copy + PartialEq> RangeIndex<K, Id> {
    pub fn new(track: bool) -> Self {
        RangeIndex {
            postings: BTreeMap::new(),
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

    /// Row ids whose key falls inside `bounds`, in key order.
    /// Counted as one index seek regardless of how many keys match.
    pub fn range<R: RangeBounds<K>>(&self, bounds: R) -> Vec<Id> {
        if self.track {
            self.seeks.fetch_add(1, Ordering::Relaxed);
        }
        self.postings
            .range(bounds)
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect()
    }

    pub fn seek_count(&self) -> u64 {
        self.seeks.load(Ordering::Relaxed)
    }
}
