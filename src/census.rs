// Per-kind node census, used for `--stats`

use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;

/// Per-kind node census for a tree. Shared by the source and target ASTs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeCounts<K: Hash + Eq> {
    counts: FxHashMap<K, usize>,
}

impl<K: Hash + Eq> Default for NodeCounts<K> {
    fn default() -> Self {
        Self {
            counts: FxHashMap::default(),
        }
    }
}

impl<K: Hash + Eq + Copy + fmt::Display> NodeCounts<K> {
    pub fn record(&mut self, kind: K) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    /// Number of nodes of `kind`; zero if none were recorded.
    pub fn get(&self, kind: K) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// `(kind, count)` pairs sorted by kind name, for stable output.
    pub fn sorted(&self) -> Vec<(K, usize)> {
        let mut entries: Vec<(K, usize)> =
            self.counts.iter().map(|(k, n)| (*k, *n)).collect();
        entries.sort_by_key(|(k, _)| k.to_string());
        entries
    }
}
