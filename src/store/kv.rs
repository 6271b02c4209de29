//! Ordered key-value store interface
//!
//! The host chain owns the real store and its commit/rollback semantics.
//! [`MemStore`] is the in-memory reference implementation.

use std::collections::BTreeMap;

/// Borrowed key/value pair yielded by prefix scans
pub type KvPair<'a> = (&'a [u8], &'a [u8]);

/// An ordered byte-keyed store scoped to the asset module
pub trait KvStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    fn set(&mut self, key: &[u8], value: &[u8]);

    fn delete(&mut self, key: &[u8]);

    /// All entries whose key starts with `prefix`, ascending by key bytes.
    /// The iterator is lazy so callers can stop early.
    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> Box<dyn Iterator<Item = KvPair<'a>> + 'a>;
}

/// In-memory ordered store backed by a `BTreeMap`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries under a prefix
    pub fn count_prefix(&self, prefix: &[u8]) -> usize {
        self.prefix_iter(prefix).count()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn has(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        self.entries.insert(key.to_vec(), value.to_vec());
    }

    fn delete(&mut self, key: &[u8]) {
        self.entries.remove(key);
    }

    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> Box<dyn Iterator<Item = KvPair<'a>> + 'a> {
        let prefix = prefix.to_vec();
        Box::new(
            self.entries
                .range(prefix.clone()..)
                .take_while(move |(key, _)| key.starts_with(&prefix))
                .map(|(key, value)| (key.as_slice(), value.as_slice())),
        )
    }
}
