//! Thread-shareable tree
//!
//! Inserts take the write lock and queries share the read lock, so queries
//! run concurrently with each other but never overlap an insert.

use super::types::*;
use super::SuffixTree;
use crate::error::Result;
use parking_lot::{RwLock, RwLockReadGuard};

/// A [`SuffixTree`] behind a reader/writer lock
#[derive(Debug, Default)]
pub struct SharedSuffixTree {
    inner: RwLock<SuffixTree>,
}

impl SharedSuffixTree {
    pub fn new(tree: SuffixTree) -> Self {
        Self {
            inner: RwLock::new(tree),
        }
    }

    pub fn insert(&self, text: &str) -> Result<DocId> {
        self.inner.write().insert(text)
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.inner.read().contains(pattern)
    }

    pub fn find_all(&self, pattern: &str) -> Vec<Occurrence> {
        self.inner.read().find_all(pattern)
    }

    pub fn longest_common_substring(&self) -> String {
        self.inner.read().longest_common_substring()
    }

    pub fn str(&self, id: DocId) -> Result<String> {
        self.inner.read().str(id).map(str::to_owned)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Hold the read lock for a series of queries
    pub fn read(&self) -> RwLockReadGuard<'_, SuffixTree> {
        self.inner.read()
    }

    pub fn into_inner(self) -> SuffixTree {
        self.inner.into_inner()
    }
}

impl From<SuffixTree> for SharedSuffixTree {
    fn from(tree: SuffixTree) -> Self {
        Self::new(tree)
    }
}
