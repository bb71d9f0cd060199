//! Index lookups and multi-index intersection planning.

use crate::store::MemoryStore;
use crate::types::IndexHandle;
use std::collections::HashSet;
use std::hash::Hash;
use tracing::warn;

/// One entry of a multi-index intersection query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexQuery<K> {
    /// Handle of the index to consult.
    pub index: IndexHandle,
    /// One key value per level of that index, in declaration order.
    pub keys: Vec<K>,
}

impl<K> IndexQuery<K> {
    /// Creates a query entry.
    pub fn new(index: IndexHandle, keys: impl Into<Vec<K>>) -> Self {
        Self {
            index,
            keys: keys.into(),
        }
    }
}

impl<T, PK, K> MemoryStore<T, PK, K>
where
    PK: Clone + Eq + Hash,
    K: Clone + Eq + Hash,
{
    /// Looks up records by exact match on one declared index.
    ///
    /// `keys` supplies one value per level of the index, in declaration
    /// order. Returns `None` when no record matches. An arity mismatch
    /// or a handle this store never issued is a usage error: it is
    /// logged and treated as not-found, and never touches index state.
    ///
    /// Matches are returned as references into the store; primary-key
    /// uniqueness guarantees they are distinct records.
    pub fn get_by_index(&self, index: IndexHandle, keys: &[K]) -> Option<Vec<&T>> {
        let pks = self.leaf_set(index, keys)?;
        // A PK in a tree always has a live record under the store's
        // invariants; filter_map keeps a violation from panicking a read.
        Some(pks.iter().filter_map(|pk| self.get(pk)).collect())
    }

    /// Looks up records matching every entry of a multi-index query.
    ///
    /// Resolves each entry's candidate set, then intersects starting
    /// from the smallest set, which bounds the work to the size of that
    /// set times the number of other sets. If any single entry resolves
    /// to not-found the whole query is not-found, never a partial
    /// result. An empty query list is not-found: there is no
    /// universal-match semantics.
    pub fn get_by_indices(&self, queries: &[IndexQuery<K>]) -> Option<Vec<&T>> {
        if queries.is_empty() {
            return None;
        }

        let mut sets: Vec<&HashSet<PK>> = Vec::with_capacity(queries.len());
        for query in queries {
            sets.push(self.leaf_set(query.index, &query.keys)?);
        }
        sets.sort_by_key(|set| set.len());

        let (seed, rest) = sets.split_first()?;
        Some(
            seed.iter()
                .filter(|pk| rest.iter().all(|set| set.contains(*pk)))
                .filter_map(|pk| self.get(pk))
                .collect(),
        )
    }

    /// Resolves the leaf set for one lookup, downgrading usage errors to
    /// not-found after reporting them.
    fn leaf_set(&self, index: IndexHandle, keys: &[K]) -> Option<&HashSet<PK>> {
        let tree = match self.tree(index) {
            Ok(tree) => tree,
            Err(error) => {
                warn!(%error, %index, "index lookup rejected");
                return None;
            }
        };
        match tree.lookup(keys) {
            Ok(found) => found,
            Err(error) => {
                warn!(%error, %index, "index lookup rejected");
                None
            }
        }
    }
}
