//! Record store and mutation coordinator.

use crate::error::{StoreError, StoreResult};
use crate::index::IndexTree;
use crate::types::{IndexHandle, KeyExtractor, PrimaryExtractor};
use std::collections::HashMap;
use std::hash::Hash;

/// Builder for [`MemoryStore`], where composite indices are declared.
///
/// Index declarations are supplied once, before the store is built; each
/// declaration yields an [`IndexHandle`] that is required on every
/// subsequent lookup against that index.
pub struct StoreBuilder<T, PK, K> {
    primary: PrimaryExtractor<T, PK>,
    indexes: Vec<IndexTree<T, PK, K>>,
}

impl<T, PK, K> StoreBuilder<T, PK, K>
where
    PK: Clone + Eq + Hash,
    K: Clone + Eq + Hash,
{
    /// Creates a builder with the given primary-key extractor.
    ///
    /// The extractor must be deterministic and pure, and the keys it
    /// produces must be unique among stored records.
    pub fn new(primary: impl Fn(&T) -> PK + Send + Sync + 'static) -> Self {
        Self {
            primary: Box::new(primary),
            indexes: Vec::new(),
        }
    }

    /// Declares a composite index from an ordered list of extractors.
    ///
    /// Returns the handle for this index, assigned in registration
    /// order. An empty declaration is rejected with
    /// [`StoreError::EmptyIndex`].
    pub fn add_index<I>(&mut self, extractors: I) -> StoreResult<IndexHandle>
    where
        I: IntoIterator<Item = KeyExtractor<T, K>>,
    {
        let tree = IndexTree::new(extractors.into_iter().collect())?;
        let handle = IndexHandle::new(self.indexes.len());
        self.indexes.push(tree);
        Ok(handle)
    }

    /// Builds the empty store with all declared indices instantiated.
    #[must_use]
    pub fn build(self) -> MemoryStore<T, PK, K> {
        MemoryStore {
            primary: self.primary,
            records: HashMap::new(),
            indexes: self.indexes,
        }
    }
}

/// An in-memory record store with automatically maintained composite
/// secondary indices.
///
/// The record map is the single source of truth for existence and
/// content; every mutation keeps all declared index trees consistent
/// with it before returning. Reads by primary key are O(1); indexed
/// reads walk one tree level per declared attribute.
///
/// The store is single-threaded: mutations take `&mut self`, and indexed
/// lookups return references into the store. If shared across threads,
/// the whole store is one unit of shared mutable state and must sit
/// behind one exclusive guard.
pub struct MemoryStore<T, PK, K> {
    /// Primary-key extractor.
    primary: PrimaryExtractor<T, PK>,
    /// Primary key to record; source of truth.
    records: HashMap<PK, T>,
    /// One tree per declared composite index, in registration order.
    indexes: Vec<IndexTree<T, PK, K>>,
}

impl<T, PK, K> MemoryStore<T, PK, K>
where
    PK: Clone + Eq + Hash,
    K: Clone + Eq + Hash,
{
    /// Returns a builder for declaring indices before use.
    pub fn builder(primary: impl Fn(&T) -> PK + Send + Sync + 'static) -> StoreBuilder<T, PK, K> {
        StoreBuilder::new(primary)
    }

    /// Returns the primary key of a record.
    pub fn primary_key(&self, record: &T) -> PK {
        (self.primary)(record)
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Gets a record by primary key.
    pub fn get(&self, pk: &PK) -> Option<&T> {
        self.records.get(pk)
    }

    /// Checks whether a record exists under the given primary key.
    pub fn contains(&self, pk: &PK) -> bool {
        self.records.contains_key(pk)
    }

    /// Iterates over all stored records, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }

    /// Returns all stored records, in no particular order.
    #[must_use]
    pub fn all(&self) -> Vec<&T> {
        self.records.values().collect()
    }

    /// Inserts a record, replacing any record stored under the same
    /// primary key.
    ///
    /// On replacement, the previous record's index entries are removed
    /// first, using the previous record's attribute values, so stale
    /// paths never survive an attribute change. Returns the stored
    /// record.
    pub fn add(&mut self, record: T) -> T
    where
        T: Clone,
    {
        let pk = (self.primary)(&record);

        if let Some(previous) = self.records.get(&pk) {
            for tree in &mut self.indexes {
                tree.remove(&pk, previous);
            }
        }

        for tree in &mut self.indexes {
            tree.insert(pk.clone(), &record);
        }
        self.records.insert(pk, record.clone());

        record
    }

    /// Updates a record in place, keyed by its primary key.
    ///
    /// This is the same path as [`add`](Self::add): insert-or-replace.
    /// The primary-key extractor is required to be stable for a record's
    /// identity; moving a record to a new primary key is a
    /// [`delete`](Self::delete) followed by an `add`.
    pub fn update(&mut self, record: T) -> T
    where
        T: Clone,
    {
        self.add(record)
    }

    /// Deletes a record by primary key.
    ///
    /// Returns the removed record, or `None` (with no side effects) if
    /// nothing is stored under that key. Index entries are removed using
    /// the just-removed record's attribute values.
    pub fn delete(&mut self, pk: &PK) -> Option<T> {
        let record = self.records.remove(pk)?;
        for tree in &mut self.indexes {
            tree.remove(pk, &record);
        }
        Some(record)
    }

    /// Applies [`add`](Self::add) to each record, in input order.
    ///
    /// Results are returned in the same order. There is no atomicity
    /// across items.
    pub fn add_batch(&mut self, records: Vec<T>) -> Vec<T>
    where
        T: Clone,
    {
        records.into_iter().map(|record| self.add(record)).collect()
    }

    /// Applies [`update`](Self::update) to each record, in input order.
    pub fn update_batch(&mut self, records: Vec<T>) -> Vec<T>
    where
        T: Clone,
    {
        records
            .into_iter()
            .map(|record| self.update(record))
            .collect()
    }

    /// Applies [`delete`](Self::delete) to each key, in input order.
    ///
    /// A key with no stored record yields `None` at its position.
    pub fn delete_batch(&mut self, pks: &[PK]) -> Vec<Option<T>> {
        pks.iter().map(|pk| self.delete(pk)).collect()
    }

    /// Empties the record store and every index tree.
    ///
    /// Index declarations are retained; the store remains usable.
    pub fn clear(&mut self) {
        self.records.clear();
        for tree in &mut self.indexes {
            tree.clear();
        }
    }

    /// Returns the number of declared composite indices.
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indexes.len()
    }

    /// Returns the number of entries in one index tree.
    pub fn index_len(&self, handle: IndexHandle) -> StoreResult<usize> {
        Ok(self.tree(handle)?.len())
    }

    /// Returns true if one index tree holds no entries.
    pub fn index_is_empty(&self, handle: IndexHandle) -> StoreResult<bool> {
        Ok(self.tree(handle)?.is_empty())
    }

    /// Resolves a handle to its tree.
    pub(crate) fn tree(&self, handle: IndexHandle) -> StoreResult<&IndexTree<T, PK, K>> {
        self.indexes
            .get(handle.slot())
            .ok_or_else(|| StoreError::unknown_index(handle))
    }
}

impl<T, PK, K> std::fmt::Debug for MemoryStore<T, PK, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("records", &self.records.len())
            .field("indexes", &self.indexes.len())
            .finish_non_exhaustive()
    }
}
