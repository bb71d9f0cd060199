//! Observable decorator republishing each mutation as a typed event.
//!
//! [`ObservableStore`] wraps a [`MemoryStore`] and forwards every call to
//! it. After a mutating call completes its invariant-preserving work, the
//! decorator emits exactly one event carrying the call's result: batch
//! operations emit one batch event with the full ordered result sequence,
//! never one event per item. Read operations are forwarded silently.
//!
//! # Usage
//!
//! ```rust,ignore
//! let store = builder.build();
//! let mut store = ObservableStore::new(store);
//!
//! let events = store.subscribe();
//! store.add(user);
//!
//! assert!(matches!(events.try_recv(), Ok(StoreEvent::Added(_))));
//! ```

use crate::query::IndexQuery;
use crate::store::MemoryStore;
use crate::types::IndexHandle;
use parking_lot::RwLock;
use std::hash::Hash;
use std::sync::mpsc::{self, Receiver, Sender};

/// A mutation notification emitted by [`ObservableStore`].
///
/// One event is emitted per mutating call, after the call completes.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent<T> {
    /// `add` stored a record (insert or replace).
    Added(T),
    /// `add_batch` completed; carries the stored records in input order.
    AddedBatch(Vec<T>),
    /// `update` stored a record.
    Updated(T),
    /// `update_batch` completed; carries results in input order.
    UpdatedBatch(Vec<T>),
    /// `delete` removed a record. Not emitted when nothing was removed.
    Deleted(T),
    /// `delete_batch` completed; always emitted, with `None` at each
    /// position whose key had no stored record.
    DeletedBatch(Vec<Option<T>>),
    /// `clear` emptied the store.
    Cleared,
}

/// Event-publishing decorator around [`MemoryStore`].
///
/// Holds no state of its own beyond the subscriber list. Events are
/// delivered synchronously into each subscriber's channel before the
/// mutating call returns; disconnected subscribers are pruned on emit.
pub struct ObservableStore<T, PK, K> {
    /// The wrapped store.
    inner: MemoryStore<T, PK, K>,
    /// Subscriber channels.
    subscribers: RwLock<Vec<Sender<StoreEvent<T>>>>,
}

impl<T, PK, K> ObservableStore<T, PK, K>
where
    T: Clone,
    PK: Clone + Eq + Hash,
    K: Clone + Eq + Hash,
{
    /// Wraps a store.
    pub fn new(inner: MemoryStore<T, PK, K>) -> Self {
        Self {
            inner,
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Subscribes to mutation events.
    ///
    /// Returns a receiver that will see every event emitted after this
    /// call. Drop the receiver to unsubscribe; the sender side is pruned
    /// on the next emit.
    pub fn subscribe(&self) -> Receiver<StoreEvent<T>> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.write().push(tx);
        rx
    }

    /// Returns the number of active subscribers.
    ///
    /// Disconnected subscribers are only pruned on emit, so this may
    /// briefly overcount.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Returns the wrapped store for read access.
    pub fn inner(&self) -> &MemoryStore<T, PK, K> {
        &self.inner
    }

    /// Unwraps the decorator, dropping all subscriptions.
    #[must_use]
    pub fn into_inner(self) -> MemoryStore<T, PK, K> {
        self.inner
    }

    fn emit(&self, event: StoreEvent<T>) {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    // Reads: forwarded without events.

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Gets a record by primary key.
    pub fn get(&self, pk: &PK) -> Option<&T> {
        self.inner.get(pk)
    }

    /// Returns all stored records, in no particular order.
    #[must_use]
    pub fn all(&self) -> Vec<&T> {
        self.inner.all()
    }

    /// Looks up records by exact match on one declared index.
    pub fn get_by_index(&self, index: IndexHandle, keys: &[K]) -> Option<Vec<&T>> {
        self.inner.get_by_index(index, keys)
    }

    /// Looks up records matching every entry of a multi-index query.
    pub fn get_by_indices(&self, queries: &[IndexQuery<K>]) -> Option<Vec<&T>> {
        self.inner.get_by_indices(queries)
    }

    // Mutations: forwarded, then one event per call.

    /// Inserts or replaces a record, then emits [`StoreEvent::Added`].
    pub fn add(&mut self, record: T) -> T {
        let stored = self.inner.add(record);
        self.emit(StoreEvent::Added(stored.clone()));
        stored
    }

    /// Adds each record in order, then emits one
    /// [`StoreEvent::AddedBatch`] with the full result sequence.
    pub fn add_batch(&mut self, records: Vec<T>) -> Vec<T> {
        let stored = self.inner.add_batch(records);
        self.emit(StoreEvent::AddedBatch(stored.clone()));
        stored
    }

    /// Updates a record, then emits [`StoreEvent::Updated`].
    pub fn update(&mut self, record: T) -> T {
        let stored = self.inner.update(record);
        self.emit(StoreEvent::Updated(stored.clone()));
        stored
    }

    /// Updates each record in order, then emits one
    /// [`StoreEvent::UpdatedBatch`].
    pub fn update_batch(&mut self, records: Vec<T>) -> Vec<T> {
        let stored = self.inner.update_batch(records);
        self.emit(StoreEvent::UpdatedBatch(stored.clone()));
        stored
    }

    /// Deletes a record by primary key.
    ///
    /// Emits [`StoreEvent::Deleted`] only when a record was removed.
    pub fn delete(&mut self, pk: &PK) -> Option<T> {
        let removed = self.inner.delete(pk);
        if let Some(record) = &removed {
            self.emit(StoreEvent::Deleted(record.clone()));
        }
        removed
    }

    /// Deletes each key in order, then emits one
    /// [`StoreEvent::DeletedBatch`] carrying the per-item results,
    /// including the `None` positions.
    pub fn delete_batch(&mut self, pks: &[PK]) -> Vec<Option<T>> {
        let removed = self.inner.delete_batch(pks);
        self.emit(StoreEvent::DeletedBatch(removed.clone()));
        removed
    }

    /// Empties the store, then emits [`StoreEvent::Cleared`].
    pub fn clear(&mut self) {
        self.inner.clear();
        self.emit(StoreEvent::Cleared);
    }
}

impl<T, PK, K> std::fmt::Debug for ObservableStore<T, PK, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableStore")
            .field("subscribers", &self.subscribers.read().len())
            .finish_non_exhaustive()
    }
}
