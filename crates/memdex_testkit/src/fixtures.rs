//! Test fixtures and store helpers.
//!
//! Provides a small indexed record type and prebuilt stores for tests
//! that do not care about declaring their own indices.

use memdex_core::{key, IndexHandle, MemoryStore, ObservableStore};

/// A sample record with one primary key and two indexed attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Primary key.
    pub id: u32,
    /// Workflow status, e.g. "open" or "closed".
    pub status: String,
    /// Assignee name.
    pub owner: String,
}

impl Ticket {
    /// Creates a ticket.
    pub fn new(id: u32, status: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id,
            status: status.into(),
            owner: owner.into(),
        }
    }
}

/// Handles for the indices declared by [`ticket_store`].
#[derive(Debug, Clone, Copy)]
pub struct TicketIndexes {
    /// Single-attribute index on `status`.
    pub by_status: IndexHandle,
    /// Single-attribute index on `owner`.
    pub by_owner: IndexHandle,
    /// Composite index on `(status, owner)`.
    pub by_status_owner: IndexHandle,
}

/// Builds an empty ticket store with a standard set of indices.
pub fn ticket_store() -> (MemoryStore<Ticket, u32, String>, TicketIndexes) {
    let mut builder = MemoryStore::builder(|t: &Ticket| t.id);
    let by_status = builder
        .add_index([key(|t: &Ticket| t.status.clone())])
        .expect("non-empty declaration");
    let by_owner = builder
        .add_index([key(|t: &Ticket| t.owner.clone())])
        .expect("non-empty declaration");
    let by_status_owner = builder
        .add_index([
            key(|t: &Ticket| t.status.clone()),
            key(|t: &Ticket| t.owner.clone()),
        ])
        .expect("non-empty declaration");

    (
        builder.build(),
        TicketIndexes {
            by_status,
            by_owner,
            by_status_owner,
        },
    )
}

/// Builds an observable ticket store with the standard indices.
pub fn observable_ticket_store() -> (ObservableStore<Ticket, u32, String>, TicketIndexes) {
    let (store, indexes) = ticket_store();
    (ObservableStore::new(store), indexes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_store_indexes_tickets() {
        let (mut store, idx) = ticket_store();
        store.add(Ticket::new(1, "open", "alice"));
        store.add(Ticket::new(2, "open", "bob"));

        let open = store
            .get_by_index(idx.by_status, &["open".to_string()])
            .unwrap();
        assert_eq!(open.len(), 2);

        let pair = store
            .get_by_index(
                idx.by_status_owner,
                &["open".to_string(), "bob".to_string()],
            )
            .unwrap();
        assert_eq!(pair, vec![&Ticket::new(2, "open", "bob")]);
    }
}
