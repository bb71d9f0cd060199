//! Property-based test generators using proptest.
//!
//! Key spaces are deliberately small so generated records collide on
//! primary keys and attribute values, which is what exercises index
//! grouping, replacement, and pruning.

use crate::fixtures::Ticket;
use proptest::prelude::*;

/// Primary keys drawn from a small range to force replacements.
pub const PK_RANGE: std::ops::Range<u32> = 0..16;

/// Strategy for ticket statuses.
pub fn status_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["open", "closed", "blocked"]).prop_map(str::to_string)
}

/// Strategy for ticket owners.
pub fn owner_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["alice", "bob", "carol", "dave"]).prop_map(str::to_string)
}

/// Strategy for tickets with colliding keys and attributes.
pub fn ticket_strategy() -> impl Strategy<Value = Ticket> {
    (PK_RANGE, status_strategy(), owner_strategy())
        .prop_map(|(id, status, owner)| Ticket { id, status, owner })
}

/// One store mutation.
#[derive(Debug, Clone)]
pub enum StoreOp {
    /// Insert or replace a ticket.
    Add(Ticket),
    /// Update a ticket (same path as add).
    Update(Ticket),
    /// Delete by primary key; may miss.
    Delete(u32),
    /// Empty the store.
    Clear,
}

/// Strategy for a single mutation, weighted towards inserts.
pub fn op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        4 => ticket_strategy().prop_map(StoreOp::Add),
        2 => ticket_strategy().prop_map(StoreOp::Update),
        3 => PK_RANGE.prop_map(StoreOp::Delete),
        1 => Just(StoreOp::Clear),
    ]
}

/// Strategy for a sequence of mutations.
pub fn ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<StoreOp>> {
    prop::collection::vec(op_strategy(), 0..max_len)
}
