//! Composite index trees.
//!
//! Each declared composite index is maintained as a recursive tree whose
//! depth equals the declaration's arity. Interior levels map attribute
//! values to child nodes; the deepest level maps the final attribute
//! value to the set of primary keys of every matching record.
//!
//! Trees are internal access paths: they are kept consistent with the
//! record store automatically on every mutation, and they never hold an
//! empty node or empty leaf set once a deletion completes.

mod tree;

pub use tree::IndexTree;
