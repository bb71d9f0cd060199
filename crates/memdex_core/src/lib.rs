//! # memdex core
//!
//! An in-memory record store with O(1) primary-key lookup and
//! automatically maintained composite secondary indices.
//!
//! This crate provides:
//! - A record store keyed by a caller-derived primary key
//! - Composite index trees, one per declared attribute combination
//! - A multi-index intersection query planner
//! - An observable decorator that republishes mutations as typed events
//!
//! Indices are declared once through a builder and maintained
//! transparently on every mutation, including pruning of emptied index
//! nodes on deletion. The store is synchronous and single-threaded; if
//! shared, wrap the whole store behind one exclusive guard.
//!
//! # Example
//!
//! ```
//! use memdex_core::{key, IndexQuery, MemoryStore};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct User {
//!     id: u32,
//!     city: String,
//!     team: String,
//! }
//!
//! let mut builder = MemoryStore::builder(|u: &User| u.id);
//! let by_city = builder.add_index([key(|u: &User| u.city.clone())]).unwrap();
//! let by_team = builder.add_index([key(|u: &User| u.team.clone())]).unwrap();
//! let mut store = builder.build();
//!
//! store.add(User { id: 1, city: "Oslo".into(), team: "core".into() });
//! store.add(User { id: 2, city: "Oslo".into(), team: "infra".into() });
//!
//! let in_oslo = store.get_by_index(by_city, &["Oslo".to_string()]).unwrap();
//! assert_eq!(in_oslo.len(), 2);
//!
//! let both = store
//!     .get_by_indices(&[
//!         IndexQuery::new(by_city, vec!["Oslo".to_string()]),
//!         IndexQuery::new(by_team, vec!["core".to_string()]),
//!     ])
//!     .unwrap();
//! assert_eq!(both.len(), 1);
//! assert_eq!(both[0].id, 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod index;
mod observe;
mod query;
mod store;
mod types;

pub use error::{StoreError, StoreResult};
pub use index::IndexTree;
pub use observe::{ObservableStore, StoreEvent};
pub use query::IndexQuery;
pub use store::{MemoryStore, StoreBuilder};
pub use types::{key, IndexHandle, KeyExtractor, PrimaryExtractor};
