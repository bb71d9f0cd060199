//! # memdex testkit
//!
//! Test utilities for memdex.
//!
//! This crate provides:
//! - Fixtures: a sample indexed record type and prebuilt stores
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use memdex_testkit::prelude::*;
//!
//! let (mut store, idx) = ticket_store();
//! store.add(Ticket::new(1, "open", "alice"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
