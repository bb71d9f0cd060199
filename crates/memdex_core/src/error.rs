//! Error types for memdex core.

use crate::types::IndexHandle;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
///
/// Missing data is never an error: absent reads and absent-on-delete are
/// expressed as `Option::None`. The variants here are recoverable usage
/// errors; none of them corrupts store or index state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The number of supplied key values does not match the index arity.
    #[error("index arity mismatch: index takes {expected} key value(s), got {supplied}")]
    ArityMismatch {
        /// Arity of the index declaration.
        expected: usize,
        /// Number of key values supplied.
        supplied: usize,
    },

    /// The handle does not identify an index registered with this store.
    #[error("unknown index handle: {handle}")]
    UnknownIndex {
        /// The handle that failed to resolve.
        handle: IndexHandle,
    },

    /// An index declaration must contain at least one key extractor.
    #[error("index declaration must contain at least one key extractor")]
    EmptyIndex,
}

impl StoreError {
    /// Creates an arity mismatch error.
    pub fn arity_mismatch(expected: usize, supplied: usize) -> Self {
        Self::ArityMismatch { expected, supplied }
    }

    /// Creates an unknown index handle error.
    pub fn unknown_index(handle: IndexHandle) -> Self {
        Self::UnknownIndex { handle }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_mismatch_message() {
        let err = StoreError::arity_mismatch(2, 3);
        assert_eq!(
            err.to_string(),
            "index arity mismatch: index takes 2 key value(s), got 3"
        );
    }
}
