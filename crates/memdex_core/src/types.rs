//! Core type definitions for memdex.

use std::fmt;

/// Extracts one attribute value from a record.
///
/// Attribute extractors must be deterministic and pure: the same record
/// must always produce the same value, and extraction must not mutate
/// anything. A composite index declaration is an ordered, non-empty list
/// of these.
pub type KeyExtractor<T, K> = Box<dyn Fn(&T) -> K + Send + Sync>;

/// Extracts the primary key from a record.
///
/// Primary keys must be unique among stored records and stable for a
/// record's identity: an "update" that changes the primary key is not an
/// update at all, it is a delete followed by an add.
pub type PrimaryExtractor<T, PK> = Box<dyn Fn(&T) -> PK + Send + Sync>;

/// Boxes a closure as a [`KeyExtractor`].
///
/// Convenience for building index declarations:
///
/// ```rust,ignore
/// let by_name = builder.add_index([key(|u: &User| u.name.clone())])?;
/// ```
pub fn key<T, K>(f: impl Fn(&T) -> K + Send + Sync + 'static) -> KeyExtractor<T, K> {
    Box::new(f)
}

/// Opaque handle identifying one registered composite index.
///
/// Handles are issued by the store builder at declaration time, in
/// registration order, and are required on every subsequent lookup.
/// A handle is only meaningful for the store that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexHandle(usize);

impl IndexHandle {
    /// Creates a handle for the index registered at `slot`.
    #[must_use]
    pub(crate) const fn new(slot: usize) -> Self {
        Self(slot)
    }

    /// Returns the registration slot of this handle.
    #[must_use]
    pub(crate) const fn slot(self) -> usize {
        self.0
    }
}

impl fmt::Display for IndexHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "idx:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_ordering_follows_registration_order() {
        let first = IndexHandle::new(0);
        let second = IndexHandle::new(1);
        assert!(first < second);
    }

    #[test]
    fn handle_display() {
        let handle = IndexHandle::new(3);
        assert_eq!(format!("{handle}"), "idx:3");
    }

    #[test]
    fn key_boxes_a_closure() {
        let extractor = key(|s: &String| s.len());
        assert_eq!(extractor(&"hello".to_string()), 5);
    }
}
