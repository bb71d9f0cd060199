//! Composite index tree implementation.

use crate::error::{StoreError, StoreResult};
use crate::types::KeyExtractor;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// One node of a composite index tree.
///
/// Interior levels are `Branch` maps keyed by attribute values; the
/// deepest level is a `Leaf` holding primary keys. A tree built from a
/// fixed extractor list has uniform depth, so the variant encountered at
/// each level is determined by how far the walk has progressed.
#[derive(Debug)]
enum IndexNode<K, PK> {
    /// Interior level: attribute value to child node.
    Branch(HashMap<K, IndexNode<K, PK>>),
    /// Deepest level: primary keys of every matching record.
    Leaf(HashSet<PK>),
}

/// A recursive index tree for one composite index declaration.
///
/// The tree is keyed level by level with the values produced by the
/// declaration's extractors, evaluated on the record at insertion and
/// removal time. Removal prunes every node it leaves empty, up to and
/// including the top-level map entry, so emptiness checks and iteration
/// never see hollow intermediate nodes.
pub struct IndexTree<T, PK, K> {
    /// Ordered attribute extractors; non-empty by construction.
    extractors: Vec<KeyExtractor<T, K>>,
    /// Top-level map for the first attribute value.
    root: HashMap<K, IndexNode<K, PK>>,
    /// Total number of (attribute path, primary key) entries.
    len: usize,
}

impl<T, PK, K> IndexTree<T, PK, K>
where
    PK: Clone + Eq + Hash,
    K: Clone + Eq + Hash,
{
    /// Creates an empty tree for the given declaration.
    ///
    /// Rejects an empty extractor list: an index must have arity >= 1.
    pub fn new(extractors: Vec<KeyExtractor<T, K>>) -> StoreResult<Self> {
        if extractors.is_empty() {
            return Err(StoreError::EmptyIndex);
        }
        Ok(Self {
            extractors,
            root: HashMap::new(),
            len: 0,
        })
    }

    /// Returns the arity (depth) of this index.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.extractors.len()
    }

    /// Returns the number of primary-key entries across all leaf sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no entries.
    ///
    /// Because removal prunes empty nodes, this is equivalent to the
    /// top-level map being empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Evaluates the declaration's extractors on `record`, in order.
    fn keys_for(&self, record: &T) -> Vec<K> {
        self.extractors.iter().map(|f| f(record)).collect()
    }

    /// Inserts `pk` into the leaf set for `record`'s attribute values,
    /// lazily creating branch nodes on the way down.
    pub fn insert(&mut self, pk: PK, record: &T) {
        let keys = self.keys_for(record);
        let Some((leaf_key, branch_keys)) = keys.split_last() else {
            return;
        };

        let mut cursor = &mut self.root;
        for key in branch_keys {
            cursor = match cursor
                .entry(key.clone())
                .or_insert_with(|| IndexNode::Branch(HashMap::new()))
            {
                IndexNode::Branch(children) => children,
                // Unreachable for a fixed-arity tree; bail rather than
                // clobber an existing leaf.
                IndexNode::Leaf(_) => return,
            };
        }

        if let IndexNode::Leaf(set) = cursor
            .entry(leaf_key.clone())
            .or_insert_with(|| IndexNode::Leaf(HashSet::new()))
        {
            if set.insert(pk) {
                self.len += 1;
            }
        }
    }

    /// Removes `pk` from the leaf set for `record`'s attribute values.
    ///
    /// The caller must pass the record as currently stored, so the walk
    /// follows the same path the insertion took. Nodes left empty by the
    /// removal are pruned on the way back up. Returns whether an entry
    /// was removed.
    pub fn remove(&mut self, pk: &PK, record: &T) -> bool {
        let keys = self.keys_for(record);
        let removed = Self::remove_at(&mut self.root, &keys, pk);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Single-pass removal: descends along `keys`, removes `pk` at the
    /// leaf, and deletes each child entry left empty as the recursion
    /// unwinds. Keeps deletion O(depth) with no second traversal.
    fn remove_at(nodes: &mut HashMap<K, IndexNode<K, PK>>, keys: &[K], pk: &PK) -> bool {
        let Some((key, rest)) = keys.split_first() else {
            return false;
        };
        let Some(node) = nodes.get_mut(key) else {
            return false;
        };

        let (removed, child_empty) = match node {
            IndexNode::Leaf(set) if rest.is_empty() => (set.remove(pk), set.is_empty()),
            IndexNode::Branch(children) if !rest.is_empty() => {
                (Self::remove_at(children, rest, pk), children.is_empty())
            }
            _ => (false, false),
        };

        if child_empty {
            nodes.remove(key);
        }
        removed
    }

    /// Looks up the leaf set for an exact key combination.
    ///
    /// `keys` must supply one value per level, in declaration order; a
    /// length mismatch is a usage error. A miss at any level, or a node
    /// whose shape does not match the walk, resolves to `Ok(None)`.
    ///
    /// The leaf set is returned by reference: it is a live view into the
    /// tree, not a snapshot. Copy it before retaining it across mutations.
    pub fn lookup(&self, keys: &[K]) -> StoreResult<Option<&HashSet<PK>>> {
        if keys.len() != self.arity() {
            return Err(StoreError::arity_mismatch(self.arity(), keys.len()));
        }
        let Some((leaf_key, branch_keys)) = keys.split_last() else {
            return Ok(None);
        };

        let mut cursor = &self.root;
        for key in branch_keys {
            match cursor.get(key) {
                Some(IndexNode::Branch(children)) => cursor = children,
                _ => return Ok(None),
            }
        }
        match cursor.get(leaf_key) {
            Some(IndexNode::Leaf(set)) => Ok(Some(set)),
            _ => Ok(None),
        }
    }

    /// Empties the tree; the declaration itself is retained.
    pub fn clear(&mut self) {
        self.root.clear();
        self.len = 0;
    }
}

impl<T, PK, K> std::fmt::Debug for IndexTree<T, PK, K>
where
    PK: std::fmt::Debug,
    K: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexTree")
            .field("arity", &self.extractors.len())
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
