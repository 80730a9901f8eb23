use crate::arena::NodeId;
use crate::treap::error::InvariantError;
use crate::treap::tree::Tree;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Debug;
use std::vec::Vec;

/// An ordered multiset of keys implemented by a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property.
/// Each node has a key and a priority. Keys smaller than a node's key are in its left subtree
/// and keys greater than or equal to it are in its right subtree. The priority of a node is
/// greater than or equal to the priority of its children. Priorities are drawn uniformly from
/// `[0, 1)` when a key is inserted, so the expected height of the tree is proportional to the
/// logarithm of the number of keys, whatever the insertion order.
///
/// Every node keeps a handle to its parent, and rotations keep those handles up to date.
///
/// # Examples
///
/// ```
/// use random_bst::treap::TreapSet;
///
/// let mut t = TreapSet::new();
/// t.insert(3);
/// t.insert(0);
/// t.insert(3);
///
/// assert_eq!(t.len(), 3);
/// assert!(t.contains(&0));
/// assert!(!t.contains(&1));
/// assert_eq!(t.iter().collect::<Vec<&u32>>(), vec![&0, &3, &3]);
/// ```
pub struct TreapSet<T: Ord, R: Rng = StdRng> {
    tree: Tree<T>,
    rng: R,
}

impl<T: Ord> TreapSet<T> {
    /// Constructs a new, empty `TreapSet<T>` whose priorities come from a generator seeded once
    /// from the operating system.
    ///
    /// # Examples
    ///
    /// ```
    /// use random_bst::treap::TreapSet;
    ///
    /// let t: TreapSet<u32> = TreapSet::new();
    /// assert!(t.is_empty());
    /// ```
    pub fn new() -> Self {
        TreapSet::with_rng(StdRng::from_entropy())
    }
}

impl<T: Ord, R: Rng> TreapSet<T, R> {
    /// Constructs a new, empty `TreapSet<T, R>` that draws every priority from `rng`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use random_bst::treap::TreapSet;
    ///
    /// let mut t = TreapSet::with_rng(StdRng::seed_from_u64(7));
    /// t.insert(1);
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn with_rng(rng: R) -> Self {
        TreapSet {
            tree: Tree::new(),
            rng,
        }
    }

    /// Inserts a key into the treap. Duplicate keys are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use random_bst::treap::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.insert(1);
    /// t.insert(1);
    /// assert_eq!(t.len(), 2);
    /// ```
    pub fn insert(&mut self, key: T) {
        let priority = self.rng.gen::<f64>();
        self.tree.insert(key, priority);
    }

    /// Checks if a key exists in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use random_bst::treap::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.insert(1);
    /// assert_eq!(t.contains(&0), false);
    /// assert_eq!(t.contains(&1), true);
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        self.tree.contains(key)
    }

    /// Returns the height of the treap. A treap with at most one key has height 0, and a node
    /// with a single child counts its missing side as height 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use random_bst::treap::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// assert_eq!(t.height(), 0);
    /// t.insert(1);
    /// assert_eq!(t.height(), 0);
    /// t.insert(2);
    /// assert_eq!(t.height(), 1);
    /// ```
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns the number of keys in the treap, counting duplicates.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the treap holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the treap. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use random_bst::treap::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.insert(2);
    /// t.insert(1);
    ///
    /// let mut iterator = t.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> TreapSetIter<'_, T> {
        TreapSetIter {
            tree: &self.tree,
            current: self.tree.root(),
            stack: Vec::new(),
        }
    }

    /// Walks the whole treap and returns the first broken structural invariant, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use random_bst::treap::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// for key in 0..100 {
    ///     t.insert(key);
    /// }
    /// assert_eq!(t.check_invariants(), Ok(()));
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        T: Debug,
    {
        self.tree.check_invariants()
    }
}

impl<T: Ord> Default for TreapSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Ord, R: Rng> IntoIterator for &'a TreapSet<T, R> {
    type Item = &'a T;
    type IntoIter = TreapSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `TreapSet<T, R>`.
///
/// This iterator traverses the elements of the treap in-order and yields immutable references.
pub struct TreapSetIter<'a, T: Ord> {
    tree: &'a Tree<T>,
    current: Option<NodeId>,
    stack: Vec<NodeId>,
}

impl<'a, T: Ord> Iterator for TreapSetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(id) = self.current {
            self.stack.push(id);
            self.current = tree.node(id).left;
        }
        let node = tree.node(self.stack.pop()?);
        self.current = node.right;
        Some(&node.key)
    }
}
