//! Append-only arena that owns every node of a tree.

use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object stored in a `NodeArena<T>`.
///
/// Handles are plain indices. Holding one never keeps the object alive, so trees can store them
/// as back-references without forming ownership cycles.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId {
    chunk_index: usize,
    block_index: usize,
}

/// An arena that only allocates a single type of object and never frees it.
///
/// Objects live until the arena itself is dropped. The arena grows one chunk at a time, so
/// objects that are already allocated are never moved.
///
/// # Examples
///
/// ```
/// use random_bst::arena::NodeArena;
///
/// let mut arena = NodeArena::new(1024);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
/// assert_eq!(arena.len(), 1);
/// ```
pub struct NodeArena<T> {
    chunks: Vec<Vec<T>>,
    chunk_size: usize,
    len: usize,
}

impl<T> NodeArena<T> {
    fn is_valid_id(&self, id: &NodeId) -> bool {
        id.chunk_index < self.chunks.len() && id.block_index < self.chunks[id.chunk_index].len()
    }

    /// Constructs a new, empty `NodeArena<T>` holding at most `chunk_size` objects per chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use random_bst::arena::NodeArena;
    ///
    /// let arena: NodeArena<u32> = NodeArena::new(1024);
    /// assert!(arena.is_empty());
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: chunk size must be positive.");
        NodeArena {
            chunks: Vec::new(),
            chunk_size,
            len: 0,
        }
    }

    /// Moves `value` into the arena and returns its handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use random_bst::arena::NodeArena;
    ///
    /// let mut arena = NodeArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> NodeId {
        let needs_chunk = match self.chunks.last() {
            Some(chunk) => chunk.len() == self.chunk_size,
            None => true,
        };
        if needs_chunk {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
        }

        let chunk_index = self.chunks.len() - 1;
        let chunk = &mut self.chunks[chunk_index];
        chunk.push(value);
        self.len += 1;
        NodeId {
            chunk_index,
            block_index: chunk.len() - 1,
        }
    }

    /// Returns an immutable reference to an object, or `None` if `id` was not issued by this
    /// arena.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        if !self.is_valid_id(&id) {
            return None;
        }
        Some(&self.chunks[id.chunk_index][id.block_index])
    }

    /// Returns a mutable reference to an object, or `None` if `id` was not issued by this arena.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        if !self.is_valid_id(&id) {
            return None;
        }
        Some(&mut self.chunks[id.chunk_index][id.block_index])
    }

    /// Returns the number of objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been allocated yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Index<NodeId> for NodeArena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.get(id).expect("Error: node id out of bounds.")
    }
}

impl<T> IndexMut<NodeId> for NodeArena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.get_mut(id).expect("Error: node id out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::NodeArena;
    use super::NodeId;

    #[test]
    #[should_panic]
    fn test_zero_chunk_size() {
        let _: NodeArena<u32> = NodeArena::new(0);
    }

    #[test]
    fn test_allocate() {
        let mut arena = NodeArena::new(1024);
        assert_eq!(
            arena.allocate(0),
            NodeId {
                chunk_index: 0,
                block_index: 0
            },
        );
        assert_eq!(
            arena.allocate(0),
            NodeId {
                chunk_index: 0,
                block_index: 1
            },
        );
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = NodeArena::new(2);
        arena.allocate(0);
        arena.allocate(1);
        let id = arena.allocate(2);
        assert_eq!(
            id,
            NodeId {
                chunk_index: 1,
                block_index: 0
            },
        );
        assert_eq!(arena[id], 2);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_get_invalid_id() {
        let mut arena: NodeArena<u32> = NodeArena::new(4);
        assert_eq!(
            arena.get(NodeId {
                chunk_index: 0,
                block_index: 0
            }),
            None,
        );
        arena.allocate(0);
        assert_eq!(
            arena.get_mut(NodeId {
                chunk_index: 0,
                block_index: 1
            }),
            None,
        );
    }

    #[test]
    fn test_index_mut() {
        let mut arena = NodeArena::new(4);
        let id = arena.allocate(1);
        arena[id] = 5;
        assert_eq!(arena.get(id), Some(&5));
    }

    #[test]
    #[should_panic]
    fn test_index_invalid_id() {
        let arena: NodeArena<u32> = NodeArena::new(4);
        let _ = arena[NodeId {
            chunk_index: 3,
            block_index: 0,
        }];
    }
}
