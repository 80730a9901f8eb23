use crate::arena::{NodeArena, NodeId};
use crate::treap::error::{self, InvariantError};
use crate::treap::node::{Node, Side};
use log::trace;
use std::cmp;
use std::fmt::Debug;
use std::vec::Vec;

const CHUNK_SIZE: usize = 1024;

/// The linked structure of a treap: every node lives in `arena`, and `root` plus the child links
/// describe the tree.
pub struct Tree<T> {
    arena: NodeArena<Node<T>>,
    root: Option<NodeId>,
    len: usize,
}

impl<T: Ord> Tree<T> {
    pub fn new() -> Self {
        Tree {
            arena: NodeArena::new(CHUNK_SIZE),
            root: None,
            len: 0,
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.arena[id]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Links a new node holding `key` and `priority` as a leaf and rotates it up until its parent
    /// outranks it.
    pub fn insert(&mut self, key: T, priority: f64) -> NodeId {
        let id = self.arena.allocate(Node::new(key, priority));
        self.len += 1;
        match self.root {
            Some(root) => self.insert_below(root, id),
            None => self.root = Some(id),
        }
        id
    }

    fn insert_below(&mut self, root: NodeId, id: NodeId) {
        // Each entry is a visited node and the side the walk left it by.
        let mut path: Vec<(NodeId, Side)> = Vec::new();
        let mut curr = root;
        let side = loop {
            let side = if self.arena[id].key < self.arena[curr].key {
                Side::Left
            } else {
                Side::Right
            };
            path.push((curr, side));
            match self.arena[curr].child(side) {
                Some(child) => curr = child,
                None => break side,
            }
        };

        self.arena[curr].set_child(side, Some(id));
        self.arena[id].parent = Some(curr);

        // Unwind: the slot may now hold a node that was rotated up from below.
        while let Some((curr, side)) = path.pop() {
            if let Some(child) = self.arena[curr].child(side) {
                if self.arena[child].priority > self.arena[curr].priority {
                    self.rotate(child);
                }
            }
        }
    }

    /// Promotes `id` over its parent and returns the root of the rotated subtree. Promoting a
    /// left child is a right rotation and promoting a right child is a left rotation.
    ///
    /// Both side relations are read before any link changes, since `side_of` stops answering
    /// correctly once the parent's slots are rewritten.
    pub fn rotate(&mut self, id: NodeId) -> NodeId {
        let parent = match self.arena[id].parent {
            Some(parent) => parent,
            None => return id,
        };
        let side = match self.arena[parent].side_of(id) {
            Some(side) => side,
            None => return id,
        };
        let grandparent = self.arena[parent].parent;
        let parent_side = grandparent.and_then(|g| self.arena[g].side_of(parent));
        let inner = self.arena[id].child(side.opposite());

        trace!(
            "rotate {} promoting priority {} over {}",
            match side {
                Side::Left => "right",
                Side::Right => "left",
            },
            self.arena[id].priority,
            self.arena[parent].priority,
        );

        self.arena[parent].set_child(side, inner);
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(parent);
        }
        self.arena[id].set_child(side.opposite(), Some(parent));

        self.arena[id].parent = grandparent;
        match (grandparent, parent_side) {
            (Some(grandparent), Some(parent_side)) => {
                self.arena[grandparent].set_child(parent_side, Some(id))
            },
            _ => self.root = Some(id),
        }
        self.arena[parent].parent = Some(id);
        id
    }

    pub fn height(&self) -> usize {
        match self.root {
            Some(root) => self.subtree_height(root),
            None => 0,
        }
    }

    // A leaf has height 0 and an absent child also counts as 0, so the height is the deepest
    // edge count from the root to any node.
    fn subtree_height(&self, id: NodeId) -> usize {
        let mut stack = vec![(id, 0)];
        let mut height = 0;
        while let Some((id, depth)) = stack.pop() {
            height = cmp::max(height, depth);
            let node = &self.arena[id];
            for child in node.left.iter().chain(node.right.iter()) {
                stack.push((*child, depth + 1));
            }
        }
        height
    }

    pub fn contains(&self, key: &T) -> bool {
        let mut curr = self.root;
        while let Some(id) = curr {
            let node = &self.arena[id];
            if *key == node.key {
                return true;
            }
            curr = if *key < node.key { node.left } else { node.right };
        }
        false
    }

    /// Walks the whole tree and returns the first broken invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        T: Debug,
    {
        let root = match self.root {
            Some(root) => root,
            None => {
                return match self.len {
                    0 => Ok(()),
                    expected => Err(InvariantError::SizeMismatch {
                        expected,
                        visited: 0,
                    }),
                };
            },
        };
        if self.arena[root].parent.is_some() {
            return Err(InvariantError::RootHasParent {
                root: error::render(&self.arena[root].key),
            });
        }

        // (node, lower bound, upper bound), both inclusive: a rotation can lift a duplicate over an
        // equal key, leaving that key in its left subtree.
        let mut stack: Vec<(NodeId, Option<NodeId>, Option<NodeId>)> = vec![(root, None, None)];
        let mut visited = 0;
        while let Some((id, lower, upper)) = stack.pop() {
            visited += 1;
            let node = &self.arena[id];
            if let Some(lower) = lower {
                if node.key < self.arena[lower].key {
                    return Err(self.key_order_error(lower, id));
                }
            }
            if let Some(upper) = upper {
                if node.key > self.arena[upper].key {
                    return Err(self.key_order_error(upper, id));
                }
            }

            for &(child, child_lower, child_upper) in &[
                (node.left, lower, Some(id)),
                (node.right, Some(id), upper),
            ] {
                let child = match child {
                    Some(child) => child,
                    None => continue,
                };
                let child_node = &self.arena[child];
                if child_node.parent != Some(id) {
                    return Err(InvariantError::ParentLink {
                        parent: error::render(&node.key),
                        child: error::render(&child_node.key),
                    });
                }
                if child_node.priority > node.priority {
                    return Err(InvariantError::HeapOrder {
                        parent: error::render(&node.key),
                        parent_priority: node.priority,
                        child: error::render(&child_node.key),
                        child_priority: child_node.priority,
                    });
                }
                stack.push((child, child_lower, child_upper));
            }
        }

        if visited != self.len {
            return Err(InvariantError::SizeMismatch {
                expected: self.len,
                visited,
            });
        }
        Ok(())
    }

    fn key_order_error(&self, ancestor: NodeId, child: NodeId) -> InvariantError
    where
        T: Debug,
    {
        InvariantError::KeyOrder {
            ancestor: error::render(&self.arena[ancestor].key),
            child: error::render(&self.arena[child].key),
        }
    }

    #[cfg(test)]
    fn link(&mut self, parent: NodeId, side: Side, child: NodeId) {
        self.arena[parent].set_child(side, Some(child));
        self.arena[child].parent = Some(parent);
    }

    #[cfg(test)]
    fn detached(&mut self, key: T, priority: f64) -> NodeId {
        self.len += 1;
        self.arena.allocate(Node::new(key, priority))
    }
}
