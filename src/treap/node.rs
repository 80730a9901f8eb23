use crate::arena::NodeId;

/// The side of its parent that a node hangs on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A struct representing an internal node of a treap.
///
/// `left` and `right` are the links a node holds to its children. `parent` is only a lookup
/// handle back to the node holding this one.
pub struct Node<T> {
    pub key: T,
    pub priority: f64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
}

impl<T> Node<T> {
    pub fn new(key: T, priority: f64) -> Self {
        Node {
            key,
            priority,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Returns which side of this node `child` is linked on, if it is linked at all.
    pub fn side_of(&self, child: NodeId) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }
}
