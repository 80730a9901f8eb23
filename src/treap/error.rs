use std::fmt::Debug;
use thiserror::Error;

/// A broken structural invariant found by `TreapSet::check_invariants`.
///
/// Keys are rendered with `Debug` so the error does not carry the key type.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InvariantError {
    #[error("key {child} is on the wrong side of ancestor {ancestor}")]
    KeyOrder { ancestor: String, child: String },
    #[error("key {child} has priority {child_priority} above its parent {parent} ({parent_priority})")]
    HeapOrder {
        parent: String,
        parent_priority: f64,
        child: String,
        child_priority: f64,
    },
    #[error("child {child} of {parent} does not link back to its parent")]
    ParentLink { parent: String, child: String },
    #[error("root {root} has a parent")]
    RootHasParent { root: String },
    #[error("treap reports {expected} keys but {visited} are reachable")]
    SizeMismatch { expected: usize, visited: usize },
}

pub(crate) fn render<T: Debug>(key: &T) -> String {
    format!("{:?}", key)
}
