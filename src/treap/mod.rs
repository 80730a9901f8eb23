//! Probabilistic binary search tree where each node also maintains the heap invariant.

mod error;
mod node;
mod set;
mod tree;

pub use self::error::InvariantError;
pub use self::set::{TreapSet, TreapSetIter};
