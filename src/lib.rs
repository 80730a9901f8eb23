//! A randomized binary search tree (treap) whose nodes keep parent links, plus an experiment
//! that measures its expected height.

pub mod arena;
pub mod experiment;
pub mod treap;
