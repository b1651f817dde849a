#![cfg_attr(feature = "clippy", feature(plugin))]
#![cfg_attr(feature = "clippy", plugin(clippy))]

//! Generic ordered containers built on a self-balancing binary search tree.
//!
//! Elements are ordered by a caller-supplied three-way comparator, so any element type can be
//! stored without implementing `Ord`.

pub mod arena;
pub mod avl_tree;
mod error;

pub use self::error::{Error, Result};
