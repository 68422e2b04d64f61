//! An arena-backed red-black tree, and the ordered [`RbMap`] and [`RbSet`]
//! containers built on it.
//!
//! Nodes live in a slab and link to each other by index. Callers refer to
//! nodes through [`NodeId`] handles, which stay valid across rebalancing and
//! are detected as stale once their node is removed.
//!
//! ```
//! use redblack::RbTree;
//!
//! let mut t = RbTree::new();
//! let (five, _) = t.insert(5, "five");
//! t.insert(1, "one");
//! t.insert(9, "nine");
//!
//! assert_eq!(t.successor(five).and_then(|v| t.key(v)), Some(&9));
//! assert_eq!(t.remove(five), Some((5, "five")));
//! assert_eq!(t.key(five), None);
//! ```

#![warn(missing_debug_implementations)]

mod compare;
mod entry;
mod insert;
mod iter;
mod map;
mod node;
mod remove;
mod set;
mod traverse;
mod tree;

#[cfg(test)]
mod test_utils;

pub use compare::{Comparator, Natural};
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use iter::{Cursor, IntoIter, Iter, Range};
pub use map::RbMap;
pub use node::{Color, NodeId};
pub use set::{RbSet, SetIntoIter, SetIter, SetRange};
pub use tree::RbTree;
