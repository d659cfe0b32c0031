//! A threaded red-black order-statistic tree with stable node identities.
//!
//! [`RbTree`] is the balancing core for ordered containers (lists, maps, sets)
//! that need to hand out references to their elements which survive unrelated
//! insertions and removals:
//!
//! - Every node gets a [`NodeId`] that resolves to the same payload until that
//!   node is removed, and is detectably stale afterwards. [`Handle`] is a typed
//!   wrapper for containers.
//! - Callers decide where payloads go. Lookups ([`find`](RbTree::find),
//!   [`find_with`](RbTree::find_with), [`find_by`](RbTree::find_by),
//!   [`random_free_location`](RbTree::random_free_location)) descend to a
//!   [`Location`], and [`insert`](RbTree::insert) attaches there and rebalances.
//! - Subtree sizes are cached, giving O(log n) [`select`](RbTree::select) and
//!   [`rank`](RbTree::rank).
//! - Empty child slots thread to the in-order neighbour, so leaves reach their
//!   predecessor and successor in O(1).
//!
//! # Example
//!
//! ```
//! use stable_tree::{RbTree, Rank, Side};
//!
//! let mut tree = RbTree::new();
//! let mut ids = Vec::new();
//! for value in [50, 20, 80, 10, 30] {
//!     ids.push(tree.insert(tree.find(&value), value).unwrap());
//! }
//!
//! // Order statistics (O(log n))
//! assert_eq!(tree[Rank(2)], 30);
//! assert_eq!(tree.rank(ids[0]), 3);
//!
//! // Removing 20 keeps every other identity intact
//! let removed = tree.remove(ids[1]).unwrap();
//! assert_eq!(removed.payload, 20);
//! assert_eq!(tree.payload(ids[4]), Some(&30));
//! assert_eq!(tree.in_order_neighbour(ids[4], Side::Left), Some(ids[3]));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No unsafe code** - Nodes live in a generational arena addressed by index
//! - **Low-level primitives** - [`attach`](RbTree::attach), [`cut_off_leaf`](RbTree::cut_off_leaf),
//!   [`collapse`](RbTree::collapse), [`swap`](RbTree::swap) and [`rotate`](RbTree::rotate)
//!   are public for containers that restructure without rebalancing

#![cfg_attr(not(test), no_std)]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod handle;
mod order_statistic;
mod raw;
mod side;
mod tree;

pub use error::StructureError;
pub use handle::Handle;
pub use order_statistic::Rank;
pub use raw::{Color, NodeId};
pub use side::{RotationDirection, Side};
pub use tree::{Command, Iter, Location, RbTree, Removed, Traverse};
