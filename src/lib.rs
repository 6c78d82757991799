//! A rank-indexed AVL set for Rust.
//!
//! This crate provides [`AvlSet`], an ordered set in the spirit of the standard
//! library's `BTreeSet` with additional O(log n) order-statistic operations:
//!
//! - [`get_by_rank`](AvlSet::get_by_rank) - Get the element at a given sorted position
//! - [`rank_of`](AvlSet::rank_of) - Get the sorted position of an element
//! - Indexing by [`Rank`] - e.g., `set[Rank(0)]` for the smallest element
//!
//! # Example
//!
//! ```
//! use ravl_tree::{AvlSet, Rank};
//!
//! let mut temps = AvlSet::new();
//! temps.insert(71);
//! temps.insert(64);
//! temps.insert(89);
//!
//! // Ordered-set operations work as expected
//! assert!(temps.contains(&64));
//! assert_eq!(temps.first(), Some(&64));
//! assert_eq!(temps.ceiling(&70), Some(&71));
//!
//! // Order-statistic operations (O(log n))
//! // Get the median (rank 1 = second element in sorted order)
//! assert_eq!(temps.get_by_rank(1), Some(&71));
//!
//! // Find the rank of an element
//! assert_eq!(temps.rank_of(&89), Some(2));
//!
//! // Index by rank
//! assert_eq!(temps[Rank(0)], 64);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **O(log n) rank operations** - Efficient order-statistic queries via subtree size augmentation
//! - **Ordered queries** - `floor`/`ceiling`/`lower`/`higher` and inclusive range extraction
//! - **Deterministic traversals** - in-order, pre-order, and post-order snapshot iterators
//!
//! # Implementation
//!
//! The set is a height-balanced (AVL) binary search tree stored in a
//! contiguous node arena, with children linked by niche-packed handles rather
//! than owned pointers. Every node caches its height and the element counts of
//! both subtrees; the counts are what make rank-based access O(log n) without
//! a traversal.

#![no_std]
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
mod rank;
mod raw;

pub mod avl_set;

pub use avl_set::AvlSet;
pub use error::Error;
pub use rank::Rank;
