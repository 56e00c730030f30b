//! This crate exposes self-balancing Binary Search Trees (BSTs) behind one
//! "sorted tree" contract.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! will sometimes have child `Node`s. The most important invariants of a BST
//! are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is the
//! number of `Node`s on the longest path from the root `Node` to a leaf
//! `Node`). Inserting sorted values into a plain BST makes it as tall as it is
//! large, so the trees here rebalance themselves after every change and keep
//! the height at `O(lg N)`:
//!
//! - [`AvlTree`] keeps the heights of every `Node`'s two subtrees within one of
//!   each other.
//! - [`RedBlackTree`] colours every `Node` red or black and keeps the number of
//!   black `Node`s equal on every path.
//!
//! Both implement [`SortedTree`]. [`BalancedTree`] picks one of them at
//! runtime.
//!
//! ## Example
//!
//! ```
//! use sorted_tree::{AvlTree, SortedTree};
//!
//! let mut tree = AvlTree::new();
//! for value in 1..=100 {
//!     tree.add(value);
//! }
//!
//! assert_eq!(tree.height(), 7);
//! assert_eq!(tree.min_value(), Ok(&1));
//! assert!(tree.remove(&50));
//! assert!(tree.is_balanced());
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod diagnostics;
mod error;
mod node;
mod raw;
pub mod red_black;
pub mod render;
mod sorted;
mod strategy;
pub mod traversal;
mod verify;

#[cfg(test)]
mod test;

pub use avl::AvlTree;
pub use diagnostics::{Diagnostics, LogDiagnostics, Rotation};
pub use error::{InvariantViolation, TreeError};
pub use node::{Color, Node};
pub use red_black::RedBlackTree;
pub use sorted::SortedTree;
pub use strategy::{BalancedTree, Strategy};
