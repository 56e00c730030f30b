//! The contract shared by every balancing strategy.

use std::fmt;

use crate::error::{InvariantViolation, TreeError};
use crate::node::Node;
use crate::{render, traversal};

/// An ordered set of values kept in a self-balancing binary search tree.
///
/// Implementors only provide storage, insertion, removal and their invariant check. Everything
/// else is built on [`SortedTree::root`].
///
/// Values comparing equal to one already in the tree are not inserted a second time.
///
/// # Examples
///
/// ```
/// use sorted_tree::{AvlTree, RedBlackTree, SortedTree};
///
/// fn fill<T: SortedTree<i32>>(tree: &mut T) {
///     for value in [5, 1, 4, 2, 3] {
///         tree.add(value);
///     }
/// }
///
/// let mut avl = AvlTree::new();
/// let mut red_black = RedBlackTree::new();
/// fill(&mut avl);
/// fill(&mut red_black);
///
/// assert_eq!(avl.in_order(), red_black.in_order());
/// assert!(avl.is_balanced() && red_black.is_balanced());
/// ```
pub trait SortedTree<V>
where
    V: Ord,
{
    /// The balancing metadata carried by each node.
    type Meta;

    /// The root node, if the tree isn't empty.
    fn root(&self) -> Option<&Node<V, Self::Meta>>;

    /// How many values are in the tree.
    fn size(&self) -> usize;

    /// Inserts `value`. Returns `false`, leaving the tree unchanged, if an equal value is already
    /// present.
    fn add(&mut self, value: V) -> bool;

    /// Removes the value equal to `value` and hands it back.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if there is no such value. The tree is left unchanged.
    fn take(&mut self, value: &V) -> Result<V, TreeError>;

    /// Checks every structural invariant of the tree, reporting the first one that is broken.
    /// This walks the whole tree; it is meant for tests and debugging.
    ///
    /// # Errors
    ///
    /// The [`InvariantViolation`] found, which always indicates a bug in this crate.
    fn verify(&self) -> Result<(), InvariantViolation>;

    /// Removes the value equal to `value`. Returns whether anything was removed.
    fn remove(&mut self, value: &V) -> bool {
        self.take(value).is_ok()
    }

    /// Whether a value equal to `value` is in the tree.
    fn contains(&self, value: &V) -> bool {
        traversal::find(self.root(), value).is_some()
    }

    /// Whether the tree holds no values.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// The number of levels in the tree. An empty tree has a height of 0.
    fn height(&self) -> usize {
        traversal::height(self.root())
    }

    /// The smallest value.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if the tree is empty.
    fn min_value(&self) -> Result<&V, TreeError> {
        traversal::min(self.root()).ok_or(TreeError::NotFound)
    }

    /// The largest value.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if the tree is empty.
    fn max_value(&self) -> Result<&V, TreeError> {
        traversal::max(self.root()).ok_or(TreeError::NotFound)
    }

    /// All values in ascending order.
    fn in_order(&self) -> Vec<&V> {
        traversal::in_order(self.root())
    }

    /// All values, each node before its left subtree before its right subtree.
    fn pre_order(&self) -> Vec<&V> {
        traversal::pre_order(self.root())
    }

    /// All values, each node after its left subtree and its right subtree.
    fn post_order(&self) -> Vec<&V> {
        traversal::post_order(self.root())
    }

    /// All values level by level, left to right.
    fn level_order(&self) -> Vec<&V> {
        traversal::level_order(self.root())
    }

    /// Every path from the root down to a leaf, left-most first.
    fn path_list(&self) -> Vec<Vec<&V>> {
        traversal::path_list(self.root())
    }

    /// Whether every invariant holds. See [`SortedTree::verify`].
    fn is_balanced(&self) -> bool {
        self.verify().is_ok()
    }

    /// Draws the tree as text. See [`render::render`] for the layout.
    fn render(&self) -> String
    where
        V: fmt::Display,
    {
        render::render(self.root())
    }

    /// Prints [`SortedTree::render`] to stdout. This is a debugging aid only.
    fn print(&self)
    where
        V: fmt::Display,
    {
        print!("{}", self.render());
    }
}
