//! A self-balancing Binary Search Tree that keeps the heights of every node's two subtrees within
//! one of each other (an AVL tree).
//!
//! Each node caches the height of its subtree. After an insert or a removal the tree walks back
//! up from the changed slot to the root, refreshing heights and rotating wherever a node's
//! subtrees drifted two levels apart.
//!
//! # Examples
//!
//! ```
//! use sorted_tree::{AvlTree, SortedTree};
//!
//! let mut tree = AvlTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! assert!(tree.add(1));
//! assert!(tree.contains(&1));
//!
//! // Adding an equal value again doesn't do anything.
//! assert!(!tree.add(1));
//! assert_eq!(tree.size(), 1);
//!
//! // Taking a value out hands it back.
//! assert_eq!(tree.take(&1), Ok(1));
//! assert!(!tree.contains(&1));
//! ```

use std::fmt;
use std::iter::FromIterator;
use std::ptr::NonNull;

use log::trace;

use crate::diagnostics::Diagnostics;
use crate::error::{InvariantViolation, TreeError};
use crate::node::{Link, Node};
use crate::raw::RawTree;
use crate::sorted::SortedTree;
use crate::verify::verify_structure;

type NodePtr<V> = NonNull<Node<V, usize>>;

/// A self-balancing Binary Search Tree (specifically, an AVL tree). See the [module
/// docs][crate::avl] for more.
pub struct AvlTree<V> {
    raw: RawTree<V, usize>,
}

impl<V> Default for AvlTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for AvlTree<V>
where
    V: Clone,
{
    /// Deep copies every node. The diagnostic sink isn't carried over.
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<V> fmt::Debug for AvlTree<V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree")
            .field("size", &self.raw.size)
            .field("root", &self.raw.root())
            .finish()
    }
}

impl<V> fmt::Display for AvlTree<V>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::render(self.raw.root()))
    }
}

impl<V> AvlTree<V> {
    /// Generate a new, empty `AvlTree`.
    pub fn new() -> Self {
        Self {
            raw: RawTree::new(),
        }
    }

    /// Generate a new, empty `AvlTree` reporting rotations to `sink`.
    pub fn with_diagnostics(sink: impl Diagnostics<V> + Send + 'static) -> Self {
        let mut tree = Self::new();
        tree.set_diagnostics(sink);
        tree
    }

    /// Starts reporting rotations to `sink`, replacing any previous sink.
    pub fn set_diagnostics(&mut self, sink: impl Diagnostics<V> + Send + 'static) {
        self.raw.diagnostics = Some(Box::new(sink));
    }

    /// Stops reporting rotations.
    pub fn clear_diagnostics(&mut self) {
        self.raw.diagnostics = None;
    }

    fn rotate_left(&mut self, pivot: NodePtr<V>) -> NodePtr<V> {
        let new_root = self.raw.rotate_left(pivot);
        // `pivot` is now below `new_root` so it has to be fixed first.
        fix_height(pivot);
        fix_height(new_root);
        new_root
    }

    fn rotate_right(&mut self, pivot: NodePtr<V>) -> NodePtr<V> {
        let new_root = self.raw.rotate_right(pivot);
        fix_height(pivot);
        fix_height(new_root);
        new_root
    }

    /// Refreshes the height of `node` and rotates if its subtrees are two levels apart. Both
    /// subtrees must already be AVL trees with correct heights. Returns the node now at the top
    /// of `node`'s old position.
    ///
    /// The secondary check on the taller child is non-strict (`>= 0` / `<= 0`). After an insert
    /// the taller child of an unbalanced node is never exactly balanced, so this picks the same
    /// rotation a strict check would. After a removal it can be, and then a single rotation is
    /// the right one.
    ///
    /// See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for terminology.
    fn rebalance(&mut self, node: NodePtr<V>) -> NodePtr<V> {
        fix_height(node);
        // SAFETY: `node` is a live node of this tree.
        let (left, right) = unsafe { (node.as_ref().left, node.as_ref().right) };

        let new_root = match balance_factor(node) {
            bf if bf > 1 => {
                let left = left.expect("Left heavy => left child");
                if balance_factor(left) >= 0 {
                    trace!("avl rebalance: left-left");
                    self.rotate_right(node)
                } else {
                    trace!("avl rebalance: left-right");
                    self.rotate_left(left);
                    self.rotate_right(node)
                }
            }
            bf if bf < -1 => {
                let right = right.expect("Right heavy => right child");
                if balance_factor(right) <= 0 {
                    trace!("avl rebalance: right-right");
                    self.rotate_left(node)
                } else {
                    trace!("avl rebalance: right-left");
                    self.rotate_right(right);
                    self.rotate_left(node)
                }
            }
            _ => node,
        };

        if cfg!(debug_assertions) {
            // SAFETY: `new_root` is a live node of this tree.
            let root = unsafe { new_root.as_ref() };
            let left_height = height(root.left);
            let right_height = height(root.right);
            assert_eq!(root.meta, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }

        new_root
    }

    /// Rebalances every node from `start` up to the root.
    fn rebalance_from(&mut self, start: Link<V, usize>) {
        let mut current = start;
        while let Some(node) = current {
            let subtree = self.rebalance(node);
            // SAFETY: `subtree` is a live node of this tree.
            current = unsafe { subtree.as_ref() }.parent;
        }
    }
}

impl<V> SortedTree<V> for AvlTree<V>
where
    V: Ord,
{
    type Meta = usize;

    fn root(&self) -> Option<&Node<V, usize>> {
        self.raw.root()
    }

    fn size(&self) -> usize {
        self.raw.size
    }

    /// Inserts the given value into the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_tree::{AvlTree, SortedTree};
    ///
    /// let mut tree = AvlTree::new();
    /// for value in 1..=7 {
    ///     tree.add(value);
    /// }
    ///
    /// // Ascending inserts would make a plain BST 7 levels tall.
    /// assert_eq!(tree.height(), 3);
    /// assert_eq!(tree.root().map(|root| *root.value()), Some(4));
    /// ```
    fn add(&mut self, value: V) -> bool {
        let Some(leaf) = self.raw.insert_leaf(value, 1) else {
            return false;
        };
        // SAFETY: `leaf` was just inserted into this tree.
        let parent = unsafe { leaf.as_ref() }.parent;
        self.rebalance_from(parent);
        true
    }

    /// Deletes the node containing the given value from the tree and returns the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_tree::{AvlTree, SortedTree, TreeError};
    ///
    /// let mut tree: AvlTree<_> = (1..=3).collect();
    ///
    /// assert_eq!(tree.take(&2), Ok(2));
    /// assert_eq!(tree.take(&2), Err(TreeError::NotFound));
    /// ```
    fn take(&mut self, value: &V) -> Result<V, TreeError> {
        let node = self.raw.find(value).ok_or(TreeError::NotFound)?;
        let spliced = self.raw.splice(node);
        self.rebalance_from(spliced.parent);
        Ok(spliced.value)
    }

    fn verify(&self) -> Result<(), InvariantViolation> {
        verify_structure(self.raw.root(), self.raw.size)?;
        verify_heights(self.raw.root()).map(|_| ())
    }

    fn height(&self) -> usize {
        self.raw.root().map_or(0, |root| root.height())
    }
}

impl<V> FromIterator<V> for AvlTree<V>
where
    V: Ord,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<V> Extend<V> for AvlTree<V>
where
    V: Ord,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

fn height<V>(link: Link<V, usize>) -> usize {
    // SAFETY: Links always point at live nodes.
    link.map_or(0, |node| unsafe { node.as_ref() }.meta)
}

/// Adjusts the height of `node` to be the max of its children's heights + 1.
fn fix_height<V>(node: NodePtr<V>) {
    // SAFETY: `node` is live and no other reference to it exists while this one does. The
    // children are only read through their own pointers.
    let node = unsafe { &mut *node.as_ptr() };
    node.meta = height(node.left).max(height(node.right)) + 1;
}

/// `height(left) - height(right)`.
fn balance_factor<V>(node: NodePtr<V>) -> isize {
    // SAFETY: `node` is live.
    let node = unsafe { node.as_ref() };
    height(node.left) as isize - height(node.right) as isize
}

/// Checks cached heights and balance factors bottom up, returning the subtree's height.
fn verify_heights<V>(node: Option<&Node<V, usize>>) -> Result<usize, InvariantViolation> {
    let Some(node) = node else {
        return Ok(0);
    };

    let left = verify_heights(node.left())?;
    let right = verify_heights(node.right())?;
    let computed = left.max(right) + 1;
    if node.height() != computed {
        return Err(InvariantViolation::StaleHeight {
            stored: node.height(),
            computed,
        });
    }

    let balance_factor = left as isize - right as isize;
    if balance_factor.abs() > 1 {
        return Err(InvariantViolation::Unbalanced { balance_factor });
    }

    Ok(computed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Rotation;
    use crate::test::Recorder;

    /// Assert the heights of the root, left child, and right child of a tree.
    macro_rules! assert_heights {
        ($tree:ident, $height:expr, $left_height:expr, $right_height:expr) => {{
            match $tree.root() {
                Some(n) => {
                    assert_eq!(n.height(), $height);

                    let left_height = n.left().map_or(0, |n| n.height());
                    let right_height = n.right().map_or(0, |n| n.height());
                    assert_eq!(right_height, $right_height);
                    assert_eq!(left_height, $left_height);
                }
                None => assert_eq!(0, $height),
            }
        }};
    }

    /// Assert the values of the root and its children.
    macro_rules! assert_shape {
        ($tree:ident, $root:expr, $left:expr, $right:expr) => {{
            let root = $tree.root().expect("Tree should not be empty");
            assert_eq!(*root.value(), $root);
            assert_eq!(root.left().map(|n| *n.value()), $left);
            assert_eq!(root.right().map(|n| *n.value()), $right);
        }};
    }

    fn tree_of(values: &[i32]) -> AvlTree<i32> {
        values.iter().copied().collect()
    }

    #[test]
    fn always_adding_left() {
        let values = [10, 9, 8, 7, 6, 5, 4, 3, 2, 1];
        let mut inserted = Vec::new();

        let mut tree = AvlTree::new();
        assert!(!tree.contains(&10));

        for value in values {
            assert!(tree.add(value));
            inserted.push(value);
            for inserted in &inserted {
                assert!(tree.contains(inserted));
            }
            assert_eq!(tree.verify(), Ok(()));
        }
        assert_eq!(tree.height(), 4);
    }

    #[test]
    fn always_adding_right() {
        let values = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let mut inserted = Vec::new();

        let mut tree = AvlTree::new();
        assert!(!tree.contains(&1));

        for value in values {
            assert!(tree.add(value));
            inserted.push(value);
            for inserted in &inserted {
                assert!(tree.contains(inserted));
            }
            assert_eq!(tree.verify(), Ok(()));
        }
        assert_eq!(tree.height(), 4);
    }

    #[test]
    fn duplicates_are_ignored() {
        let mut tree = tree_of(&[2, 1, 3]);

        assert!(!tree.add(2));
        assert!(!tree.add(3));
        assert_eq!(tree.size(), 3);
        assert_eq!(tree.in_order(), [&1, &2, &3]);
    }

    #[test]
    fn quickcheck_insert_invalid_height() {
        let tree = tree_of(&[2, 0, 1]);

        assert_eq!(tree.verify(), Ok(()));
    }

    #[test]
    fn test_left_left_rebalance() {
        let tree = tree_of(&[3, 2, 1]);

        assert_heights!(tree, 2, 1, 1);
        assert_shape!(tree, 2, Some(1), Some(3));
    }

    #[test]
    fn test_right_right_rebalance() {
        let tree = tree_of(&[1, 2, 3]);

        assert_heights!(tree, 2, 1, 1);
        assert_shape!(tree, 2, Some(1), Some(3));
    }

    #[test]
    fn test_left_right_rebalance() {
        let tree = tree_of(&[0, -2, -1]);

        assert_heights!(tree, 2, 1, 1);
        assert_shape!(tree, -1, Some(-2), Some(0));
    }

    #[test]
    fn test_right_left_rebalance() {
        let tree = tree_of(&[0, 2, 1]);

        assert_heights!(tree, 2, 1, 1);
        assert_shape!(tree, 1, Some(0), Some(2));
    }

    #[test]
    fn rotations_are_reported() {
        let recorder = Recorder::default();
        let mut tree = AvlTree::with_diagnostics(recorder.clone());

        tree.extend([3, 2, 1]);
        assert_eq!(recorder.rotations(), [(Rotation::Right, 3)]);

        tree.extend([4, 5]);
        assert_eq!(
            recorder.rotations(),
            [(Rotation::Right, 3), (Rotation::Left, 3)]
        );

        // 3, 1, 2 needs two rotations: the left child first, then the root.
        let recorder = Recorder::default();
        let mut tree = AvlTree::with_diagnostics(recorder.clone());
        tree.extend([3, 1, 2]);
        assert_eq!(
            recorder.rotations(),
            [(Rotation::Left, 1), (Rotation::Right, 3)]
        );

        tree.clear_diagnostics();
        tree.extend([4, 5]);
        assert_eq!(recorder.rotations().len(), 2);
    }

    #[test]
    fn removal_with_balanced_sibling_rotates_once() {
        //   2                 4
        //  / \               / \
        // 1   4     ->      2   5
        //    / \             \
        //   3   5             3
        let recorder = Recorder::default();
        let mut tree = tree_of(&[2, 1, 4, 3, 5]);
        tree.set_diagnostics(recorder.clone());

        assert!(tree.remove(&1));

        assert_eq!(recorder.rotations(), [(Rotation::Left, 2)]);
        assert_shape!(tree, 4, Some(2), Some(5));
        assert_heights!(tree, 3, 2, 1);
        assert_eq!(tree.verify(), Ok(()));
    }

    #[test]
    fn removal_with_balanced_sibling_rotates_once_mirrored() {
        let recorder = Recorder::default();
        let mut tree = tree_of(&[4, 5, 2, 3, 1]);
        tree.set_diagnostics(recorder.clone());

        assert!(tree.remove(&5));

        assert_eq!(recorder.rotations(), [(Rotation::Right, 4)]);
        assert_shape!(tree, 2, Some(1), Some(4));
        assert_eq!(tree.verify(), Ok(()));
    }

    #[test]
    fn delete_with_no_children() {
        let mut tree = tree_of(&[5, 3, 7]);

        assert_eq!(tree.take(&7), Ok(7));
        assert!(!tree.contains(&7));

        assert!(tree.contains(&3));
        assert!(tree.contains(&5));
        assert_eq!(tree.verify(), Ok(()));
    }

    #[test]
    fn delete_with_null_left() {
        let mut tree = tree_of(&[5, 3, 7, 9]);

        assert_eq!(tree.take(&7), Ok(7));
        assert!(!tree.contains(&7));

        assert_eq!(tree.in_order(), [&3, &5, &9]);
        assert_eq!(tree.verify(), Ok(()));
    }

    #[test]
    fn delete_with_null_right() {
        let mut tree = tree_of(&[5, 3, 7, 6]);

        assert_eq!(tree.take(&7), Ok(7));
        assert!(!tree.contains(&7));

        assert_eq!(tree.in_order(), [&3, &5, &6]);
        assert_eq!(tree.verify(), Ok(()));
    }

    #[test]
    fn delete_with_right_successor() {
        let mut tree = tree_of(&[5, 3, 7, 6, 8]);

        assert_eq!(tree.take(&7), Ok(7));
        assert!(!tree.contains(&7));

        // 8 took 7's place.
        let seven_slot = tree.root().and_then(Node::right).map(|n| *n.value());
        assert_eq!(seven_slot, Some(8));
        assert_eq!(tree.in_order(), [&3, &5, &6, &8]);
        assert_eq!(tree.verify(), Ok(()));
    }

    #[test]
    fn delete_with_deeper_successor() {
        let mut tree = tree_of(&[5, 3, 8, 2, 6, 9, 7]);

        assert_eq!(tree.take(&5), Ok(5));
        assert!(!tree.contains(&5));

        assert_eq!(tree.root().map(|n| *n.value()), Some(6));
        assert_eq!(tree.in_order(), [&2, &3, &6, &7, &8, &9]);
        assert_eq!(tree.verify(), Ok(()));
    }

    #[test]
    fn delete_root() {
        let mut tree = tree_of(&[5]);

        assert_eq!(tree.take(&5), Ok(5));
        assert!(!tree.contains(&5));
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn delete_missing() {
        let mut tree = tree_of(&[5, 3, 7]);

        assert_eq!(tree.take(&4), Err(TreeError::NotFound));
        assert!(!tree.remove(&4));
        assert_eq!(tree.in_order(), [&3, &5, &7]);
        assert_eq!(tree.size(), 3);
    }

    #[test]
    fn min_and_max() {
        let mut tree = AvlTree::new();
        assert_eq!(tree.min_value(), Err(TreeError::NotFound));
        assert_eq!(tree.max_value(), Err(TreeError::NotFound));

        tree.extend([5, 3, 8, 1]);
        assert_eq!(tree.min_value(), Ok(&1));
        assert_eq!(tree.max_value(), Ok(&8));
    }

    #[test]
    fn clone_works() {
        let mut tree = {
            let tree = tree_of(&[5, 3, 7, 1, 4, 6, 8]);
            tree.clone()
        };
        assert_eq!(tree.verify(), Ok(()));

        for value in [1, 3, 4, 7, 6, 8, 5] {
            assert_eq!(tree.take(&value), Ok(value));
            assert_eq!(tree.verify(), Ok(()));
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn stale_height_is_reported() {
        let tree = tree_of(&[2, 1, 3]);
        let root = tree.raw.root.expect("Tree should not be empty");
        // SAFETY: `root` is a live node of `tree` and nothing else borrows it.
        unsafe { (*root.as_ptr()).meta = 5 };

        assert_eq!(
            tree.verify(),
            Err(InvariantViolation::StaleHeight {
                stored: 5,
                computed: 2
            })
        );
        assert!(!tree.is_balanced());
    }

    #[test]
    fn quickcheck_found_invalid_height_after_deletion() {
        let mut tree = AvlTree::new();

        tree.extend([77, -22, 0, -127, 5, 109, -58, -105, -65, -86, 45, -11, -39]);
        assert!(tree.remove(&0));
        assert!(!tree.remove(&-122));
        assert_eq!(tree.verify(), Ok(()));
    }

    #[test]
    fn quickcheck_found_invalid_height_after_deletion2() {
        let mut tree = AvlTree::new();

        tree.extend([-49, -107, 127, -22, -77, -128, -119, -69, -122, 109, 115, -118]);
        assert!(tree.remove(&-49));
        assert!(tree.remove(&-77));
        assert_eq!(tree.verify(), Ok(()));
    }

    #[test]
    fn display_draws_tree() {
        let tree = tree_of(&[2, 1, 3]);

        assert_eq!(tree.to_string(), "  2\n / \\\n1   3\n");
    }
}
