//! A self-balancing Binary Search Tree that colours every node red or black (a Red-Black tree).
//!
//! The colours obey two rules: a red node never has a red child, and every path from a node down
//! to an absent child passes through the same number of black nodes. Together they keep the
//! longest root-to-leaf path at most twice as long as the shortest one. Inserts and removals
//! restore the rules by recolouring and rotating on the way back up to the root.
//!
//! # Examples
//!
//! ```
//! use sorted_tree::{Color, RedBlackTree, SortedTree};
//!
//! let mut tree: RedBlackTree<_> = vec![10, 40, 30, 60, 90, 70, 20, 50, 80].into_iter().collect();
//!
//! assert_eq!(tree.root().map(|root| root.color()), Some(Color::Black));
//! assert!(tree.is_balanced());
//!
//! assert!(tree.remove(&10));
//! assert!(!tree.contains(&10));
//! assert!(tree.is_balanced());
//! ```

use std::fmt::{self, Write as _};
use std::iter::FromIterator;
use std::mem;
use std::ptr::NonNull;

use log::trace;

use crate::diagnostics::Diagnostics;
use crate::error::{InvariantViolation, TreeError};
use crate::node::{Color, Link, Node};
use crate::raw::RawTree;
use crate::sorted::SortedTree;
use crate::verify::verify_structure;

type NodePtr<V> = NonNull<Node<V, Color>>;

/// A self-balancing Binary Search Tree (specifically, a Red-Black tree). See the [module
/// docs][crate::red_black] for more.
pub struct RedBlackTree<V> {
    raw: RawTree<V, Color>,
}

impl<V> Default for RedBlackTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for RedBlackTree<V>
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

impl<V> fmt::Debug for RedBlackTree<V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedBlackTree")
            .field("size", &self.raw.size)
            .field("root", &self.raw.root())
            .finish()
    }
}

impl<V> fmt::Display for RedBlackTree<V>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::render(self.raw.root()))
    }
}

impl<V> RedBlackTree<V> {
    /// Generate a new, empty `RedBlackTree`.
    pub fn new() -> Self {
        Self {
            raw: RawTree::new(),
        }
    }

    /// Generate a new, empty `RedBlackTree` reporting rotations and recolourings to `sink`.
    pub fn with_diagnostics(sink: impl Diagnostics<V> + Send + 'static) -> Self {
        let mut tree = Self::new();
        tree.set_diagnostics(sink);
        tree
    }

    /// Starts reporting rotations and recolourings to `sink`, replacing any previous sink.
    pub fn set_diagnostics(&mut self, sink: impl Diagnostics<V> + Send + 'static) {
        self.raw.diagnostics = Some(Box::new(sink));
    }

    /// Stops reporting rotations and recolourings.
    pub fn clear_diagnostics(&mut self) {
        self.raw.diagnostics = None;
    }

    /// The number of black nodes on every path from the root down to an absent child, counting
    /// the root. An empty tree has a black-height of 0.
    pub fn black_height(&self) -> usize {
        let mut black_height = 0;
        let mut current = self.raw.root();
        while let Some(node) = current {
            if !node.is_red() {
                black_height += 1;
            }
            current = node.left();
        }
        black_height
    }

    /// Lists every node with its colour and its place under its parent, in pre-order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_tree::{RedBlackTree, SortedTree};
    ///
    /// let tree: RedBlackTree<_> = vec![2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(
    ///     tree.describe(),
    ///     "2(B) is root\n1(R) is 2's left child\n3(R) is 2's right child\n"
    /// );
    /// ```
    pub fn describe(&self) -> String
    where
        V: fmt::Display,
    {
        let mut out = String::new();
        let mut stack: Vec<_> = self.raw.root().into_iter().collect();

        while let Some(node) = stack.pop() {
            describe_node(&mut out, node).expect("Writing to a String can't fail");
            stack.extend(node.right());
            stack.extend(node.left());
        }

        out
    }

    fn set_color(&mut self, node: NodePtr<V>, color: Color) {
        // SAFETY: `node` is a live node of this tree and no other reference to it is alive.
        let node = unsafe { &mut *node.as_ptr() };
        if node.meta != color {
            node.meta = color;
            if let Some(sink) = self.raw.diagnostics.as_mut() {
                sink.recolored(&node.value, color);
            }
        }
    }

    /// Restores the colour rules after `node` was added as a red leaf. Only the "no red node has
    /// a red child" rule can be broken, and only between `node` and its parent.
    fn add_fix_up(&mut self, mut node: NodePtr<V>) {
        while let Some(mut parent) = red(parent_of(node)) {
            // A red node is never the root so there is always a grandparent.
            let grandparent = parent_of(parent).expect("Red parent => grandparent");

            if left_of(grandparent) == Some(parent) {
                if let Some(uncle) = red(right_of(grandparent)) {
                    trace!("red-black insert: red uncle");
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                    continue;
                }

                if right_of(parent) == Some(node) {
                    trace!("red-black insert: inner grandchild");
                    self.raw.rotate_left(parent);
                    mem::swap(&mut node, &mut parent);
                }

                trace!("red-black insert: outer grandchild");
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.raw.rotate_right(grandparent);
            } else {
                if let Some(uncle) = red(left_of(grandparent)) {
                    trace!("red-black insert: red uncle");
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                    continue;
                }

                if left_of(parent) == Some(node) {
                    trace!("red-black insert: inner grandchild");
                    self.raw.rotate_right(parent);
                    mem::swap(&mut node, &mut parent);
                }

                trace!("red-black insert: outer grandchild");
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.raw.rotate_left(grandparent);
            }
        }

        let root = self.raw.root.expect("Just added a node => root");
        self.set_color(root, Color::Black);
    }

    /// Restores the colour rules after a black node was removed from the slot now held by `node`
    /// (possibly absent) under `parent`. Every path through that slot is one black node short, so
    /// `node` carries an extra "double black" that is pushed up or resolved by rotation.
    fn remove_fix_up(&mut self, mut node: Link<V, Color>, mut parent: Link<V, Color>) {
        while node != self.raw.root && color_of(node) == Color::Black {
            let Some(p) = parent else {
                break;
            };

            if left_of(p) == node {
                // The slot lost a black node so the other side has at least one.
                let mut sibling = right_of(p).expect("Double black => sibling");
                if is_red(sibling) {
                    trace!("red-black remove: red sibling");
                    self.set_color(sibling, Color::Black);
                    self.set_color(p, Color::Red);
                    self.raw.rotate_left(p);
                    sibling = right_of(p).expect("Double black => sibling");
                }

                if color_of(left_of(sibling)) == Color::Black
                    && color_of(right_of(sibling)) == Color::Black
                {
                    trace!("red-black remove: black nephews");
                    self.set_color(sibling, Color::Red);
                    node = Some(p);
                    parent = parent_of(p);
                    continue;
                }

                if color_of(right_of(sibling)) == Color::Black {
                    trace!("red-black remove: red near nephew");
                    let near = left_of(sibling).expect("Red near nephew => near nephew");
                    self.set_color(near, Color::Black);
                    self.set_color(sibling, Color::Red);
                    self.raw.rotate_right(sibling);
                    sibling = right_of(p).expect("Double black => sibling");
                }

                trace!("red-black remove: red far nephew");
                let far = right_of(sibling).expect("Red far nephew => far nephew");
                self.set_color(sibling, color_of(Some(p)));
                self.set_color(p, Color::Black);
                self.set_color(far, Color::Black);
                self.raw.rotate_left(p);
            } else {
                let mut sibling = left_of(p).expect("Double black => sibling");
                if is_red(sibling) {
                    trace!("red-black remove: red sibling");
                    self.set_color(sibling, Color::Black);
                    self.set_color(p, Color::Red);
                    self.raw.rotate_right(p);
                    sibling = left_of(p).expect("Double black => sibling");
                }

                if color_of(left_of(sibling)) == Color::Black
                    && color_of(right_of(sibling)) == Color::Black
                {
                    trace!("red-black remove: black nephews");
                    self.set_color(sibling, Color::Red);
                    node = Some(p);
                    parent = parent_of(p);
                    continue;
                }

                if color_of(left_of(sibling)) == Color::Black {
                    trace!("red-black remove: red near nephew");
                    let near = right_of(sibling).expect("Red near nephew => near nephew");
                    self.set_color(near, Color::Black);
                    self.set_color(sibling, Color::Red);
                    self.raw.rotate_left(sibling);
                    sibling = left_of(p).expect("Double black => sibling");
                }

                trace!("red-black remove: red far nephew");
                let far = left_of(sibling).expect("Red far nephew => far nephew");
                self.set_color(sibling, color_of(Some(p)));
                self.set_color(p, Color::Black);
                self.set_color(far, Color::Black);
                self.raw.rotate_right(p);
            }

            // The far nephew case always finishes the job.
            node = self.raw.root;
            break;
        }

        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }
}

impl<V> SortedTree<V> for RedBlackTree<V>
where
    V: Ord,
{
    type Meta = Color;

    fn root(&self) -> Option<&Node<V, Color>> {
        self.raw.root()
    }

    fn size(&self) -> usize {
        self.raw.size
    }

    /// Inserts the given value into the tree as a red leaf, then recolours and rotates until the
    /// colour rules hold again.
    fn add(&mut self, value: V) -> bool {
        match self.raw.insert_leaf(value, Color::Red) {
            Some(leaf) => {
                self.add_fix_up(leaf);
                true
            }
            None => false,
        }
    }

    /// Deletes the node containing the given value from the tree and returns the value.
    ///
    /// A node with two children takes its in-order successor's value and the successor's slot is
    /// the one that is actually removed. Removing a red slot can't break any colour rule; removing
    /// a black one runs the double black fix-up.
    fn take(&mut self, value: &V) -> Result<V, TreeError> {
        let node = self.raw.find(value).ok_or(TreeError::NotFound)?;
        let spliced = self.raw.splice(node);
        if spliced.meta == Color::Black {
            self.remove_fix_up(spliced.child, spliced.parent);
        }
        Ok(spliced.value)
    }

    fn verify(&self) -> Result<(), InvariantViolation> {
        verify_structure(self.raw.root(), self.raw.size)?;
        if self.raw.root().map_or(false, |root| root.is_red()) {
            return Err(InvariantViolation::RedRoot);
        }
        verify_colors(self.raw.root()).map(|_| ())
    }
}

impl<V> FromIterator<V> for RedBlackTree<V>
where
    V: Ord,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<V> Extend<V> for RedBlackTree<V>
where
    V: Ord,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

// Absent children are black. All of these treat them that way instead of dereferencing.

fn color_of<V>(link: Link<V, Color>) -> Color {
    // SAFETY: Links always point at live nodes.
    link.map_or(Color::Black, |node| unsafe { node.as_ref() }.meta)
}

fn is_red<V>(node: NodePtr<V>) -> bool {
    color_of(Some(node)) == Color::Red
}

/// `link` if it is a red node.
fn red<V>(link: Link<V, Color>) -> Link<V, Color> {
    link.filter(|&node| is_red(node))
}

fn parent_of<V>(node: NodePtr<V>) -> Link<V, Color> {
    // SAFETY: `node` is live.
    unsafe { node.as_ref() }.parent
}

fn left_of<V>(node: NodePtr<V>) -> Link<V, Color> {
    // SAFETY: `node` is live.
    unsafe { node.as_ref() }.left
}

fn right_of<V>(node: NodePtr<V>) -> Link<V, Color> {
    // SAFETY: `node` is live.
    unsafe { node.as_ref() }.right
}

/// Writes one line of [`RedBlackTree::describe`].
fn describe_node<V>(out: &mut String, node: &Node<V, Color>) -> fmt::Result
where
    V: fmt::Display,
{
    let color = if node.is_red() { 'R' } else { 'B' };
    let Some(parent) = node.parent() else {
        return writeln!(out, "{}({}) is root", node.value(), color);
    };
    let side = match parent.left() {
        Some(left) if std::ptr::eq(left, node) => "left",
        _ => "right",
    };
    writeln!(
        out,
        "{}({}) is {}'s {} child",
        node.value(),
        color,
        parent.value(),
        side
    )
}

/// Checks the colour rules bottom up, returning the subtree's black-height (not counting absent
/// children).
fn verify_colors<V>(node: Option<&Node<V, Color>>) -> Result<usize, InvariantViolation> {
    let Some(node) = node else {
        return Ok(0);
    };

    if node.is_red() && node.left().into_iter().chain(node.right()).any(|child| child.is_red()) {
        return Err(InvariantViolation::RedRed);
    }

    let left = verify_colors(node.left())?;
    let right = verify_colors(node.right())?;
    if left != right {
        return Err(InvariantViolation::BlackHeightMismatch { left, right });
    }

    Ok(left + usize::from(!node.is_red()))
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a set, checking every invariant after each one.
    fn do_ops<V>(ops: &[Op<V>], bst: &mut RedBlackTree<V>, set: &mut BTreeSet<V>)
    where
        V: Ord + Clone + fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(v) => {
                    assert_eq!(bst.add(v.clone()), set.insert(v.clone()));
                }
                Op::Remove(v) => {
                    assert_eq!(bst.take(v).ok(), set.take(v));
                }
                Op::Iter => {
                    assert!(bst.in_order().into_iter().eq(set.iter()));
                }
            }
            assert_eq!(bst.verify(), Ok(()));
            assert_eq!(bst.size(), set.len());
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = RedBlackTree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            set.iter().all(|value| tree.contains(value))
        }
    }

    quickcheck::quickcheck! {
        fn height_is_logarithmic(xs: Vec<u16>) -> bool {
            let tree: RedBlackTree<_> = xs.into_iter().collect();

            (tree.height() as f64) <= 2.0 * ((tree.size() + 1) as f64).log2()
        }
    }
}
