//! The node shared by both balancing strategies.
//!
//! A [`Node`] owns its children and keeps a plain pointer back to its parent. The parent pointer
//! is only ever used to walk up the tree during fix-up; nothing is ever freed through it.
//!
//! The balancing metadata is the `M` parameter: a `usize` height for AVL trees and a [`Color`]
//! for Red-Black trees.

use std::fmt;
use std::ptr::NonNull;

/// A possibly absent pointer to a node.
pub(crate) type Link<V, M> = Option<NonNull<Node<V, M>>>;

/// The colour of a Red-Black node. Absent children count as [`Color::Black`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// A red node. Never has a red child.
    Red,
    /// A black node.
    Black,
}

/// A node in one of the trees. Callers only ever see shared references to nodes, handed out by
/// [`SortedTree::root`][crate::SortedTree::root] and the accessors here.
pub struct Node<V, M> {
    pub(crate) value: V,
    pub(crate) left: Link<V, M>,
    pub(crate) right: Link<V, M>,
    pub(crate) parent: Link<V, M>,
    pub(crate) meta: M,
}

impl<V, M> Node<V, M> {
    /// Allocates a new childless node and leaks it. The returned pointer must eventually be
    /// freed with [`Node::free`].
    pub(crate) fn new_leaked(value: V, meta: M, parent: Link<V, M>) -> NonNull<Self> {
        NonNull::from(Box::leak(Box::new(Node {
            value,
            left: None,
            right: None,
            parent,
            meta,
        })))
    }

    /// Frees a node that was allocated by [`Node::new_leaked`] and returns its value and metadata.
    /// The node's children are not touched.
    ///
    /// # Safety
    ///
    /// `node` must have come from [`Node::new_leaked`], must not have been freed already and
    /// nothing may dereference it afterwards.
    pub(crate) unsafe fn free(node: NonNull<Self>) -> (V, M) {
        let node: Node<V, M> = *Box::from_raw(node.as_ptr());
        (node.value, node.meta)
    }

    /// The value stored in this node.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The left child, if there is one.
    pub fn left(&self) -> Option<&Self> {
        // SAFETY: Every link in a tree points at a live node owned by that tree. The returned
        // reference borrows `self`, which borrows the tree, so the tree can't be mutated (and the
        // node can't be freed) while it is alive.
        self.left.map(|left| unsafe { &*left.as_ptr() })
    }

    /// The right child, if there is one.
    pub fn right(&self) -> Option<&Self> {
        // SAFETY: See `Node::left`.
        self.right.map(|right| unsafe { &*right.as_ptr() })
    }

    /// The parent of this node, or `None` for the root.
    pub fn parent(&self) -> Option<&Self> {
        // SAFETY: See `Node::left`. Parents outlive their children.
        self.parent.map(|parent| unsafe { &*parent.as_ptr() })
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl<V> Node<V, usize> {
    /// How many levels are in the subtree rooted at this node. A node with no children has a
    /// height of 1.
    pub fn height(&self) -> usize {
        self.meta
    }

    /// `height(left) - height(right)`. See [the Wikipedia page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    pub fn balance_factor(&self) -> isize {
        let left_height = self.left().map_or(0, |n| n.meta);
        let right_height = self.right().map_or(0, |n| n.meta);
        left_height as isize - right_height as isize
    }
}

impl<V> Node<V, Color> {
    /// The colour of this node.
    pub fn color(&self) -> Color {
        self.meta
    }

    /// Whether this node is red.
    pub fn is_red(&self) -> bool {
        self.meta == Color::Red
    }
}

impl<V, M> fmt::Debug for Node<V, M>
where
    V: fmt::Debug,
    M: fmt::Debug,
{
    // TODO stack based Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("meta", &self.meta)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}
