//! Errors surfaced by the trees.
//!
//! There are two families. [`TreeError`] is the ordinary, recoverable outcome of asking for
//! something that isn't there. [`InvariantViolation`] describes a tree whose structure is broken.
//! That can only happen through a bug in this crate, so it is only ever produced by
//! [`SortedTree::verify`][crate::SortedTree::verify] and is meant to be asserted on in tests.

/// Errors returned by lookups and removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TreeError {
    /// The requested value isn't in the tree, or the tree is empty.
    #[error("value not found in tree")]
    NotFound,
}

/// A structural invariant that doesn't hold. See the module docs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InvariantViolation {
    /// The in-order sequence isn't strictly increasing.
    #[error("in-order sequence is not strictly increasing at position {position}")]
    OutOfOrder {
        /// Index in the in-order sequence of the first value that isn't larger than its
        /// predecessor.
        position: usize,
    },
    /// A child's parent link doesn't point back at the node owning it, or the root has a parent.
    #[error("parent link of a node does not point at the node that owns it")]
    BrokenParentLink,
    /// The size counter disagrees with the number of nodes.
    #[error("tree records {stored} values but holds {counted} nodes")]
    SizeMismatch {
        /// Value of the size counter.
        stored: usize,
        /// Number of nodes actually reachable from the root.
        counted: usize,
    },
    /// An AVL node's stored height isn't one more than its taller child's.
    #[error("node stores height {stored} but its subtree is {computed} levels tall")]
    StaleHeight {
        /// Height cached on the node.
        stored: usize,
        /// Height computed from the children.
        computed: usize,
    },
    /// An AVL node's subtrees differ in height by more than one.
    #[error("balance factor {balance_factor} is outside of [-1, 1]")]
    Unbalanced {
        /// `height(left) - height(right)`.
        balance_factor: isize,
    },
    /// A Red-Black tree's root is red.
    #[error("root of a red-black tree is red")]
    RedRoot,
    /// A red node has a red child.
    #[error("red node has a red child")]
    RedRed,
    /// Two paths from the same node reach absent children through different numbers of black
    /// nodes.
    #[error("black-height of left subtree ({left}) differs from right subtree ({right})")]
    BlackHeightMismatch {
        /// Black-height of the left subtree.
        left: usize,
        /// Black-height of the right subtree.
        right: usize,
    },
}
