//! Picking a balancing strategy at runtime.

use std::fmt;
use std::iter::FromIterator;

use crate::avl::AvlTree;
use crate::error::{InvariantViolation, TreeError};
use crate::red_black::RedBlackTree;
use crate::sorted::SortedTree;

/// The balancing algorithms a [`BalancedTree`] can use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Height-balanced. See [`AvlTree`].
    #[default]
    Avl,
    /// Colour-balanced. See [`RedBlackTree`].
    RedBlack,
}

/// A sorted tree whose balancing strategy is chosen when it is created.
///
/// Every method forwards to the tree of the chosen strategy, so the two behave identically apart
/// from the shape they give the tree.
///
/// # Examples
///
/// ```
/// use sorted_tree::{BalancedTree, Strategy};
///
/// let mut tree = BalancedTree::new(Strategy::RedBlack);
/// for value in 1..=7 {
///     tree.add(value);
/// }
///
/// assert_eq!(tree.strategy(), Strategy::RedBlack);
/// assert_eq!(tree.min_value(), Ok(&1));
/// assert!(tree.is_balanced());
/// ```
#[derive(Clone)]
pub enum BalancedTree<V> {
    /// An [`AvlTree`].
    Avl(AvlTree<V>),
    /// A [`RedBlackTree`].
    RedBlack(RedBlackTree<V>),
}

/// Runs the same expression against whichever tree is inside.
macro_rules! dispatch {
    ($self:expr, $tree:ident => $body:expr) => {
        match $self {
            BalancedTree::Avl($tree) => $body,
            BalancedTree::RedBlack($tree) => $body,
        }
    };
}

impl<V> BalancedTree<V> {
    /// Generate a new, empty tree balanced with `strategy`.
    pub fn new(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Avl => Self::Avl(AvlTree::new()),
            Strategy::RedBlack => Self::RedBlack(RedBlackTree::new()),
        }
    }

    /// Which strategy this tree was created with.
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Avl(_) => Strategy::Avl,
            Self::RedBlack(_) => Strategy::RedBlack,
        }
    }
}

impl<V> BalancedTree<V>
where
    V: Ord,
{
    /// See [`SortedTree::size`].
    pub fn size(&self) -> usize {
        dispatch!(self, tree => tree.size())
    }

    /// See [`SortedTree::is_empty`].
    pub fn is_empty(&self) -> bool {
        dispatch!(self, tree => tree.is_empty())
    }

    /// See [`SortedTree::height`].
    pub fn height(&self) -> usize {
        dispatch!(self, tree => tree.height())
    }

    /// See [`SortedTree::contains`].
    pub fn contains(&self, value: &V) -> bool {
        dispatch!(self, tree => tree.contains(value))
    }

    /// See [`SortedTree::add`].
    pub fn add(&mut self, value: V) -> bool {
        dispatch!(self, tree => tree.add(value))
    }

    /// See [`SortedTree::remove`].
    pub fn remove(&mut self, value: &V) -> bool {
        dispatch!(self, tree => tree.remove(value))
    }

    /// See [`SortedTree::take`].
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if there is no such value.
    pub fn take(&mut self, value: &V) -> Result<V, TreeError> {
        dispatch!(self, tree => tree.take(value))
    }

    /// See [`SortedTree::min_value`].
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if the tree is empty.
    pub fn min_value(&self) -> Result<&V, TreeError> {
        dispatch!(self, tree => tree.min_value())
    }

    /// See [`SortedTree::max_value`].
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if the tree is empty.
    pub fn max_value(&self) -> Result<&V, TreeError> {
        dispatch!(self, tree => tree.max_value())
    }

    /// See [`SortedTree::in_order`].
    pub fn in_order(&self) -> Vec<&V> {
        dispatch!(self, tree => tree.in_order())
    }

    /// See [`SortedTree::pre_order`].
    pub fn pre_order(&self) -> Vec<&V> {
        dispatch!(self, tree => tree.pre_order())
    }

    /// See [`SortedTree::post_order`].
    pub fn post_order(&self) -> Vec<&V> {
        dispatch!(self, tree => tree.post_order())
    }

    /// See [`SortedTree::level_order`].
    pub fn level_order(&self) -> Vec<&V> {
        dispatch!(self, tree => tree.level_order())
    }

    /// See [`SortedTree::path_list`].
    pub fn path_list(&self) -> Vec<Vec<&V>> {
        dispatch!(self, tree => tree.path_list())
    }

    /// See [`SortedTree::verify`].
    ///
    /// # Errors
    ///
    /// The [`InvariantViolation`] found.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        dispatch!(self, tree => tree.verify())
    }

    /// See [`SortedTree::is_balanced`].
    pub fn is_balanced(&self) -> bool {
        dispatch!(self, tree => tree.is_balanced())
    }

    /// See [`SortedTree::render`].
    pub fn render(&self) -> String
    where
        V: fmt::Display,
    {
        dispatch!(self, tree => tree.render())
    }

    /// See [`SortedTree::print`].
    pub fn print(&self)
    where
        V: fmt::Display,
    {
        dispatch!(self, tree => tree.print())
    }
}

impl<V> Default for BalancedTree<V> {
    fn default() -> Self {
        Self::new(Strategy::default())
    }
}

impl<V> fmt::Debug for BalancedTree<V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, tree => fmt::Debug::fmt(tree, f))
    }
}

impl<V> fmt::Display for BalancedTree<V>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, tree => fmt::Display::fmt(tree, f))
    }
}

/// Collects into the default strategy.
impl<V> FromIterator<V> for BalancedTree<V>
where
    V: Ord,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<V> Extend<V> for BalancedTree<V>
where
    V: Ord,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        dispatch!(self, tree => tree.extend(iter))
    }
}
