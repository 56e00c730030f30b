//! Materialized traversals shared by both trees.
//!
//! Every function takes the root of a (sub)tree and returns an owned snapshot borrowing the
//! values. They are all iterative so a deep tree can't overflow the stack.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::node::Node;

/// Left subtree, node, right subtree.
pub fn in_order<V, M>(root: Option<&Node<V, M>>) -> Vec<&V> {
    in_order_nodes(root).into_iter().map(Node::value).collect()
}

pub(crate) fn in_order_nodes<V, M>(root: Option<&Node<V, M>>) -> Vec<&Node<V, M>> {
    let mut nodes = Vec::new();
    let mut stack = Vec::new();
    let mut current = root;

    while current.is_some() || !stack.is_empty() {
        while let Some(node) = current {
            stack.push(node);
            current = node.left();
        }
        if let Some(node) = stack.pop() {
            nodes.push(node);
            current = node.right();
        }
    }

    nodes
}

/// Node, left subtree, right subtree.
pub fn pre_order<V, M>(root: Option<&Node<V, M>>) -> Vec<&V> {
    let mut values = Vec::new();
    let mut stack: Vec<_> = root.into_iter().collect();

    while let Some(node) = stack.pop() {
        values.push(node.value());
        // Right goes on the stack first so left comes off first.
        stack.extend(node.right());
        stack.extend(node.left());
    }

    values
}

/// Left subtree, right subtree, node.
pub fn post_order<V, M>(root: Option<&Node<V, M>>) -> Vec<&V> {
    // Node, right, left reversed is left, right, node.
    let mut values = Vec::new();
    let mut stack: Vec<_> = root.into_iter().collect();

    while let Some(node) = stack.pop() {
        values.push(node.value());
        stack.extend(node.left());
        stack.extend(node.right());
    }

    values.reverse();
    values
}

/// Breadth first, left to right within a level.
pub fn level_order<V, M>(root: Option<&Node<V, M>>) -> Vec<&V> {
    levels(root).into_iter().flatten().map(Node::value).collect()
}

/// The nodes of each level, top to bottom and left to right.
pub(crate) fn levels<V, M>(root: Option<&Node<V, M>>) -> Vec<Vec<&Node<V, M>>> {
    let mut levels = Vec::new();
    let mut queue: VecDeque<_> = root.into_iter().collect();

    while !queue.is_empty() {
        let level: Vec<_> = queue.drain(..).collect();
        for node in &level {
            queue.extend(node.left());
            queue.extend(node.right());
        }
        levels.push(level);
    }

    levels
}

/// Every path from the root down to a leaf, left-most path first.
pub fn path_list<V, M>(root: Option<&Node<V, M>>) -> Vec<Vec<&V>> {
    let mut paths = Vec::new();
    // Each entry is a node and how long the path above it is.
    let mut stack: Vec<_> = root.into_iter().map(|node| (node, 0)).collect();
    let mut path = Vec::new();

    while let Some((node, depth)) = stack.pop() {
        path.truncate(depth);
        path.push(node.value());

        if node.is_leaf() {
            paths.push(path.clone());
        } else {
            stack.extend(node.right().map(|right| (right, depth + 1)));
            stack.extend(node.left().map(|left| (left, depth + 1)));
        }
    }

    paths
}

/// The number of levels in the tree. An empty tree has a height of 0.
pub fn height<V, M>(root: Option<&Node<V, M>>) -> usize {
    let mut height = 0;
    let mut stack: Vec<_> = root.into_iter().map(|node| (node, 1)).collect();

    while let Some((node, depth)) = stack.pop() {
        height = height.max(depth);
        stack.extend(node.left().map(|left| (left, depth + 1)));
        stack.extend(node.right().map(|right| (right, depth + 1)));
    }

    height
}

/// The left-most value.
pub fn min<V, M>(root: Option<&Node<V, M>>) -> Option<&V> {
    let mut node = root?;
    while let Some(left) = node.left() {
        node = left;
    }
    Some(node.value())
}

/// The right-most value.
pub fn max<V, M>(root: Option<&Node<V, M>>) -> Option<&V> {
    let mut node = root?;
    while let Some(right) = node.right() {
        node = right;
    }
    Some(node.value())
}

/// Finds the node holding `value` by ordered descent.
pub fn find<'a, V, M>(root: Option<&'a Node<V, M>>, value: &V) -> Option<&'a Node<V, M>>
where
    V: Ord,
{
    let mut current = root;
    while let Some(node) = current {
        current = match value.cmp(node.value()) {
            Ordering::Less => node.left(),
            Ordering::Equal => return Some(node),
            Ordering::Greater => node.right(),
        };
    }
    None
}
