//! Pointer plumbing shared by both trees: ownership of the nodes, ordered descent, leaf
//! insertion, rotation relinking and successor splicing. None of this knows about balancing
//! metadata; [`avl`][crate::avl] and [`red_black`][crate::red_black] layer their own fix-up on
//! top.
//!
//! Every `Link` reachable from `root` points at a live node that was allocated by
//! [`Node::new_leaked`] and is owned by exactly one parent link (or by `root`). Parent pointers
//! never own anything. All of the `unsafe` in this module leans on that invariant.

use std::cmp::Ordering;
use std::mem;
use std::ptr::NonNull;

use crate::diagnostics::{Rotation, Sink};
use crate::node::{Link, Node};

pub(crate) struct RawTree<V, M> {
    // This is a pointer instead of an `Option<Box<Node>>` so that it can be moved around with the
    // tree without the children's parent pointers breaking.
    pub(crate) root: Link<V, M>,
    pub(crate) size: usize,
    pub(crate) diagnostics: Option<Sink<V>>,
}

/// What [`RawTree::splice`] took out of the tree.
pub(crate) struct Spliced<V, M> {
    /// The value that was asked to be removed.
    pub(crate) value: V,
    /// Metadata of the node that was actually freed. For a node with two children this is the
    /// successor's metadata, not the metadata of the node holding the removed value.
    pub(crate) meta: M,
    /// The node that took over the freed node's slot.
    pub(crate) child: Link<V, M>,
    /// The parent of the freed slot.
    pub(crate) parent: Link<V, M>,
}

// SAFETY: A `RawTree` owns every node reachable from `root` and never shares them, so sending the
// tree sends its values and metadata along with it. The sink is `Send` by construction.
unsafe impl<V: Send, M: Send> Send for RawTree<V, M> {}

// SAFETY: A shared `RawTree` only ever hands out shared references to values and metadata. The
// sink is only reachable through `&mut self`.
unsafe impl<V: Sync, M: Sync> Sync for RawTree<V, M> {}

impl<V, M> Drop for RawTree<V, M> {
    fn drop(&mut self) {
        let mut stack: Vec<_> = self.root.take().into_iter().collect();
        while let Some(node) = stack.pop() {
            // SAFETY: Each node is owned by exactly one link and we pop every link once, so no
            // node is freed twice. Parent pointers are never followed.
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            stack.extend(node.left);
            stack.extend(node.right);
        }
    }
}

impl<V, M> Clone for RawTree<V, M>
where
    V: Clone,
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.map(|root| Self::clone_subtree(root, None)),
            size: self.size,
            diagnostics: None,
        }
    }
}

impl<V, M> RawTree<V, M> {
    pub(crate) fn new() -> Self {
        Self {
            root: None,
            size: 0,
            diagnostics: None,
        }
    }

    pub(crate) fn root(&self) -> Option<&Node<V, M>> {
        // SAFETY: The root is live (module invariant) and the reference borrows `self`, so it
        // can't outlive a mutation of the tree.
        self.root.map(|root| unsafe { &*root.as_ptr() })
    }

    /// Finds the node holding `value`.
    pub(crate) fn find(&self, value: &V) -> Link<V, M>
    where
        V: Ord,
    {
        let mut current = self.root;
        while let Some(node) = current {
            // SAFETY: `current` came from a link of this tree.
            let node_ref = unsafe { node.as_ref() };
            current = match value.cmp(&node_ref.value) {
                Ordering::Less => node_ref.left,
                Ordering::Equal => return Some(node),
                Ordering::Greater => node_ref.right,
            };
        }

        None
    }

    /// Inserts `value` as a new leaf carrying `meta` and returns it. Returns `None`, leaving the
    /// tree untouched, if an equal value is already present.
    pub(crate) fn insert_leaf(&mut self, value: V, meta: M) -> Link<V, M>
    where
        V: Ord,
    {
        let Some(mut current) = self.root else {
            let root = Node::new_leaked(value, meta, None);
            self.root = Some(root);
            self.size = 1;
            return Some(root);
        };

        loop {
            // SAFETY: `current` came from a link of this tree and no other reference to it is
            // alive.
            let node = unsafe { &mut *current.as_ptr() };
            let slot = match value.cmp(&node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => return None,
                Ordering::Greater => &mut node.right,
            };
            match *slot {
                Some(child) => current = child,
                None => {
                    let leaf = Node::new_leaked(value, meta, Some(current));
                    *slot = Some(leaf);
                    self.size += 1;
                    return Some(leaf);
                }
            }
        }
    }

    /// The left-most node of the subtree rooted at `node`.
    pub(crate) fn leftmost(mut node: NonNull<Node<V, M>>) -> NonNull<Node<V, M>> {
        // SAFETY: `node` and all of its descendants are live.
        while let Some(left) = unsafe { node.as_ref() }.left {
            node = left;
        }
        node
    }

    /// Makes `new` take the place of `old` under `parent` (or as the root when `parent` is
    /// `None`) and points `new`'s parent link at `parent`.
    fn replace_child(
        &mut self,
        parent: Link<V, M>,
        old: NonNull<Node<V, M>>,
        new: Link<V, M>,
    ) {
        // SAFETY: `parent` and `new` are live nodes of this tree, distinct from each other, and
        // only one of them is dereferenced at a time.
        unsafe {
            if let Some(new) = new {
                (*new.as_ptr()).parent = parent;
            }
            match parent {
                None => self.root = new,
                Some(parent) => {
                    let parent = &mut *parent.as_ptr();
                    if parent.left == Some(old) {
                        parent.left = new;
                    } else {
                        debug_assert_eq!(parent.right, Some(old));
                        parent.right = new;
                    }
                }
            }
        }
    }

    /// Rotates `pivot` to the left. This moves the right child up vertically and `pivot` down
    /// vertically, and returns the new root of the subtree. It must only be called when there
    /// _is_ a right child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a right child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///  Option<parent>                 Option<parent>
    ///       /                              /
    ///    pivot                          new_root
    ///    /   \                           /    \
    ///   x   new_root    rotate ->     pivot    z
    ///        /  \                     /   \
    ///       y    z                   x     y
    /// ```
    pub(crate) fn rotate_left(&mut self, pivot: NonNull<Node<V, M>>) -> NonNull<Node<V, M>> {
        // SAFETY: `pivot`, `new_root` and `y` are distinct live nodes of this tree. Each
        // dereference is a single field access so no two references alias.
        let new_root = unsafe {
            let new_root = (*pivot.as_ptr()).right.expect("Rotate left => right child");
            let y = (*new_root.as_ptr()).left;

            (*pivot.as_ptr()).right = y;
            if let Some(y) = y {
                (*y.as_ptr()).parent = Some(pivot);
            }

            self.replace_child((*pivot.as_ptr()).parent, pivot, Some(new_root));
            (*new_root.as_ptr()).left = Some(pivot);
            (*pivot.as_ptr()).parent = Some(new_root);
            new_root
        };

        self.notify_rotation(Rotation::Left, pivot);
        new_root
    }

    /// Rotates `pivot` to the right. The mirror image of [`RawTree::rotate_left`].
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///     Option<parent>            Option<parent>
    ///         /                         /
    ///      pivot                    new_root
    ///      /    \                   /     \
    ///  new_root  z     rotate ->   x     pivot
    ///   /  \                              /  \
    ///  x    y                            y    z
    /// ```
    pub(crate) fn rotate_right(&mut self, pivot: NonNull<Node<V, M>>) -> NonNull<Node<V, M>> {
        // SAFETY: See `rotate_left`.
        let new_root = unsafe {
            let new_root = (*pivot.as_ptr()).left.expect("Rotate right => left child");
            let y = (*new_root.as_ptr()).right;

            (*pivot.as_ptr()).left = y;
            if let Some(y) = y {
                (*y.as_ptr()).parent = Some(pivot);
            }

            self.replace_child((*pivot.as_ptr()).parent, pivot, Some(new_root));
            (*new_root.as_ptr()).right = Some(pivot);
            (*pivot.as_ptr()).parent = Some(new_root);
            new_root
        };

        self.notify_rotation(Rotation::Right, pivot);
        new_root
    }

    /// Removes `node` from the tree.
    ///
    /// A node with at most one child is unlinked directly and its child (if any) is promoted into
    /// its slot. A node with two children swaps values with its in-order successor (the left-most
    /// node of its right subtree) and the successor, which has no left child, is unlinked
    /// instead. Either way exactly one node is freed; see [`Spliced`] for what is reported back.
    pub(crate) fn splice(&mut self, node: NonNull<Node<V, M>>) -> Spliced<V, M> {
        // SAFETY: `node` is a live node of this tree. `successor` lives in `node`'s right subtree
        // so the two `&mut` borrows passed to `mem::swap` don't alias.
        let target = unsafe {
            match ((*node.as_ptr()).left, (*node.as_ptr()).right) {
                (Some(_), Some(right)) => {
                    let successor = Self::leftmost(right);
                    mem::swap(
                        &mut (*node.as_ptr()).value,
                        &mut (*successor.as_ptr()).value,
                    );
                    successor
                }
                _ => node,
            }
        };

        // SAFETY: `target` is live until the `Box::from_raw` below, which happens after
        // `replace_child` unlinked it. Nothing refers to it after that.
        unsafe {
            let child = (*target.as_ptr()).left.or((*target.as_ptr()).right);
            let parent = (*target.as_ptr()).parent;
            self.replace_child(parent, target, child);
            self.size -= 1;

            let (value, meta) = Node::free(target);
            Spliced {
                value,
                meta,
                child,
                parent,
            }
        }
    }

    fn notify_rotation(&mut self, rotation: Rotation, pivot: NonNull<Node<V, M>>) {
        if let Some(sink) = self.diagnostics.as_mut() {
            // SAFETY: `pivot` is still a live node of this tree.
            sink.rotated(rotation, unsafe { &(*pivot.as_ptr()).value });
        }
    }

    // TODO stack based Clone
    fn clone_subtree(node: NonNull<Node<V, M>>, parent: Link<V, M>) -> NonNull<Node<V, M>>
    where
        V: Clone,
        M: Clone,
    {
        // SAFETY: `node` is a live node of the tree being cloned and `copy` was just allocated.
        unsafe {
            let source = node.as_ref();
            let copy = Node::new_leaked(source.value.clone(), source.meta.clone(), parent);
            (*copy.as_ptr()).left = source.left.map(|left| Self::clone_subtree(left, Some(copy)));
            (*copy.as_ptr()).right = source
                .right
                .map(|right| Self::clone_subtree(right, Some(copy)));
            copy
        }
    }
}
