//! Structural checks every tree has to pass regardless of how it balances itself. The
//! strategy-specific checks live next to each strategy.

use std::ptr;

use crate::error::InvariantViolation;
use crate::node::Node;
use crate::traversal;

/// Checks ordering, parent links and the size counter.
pub(crate) fn verify_structure<V, M>(
    root: Option<&Node<V, M>>,
    size: usize,
) -> Result<(), InvariantViolation>
where
    V: Ord,
{
    let values = traversal::in_order(root);
    if let Some(position) = values.windows(2).position(|pair| pair[0] >= pair[1]) {
        return Err(InvariantViolation::OutOfOrder {
            position: position + 1,
        });
    }

    if values.len() != size {
        return Err(InvariantViolation::SizeMismatch {
            stored: size,
            counted: values.len(),
        });
    }

    if root.map_or(false, |root| root.parent().is_some()) {
        return Err(InvariantViolation::BrokenParentLink);
    }
    let mut stack: Vec<_> = root.into_iter().collect();
    while let Some(node) = stack.pop() {
        for child in node.left().into_iter().chain(node.right()) {
            if !child.parent().map_or(false, |parent| ptr::eq(parent, node)) {
                return Err(InvariantViolation::BrokenParentLink);
            }
            stack.push(child);
        }
    }

    Ok(())
}
