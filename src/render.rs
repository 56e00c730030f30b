//! Draws a tree as text for debugging.
//!
//! Each level of the tree gets its own row. A node's column comes from its position in the
//! in-order sequence, so reading any row left to right gives values in ascending order and no two
//! labels ever overlap. Between two rows, a `/` or `\` sits next to each child pointing back at
//! its parent:
//!
//! ```text
//!       4
//!    /   \
//!   2     6
//!  / \     \
//! 1   3     7
//! ```

use std::collections::HashMap;
use std::fmt;
use std::ptr;

use crate::node::Node;
use crate::traversal;

/// Renders the tree rooted at `root`. An empty tree renders as an empty string.
pub fn render<V, M>(root: Option<&Node<V, M>>) -> String
where
    V: fmt::Display,
{
    let mut labels = HashMap::new();
    let mut column = 0;
    for node in traversal::in_order_nodes(root) {
        let label = node.value().to_string();
        let width = label.chars().count();
        labels.insert(node as *const Node<V, M>, (column, label));
        column += width + 1;
    }

    let mut out = String::new();
    for (depth, level) in traversal::levels(root).into_iter().enumerate() {
        if depth > 0 {
            let mut connectors = Row::default();
            for node in &level {
                let (column, label) = &labels[&(*node as *const Node<V, M>)];
                let is_left = node
                    .parent()
                    .and_then(Node::left)
                    .map_or(false, |left| ptr::eq(left, *node));
                if is_left {
                    connectors.write(column + label.chars().count(), "/");
                } else {
                    connectors.write(column.saturating_sub(1), "\\");
                }
            }
            connectors.finish(&mut out);
        }

        let mut values = Row::default();
        for node in &level {
            let (column, label) = &labels[&(*node as *const Node<V, M>)];
            values.write(*column, label);
        }
        values.finish(&mut out);
    }

    out
}

/// A single line of output being filled in at arbitrary columns.
#[derive(Default)]
struct Row(Vec<char>);

impl Row {
    fn write(&mut self, column: usize, text: &str) {
        for (i, c) in text.chars().enumerate() {
            let at = column + i;
            if self.0.len() <= at {
                self.0.resize(at + 1, ' ');
            }
            self.0[at] = c;
        }
    }

    fn finish(self, out: &mut String) {
        out.extend(self.0);
        out.push('\n');
    }
}
