mod avl;
mod balanced;
mod red_black;

use std::collections::BTreeSet;
use std::fmt::Debug;

use quickcheck::{Arbitrary, Gen};
use sorted_tree::SortedTree;

/// An enum for the various kinds of "things" to do to
/// sorted trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<V> {
    /// Add the V to the data structure
    Insert(V),
    /// Remove the V from the data structure
    Remove(V),
    /// Look the V up without changing anything
    Contains(V),
}

impl<V> Arbitrary for Op<V>
where
    V: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Insert(V::arbitrary(g)),
            1 => Op::Remove(V::arbitrary(g)),
            2 => Op::Contains(V::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes both hold the same values, and that the tree stayed
/// balanced the whole time.
pub fn do_ops<V, T>(ops: &[Op<V>], tree: &mut T, set: &mut BTreeSet<V>) -> bool
where
    V: Ord + Clone + Debug,
    T: SortedTree<V>,
{
    for op in ops {
        let agrees = match op {
            Op::Insert(v) => tree.add(v.clone()) == set.insert(v.clone()),
            Op::Remove(v) => tree.take(v).ok() == set.take(v),
            Op::Contains(v) => tree.contains(v) == set.contains(v),
        };
        if !agrees || !tree.is_balanced() || tree.size() != set.len() {
            return false;
        }
    }

    tree.in_order().into_iter().eq(set.iter())
}
