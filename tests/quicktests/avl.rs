use std::collections::{BTreeSet, HashSet};

use quickcheck::quickcheck;
use sorted_tree::{AvlTree, SortedTree};

use crate::{do_ops, Op};

quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = AvlTree::new();
        let mut set = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut set)
    }

    fn contains(xs: Vec<i8>) -> bool {
        let tree: AvlTree<_> = xs.iter().copied().collect();

        xs.iter().all(|x| tree.contains(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: AvlTree<_> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.contains(x))
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: AvlTree<_> = xs.iter().copied().collect();
        for delete in &deletes {
            tree.remove(delete);
        }

        let still_present: BTreeSet<_> = xs.into_iter().filter(|x| !deletes.contains(x)).collect();

        deletes.iter().all(|x| !tree.contains(x))
            && tree.in_order().into_iter().eq(still_present.iter())
            && tree.is_balanced()
    }

    fn height_is_logarithmic(xs: Vec<u16>) -> bool {
        let tree: AvlTree<_> = xs.into_iter().collect();

        // An AVL tree with n nodes is at most 1.44 * log2(n + 2) tall.
        (tree.height() as f64) <= 1.4405 * ((tree.size() + 2) as f64).log2()
    }
}
