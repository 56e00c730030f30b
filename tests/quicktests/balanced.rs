use quickcheck::quickcheck;
use sorted_tree::{BalancedTree, Strategy};

use crate::Op;

quickcheck! {
    fn strategies_hold_the_same_values(ops: Vec<Op<i8>>) -> bool {
        let mut avl = BalancedTree::new(Strategy::Avl);
        let mut red_black = BalancedTree::new(Strategy::RedBlack);

        for op in &ops {
            let agrees = match op {
                Op::Insert(v) => avl.add(*v) == red_black.add(*v),
                Op::Remove(v) => avl.take(v) == red_black.take(v),
                Op::Contains(v) => avl.contains(v) == red_black.contains(v),
            };
            if !agrees {
                return false;
            }
        }

        avl.in_order() == red_black.in_order()
            && avl.min_value() == red_black.min_value()
            && avl.max_value() == red_black.max_value()
            && avl.is_balanced()
            && red_black.is_balanced()
    }
}
