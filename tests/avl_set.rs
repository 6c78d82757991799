use std::collections::BTreeSet;
use std::ops::Bound;

use proptest::prelude::*;
use ravl_tree::{AvlSet, Rank};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 10_000;

/// Generates random values in a range narrow enough to force collisions.
fn value_strategy() -> impl Strategy<Value = i64> {
    -20_000i64..20_000i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Remove(i64),
    Contains(i64),
    First,
    Last,
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SetOp::Insert),
        3 => value_strategy().prop_map(SetOp::Remove),
        2 => value_strategy().prop_map(SetOp::Contains),
        1 => Just(SetOp::First),
        1 => Just(SetOp::Last),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of insert/remove/contains operations on both
    /// AvlSet and BTreeSet and asserts identical results at every step.
    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut avl_set: AvlSet<i64> = AvlSet::new();
        let mut bt_set: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                SetOp::Insert(v) => {
                    prop_assert_eq!(avl_set.insert(*v), bt_set.insert(*v), "insert({})", v);
                }
                SetOp::Remove(v) => {
                    prop_assert_eq!(avl_set.remove(v), bt_set.remove(v), "remove({})", v);
                }
                SetOp::Contains(v) => {
                    prop_assert_eq!(avl_set.contains(v), bt_set.contains(v), "contains({})", v);
                }
                SetOp::First => {
                    prop_assert_eq!(avl_set.first(), bt_set.first(), "first()");
                }
                SetOp::Last => {
                    prop_assert_eq!(avl_set.last(), bt_set.last(), "last()");
                }
            }
            prop_assert_eq!(avl_set.len(), bt_set.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(avl_set.is_empty(), bt_set.is_empty(), "is_empty mismatch after {:?}", op);
        }

        // The balance invariant keeps the height logarithmic: an AVL tree of
        // n nodes is no taller than 1.44 * log2(n + 2).
        if !avl_set.is_empty() {
            #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            let bound = (1.44 * ((avl_set.len() + 2) as f64).log2()).ceil() as usize;
            prop_assert!(avl_set.height() <= bound, "height {} exceeds AVL bound {}", avl_set.height(), bound);
        }
    }

    /// Tests that iteration order matches BTreeSet after random insertions.
    #[test]
    fn iter_matches_btreeset(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let avl_set: AvlSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.iter().copied().collect();

        // Forward iteration
        let avl_items: Vec<_> = avl_set.iter().copied().collect();
        let bt_items: Vec<_> = bt_set.iter().copied().collect();
        prop_assert_eq!(&avl_items, &bt_items, "iter() mismatch");

        // Reverse iteration
        let avl_rev: Vec<_> = avl_set.iter().rev().copied().collect();
        let bt_rev: Vec<_> = bt_set.iter().rev().copied().collect();
        prop_assert_eq!(&avl_rev, &bt_rev, "iter().rev() mismatch");

        // into_iter
        let avl_into: Vec<_> = avl_set.clone().into_iter().collect();
        let bt_into: Vec<_> = bt_set.clone().into_iter().collect();
        prop_assert_eq!(&avl_into, &bt_into, "into_iter() mismatch");
    }

    /// One-at-a-time insertion and bulk construction produce equal sets.
    #[test]
    fn bulk_construction_matches_incremental(values in proptest::collection::vec(value_strategy(), 0..512)) {
        let bulk: AvlSet<i64> = values.iter().copied().collect();
        let mut incremental: AvlSet<i64> = AvlSet::new();
        for &v in &values {
            incremental.insert(v);
        }
        prop_assert_eq!(bulk, incremental);
    }

    /// Every traversal order visits each element exactly once, and the three
    /// orders are consistent rearrangements of the same elements.
    #[test]
    fn traversal_orders_are_permutations(values in proptest::collection::btree_set(value_strategy(), 0..512)) {
        let avl_set: AvlSet<i64> = values.iter().copied().collect();

        let in_order: Vec<_> = avl_set.iter().copied().collect();
        let mut pre_order: Vec<_> = avl_set.iter_preorder().copied().collect();
        let mut post_order: Vec<_> = avl_set.iter_postorder().copied().collect();

        let expected: Vec<_> = values.iter().copied().collect();
        prop_assert_eq!(&in_order, &expected, "in-order is the sorted sequence");

        pre_order.sort_unstable();
        post_order.sort_unstable();
        prop_assert_eq!(&pre_order, &expected, "pre-order visits every element once");
        prop_assert_eq!(&post_order, &expected, "post-order visits every element once");
    }
}

// ─── Order-statistic operations ──────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Rank access agrees with the position in the sorted sequence, and
    /// rank_of is its inverse.
    #[test]
    fn rank_matches_sorted_position(values in proptest::collection::btree_set(value_strategy(), 0..512)) {
        let avl_set: AvlSet<i64> = values.iter().copied().collect();
        let sorted: Vec<i64> = values.iter().copied().collect();

        for (rank, &v) in sorted.iter().enumerate() {
            prop_assert_eq!(avl_set.get_by_rank(rank), Some(&v), "get_by_rank({})", rank);
            prop_assert_eq!(avl_set.rank_of(&v), Some(rank), "rank_of({})", v);
            prop_assert_eq!(avl_set[Rank(rank)], v, "Index by Rank({})", rank);
        }
        prop_assert_eq!(avl_set.get_by_rank(sorted.len()), None);
    }

    /// Ranks stay consistent across interleaved removals.
    #[test]
    fn ranks_survive_removals(values in proptest::collection::btree_set(value_strategy(), 1..256)) {
        let mut avl_set: AvlSet<i64> = values.iter().copied().collect();
        let mut sorted: Vec<i64> = values.iter().copied().collect();

        // Remove every third element and re-check all ranks each time.
        while sorted.len() > 2 {
            let victim = sorted.remove(sorted.len() / 3);
            prop_assert!(avl_set.remove(&victim));
            for (rank, &v) in sorted.iter().enumerate() {
                prop_assert_eq!(avl_set.get_by_rank(rank), Some(&v), "rank {} after removing {}", rank, victim);
            }
        }
    }
}

// ─── Ordered queries ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// floor/ceiling/lower/higher agree with the equivalent BTreeSet range
    /// probes for present, absent, and out-of-range query points.
    #[test]
    fn ordered_queries_match_btreeset(
        values in proptest::collection::btree_set(value_strategy(), 0..512),
        queries in proptest::collection::vec(value_strategy(), 64),
    ) {
        let avl_set: AvlSet<i64> = values.iter().copied().collect();

        for q in queries {
            let floor = values.range(..=q).next_back();
            let ceiling = values.range(q..).next();
            let lower = values.range(..q).next_back();
            let higher = values.range((Bound::Excluded(q), Bound::Unbounded)).next();

            prop_assert_eq!(avl_set.floor(&q), floor, "floor({})", q);
            prop_assert_eq!(avl_set.ceiling(&q), ceiling, "ceiling({})", q);
            prop_assert_eq!(avl_set.lower(&q), lower, "lower({})", q);
            prop_assert_eq!(avl_set.higher(&q), higher, "higher({})", q);
        }
    }

    /// get_range returns exactly the BTreeSet's inclusive range, ascending.
    #[test]
    fn get_range_matches_btreeset(
        values in proptest::collection::btree_set(value_strategy(), 0..512),
        a in value_strategy(),
        b in value_strategy(),
    ) {
        let avl_set: AvlSet<i64> = values.iter().copied().collect();
        let (from, to) = (a.min(b), a.max(b));

        let avl_range: Vec<i64> = avl_set.get_range(&from, &to).unwrap().into_iter().copied().collect();
        let bt_range: Vec<i64> = values.range(from..=to).copied().collect();
        prop_assert_eq!(avl_range, bt_range, "get_range({}, {})", from, to);
    }
}
