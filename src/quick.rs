//! Model-based tests: random operation sequences replayed against both an
//! [`OrderedTree`] and a [`BTreeSet`], checking the red-black invariants after
//! every mutation.
use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;

use crate::{OrderedTree, check};

/// Things to do to a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
enum Op<T> {
    Insert(T),
    Delete(T),
    PopFirst,
    PopLast,
    Range(T, T),
    Minimum(u8),
    Maximum(u8),
}

impl<T: Arbitrary> Arbitrary for Op<T> {
    fn arbitrary(g: &mut Gen) -> Self {
        // Inserts and deletes dominate so trees actually grow and shrink.
        match g.choose(&[0, 0, 0, 1, 1, 2, 3, 4, 5, 6]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::Delete(T::arbitrary(g)),
            2 => Op::PopFirst,
            3 => Op::PopLast,
            4 => Op::Range(T::arbitrary(g), T::arbitrary(g)),
            5 => Op::Minimum(u8::arbitrary(g)),
            6 => Op::Maximum(u8::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}

fn replay(ops: &[Op<i8>]) {
    let mut tree = OrderedTree::new();
    let mut model = BTreeSet::new();

    for op in ops {
        log::debug!("op: {op:?}");
        match *op {
            Op::Insert(v) => {
                assert_eq!(model.insert(v), tree.insert(v));
                assert!(tree.contains(&v));
            }
            Op::Delete(v) => {
                assert_eq!(model.remove(&v), tree.delete(&v));
                assert!(!tree.contains(&v));
            }
            Op::PopFirst => assert_eq!(model.pop_first(), tree.pop_first()),
            Op::PopLast => assert_eq!(model.pop_last(), tree.pop_last()),
            Op::Range(lo, hi) => {
                let expected: Vec<_> = model.iter().filter(|v| lo <= **v && **v <= hi).collect();
                assert_eq!(expected, tree.range(&lo, &hi));
                assert_eq!(expected, tree.range_iter(&lo, &hi).collect::<Vec<_>>());
            }
            Op::Minimum(k) => {
                let expected: Vec<_> = model.iter().take(k as usize).collect();
                assert_eq!(expected, tree.minimum_n(k as usize));
                assert_eq!(model.first(), tree.minimum());
            }
            Op::Maximum(k) => {
                let expected: Vec<_> = model.iter().rev().take(k as usize).collect();
                assert_eq!(expected, tree.maximum_n(k as usize));
                assert_eq!(model.last(), tree.maximum());
            }
        }
        check::assert_invariants(&tree);
        assert_eq!(model.len(), tree.len());
        assert_eq!(model.iter().collect::<Vec<_>>(), tree.values());
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) {
    replay(&ops);
}

#[quickcheck]
fn values_strictly_ascending(xs: Vec<i16>) -> bool {
    let tree: OrderedTree<i16> = xs.iter().copied().collect();
    let values = tree.values();
    values.windows(2).all(|w| w[0] < w[1])
}

#[quickcheck]
fn contains_everything_inserted(xs: Vec<i16>, nots: Vec<i16>) -> bool {
    let tree: OrderedTree<i16> = xs.iter().copied().collect();
    let inserted: BTreeSet<_> = xs.iter().copied().collect();
    xs.iter().all(|x| tree.contains(x))
        && nots
            .iter()
            .filter(|x| !inserted.contains(*x))
            .all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
    let mut tree: OrderedTree<i16> = xs.iter().copied().collect();
    for d in &deletes {
        tree.delete(d);
    }
    let deleted: BTreeSet<_> = deletes.iter().copied().collect();
    let still_present: BTreeSet<_> = xs
        .iter()
        .copied()
        .filter(|x| !deleted.contains(x))
        .collect();

    check::assert_invariants(&tree);
    tree.len() == still_present.len()
        && deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn range_is_filtered_values(xs: Vec<i16>, lo: i16, hi: i16) -> bool {
    let tree: OrderedTree<i16> = xs.into_iter().collect();
    let expected: Vec<_> = tree.iter().filter(|v| lo <= **v && **v <= hi).collect();
    tree.range(&lo, &hi) == expected
}

#[test]
fn seeded_shuffled_churn() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    let mut values: Vec<u32> = (0..2_000).collect();
    values.shuffle(&mut rng);

    let mut tree = OrderedTree::new();
    let mut model = BTreeSet::new();
    for &v in &values {
        tree.insert(v);
        model.insert(v);
    }
    check::assert_invariants(&tree);

    for _ in 0..4_000 {
        let v = rng.random_range(0..2_500);
        if rng.random_bool(0.5) {
            assert_eq!(model.insert(v), tree.insert(v));
        } else {
            assert_eq!(model.remove(&v), tree.delete(&v));
        }
    }
    check::assert_invariants(&tree);
    assert_eq!(model.iter().collect::<Vec<_>>(), tree.values());

    values.shuffle(&mut rng);
    for v in &values {
        tree.delete(v);
        model.remove(v);
    }
    check::assert_invariants(&tree);
    assert_eq!(model.iter().collect::<Vec<_>>(), tree.values());
}
