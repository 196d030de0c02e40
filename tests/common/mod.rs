// not every test binary uses every helper
#![allow(dead_code)]

pub use lazy_splay::*;

use itertools::{Itertools, MinMaxResult};
use rand::Rng;
use std::collections::BTreeMap;

/// Keys are drawn from `0..KEY_RANGE`, a small range, so that puts collide
/// and removes hit existing keys.
pub const KEY_RANGE: i32 = 100;
pub const MAX_VALUE: i32 = 0xffff;

pub type Oracle = BTreeMap<i32, i32>;

/// Something to perform in one round of tests
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Put { key: i32, value: i32 },
    Remove { key: i32 },
    Get { key: i32 },
    Query { low: i32, high: i32 },
    Assign { low: i32, high: i32, value: i32 },
}

/// A non-empty range of keys, `low < high`.
pub fn random_range(rng: &mut impl Rng) -> (i32, i32) {
    let (low, high) = (rng.gen_range(0..KEY_RANGE), rng.gen_range(0..KEY_RANGE));
    if low < high {
        (low, high)
    } else {
        (high, low + 1)
    }
}

pub fn random_round_action(rng: &mut impl Rng) -> RoundAction {
    use RoundAction::*;
    match rng.gen_range(0..5) {
        0 => Put {
            key: rng.gen_range(0..KEY_RANGE),
            value: rng.gen_range(0..MAX_VALUE),
        },
        1 => Remove {
            key: rng.gen_range(0..KEY_RANGE),
        },
        2 => Get {
            key: rng.gen_range(0..KEY_RANGE),
        },
        3 => {
            let (low, high) = random_range(rng);
            Query { low, high }
        }
        4 => {
            let (low, high) = random_range(rng);
            let value = rng.gen_range(0..MAX_VALUE);
            Assign { low, high, value }
        }
        _ => unreachable!(),
    }
}

/// Runs a round that any tree supports. Returns false if the action is a range action.
pub fn run_point_round<G>(tree: &mut SplayTree<i32, G>, oracle: &mut Oracle, action: &RoundAction) -> bool
where
    G: Aggregator<Value = i32>,
{
    use RoundAction::*;
    match *action {
        Put { key, value } => {
            tree.put(key, value);
            oracle.insert(key, value);
        }
        Remove { key } => {
            assert_eq!(tree.remove(&key), oracle.remove(&key));
        }
        Get { key } => {
            assert_eq!(tree.get(&key), oracle.get(&key).copied());
        }
        Query { .. } | Assign { .. } => return false,
    }
    true
}

pub fn oracle_min_max(oracle: &Oracle, low: i32, high: i32) -> Option<MinMax<i32>> {
    match oracle.range(low..high).map(|(_, value)| *value).minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(value) => Some(MinMax {
            min: value,
            max: value,
        }),
        MinMaxResult::MinMax(min, max) => Some(MinMax { min, max }),
    }
}

pub fn run_min_max_round(
    tree: &mut SplayTree<i32, MinMaxAggregator<i32>>,
    oracle: &mut Oracle,
    action: &RoundAction,
) {
    if run_point_round(tree, oracle, action) {
        return;
    }
    match *action {
        // a min-max tree can't assign, so query the same range instead
        RoundAction::Query { low, high } | RoundAction::Assign { low, high, .. } => {
            assert_eq!(tree.range(&low, &high), oracle_min_max(oracle, low, high));
        }
        _ => unreachable!(),
    }
}

pub fn run_range_assign_round(
    tree: &mut SplayTree<i32, RangeAssignAggregator<i32>>,
    oracle: &mut Oracle,
    action: &RoundAction,
) {
    if run_point_round(tree, oracle, action) {
        return;
    }
    match *action {
        RoundAction::Query { low, high } => {
            let expected_empty = oracle.range(low..high).next().is_none();
            assert_eq!(tree.range(&low, &high).is_empty(), expected_empty);
        }
        RoundAction::Assign { low, high, value } => {
            tree.range(&low, &high).assign(value);
            for (_, old) in oracle.range_mut(low..high) {
                *old = value;
            }
        }
        _ => unreachable!(),
    }
}

/// Checks the tree against the oracle: size, order, and every key and value.
pub fn assert_same_contents<G>(tree: &mut SplayTree<i32, G>, oracle: &Oracle)
where
    G: Aggregator<Value = i32>,
{
    assert_eq!(tree.size(), oracle.len());
    let mut pairs = vec![];
    tree.each(|key, value| pairs.push((*key, value)));
    assert!(pairs.iter().tuple_windows().all(|(a, b)| a.0 < b.0));
    assert_eq!(pairs, oracle.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>());
    for (key, value) in oracle.iter() {
        assert_eq!(tree.get(key), Some(*value));
    }
    tree.assert_correctness();
}
