//! The locator module provides an interface for steering a splay,
//! generalizing the search in a binary search tree.
//!
//! A splay repeatedly asks the locator about the node at the top of the part of the tree
//! it is still descending into. The locator has to reply:
//! * `GoLeft` if the target lies in the node's left subtree,
//! * `GoRight` if the target lies in the node's right subtree,
//! * `Accept` if the node is the target.
//!
//! The splay stops when the locator accepts, or when the side it asks for is empty.
//! The node it stops at ends up at the root.
//!
//! Each node on the way down is asked exactly once, from the top down,
//! which lets locators such as [`locate_by_index`] keep state between calls.

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum LocResult {
    Accept,
    GoRight,
    GoLeft,
}
use LocResult::*;

/// In each query, the locator receives the key of the current node,
/// and the number of keys in its left subtree.
///
/// Anonymous functions of the type `FnMut(&K, usize) -> LocResult` can be used as locators.
pub trait Locator<K> {
    fn locate(&mut self, key: &K, left_size: usize) -> LocResult;
}

impl<K, F> Locator<K> for F
where
    F: FnMut(&K, usize) -> LocResult,
{
    fn locate(&mut self, key: &K, left_size: usize) -> LocResult {
        self(key, left_size)
    }
}

/// Locator for the `index`-th smallest key.
/// The left subtree's size is the rank of the node inside the part of the tree
/// that is still searched, so going right skips `left_size + 1` keys.
///
/// If `index` is out of range, the splay settles on the largest key.
pub fn locate_by_index<K>(mut index: usize) -> impl Locator<K> {
    move |_: &K, left_size: usize| {
        if index == left_size {
            Accept
        } else if index < left_size {
            GoLeft
        } else {
            index -= left_size + 1;
            GoRight
        }
    }
}

/// Locator for the first key that isn't less than `key`.
///
/// It never accepts: it walks until it runs out of children, so it may stop one step short,
/// at the last key less than `key`. The caller has to correct for that.
/// If all keys are less than `key`, the splay settles on the largest key.
pub fn locate_lower_bound<'a, K, C>(key: &'a K, less: &'a C) -> impl Locator<K> + 'a
where
    C: Fn(&K, &K) -> bool,
{
    move |node: &K, _: usize| {
        if less(node, key) {
            GoRight
        } else {
            GoLeft
        }
    }
}

/// Locator for finding a node by its key.
/// If the key isn't present, the splay settles on one of its neighbors.
pub fn locate_by_key<'a, K, C>(key: &'a K, less: &'a C) -> impl Locator<K> + 'a
where
    C: Fn(&K, &K) -> bool,
{
    move |node: &K, _: usize| {
        if less(node, key) {
            GoRight
        } else if less(key, node) {
            GoLeft
        } else {
            Accept
        }
    }
}
