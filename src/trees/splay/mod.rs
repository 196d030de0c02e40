//! Implementation of a keyed splay tree with aggregation.
//!
//! A splay tree is a self balancing binary search tree: every access moves the accessed
//! node to the root, which gives amortized `O(log n)` time for all operations,
//! without keeping any balance information in the nodes. Keys that are accessed
//! often stay near the root.
//!
//! Every node also carries a payload managed by an [`Aggregator`], which turns the tree
//! into a range query and range update engine over a dynamic set of keys, similar to a
//! segment tree that doesn't need to know its keys in advance. See [`SplayTree::range`].
//!
//! Since every access restructures the tree, even reading operations take `&mut self`.

mod splayer;
pub use splayer::*;

use crate::aggregators::*;
use crate::locators::*;
use crate::trees::basic_tree::*;

/// A splay tree mapping keys to values.
///
/// The keys are ordered by `less`, which must be a strict total order.
/// Keys are unique: putting an existing key overwrites its value.
pub struct SplayTree<K, G: Aggregator, C = LessFn<K>> {
    root: BasicTree<K, G::Aggregate>,
    less: C,
    aggregator: G,
}

impl<K: Ord, G: Aggregator> SplayTree<K, G> {
    /// Creates an empty tree, ordered by the natural order of the keys.
    pub fn new(aggregator: G) -> Self {
        SplayTree::with_less(natural_less::<K> as LessFn<K>, aggregator)
    }
}

impl<K, G: Aggregator, C: Fn(&K, &K) -> bool> SplayTree<K, G, C> {
    /// Creates an empty tree, ordered by `less`.
    pub fn with_less(less: C, aggregator: G) -> Self {
        SplayTree {
            root: BasicTree::Empty,
            less,
            aggregator,
        }
    }

    pub fn aggregator(&self) -> &G {
        &self.aggregator
    }

    /// Returns the number of keys in the tree.
    pub fn size(&self) -> usize {
        self.root.size()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    fn splay_nth(&mut self, index: usize) {
        splay(&mut self.root, &self.aggregator, locate_by_index(index));
    }

    /// Splays the first key that isn't less than `key`, or the largest key if there is none.
    fn splay_lower_bound(&mut self, key: &K) {
        splay(
            &mut self.root,
            &self.aggregator,
            locate_lower_bound(key, &self.less),
        );
        // the locator never accepts, so it may have stopped at the key just before
        let rank = match self.root.node() {
            Some(root) if (self.less)(root.key(), key) => root.left.size() + 1,
            _ => return,
        };
        self.splay_nth(rank);
    }

    fn splay_at(&mut self, key: &K) {
        splay(&mut self.root, &self.aggregator, locate_by_key(key, &self.less));
    }

    fn root_has_key(&self, key: &K) -> bool {
        match self.root.node() {
            Some(root) => !(self.less)(root.key(), key) && !(self.less)(key, root.key()),
            None => false,
        }
    }

    /// Returns the value associated with `key`.
    pub fn get(&mut self, key: &K) -> Option<G::Value> {
        self.splay_at(key);
        if !self.root_has_key(key) {
            return None;
        }
        self.root.aggregate().map(|agg| self.aggregator.value(agg))
    }

    pub fn contains_key(&mut self, key: &K) -> bool {
        self.splay_at(key);
        self.root_has_key(key)
    }

    /// Associates `key` with `value`, overwriting the previous value if `key` was present.
    pub fn put(&mut self, key: K, value: G::Value) {
        self.splay_lower_bound(&key);
        let aggregator = &self.aggregator;
        let mut new_node = BasicNode::new(key, aggregator.from_value(value));

        if let Some(mut root) = self.root.take().into_node_boxed() {
            if (self.less)(root.key(), new_node.key()) {
                // no key is greater
                new_node.left = BasicTree::Root(root);
            } else if (self.less)(new_node.key(), root.key()) {
                root.access(aggregator);
                new_node.left = root.left.take();
                root.rebuild(aggregator);
                new_node.right = BasicTree::Root(root);
            } else {
                root.aggregate = new_node.aggregate;
                root.rebuild(aggregator);
                self.root = BasicTree::Root(root);
                return;
            }
        }
        new_node.rebuild(aggregator);
        self.root = BasicTree::from_node(new_node);
    }

    /// Removes `key` from the tree, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<G::Value> {
        self.splay_at(key);
        if !self.root_has_key(key) {
            return None;
        }
        let mut root = self.root.take().into_node_boxed()?;
        root.access(&self.aggregator);
        let value = self.aggregator.value(root.aggregate());
        let left = root.left.take();
        let right = root.right.take();

        if right.is_empty() {
            self.root = left;
        } else {
            // the successor has no left son once it is splayed to the top of the right subtree
            self.root = right;
            self.splay_nth(0);
            let aggregator = &self.aggregator;
            if let Some(successor) = self.root.node_mut() {
                successor.left = left;
                successor.rebuild(aggregator);
            }
        }
        Some(value)
    }

    /// Returns the `index`-th smallest key and its value,
    /// or [`None`] if there are not that many keys.
    pub fn nth(&mut self, index: usize) -> Option<(&K, G::Value)> {
        if index >= self.size() {
            return None;
        }
        self.splay_nth(index);
        let root = self.root.node()?;
        Some((root.key(), self.aggregator.value(root.aggregate())))
    }

    /// Calls `f` on every key and its value, in increasing order of keys.
    ///
    /// Each key is splayed to the root in turn, so this takes `O(n log n)` time
    /// rather than the `O(n)` of a plain traversal, and leaves the largest key at the root.
    pub fn each<F: FnMut(&K, G::Value)>(&mut self, mut f: F) {
        for index in 0..self.size() {
            self.splay_nth(index);
            if let Some(root) = self.root.node() {
                f(root.key(), self.aggregator.value(root.aggregate()));
            }
        }
    }

    fn empty_view(&self) -> G::View<'_> {
        self.aggregator.range_view(vec![], vec![])
    }

    /// Returns the aggregator's view of the keys in `[low, high)`.
    /// The view can be used to obtain statistics or do range-based updates,
    /// and borrows the tree until it is dropped.
    ///
    /// Once the boundaries of the range are splayed into place, the keys of any range
    /// form a single subtree, so the view is built from a single payload.
    /// If `low` isn't less than `high`, the range is empty.
    pub fn range(&mut self, low: &K, high: &K) -> G::View<'_> {
        if !(self.less)(low, high) {
            return self.empty_view();
        }

        self.splay_lower_bound(low);
        // the number of keys less than `low`
        let rank = match self.root.node() {
            Some(root) if (self.less)(root.key(), high) => root.left.size(),
            _ => return self.empty_view(),
        };

        self.splay_lower_bound(high);
        match self.root.node() {
            Some(root) if !(self.less)(root.key(), low) => {}
            _ => return self.empty_view(),
        }

        let SplayTree {
            root,
            less,
            aggregator,
        } = self;
        let (less, aggregator) = (&*less, &*aggregator);

        let piece = if rank == 0 {
            // every key below the root is in the range
            match root.node_mut() {
                Some(node) if less(node.key(), high) => Some(&mut node.aggregate),
                Some(node) => node.left.aggregate_mut(),
                None => None,
            }
        } else {
            // park the root, and bring the last key less than `low` to the top of
            // its left subtree. the parked root comes back as the right son.
            let mut splayer = Splayer::new(root, aggregator);
            splayer.zig(Side::Left);
            splayer.descend(&mut locate_by_index(rank - 1));
            match splayer.finish().node_mut().and_then(|node| node.right.node_mut()) {
                Some(node) if less(node.key(), high) => Some(&mut node.aggregate),
                Some(node) => node.left.aggregate_mut(),
                None => None,
            }
        };
        aggregator.range_view(piece.into_iter().collect(), vec![])
    }

    /// Checks that invariants remain correct. i.e., that every node's size
    /// is the sum of the sizes of its children plus one, and that the keys are strictly increasing.
    /// If it finds a violation, it panics.
    pub fn assert_correctness(&self) {
        let nodes = self.root.nodes_in_order();
        for node in nodes.iter() {
            assert_eq!(
                node.size(),
                1 + node.left.size() + node.right.size(),
                "size invariant violated"
            );
        }
        for pair in nodes.windows(2) {
            assert!(
                (self.less)(pair[0].key(), pair[1].key()),
                "keys are not strictly increasing"
            );
        }
    }
}

impl<K: Ord, G: Aggregator + Default> Default for SplayTree<K, G> {
    fn default() -> Self {
        SplayTree::new(G::default())
    }
}

impl<K, G: Aggregator, C: Fn(&K, &K) -> bool> Extend<(K, G::Value)> for SplayTree<K, G, C> {
    fn extend<I: IntoIterator<Item = (K, G::Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Ord, G: Aggregator + Default> std::iter::FromIterator<(K, G::Value)> for SplayTree<K, G> {
    fn from_iter<I: IntoIterator<Item = (K, G::Value)>>(iter: I) -> Self {
        let mut tree = SplayTree::default();
        tree.extend(iter);
        tree
    }
}

impl<K, G: Aggregator, C> Drop for SplayTree<K, G, C> {
    fn drop(&mut self) {
        deallocate_iteratively(&mut self.root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_splays_every_key_in_turn() {
        let mut tree: SplayTree<i32, _> = SplayTree::new(ValueAggregator::new());
        for key in [5, 1, 4, 2, 3] {
            tree.put(key, key * key);
        }
        let mut seen = vec![];
        tree.each(|key, value| seen.push((*key, value)));
        assert_eq!(seen, vec![(1, 1), (2, 4), (3, 9), (4, 16), (5, 25)]);
        // the last key visited was splayed last
        assert_eq!(tree.root.node().map(|root| *root.key()), Some(5));
        tree.assert_correctness();
    }

    #[test]
    fn lower_bound_lands_on_the_first_key_not_below() {
        let mut tree: SplayTree<i32, _> = SplayTree::new(ValueAggregator::new());
        for key in (0..100).map(|x| x * 3) {
            tree.put(key, ());
        }
        for key in 0..=297 {
            tree.splay_lower_bound(&key);
            let expected = (key + 2) / 3 * 3;
            assert_eq!(tree.root.node().map(|root| *root.key()), Some(expected));
        }
        // nothing is greater: settles on the largest key
        tree.splay_lower_bound(&1000);
        assert_eq!(tree.root.node().map(|root| *root.key()), Some(297));
        tree.assert_correctness();
    }

    #[test]
    fn put_shapes() {
        let mut tree: SplayTree<i32, _> = SplayTree::new(ValueAggregator::new());
        tree.put(10, 'a');
        tree.put(20, 'b');
        // greater than everything: the old root goes left
        assert_eq!(tree.root.node().map(|root| root.left.size()), Some(1));
        tree.put(15, 'c');
        let root = tree.root.node().unwrap();
        assert_eq!((*root.key(), root.left.size(), root.right.size()), (15, 1, 1));
        tree.put(15, 'd');
        assert_eq!(tree.size(), 3);
        assert_eq!(tree.get(&15), Some('d'));
        tree.assert_correctness();
    }

    #[test]
    fn overwriting_keeps_subtree_aggregates() {
        let mut tree: SplayTree<i32, _> = SplayTree::new(MinMaxAggregator::natural());
        for key in 0..10 {
            tree.put(key, key);
        }
        tree.put(5, 100);
        let root = tree.root.node().unwrap();
        assert_eq!(*root.key(), 5);
        assert_eq!((*root.aggregate().min(), *root.aggregate().max()), (0, 100));
    }

    #[test]
    fn remove_promotes_the_successor() {
        let mut tree: SplayTree<i32, ValueAggregator<i32>> = (0..50).map(|x| (x, x)).collect();
        assert_eq!(tree.remove(&20), Some(20));
        assert_eq!(tree.root.node().map(|root| *root.key()), Some(21));
        assert_eq!(tree.remove(&49), Some(49));
        assert_eq!(tree.remove(&49), None);
        assert_eq!(tree.size(), 48);
        tree.assert_correctness();
    }
}
