//! Reference aggregators.
//!
//! * [`ValueAggregator`] stores the value and nothing else.
//! * [`MinMaxAggregator`] keeps the minimum and maximum value of every subtree,
//!   so that the minimum and maximum over a range of keys can be read off at once.
//! * [`RangeAssignAggregator`] lets a whole range of keys be assigned a value
//!   in logarithmic time, by marking subtrees and pushing the mark down lazily.

use super::*;
use std::marker::PhantomData;

/// Straight values. no bookkeeping needed.
/// Range queries are meaningless without a combining rule, so its view is `()`.
pub struct ValueAggregator<V> {
	phantom: PhantomData<V>,
}

impl<V> ValueAggregator<V> {
	pub fn new() -> Self {
		ValueAggregator {
			phantom: PhantomData,
		}
	}
}

// the derived instance would require `V : Default`
impl<V> Default for ValueAggregator<V> {
	fn default() -> Self {
		ValueAggregator::new()
	}
}

impl<V: Clone> Aggregator for ValueAggregator<V> {
	type Value = V;
	type Aggregate = V;
	type View<'a> = () where Self: 'a;

	fn from_value(&self, value: V) -> V {
		value
	}

	fn pop_up(&self, _: &mut V, _: Option<&V>, _: Option<&V>) {}

	fn push_down(&self, _: &mut V, _: Option<&mut V>, _: Option<&mut V>) {}

	fn value(&self, node: &V) -> V {
		node.clone()
	}

	fn range_view<'a>(&'a self, _: Vec<&'a mut V>, _: Vec<&'a mut V>) {}
}

/// The payload of [`MinMaxAggregator`]: the node's own value,
/// and the extremes over its whole subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinMaxAggregate<V> {
	value: V,
	min: V,
	max: V,
}

impl<V> MinMaxAggregate<V> {
	/// The smallest value in the subtree of this node.
	pub fn min(&self) -> &V {
		&self.min
	}

	/// The largest value in the subtree of this node.
	pub fn max(&self) -> &V {
		&self.max
	}
}

/// The extremes of the values in a range of keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MinMax<V> {
	pub min: V,
	pub max: V,
}

/// Collects the minimal and maximal values over ranges of keys.
/// The values are compared with their own comparator, which need not
/// have anything to do with the order of the keys.
pub struct MinMaxAggregator<V, C = LessFn<V>> {
	less: C,
	phantom: PhantomData<V>,
}

impl<V, C: Fn(&V, &V) -> bool> MinMaxAggregator<V, C> {
	pub fn new(less: C) -> Self {
		MinMaxAggregator {
			less,
			phantom: PhantomData,
		}
	}

	fn fold_into(&self, acc: &mut Option<MinMax<V>>, min: &V, max: &V)
	where
		V: Clone,
	{
		match acc {
			None => {
				*acc = Some(MinMax {
					min: min.clone(),
					max: max.clone(),
				})
			}
			Some(acc) => {
				if (self.less)(min, &acc.min) {
					acc.min = min.clone();
				}
				if (self.less)(&acc.max, max) {
					acc.max = max.clone();
				}
			}
		}
	}
}

impl<V: Ord> MinMaxAggregator<V> {
	/// Compares the values by their [`Ord`] instance.
	pub fn natural() -> Self {
		MinMaxAggregator::new(natural_less::<V> as LessFn<V>)
	}
}

impl<V: Ord> Default for MinMaxAggregator<V> {
	fn default() -> Self {
		MinMaxAggregator::natural()
	}
}

impl<V: Clone, C: Fn(&V, &V) -> bool> Aggregator for MinMaxAggregator<V, C> {
	type Value = V;
	type Aggregate = MinMaxAggregate<V>;
	/// `None` if the range holds no keys.
	type View<'a> = Option<MinMax<V>> where Self: 'a;

	fn from_value(&self, value: V) -> MinMaxAggregate<V> {
		MinMaxAggregate {
			min: value.clone(),
			max: value.clone(),
			value,
		}
	}

	fn pop_up(
		&self,
		node: &mut MinMaxAggregate<V>,
		left: Option<&MinMaxAggregate<V>>,
		right: Option<&MinMaxAggregate<V>>,
	) {
		node.min = node.value.clone();
		node.max = node.value.clone();
		for son in [left, right].into_iter().flatten() {
			if (self.less)(&son.min, &node.min) {
				node.min = son.min.clone();
			}
			if (self.less)(&node.max, &son.max) {
				node.max = son.max.clone();
			}
		}
	}

	// read-side only: nothing is ever pending
	fn push_down(
		&self,
		_: &mut MinMaxAggregate<V>,
		_: Option<&mut MinMaxAggregate<V>>,
		_: Option<&mut MinMaxAggregate<V>>,
	) {
	}

	fn value(&self, node: &MinMaxAggregate<V>) -> V {
		node.value.clone()
	}

	fn range_view<'a>(
		&'a self,
		subtrees: Vec<&'a mut MinMaxAggregate<V>>,
		nodes: Vec<&'a mut MinMaxAggregate<V>>,
	) -> Option<MinMax<V>> {
		let mut res = None;
		for piece in subtrees.iter() {
			self.fold_into(&mut res, &piece.min, &piece.max);
		}
		for piece in nodes.iter() {
			self.fold_into(&mut res, &piece.value, &piece.value);
		}
		res
	}
}

/// The payload of [`RangeAssignAggregator`].
/// If `pending` is set, `value` still has to be assigned to the whole subtree below the node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeAssignAggregate<V> {
	value: V,
	pending: bool,
}

impl<V> RangeAssignAggregate<V> {
	/// Whether this node holds an assignment that its children haven't received yet.
	pub fn is_pending(&self) -> bool {
		self.pending
	}
}

/// Assigns a value to every key of a range at once.
/// The assignment is stamped on the roots of the subtrees making up the range,
/// and only reaches a deeper node when the tree descends into it.
pub struct RangeAssignAggregator<V> {
	phantom: PhantomData<V>,
}

impl<V> RangeAssignAggregator<V> {
	pub fn new() -> Self {
		RangeAssignAggregator {
			phantom: PhantomData,
		}
	}
}

impl<V> Default for RangeAssignAggregator<V> {
	fn default() -> Self {
		RangeAssignAggregator::new()
	}
}

/// A handle on the pieces of a range, returned by [`RangeAssignAggregator::range_view`].
/// It borrows the tree, so it has to be used before the tree is touched again.
pub struct RangeAssignView<'a, V> {
	subtrees: Vec<&'a mut RangeAssignAggregate<V>>,
	nodes: Vec<&'a mut RangeAssignAggregate<V>>,
}

impl<'a, V: Clone> RangeAssignView<'a, V> {
	/// Assigns `value` to every key in the range.
	pub fn assign(&mut self, value: V) {
		for piece in self.subtrees.iter_mut() {
			piece.value = value.clone();
			piece.pending = true;
		}
		for piece in self.nodes.iter_mut() {
			piece.value = value.clone();
		}
	}

	/// Returns true if the range holds no keys.
	pub fn is_empty(&self) -> bool {
		self.subtrees.is_empty() && self.nodes.is_empty()
	}
}

impl<V: Clone> Aggregator for RangeAssignAggregator<V> {
	type Value = V;
	type Aggregate = RangeAssignAggregate<V>;
	type View<'a> = RangeAssignView<'a, V> where Self: 'a;

	fn from_value(&self, value: V) -> RangeAssignAggregate<V> {
		RangeAssignAggregate {
			value,
			pending: false,
		}
	}

	fn pop_up(
		&self,
		_: &mut RangeAssignAggregate<V>,
		_: Option<&RangeAssignAggregate<V>>,
		_: Option<&RangeAssignAggregate<V>>,
	) {
	}

	fn push_down(
		&self,
		node: &mut RangeAssignAggregate<V>,
		left: Option<&mut RangeAssignAggregate<V>>,
		right: Option<&mut RangeAssignAggregate<V>>,
	) {
		if !node.pending {
			return;
		}
		for son in [left, right].into_iter().flatten() {
			son.value = node.value.clone();
			son.pending = true;
		}
		node.pending = false;
	}

	fn value(&self, node: &RangeAssignAggregate<V>) -> V {
		node.value.clone()
	}

	fn range_view<'a>(
		&'a self,
		subtrees: Vec<&'a mut RangeAssignAggregate<V>>,
		nodes: Vec<&'a mut RangeAssignAggregate<V>>,
	) -> RangeAssignView<'a, V> {
		RangeAssignView { subtrees, nodes }
	}
}
