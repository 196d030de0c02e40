//! The aggregator module defines what every node of a tree carries besides its key,
//! and how that payload is combined and updated.
//!
//! An aggregator works in two directions:
//! * Bottom-up: after the children of a node change, [`Aggregator::pop_up`] recomputes
//!   the node's payload from its own value and its children's payloads. This is how
//!   range queries (for example the minimum over a range of keys) are answered without
//!   visiting every key.
//! * Top-down: a payload may hold an update that still has to be applied to the whole
//!   subtree. [`Aggregator::push_down`] hands such a pending update to the children and
//!   clears it, and the tree calls it before it reads or moves a node's children.
//!   Updates therefore only travel as far down as someone actually looks.
//!
//! The tree never inspects the payload itself. It only calls these five functions,
//! so the same tree can serve any aggregation scheme.

pub mod example_aggregators;
pub use example_aggregators::*;

/// The aggregation strategy of a tree.
///
/// Implementations must only change payloads, never the shape of the tree,
/// and must be consistent: calling `push_down` twice in a row must have the same effect
/// as calling it once.
pub trait Aggregator {
	/// The value the user associates with a key.
	type Value;
	/// The payload stored at every node.
	type Aggregate;
	/// The result of a range query. It may borrow the payloads of the range
	/// mutably, in order to update them.
	type View<'a>
	where
		Self: 'a;

	/// Creates the payload of a node that holds only `value`.
	fn from_value(&self, value: Self::Value) -> Self::Aggregate;

	/// Recomputes `node` from its own value and the payloads of its children.
	/// Called on a node immediately after either of its children changed.
	fn pop_up(
		&self,
		node: &mut Self::Aggregate,
		left: Option<&Self::Aggregate>,
		right: Option<&Self::Aggregate>,
	);

	/// Propagates the pending updates of `node` to its children, and clears them.
	/// Called on a node before either of its children is read or rotated.
	fn push_down(
		&self,
		node: &mut Self::Aggregate,
		left: Option<&mut Self::Aggregate>,
		right: Option<&mut Self::Aggregate>,
	);

	/// Returns the value stored in the node itself.
	fn value(&self, node: &Self::Aggregate) -> Self::Value;

	/// Builds the view of a range out of the pieces that make it up.
	/// `subtrees` are payloads whose whole subtree lies in the range,
	/// `nodes` are payloads of nodes that lie in the range by themselves,
	/// excluding their children.
	/// Both are empty if the range contains no keys.
	fn range_view<'a>(
		&'a self,
		subtrees: Vec<&'a mut Self::Aggregate>,
		nodes: Vec<&'a mut Self::Aggregate>,
	) -> Self::View<'a>;
}

/// A plain `<` comparison, used wherever no comparator is given.
pub type LessFn<T> = fn(&T, &T) -> bool;

/// The natural order of `T`.
pub fn natural_less<T: Ord>(a: &T, b: &T) -> bool {
	a < b
}
