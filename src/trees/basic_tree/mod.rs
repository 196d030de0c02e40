//! The basic tree module
//! This module implements the owned node model that the splay tree is built from.
//!
//! A node owns both of its children, so every node has exactly one owner.
//! While a splay is in progress, some nodes are temporarily owned by the splay itself
//! instead, see [`crate::trees::splay`].

// a separate file only for the deallocation routine
mod iterative_deallocator;

pub use iterative_deallocator::*;

use crate::aggregators::Aggregator;

/// The side of a son, or the direction of a step down the tree.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Side {
	Left,
	Right,
}

impl Side {
	pub fn flip(self) -> Side {
		match self {
			Side::Left => Side::Right,
			Side::Right => Side::Left,
		}
	}
}

/// A basic tree. might be empty.
pub enum BasicTree<K, A> {
	Empty,
	Root(Box<BasicNode<K, A>>),
}
use BasicTree::*;

impl<K, A> Default for BasicTree<K, A> {
	fn default() -> Self {
		Empty
	}
}

impl<K, A> BasicTree<K, A> {
	pub fn new() -> Self {
		Empty
	}

	pub fn from_node(node: BasicNode<K, A>) -> Self {
		Root(Box::new(node))
	}

	pub fn is_empty(&self) -> bool {
		matches!(self, Empty)
	}

	/// The number of nodes in this subtree. `0` for the empty tree.
	pub fn size(&self) -> usize {
		match self {
			Root(node) => node.size,
			Empty => 0,
		}
	}

	pub fn node(&self) -> Option<&BasicNode<K, A>> {
		match self {
			Root(node) => Some(&**node),
			Empty => None,
		}
	}

	pub fn node_mut(&mut self) -> Option<&mut BasicNode<K, A>> {
		match self {
			Root(node) => Some(&mut **node),
			Empty => None,
		}
	}

	pub fn into_node_boxed(self) -> Option<Box<BasicNode<K, A>>> {
		match self {
			Root(node) => Some(node),
			Empty => None,
		}
	}

	/// Takes the subtree out, and leaves `Empty` in its place.
	pub fn take(&mut self) -> BasicTree<K, A> {
		std::mem::replace(self, Empty)
	}

	pub fn aggregate(&self) -> Option<&A> {
		self.node().map(|node| &node.aggregate)
	}

	pub fn aggregate_mut(&mut self) -> Option<&mut A> {
		self.node_mut().map(|node| &mut node.aggregate)
	}

	/// Returns the nodes of the tree in order, without restructuring it.
	/// Iterative, since splay trees can get arbitrarily deep.
	pub fn nodes_in_order(&self) -> Vec<&BasicNode<K, A>> {
		let mut res = Vec::with_capacity(self.size());
		let mut stack = vec![];
		let mut current = self;
		loop {
			while let Root(node) = current {
				stack.push(&**node);
				current = &node.left;
			}
			match stack.pop() {
				None => break,
				Some(node) => {
					res.push(node);
					current = &node.right;
				}
			}
		}
		res
	}
}

/// A basic node. can be viewed as a non-empty basic tree: it always has at least one key.
pub struct BasicNode<K, A> {
	pub(crate) key: K,
	pub(crate) aggregate: A,
	/// The number of nodes in this node's subtree, including itself.
	pub(crate) size: usize,
	pub(crate) left: BasicTree<K, A>,
	pub(crate) right: BasicTree<K, A>,
}

impl<K, A> BasicNode<K, A> {
	pub fn new(key: K, aggregate: A) -> BasicNode<K, A> {
		BasicNode {
			key,
			aggregate,
			size: 1,
			left: Empty,
			right: Empty,
		}
	}

	pub fn key(&self) -> &K {
		&self.key
	}

	pub fn aggregate(&self) -> &A {
		&self.aggregate
	}

	pub fn size(&self) -> usize {
		self.size
	}

	pub fn child(&self, side: Side) -> &BasicTree<K, A> {
		match side {
			Side::Left => &self.left,
			Side::Right => &self.right,
		}
	}

	pub fn child_mut(&mut self, side: Side) -> &mut BasicTree<K, A> {
		match side {
			Side::Left => &mut self.left,
			Side::Right => &mut self.right,
		}
	}

	/// Remakes the size and the aggregate stored in this node, based on its sons.
	/// This is necessary when the sons might have changed.
	/// For example, after inserting a new node, all of the nodes from it to the root
	/// must be rebuilt, in order for the aggregates over the whole
	/// subtree to be accurate.
	pub fn rebuild<G>(&mut self, aggregator: &G)
	where
		G: Aggregator<Aggregate = A>,
	{
		self.size = 1 + self.left.size() + self.right.size();
		let BasicNode {
			aggregate,
			left,
			right,
			..
		} = self;
		aggregator.pop_up(aggregate, left.aggregate(), right.aggregate());
	}

	/// Pushes any updates stored in this node to its sons.
	/// Updates stored in nodes are supposed to be eventually applied to the
	/// whole subtree. Therefore, before touching the sons of a node,
	/// you must `access()` it.
	pub fn access<G>(&mut self, aggregator: &G)
	where
		G: Aggregator<Aggregate = A>,
	{
		let BasicNode {
			aggregate,
			left,
			right,
			..
		} = self;
		aggregator.push_down(aggregate, left.aggregate_mut(), right.aggregate_mut());
	}
}
