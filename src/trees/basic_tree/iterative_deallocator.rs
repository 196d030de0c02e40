use super::*;

/// The auto-generated deallocation code for [`BasicTree`] is recursive.
/// Since splay trees can have arbitrary depth (inserting keys in increasing order
/// builds a single long path), deallocating a large splay tree could overflow the stack.
///
/// Therefore, we have this tiny struct in order to deallocate a [`BasicTree`] in an iterative way.
/// From the user's perspective this is a function from the `basic_tree` module.
struct IterativeDeallocator<K, A> {
	stack: Vec<Box<BasicNode<K, A>>>,
}

impl<K, A> IterativeDeallocator<K, A> {
	fn step(&mut self) -> Option<()> {
		let mut node = self.stack.pop()?;
		self.push(node.left.take());
		self.push(node.right.take());
		Some(())
	}

	fn push(&mut self, tree: BasicTree<K, A>) {
		if let Some(node) = tree.into_node_boxed() {
			self.stack.push(node);
		}
	}
}

/// Replaces the tree with an empty tree, and deallocates the tree iteratively.
/// Input is a reference and not an owned value so that this function can get
/// called in `Drop` implementations.
pub fn deallocate_iteratively<K, A>(tree: &mut BasicTree<K, A>) {
	let my_tree = tree.take();
	let mut deallocator = IterativeDeallocator { stack: vec![] };
	deallocator.push(my_tree);
	while deallocator.step().is_some() {}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deallocates_a_long_path() {
		let mut tree: BasicTree<u32, ()> = BasicTree::new();
		for key in 0..1_000_000 {
			let mut node = BasicNode::new(key, ());
			node.left = tree;
			tree = BasicTree::from_node(node);
		}
		deallocate_iteratively(&mut tree);
		assert!(tree.is_empty());
	}
}
