// This is the engine of the splay tree: the rotations, the directed splay, and the cleanup.
//
// The splay is top-down. While descending, the nodes left behind are detached and
// parked on one of two local stacks, one per direction of descent. When the descent
// is over, the stacks are emptied back into the tree as the sons of the new root,
// rebuilding every parked node on the way. Until that happens, the parked nodes
// have stale sizes and aggregates, and are owned by the `Splayer` instead of the tree.

use super::super::basic_tree::*;
use crate::aggregators::Aggregator;
use crate::locators::*;

type Stack<K, A> = Vec<Box<BasicNode<K, A>>>;

/// An in-flight splay over a tree.
///
/// The splayer will automatically put the parked nodes back into the tree when dropped,
/// so the tree is whole again after every splay, even if [`Splayer::finish`] isn't called.
#[derive(destructure)]
pub struct Splayer<'a, K, G: Aggregator> {
    /// The slot of the current root. Shrinks into a subtree of the original tree
    /// while descending.
    tree: &'a mut BasicTree<K, G::Aggregate>,
    aggregator: &'a G,
    /// `detached[Left]` holds the nodes that were left by stepping to their left son,
    /// i.e., the nodes greater than everything still in `tree`, and vice versa.
    /// The top of each stack is the node that was detached last.
    detached: [Stack<K, G::Aggregate>; 2],
}

enum Step {
    Stop,
    Zig(Side),
    ZigZig(Side),
    /// Two single steps in different directions.
    ZigZag(Side, Side),
}

fn side_of(res: LocResult) -> Option<Side> {
    match res {
        LocResult::Accept => None,
        LocResult::GoLeft => Some(Side::Left),
        LocResult::GoRight => Some(Side::Right),
    }
}

impl<'a, K, G: Aggregator> Splayer<'a, K, G> {
    pub fn new(tree: &'a mut BasicTree<K, G::Aggregate>, aggregator: &'a G) -> Self {
        Splayer {
            tree,
            aggregator,
            detached: [vec![], vec![]],
        }
    }

    /// One step down to the `side` son of the root.
    /// The root is accessed and parked, and its son becomes the root.
    /// Returns [`None`] if this is an empty tree or if the root has no such son.
    pub fn zig(&mut self, side: Side) -> Option<()> {
        let node = self.tree.node_mut()?;
        node.access(self.aggregator);
        let son = node.child_mut(side).take();
        if son.is_empty() {
            return None;
        }
        let parent = std::mem::replace(&mut *self.tree, son);
        if let Some(parent) = parent.into_node_boxed() {
            self.detached[side as usize].push(parent);
        }
        Some(())
    }

    /// Two steps down in the same direction, rotating the root below its son
    /// before the son gets parked. This compression is what keeps the amortized
    /// cost logarithmic: a long path in one direction gets folded in half.
    /// Returns [`None`], leaving the tree unchanged, if there is no grandson on that side.
    pub fn zigzig(&mut self, side: Side) -> Option<()> {
        let aggregator = self.aggregator;
        let node = self.tree.node_mut()?;
        node.access(aggregator);
        let son = node.child_mut(side).node_mut()?;
        son.access(aggregator);
        let grandson = son.child_mut(side).take();
        if grandson.is_empty() {
            return None;
        }

        // rotate: the root takes over the inner subtree of its son
        let inner = son.child_mut(side.flip()).take();
        let son = std::mem::replace(node.child_mut(side), inner);
        node.rebuild(aggregator);
        let parent = std::mem::replace(&mut *self.tree, grandson);

        if let Some(mut son) = son.into_node_boxed() {
            *son.child_mut(side.flip()) = parent;
            self.detached[side as usize].push(son);
        }
        Some(())
    }

    /// Decides the next move by looking two levels ahead.
    fn plan<L: Locator<K>>(&self, locator: &mut L) -> Step {
        let node = match self.tree.node() {
            Some(node) => node,
            None => return Step::Stop,
        };
        let first = match side_of(locator.locate(node.key(), node.left.size())) {
            Some(side) => side,
            None => return Step::Stop,
        };
        let son = match node.child(first).node() {
            Some(son) => son,
            None => return Step::Stop,
        };
        let second = match side_of(locator.locate(son.key(), son.left.size())) {
            Some(side) => side,
            None => return Step::Zig(first),
        };

        if son.child(second).is_empty() {
            Step::Zig(first)
        } else if first == second {
            Step::ZigZig(first)
        } else {
            Step::ZigZag(first, second)
        }
    }

    /// Descends as the locator directs, until it accepts or runs out of sons.
    /// The node it stops at is the root afterwards.
    pub fn descend<L: Locator<K>>(&mut self, locator: &mut L) {
        loop {
            match self.plan(locator) {
                Step::Stop => break,
                Step::Zig(side) => {
                    self.zig(side);
                    break;
                }
                Step::ZigZig(side) => {
                    self.zigzig(side);
                }
                Step::ZigZag(first, second) => {
                    self.zig(first);
                    self.zig(second);
                }
            }
        }
    }

    /// Empties the stack of nodes detached going `side`, hanging them on the opposite
    /// side of the root. The last detached node is reattached first, as the deepest one.
    fn cleanup(&mut self, side: Side) {
        let aggregator = self.aggregator;
        let stack = &mut self.detached[side as usize];
        if stack.is_empty() {
            return;
        }
        // nodes are only parked by moving onto a non-empty son, so the root exists
        let root = match self.tree.node_mut() {
            Some(root) => root,
            None => return,
        };
        root.access(aggregator);

        let mut son = root.child_mut(side.flip()).take();
        while let Some(mut node) = stack.pop() {
            *node.child_mut(side) = son;
            node.rebuild(aggregator);
            son = BasicTree::Root(node);
        }
        *root.child_mut(side.flip()) = son;
    }

    fn reattach(&mut self) {
        self.cleanup(Side::Left);
        self.cleanup(Side::Right);
        debug_assert!(
            self.detached.iter().all(Vec::is_empty),
            "splay returned with detached nodes"
        );

        let aggregator = self.aggregator;
        if let Some(root) = self.tree.node_mut() {
            root.access(aggregator);
            root.rebuild(aggregator);
        }
    }

    /// Puts every parked node back, and returns the whole tree.
    pub fn finish(mut self) -> &'a mut BasicTree<K, G::Aggregate> {
        self.reattach();
        let (tree, _, _) = self.destructure();
        tree
    }
}

/// This implementation exists in order to reattach the parked nodes
/// when the splayer gets dropped
impl<'a, K, G: Aggregator> Drop for Splayer<'a, K, G> {
    fn drop(&mut self) {
        self.reattach();
    }
}

/// Splays the node the locator leads to, to the root of `tree`.
pub fn splay<K, G, L>(tree: &mut BasicTree<K, G::Aggregate>, aggregator: &G, mut locator: L)
where
    G: Aggregator,
    L: Locator<K>,
{
    Splayer::new(tree, aggregator).descend(&mut locator);
}
