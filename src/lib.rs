//! A splay tree over keys, augmented with a pluggable [`Aggregator`].
//!
//! Every node carries a payload that is recombined bottom-up from its sons, and may
//! carry pending updates that are propagated top-down before anything below it is read.
//! This turns the tree into a range query and range update engine over a set of keys
//! that can grow and shrink.
//!
//!```
//! use lazy_splay::*;
//!
//! let mut tree = SplayTree::new(MinMaxAggregator::natural());
//! tree.put(42, "foo");
//! tree.put(-10, "bar");
//! tree.put(0, "baz");
//! tree.put(10, "quux");
//! tree.remove(&10);
//!
//! let mut pairs = vec![];
//! tree.each(|key, value| pairs.push((*key, value)));
//! assert_eq!(pairs, vec![(-10, "bar"), (0, "baz"), (42, "foo")]);
//!
//! assert_eq!(tree.range(&-10, &10).map(|view| view.min), Some("bar"));
//!```

#[macro_use]
extern crate derive_destructure;

pub mod aggregators;
pub mod locators;
pub mod trees;

pub use aggregators::*;
pub use trees::splay::SplayTree;
