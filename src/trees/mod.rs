//! This module contains the tree types.
//! [`basic_tree`] is the plain node model, and [`splay`] builds the self adjusting
//! keyed tree on top of it.

pub mod basic_tree;
pub mod splay;
