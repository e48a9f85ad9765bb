//! Tree model for the visualizer.
//!
//! This module provides a persistent binary search tree. Insertions return a
//! new tree value and share every untouched subtree with the previous one, so
//! a renderer holding an older tree never observes a change underneath it.

mod node;

pub use node::{BstNode, BstTree, Key, insert};
