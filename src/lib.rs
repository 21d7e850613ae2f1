//! This crate exposes a persistent Binary Search Tree (BST) over strings,
//! mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert and find stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores the value
//! that was inserted and has two child trees, either of which may be empty.
//! The ordering invariant of this BST is:
//!
//! 1. For every `Node` in the tree, all the values in its left subtree are
//!    less than its own value.
//! 2. For every `Node` in the tree, all the values in its right subtree are
//!    greater than or equal to its own value.
//!
//! > Equal values go right, so inserting a value twice stores it twice.
//!
//! Searching for a value takes `O(height)` where `height` is the longest path
//! from the root `Node` to an empty subtree. This tree does no balancing, so
//! inserting values in sorted order produces a tree whose height equals its
//! size.
//!
//! ## Persistence
//!
//! Trees are never modified. [`insert`][functional::Tree::insert] returns a
//! new tree that shares every subtree the insertion didn't touch with the
//! original, and the original stays valid.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod functional;
