//! Concurrent in-memory folder hierarchy.
//!
//! This module provides a tree of named folders addressed by absolute paths,
//! where every folder guards its own children with a readers-writer lock.

mod child_table;
mod error;
mod node;
mod tree;

#[cfg(test)]
mod concurrency_tests;

pub use child_table::ChildTable;
pub use error::{ECYCLE, TreeError};
pub use tree::Tree;
