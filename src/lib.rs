//! # Metric-tracking binary search tree
//!
//! An ordered collection of unique entries stored as a binary search tree
//! whose nodes carry structural metrics:
//!
//! 1. **Height / depth**: grown along the insertion path as new leaves land
//! 2. **Level**: edges from the root, fixed when a node is inserted
//! 3. **Balance factor**: right height minus left height, recomputed on insert
//!
//! Balance is tracked, not enforced. Nodes that drift past the configured
//! threshold are handed to a pluggable [`Rebalance`] strategy whose default
//! ([`NoRebalance`]) leaves the shape alone.
//!
//! ## Usage Example
//!
//! ```
//! use arbor::Tree;
//!
//! let mut tree = Tree::new();
//! for fruit in ["banana", "apple", "cherry"] {
//!     tree.insert(fruit);
//! }
//! assert!(!tree.insert("apple"));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["apple", "banana", "cherry"]);
//!
//! assert!(tree.remove("banana"));
//! assert!(!tree.find("banana"));
//! assert_eq!(tree.len(), 2);
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod config;    // Tree configuration
pub mod driver;    // File-to-tree loader used by the CLI
pub mod rebalance; // Pluggable rebalancing hook
pub mod tree;      // Nodes, tree operations, traversal

// Re-exports for convenience
pub use config::TreeConfig;
pub use driver::{fill_tree, load_tree, DriverError, LoadStats};
pub use rebalance::{NoRebalance, Rebalance, Structure};
pub use tree::{InvariantError, Iter, Node, NodeId, NodeMetrics, Tree, TreeMetrics};
