//! Ordered binary search tree with per-node metrics
//!
//! Nodes are stored in an arena and linked by `NodeId`:
//! - insert descends to an empty slot, then walks back up through parent
//!   links updating height, depth and balance of every ancestor
//! - remove splices out a leaf or single-child node; a node with two children
//!   takes its in-order predecessor's entry and the predecessor is spliced out
//! - printing starts at the leftmost node and chases successors
//!
//! Balance factors are tracked, not enforced: out-of-balance nodes are handed
//! to the tree's `Rebalance` strategy, which by default does nothing.

mod node;
mod traversal;
mod validate;

pub use node::{Node, NodeDisplay, NodeId, NodeMetrics};
pub use traversal::Iter;
pub use validate::InvariantError;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Write};

use generational_arena::Arena;
use tracing::{debug, trace};

use crate::config::TreeConfig;
use crate::rebalance::{NoRebalance, Rebalance, Structure};
use traversal::{leftmost, post_order, rightmost};

/// Tree-level metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TreeMetrics {
    /// Number of live nodes
    pub occupancy: usize,
    /// Deepest insertion path ever taken, in edges (never lowered by removal)
    pub height: usize,
    /// `height + 1` once the tree has held a node
    pub depth: usize,
    /// 1 once the tree has held a node
    pub width: usize,
}

/// Binary search tree of unique entries
#[derive(Debug)]
pub struct Tree<T, R = NoRebalance> {
    /// Node storage; every live node is reachable from `root`
    nodes: Arena<Node<T>>,

    root: Option<NodeId>,

    occupancy: usize,
    height: usize,
    depth: usize,
    width: usize,

    config: TreeConfig,
    rebalancer: R,
}

impl<T> Tree<T, NoRebalance> {
    /// Create an empty tree with the default configuration
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Create an empty tree with `config`
    pub fn with_config(config: TreeConfig) -> Self {
        Self::with_rebalancer(config, NoRebalance)
    }
}

impl<T> Default for Tree<T, NoRebalance> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> Tree<T, R> {
    /// Create an empty tree that hands out-of-balance nodes to `rebalancer`
    pub fn with_rebalancer(config: TreeConfig, rebalancer: R) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            occupancy: 0,
            height: 0,
            depth: 0,
            width: 0,
            config,
            rebalancer,
        }
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.occupancy
    }

    /// True when the tree holds no nodes
    pub fn is_empty(&self) -> bool {
        self.occupancy == 0
    }

    /// Deepest insertion path, in edges
    pub fn height(&self) -> usize {
        self.height
    }

    /// Always `height + 1` once a node has been inserted
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Width marker, 1 once a node has been inserted
    pub fn width(&self) -> usize {
        self.width
    }

    /// All tree-level metrics
    pub fn metrics(&self) -> TreeMetrics {
        TreeMetrics {
            occupancy: self.occupancy,
            height: self.height,
            depth: self.depth,
            width: self.width,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Rebalance strategy
    pub fn rebalancer(&self) -> &R {
        &self.rebalancer
    }

    /// Root node, None when empty
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Node holding the smallest entry
    pub fn first_node(&self) -> Option<NodeId> {
        if self.occupancy == 0 {
            return None;
        }
        self.root.map(|root| leftmost(&self.nodes, root))
    }

    /// Node holding the next larger entry
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?;
        node::successor(&self.nodes, id)
    }

    /// Entries in ascending order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.first_node(), self.occupancy)
    }

    /// Remove every node and reset the tree metrics
    pub fn clear(&mut self) {
        let freed = self.delete_nodes(self.root);
        self.root = None;
        self.occupancy = 0;
        self.height = 0;
        self.depth = 0;
        self.width = 0;
        debug!(freed, "tree cleared");
    }

    /// Free the subtree at `start` in post-order (left, right, node).
    ///
    /// Links into the freed subtree are left dangling; callers reset them.
    fn delete_nodes(&mut self, start: Option<NodeId>) -> usize {
        let order = post_order(&self.nodes, start);
        for id in &order {
            self.nodes.remove(id.0);
        }
        order.len()
    }

    /// Point whatever referenced `old` (parent slot or root) at `new`,
    /// and reparent `new` to `old`'s parent.
    fn replace_child(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self.nodes[old.0].parent;
        match parent {
            None => self.root = new,
            Some(parent) => {
                let slots = &mut self.nodes[parent.0];
                if slots.left == Some(old) {
                    slots.left = new;
                } else {
                    slots.right = new;
                }
            }
        }

        if let Some(child) = new {
            self.nodes[child.0].parent = parent;
        }
    }
}

impl<T: Ord, R> Tree<T, R> {
    /// Whether `entry` is stored in the tree
    pub fn find<Q>(&self, entry: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(entry).is_some()
    }

    /// Node holding `entry`
    pub fn locate<Q>(&self, entry: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if self.occupancy == 0 {
            return None;
        }

        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            current = match entry.cmp(node.entry.borrow()) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Remove `entry`. Returns false if it is not present.
    ///
    /// The freed node is always a leaf or single-child node: for a node with
    /// two children the in-order predecessor's entry moves into it and the
    /// predecessor is spliced out, its left subtree relinked to its parent.
    /// Levels and tree metrics are not recomputed.
    pub fn remove<Q>(&mut self, entry: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(target) = self.locate(entry) else {
            debug!(occupancy = self.occupancy, "remove: entry not present");
            return false;
        };

        let (left, right) = {
            let node = &self.nodes[target.0];
            (node.left, node.right)
        };

        let spliced = match (left, right) {
            (Some(left), Some(_)) => {
                let predecessor = rightmost(&self.nodes, left);
                let orphan = self.nodes[predecessor.0].left;
                self.replace_child(predecessor, orphan);
                predecessor
            }
            (Some(child), None) | (None, Some(child)) => {
                self.replace_child(target, Some(child));
                target
            }
            (None, None) => {
                self.replace_child(target, None);
                target
            }
        };

        if let Some(freed) = self.nodes.remove(spliced.0) {
            if spliced != target {
                self.nodes[target.0].entry = freed.entry;
            }
        }
        self.occupancy -= 1;

        debug!(
            occupancy = self.occupancy,
            two_children = spliced != target,
            "remove: entry removed"
        );
        true
    }
}

impl<T: Ord, R: Rebalance<T>> Tree<T, R> {
    /// Insert `entry`. Returns false, leaving the tree unchanged, if it is
    /// already present.
    pub fn insert(&mut self, entry: T) -> bool {
        let Some(root) = self.root else {
            let id = NodeId(self.nodes.insert(Node::leaf(entry)));
            self.root = Some(id);
            self.occupancy = 1;
            self.depth = self.height + 1;
            self.width = 1;
            debug!(occupancy = 1, "insert: new root");
            return true;
        };

        let mut current = root;
        let mut traversals = 0;
        let leaf = loop {
            let node = &self.nodes[current.0];
            let go_right = match entry.cmp(&node.entry) {
                Ordering::Equal => {
                    debug!(level = traversals, "insert: duplicate rejected");
                    return false;
                }
                Ordering::Greater => true,
                Ordering::Less => false,
            };
            traversals += 1;

            let slot = if go_right { node.right } else { node.left };
            match slot {
                Some(next) => current = next,
                None => {
                    let mut leaf = Node::leaf(entry);
                    leaf.parent = Some(current);
                    leaf.level = traversals;
                    let id = NodeId(self.nodes.insert(leaf));

                    let parent = &mut self.nodes[current.0];
                    if go_right {
                        parent.right = Some(id);
                    } else {
                        parent.left = Some(id);
                    }
                    break id;
                }
            }
        };

        self.occupancy += 1;
        if traversals > self.height {
            self.height = traversals;
            self.depth = self.height + 1;
        }

        self.propagate_metrics(leaf);

        debug!(
            occupancy = self.occupancy,
            level = traversals,
            height = self.height,
            "insert: entry added"
        );
        true
    }

    /// Walk from a new leaf to the root, growing ancestor heights and
    /// recomputing balance factors.
    fn propagate_metrics(&mut self, leaf: NodeId) {
        let mut up_traversals = 0;
        let mut current = leaf;

        while let Some(parent) = self.nodes[current.0].parent {
            up_traversals += 1;

            let node = &mut self.nodes[parent.0];
            if up_traversals > node.height {
                node.height += 1;
                node.depth += 1;
            }

            if let Some(balance) = self.nodes[parent.0].computed_balance(&self.nodes) {
                self.nodes[parent.0].balance = balance;
            }

            let node = &self.nodes[parent.0];
            trace!(
                up_traversals,
                height = node.height,
                balance = node.balance,
                "ancestor updated"
            );

            if self.config.is_unbalanced(node.balance) {
                self.rebalancer
                    .rebalance(Structure::new(&mut self.nodes, &mut self.root), parent);
            }

            current = parent;
        }
    }
}

impl<T: fmt::Display, R> Tree<T, R> {
    /// Renderer for a single node with its metrics and neighbours.
    ///
    /// Formatting panics if `id` no longer refers to a live node.
    pub fn display_node(&self, id: NodeId) -> NodeDisplay<'_, T> {
        NodeDisplay::new(&self.nodes, id)
    }

    /// Write tree metrics followed by every node in ascending order,
    /// numbered from 1.
    pub fn write_tree<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Tree attributes :: occupancy: {} :: height: {} :: depth: {} :: width: {}\n",
            self.occupancy, self.height, self.depth, self.width
        )?;

        let Some(mut node) = self.first_node() else {
            return writeln!(out, "The tree is empty!");
        };

        let mut count = 1;
        while let Some(next) = self.successor(node) {
            writeln!(out, "{}. {}", count, self.display_node(node))?;
            node = next;
            count += 1;
        }

        // Last (maximum) node
        writeln!(out, "{}. {}", count, self.display_node(node))
    }

    /// `write_tree` to standard output
    pub fn print_tree(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_tree(&mut out)?;
        out.flush()
    }
}

impl<'a, T, R> IntoIterator for &'a Tree<T, R> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, R> Drop for Tree<T, R> {
    fn drop(&mut self) {
        self.delete_nodes(self.root);
    }
}
