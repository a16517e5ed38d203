//! Rebalancing hook
//!
//! Insertion computes a balance factor for every ancestor of the new leaf.
//! When one falls outside the configured threshold the tree hands that node
//! to its `Rebalance` strategy. The default strategy only records the event:
//! balance is tracked, never enforced.

use std::fmt;

use generational_arena::Arena;

use crate::tree::{Node, NodeId};

/// Strategy invoked on nodes whose balance exceeds the threshold.
///
/// Implementations may restructure links through `Structure`; the insert
/// walk-up resumes from the parent `node` has after the call returns.
pub trait Rebalance<T>: fmt::Debug {
    /// Handle one out-of-balance node
    fn rebalance(&mut self, structure: Structure<'_, T>, node: NodeId);
}

/// Default strategy: leaves the tree untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRebalance;

impl<T> Rebalance<T> for NoRebalance {
    fn rebalance(&mut self, structure: Structure<'_, T>, node: NodeId) {
        let node = structure.node(node);
        tracing::trace!(
            balance = node.balance(),
            height = node.height(),
            level = node.level(),
            "imbalance tracked, not corrected"
        );
    }
}

/// Mutable view of a tree's links handed to a rebalance strategy
pub struct Structure<'a, T> {
    nodes: &'a mut Arena<Node<T>>,
    root: &'a mut Option<NodeId>,
}

impl<T> fmt::Debug for Structure<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Structure")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .finish()
    }
}

impl<'a, T> Structure<'a, T> {
    pub(crate) fn new(nodes: &'a mut Arena<Node<T>>, root: &'a mut Option<NodeId>) -> Self {
        Self { nodes, root }
    }

    /// Node behind `id`
    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    /// Current root
    pub fn root(&self) -> Option<NodeId> {
        *self.root
    }

    /// Replace the root; the new root's parent link is cleared
    pub fn set_root(&mut self, root: Option<NodeId>) {
        if let Some(id) = root {
            self.nodes[id.0].parent = None;
        }
        *self.root = root;
    }

    /// Link `child` as the left child of `parent`
    pub fn set_left(&mut self, parent: NodeId, child: Option<NodeId>) {
        self.nodes[parent.0].left = child;
        if let Some(id) = child {
            self.nodes[id.0].parent = Some(parent);
        }
    }

    /// Link `child` as the right child of `parent`
    pub fn set_right(&mut self, parent: NodeId, child: Option<NodeId>) {
        self.nodes[parent.0].right = child;
        if let Some(id) = child {
            self.nodes[id.0].parent = Some(parent);
        }
    }

    /// Overwrite a node's stored height
    pub fn set_height(&mut self, id: NodeId, height: usize) {
        self.nodes[id.0].height = height;
    }

    /// Recompute a node's balance factor from its children; a leaf gets 0
    pub fn refresh_balance(&mut self, id: NodeId) {
        let balance = self.nodes[id.0].computed_balance(self.nodes).unwrap_or(0);
        self.nodes[id.0].balance = balance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreeConfig;
    use crate::tree::Tree;

    #[derive(Debug, Default)]
    struct Recording {
        seen: Vec<(u32, isize)>,
    }

    impl Rebalance<u32> for Recording {
        fn rebalance(&mut self, structure: Structure<'_, u32>, node: NodeId) {
            let node = structure.node(node);
            self.seen.push((*node.entry(), node.balance()));
        }
    }

    /// Rotates right-heavy nodes left, keeping heights and balances current
    #[derive(Debug, Default)]
    struct RotateLeft {
        rotations: usize,
    }

    fn subtree_height(structure: &Structure<'_, u32>, id: NodeId) -> usize {
        let node = structure.node(id);
        [node.left(), node.right()]
            .into_iter()
            .flatten()
            .map(|child| structure.node(child).height() + 1)
            .max()
            .unwrap_or(0)
    }

    impl Rebalance<u32> for RotateLeft {
        fn rebalance(&mut self, mut structure: Structure<'_, u32>, node: NodeId) {
            let Some(pivot) = structure.node(node).right() else {
                return;
            };
            let parent = structure.node(node).parent();
            let inner = structure.node(pivot).left();

            structure.set_right(node, inner);
            match parent {
                None => structure.set_root(Some(pivot)),
                Some(parent) if structure.node(parent).left() == Some(node) => {
                    structure.set_left(parent, Some(pivot))
                }
                Some(parent) => structure.set_right(parent, Some(pivot)),
            }
            structure.set_left(pivot, Some(node));

            for id in [node, pivot] {
                let height = subtree_height(&structure, id);
                structure.set_height(id, height);
                structure.refresh_balance(id);
            }
            self.rotations += 1;
        }
    }

    #[test]
    fn test_rotation_through_structure() {
        let mut tree: Tree<u32, RotateLeft> =
            Tree::with_rebalancer(TreeConfig::default(), RotateLeft::default());
        for entry in 1..=50 {
            assert!(tree.insert(entry));
        }

        assert!(tree.rebalancer().rotations > 0);
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(tree.len(), 50);
        assert!(tree.iter().copied().eq(1..=50));
        assert!((1..=50).all(|entry| tree.find(&entry)));

        let root = tree.root().expect("non-empty tree has a root");
        let root = tree.node(root).expect("root is live");
        assert_ne!(*root.entry(), 1);
        assert_eq!(root.parent(), None);
    }

    #[test]
    fn test_first_rotation_promotes_right_child() {
        let mut tree: Tree<u32, RotateLeft> =
            Tree::with_rebalancer(TreeConfig::default(), RotateLeft::default());
        for entry in 1..=4 {
            tree.insert(entry);
        }

        // Node 1 reaches balance 3 on the fourth insert and rotates under 2
        assert_eq!(tree.rebalancer().rotations, 1);
        let root = tree.root().and_then(|id| tree.node(id)).expect("root");
        assert_eq!(*root.entry(), 2);
        let left = root.left().and_then(|id| tree.node(id)).expect("left child");
        assert_eq!(*left.entry(), 1);
        assert!(left.is_leaf());
        assert_eq!(left.height(), 0);
        assert_eq!(left.balance(), 0);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_hook_fires_past_threshold() {
        let mut tree: Tree<u32, Recording> =
            Tree::with_rebalancer(TreeConfig::default(), Recording::default());
        for entry in 1..=3 {
            tree.insert(entry);
        }
        assert!(tree.rebalancer().seen.is_empty());

        // Chain 1 -> 2 -> 3 -> 4 puts node 1 at balance 3
        tree.insert(4);
        assert_eq!(tree.rebalancer().seen, vec![(1, 3)]);
    }

    #[test]
    fn test_default_strategy_keeps_shape() {
        let mut tree: Tree<u32> = Tree::new();
        for entry in 1..=6 {
            assert!(tree.insert(entry));
        }
        let root = tree.root().expect("non-empty tree has a root");
        assert_eq!(tree.node(root).map(|node| *node.entry()), Some(1));
        assert_eq!(tree.node(root).map(Node::balance), Some(5));
        assert_eq!(tree.height(), 5);
        assert!(tree.validate().is_ok());
    }
}
