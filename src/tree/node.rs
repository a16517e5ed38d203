//! Tree node representation
//!
//! Nodes live in an arena owned by the tree and point at each other
//! through `NodeId`s:
//!   parent: non-owning back link (None at the root)
//!   left / right: children (None when absent)

use std::fmt;

use generational_arena::{Arena, Index};

/// Stable handle to a node inside a tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

/// Snapshot of the metric fields carried by a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct NodeMetrics {
    /// Edge height of the subtree rooted here
    pub height: usize,
    /// Edges from the root, fixed when the node was inserted
    pub level: usize,
    /// Set to 1 at construction, never maintained afterwards
    pub width: usize,
    /// Starts at 1 and grows with `height`
    pub depth: usize,
    /// Right height minus left height
    pub balance: isize,
}

/// Single tree node
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) entry: T,

    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,

    pub(crate) height: usize,
    pub(crate) level: usize,
    pub(crate) width: usize,
    pub(crate) depth: usize,
    pub(crate) balance: isize,
}

impl<T> Node<T> {
    /// Create a detached leaf holding `entry`
    pub(crate) fn leaf(entry: T) -> Self {
        Self {
            entry,
            parent: None,
            left: None,
            right: None,
            height: 0,
            level: 0,
            width: 1,
            depth: 1,
            balance: 0,
        }
    }

    /// Stored entry
    pub fn entry(&self) -> &T {
        &self.entry
    }

    /// Parent link
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Left child link
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Right child link
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Check if leaf (no children)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Edge height of this subtree
    pub fn height(&self) -> usize {
        self.height
    }

    /// Edges from the root at insertion time
    pub fn level(&self) -> usize {
        self.level
    }

    /// Width marker (see `NodeMetrics::width`)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Depth counter (see `NodeMetrics::depth`)
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Balance factor
    pub fn balance(&self) -> isize {
        self.balance
    }

    /// All metric fields at once
    pub fn metrics(&self) -> NodeMetrics {
        NodeMetrics {
            height: self.height,
            level: self.level,
            width: self.width,
            depth: self.depth,
            balance: self.balance,
        }
    }

    /// Balance factor implied by the children's current heights.
    ///
    /// A missing child counts as height -1, so a lone child of height h
    /// gives `h + 1` (right) or `-h - 1` (left). None for a leaf, whose
    /// stored value is left as is.
    pub(crate) fn computed_balance(&self, nodes: &Arena<Node<T>>) -> Option<isize> {
        let left = self.left.map(|id| nodes[id.0].height as isize);
        let right = self.right.map(|id| nodes[id.0].height as isize);

        match (left, right) {
            (Some(l), None) => Some(-l - 1),
            (None, Some(r)) => Some(r + 1),
            (Some(l), Some(r)) => Some(r - l),
            (None, None) => None,
        }
    }
}

/// Next node in ascending entry order, or None if `id` holds the maximum.
///
/// With a right subtree this is its leftmost node; otherwise climb while
/// the current node is a right child and return the first parent reached
/// from its left side.
pub(crate) fn successor<T>(nodes: &Arena<Node<T>>, id: NodeId) -> Option<NodeId> {
    let node = &nodes[id.0];

    if let Some(mut next) = node.right {
        while let Some(left) = nodes[next.0].left {
            next = left;
        }
        return Some(next);
    }

    let mut current = id;
    while let Some(parent) = nodes[current.0].parent {
        if nodes[parent.0].left == Some(current) {
            return Some(parent);
        }
        current = parent;
    }

    None
}

/// Renders a node with its metrics and neighbour entries.
///
/// `E :: height: h :: width: w :: level: l :: depth: d :: balance: b ::
/// parent: P :: right: R :: left: L`, with `NULL` for absent links.
pub struct NodeDisplay<'a, T> {
    nodes: &'a Arena<Node<T>>,
    id: NodeId,
}

impl<'a, T> NodeDisplay<'a, T> {
    pub(crate) fn new(nodes: &'a Arena<Node<T>>, id: NodeId) -> Self {
        Self { nodes, id }
    }

    fn link(&self, link: Option<NodeId>) -> Neighbour<'a, T> {
        Neighbour(link.map(|id| &self.nodes[id.0].entry))
    }
}

impl<T> fmt::Debug for NodeDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeDisplay").field("id", &self.id).finish()
    }
}

struct Neighbour<'a, T>(Option<&'a T>);

impl<T: fmt::Display> fmt::Display for Neighbour<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(entry) => write!(f, "{}", entry),
            None => f.write_str("NULL"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for NodeDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.nodes[self.id.0];
        write!(
            f,
            "{} :: height: {} :: width: {} :: level: {} :: depth: {} :: balance: {} :: \
             parent: {} :: right: {} :: left: {}",
            node.entry,
            node.height,
            node.width,
            node.level,
            node.depth,
            node.balance,
            self.link(node.parent),
            self.link(node.right),
            self.link(node.left),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-link a three node tree: 2 at the root, 1 left, 3 right
    fn small_arena() -> (Arena<Node<i32>>, [NodeId; 3]) {
        let mut nodes = Arena::new();
        let root = NodeId(nodes.insert(Node::leaf(2)));
        let left = NodeId(nodes.insert(Node::leaf(1)));
        let right = NodeId(nodes.insert(Node::leaf(3)));

        nodes[root.0].left = Some(left);
        nodes[root.0].right = Some(right);
        nodes[left.0].parent = Some(root);
        nodes[right.0].parent = Some(root);

        (nodes, [left, root, right])
    }

    #[test]
    fn test_fresh_leaf_metrics() {
        let node = Node::leaf("a");
        assert_eq!(
            node.metrics(),
            NodeMetrics {
                height: 0,
                level: 0,
                width: 1,
                depth: 1,
                balance: 0,
            }
        );
        assert!(node.is_leaf());
    }

    #[test]
    fn test_successor_chain() {
        let (nodes, [left, root, right]) = small_arena();

        assert_eq!(successor(&nodes, left), Some(root));
        assert_eq!(successor(&nodes, root), Some(right));
        assert_eq!(successor(&nodes, right), None);
    }

    #[test]
    fn test_successor_lone_root() {
        let mut nodes = Arena::new();
        let root = NodeId(nodes.insert(Node::leaf(7)));
        assert_eq!(successor(&nodes, root), None);
    }

    #[test]
    fn test_computed_balance_cases() {
        let (mut nodes, [left, root, right]) = small_arena();
        nodes[left.0].height = 2;
        assert_eq!(nodes[root.0].computed_balance(&nodes), Some(-2));

        nodes[root.0].right = None;
        assert_eq!(nodes[root.0].computed_balance(&nodes), Some(-3));

        nodes[root.0].left = None;
        nodes[root.0].right = Some(right);
        assert_eq!(nodes[root.0].computed_balance(&nodes), Some(1));

        nodes[root.0].right = None;
        assert_eq!(nodes[root.0].computed_balance(&nodes), None);
    }

    #[test]
    fn test_render_with_missing_links() {
        let (nodes, [left, root, _]) = small_arena();

        assert_eq!(
            NodeDisplay::new(&nodes, root).to_string(),
            "2 :: height: 0 :: width: 1 :: level: 0 :: depth: 1 :: balance: 0 :: \
             parent: NULL :: right: 3 :: left: 1"
        );
        assert_eq!(
            NodeDisplay::new(&nodes, left).to_string(),
            "1 :: height: 0 :: width: 1 :: level: 0 :: depth: 1 :: balance: 0 :: \
             parent: 2 :: right: NULL :: left: NULL"
        );
    }
}
