//! Tree walks
//!
//! In-order: start at the leftmost node and chase successors, O(1) extra state.
//! Post-order: explicit stack, so teardown depth is not bounded by the call stack.

use generational_arena::Arena;

use super::node::{successor, Node, NodeId};

/// Ascending iterator over a tree's entries
#[derive(Debug)]
pub struct Iter<'a, T> {
    nodes: &'a Arena<Node<T>>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a Arena<Node<T>>, first: Option<NodeId>, len: usize) -> Self {
        Self {
            nodes,
            next: first,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = successor(self.nodes, current);
        self.remaining = self.remaining.saturating_sub(1);
        Some(&self.nodes[current.0].entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Leftmost node of the subtree rooted at `start`
pub(crate) fn leftmost<T>(nodes: &Arena<Node<T>>, start: NodeId) -> NodeId {
    let mut current = start;
    while let Some(left) = nodes[current.0].left {
        current = left;
    }
    current
}

/// Rightmost node of the subtree rooted at `start`
pub(crate) fn rightmost<T>(nodes: &Arena<Node<T>>, start: NodeId) -> NodeId {
    let mut current = start;
    while let Some(right) = nodes[current.0].right {
        current = right;
    }
    current
}

/// Post-order node ids (left, right, then self) of the subtree at `start`
pub(crate) fn post_order<T>(nodes: &Arena<Node<T>>, start: Option<NodeId>) -> Vec<NodeId> {
    let mut order = Vec::with_capacity(nodes.len());
    let Some(start) = start else {
        return order;
    };

    // (node, children already pushed)
    let mut stack = vec![(start, false)];
    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            order.push(id);
            continue;
        }

        stack.push((id, true));
        let node = &nodes[id.0];
        if let Some(right) = node.right {
            stack.push((right, false));
        }
        if let Some(left) = node.left {
            stack.push((left, false));
        }
    }

    order
}
