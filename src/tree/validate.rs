//! Structural self-checks

use thiserror::Error;

use super::{NodeId, Tree};

/// Structural invariant found broken by `Tree::validate`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// Non-empty tree without a root
    #[error("tree holds {occupancy} nodes but has no root")]
    MissingRoot {
        /// Recorded occupancy
        occupancy: usize,
    },

    /// Empty tree that still references a root
    #[error("empty tree still references a root")]
    StaleRoot,

    /// Root node carries a parent link
    #[error("root node has a parent link")]
    RootHasParent,

    /// A child does not point back at the node that links it
    #[error("child at depth {depth} does not link back to its parent")]
    BrokenParentLink {
        /// Edges from the root to the child
        depth: usize,
    },

    /// In-order walk is not strictly ascending
    #[error("entries out of order at in-order position {position}")]
    OrderViolation {
        /// 1-based position of the offending entry
        position: usize,
    },

    /// Recorded occupancy disagrees with the reachable node count
    #[error("occupancy {occupancy} but {reachable} nodes reachable from the root")]
    OccupancyMismatch {
        /// Recorded occupancy
        occupancy: usize,
        /// Nodes reachable from the root
        reachable: usize,
    },

    /// Storage holds nodes that cannot be reached from the root
    #[error("{stored} nodes stored but only {reachable} reachable")]
    UnreachableNodes {
        /// Live nodes in storage
        stored: usize,
        /// Nodes reachable from the root
        reachable: usize,
    },
}

impl<T: Ord, R> Tree<T, R> {
    /// Check link symmetry, search order and node accounting
    pub fn validate(&self) -> Result<(), InvariantError> {
        let Some(root) = self.root else {
            if self.occupancy != 0 {
                return Err(InvariantError::MissingRoot {
                    occupancy: self.occupancy,
                });
            }
            return self.check_storage(0);
        };
        if self.occupancy == 0 {
            return Err(InvariantError::StaleRoot);
        }
        if self.nodes[root.0].parent.is_some() {
            return Err(InvariantError::RootHasParent);
        }

        let mut reachable = 0;
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        while let Some((id, depth)) = stack.pop() {
            reachable += 1;
            let node = &self.nodes[id.0];
            for child in [node.left, node.right].into_iter().flatten() {
                if self.nodes[child.0].parent != Some(id) {
                    return Err(InvariantError::BrokenParentLink { depth: depth + 1 });
                }
                stack.push((child, depth + 1));
            }
        }

        if reachable != self.occupancy {
            return Err(InvariantError::OccupancyMismatch {
                occupancy: self.occupancy,
                reachable,
            });
        }
        self.check_storage(reachable)?;

        let mut previous: Option<&T> = None;
        for (index, entry) in self.iter().enumerate() {
            if previous.is_some_and(|prev| prev >= entry) {
                return Err(InvariantError::OrderViolation {
                    position: index + 1,
                });
            }
            previous = Some(entry);
        }

        Ok(())
    }

    fn check_storage(&self, reachable: usize) -> Result<(), InvariantError> {
        if self.nodes.len() != reachable {
            return Err(InvariantError::UnreachableNodes {
                stored: self.nodes.len(),
                reachable,
            });
        }
        Ok(())
    }
}
