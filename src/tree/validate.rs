//! Structural invariant checks
//!
//! Meant for tests and debugging. A violation means construction itself is
//! broken, so `must_be_valid` panics instead of returning an error.

use super::types::*;
use super::SuffixTree;
use std::collections::VecDeque;
use thiserror::Error;

/// A broken structural invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invariant violated at node {node}: {message}")]
pub struct InvariantViolation {
    pub node: NodeId,
    pub message: String,
}

impl InvariantViolation {
    fn new(node: NodeId, message: impl Into<String>) -> Self {
        Self {
            node,
            message: message.into(),
        }
    }
}

impl SuffixTree {
    /// Panic if any structural invariant is broken
    pub fn must_be_valid(&self) {
        if let Err(violation) = self.check_invariants() {
            panic!("{}", violation);
        }
    }

    /// Walk the whole tree and report the first broken invariant
    ///
    /// Checked for every node reachable from the root:
    /// - each child key equals the first symbol of the child's edge label
    /// - each child's parent id points back at the node
    /// - internal nodes other than the root branch at least twice and carry
    ///   a suffix link to a node exactly one symbol shallower
    /// - leaf labels run to the end of their document
    /// - no node in the arena is unreachable
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut depth = vec![0usize; self.nodes.len()];
        let mut seen = vec![false; self.nodes.len()];
        let mut internal = Vec::new();
        let mut queue = VecDeque::from([ROOT]);
        seen[ROOT as usize] = true;

        while let Some(id) = queue.pop_front() {
            let node = self.nodes.get(id);

            if id != ROOT {
                if node.is_leaf() {
                    if !node.span.is_open() {
                        return Err(InvariantViolation::new(id, "leaf label does not reach the end of its document"));
                    }
                } else {
                    if node.children.len() < 2 {
                        return Err(InvariantViolation::new(id, "internal node has a single child"));
                    }
                    internal.push(id);
                }
            }

            for (&key, &child) in &node.children {
                if child as usize >= self.nodes.len() {
                    return Err(InvariantViolation::new(id, format!("child {} is outside the arena", child)));
                }
                if seen[child as usize] {
                    return Err(InvariantViolation::new(child, "node is owned by more than one parent"));
                }
                seen[child as usize] = true;

                let first = self.nodes.symbol_at(child, 0, &self.corpus);
                if key != first {
                    return Err(InvariantViolation::new(
                        child,
                        format!("keyed by {:?} but label starts with {:?}", key, first),
                    ));
                }

                if self.nodes.get(child).parent != Some(id) {
                    return Err(InvariantViolation::new(child, format!("parent link does not point at {}", id)));
                }

                depth[child as usize] = depth[id as usize] + self.nodes.edge_len(child, &self.corpus);
                queue.push_back(child);
            }
        }

        if let Some(orphan) = seen.iter().position(|&s| !s) {
            return Err(InvariantViolation::new(orphan as NodeId, "node is unreachable from the root"));
        }

        for id in internal {
            let Some(link) = self.nodes.get(id).suffix_link else {
                return Err(InvariantViolation::new(id, "internal node has no suffix link"));
            };
            if depth[link as usize] + 1 != depth[id as usize] {
                return Err(InvariantViolation::new(
                    id,
                    format!(
                        "suffix link to {} spans depth {} -> {}",
                        link, depth[id as usize], depth[link as usize]
                    ),
                ));
            }
        }

        Ok(())
    }
}
