//! Longest substring common to every indexed document
//!
//! Every node is annotated with the set of documents whose suffixes pass
//! through it (the union of its leaves' documents). The answer is the path
//! label of the deepest non-root node whose set covers the whole corpus.
//! When several nodes share that depth, the lexicographically smallest
//! label wins.

use super::types::*;
use super::SuffixTree;
use roaring::RoaringBitmap;

impl SuffixTree {
    /// Longest string occurring in every document
    ///
    /// Returns an empty string when fewer than two documents are indexed
    /// or no character is shared by all of them.
    pub fn longest_common_substring(&self) -> String {
        let doc_count = self.corpus.len();
        if doc_count < 2 {
            return String::new();
        }

        let node_count = self.nodes.len();
        let mut depth = vec![0usize; node_count];
        let mut order = Vec::with_capacity(node_count);
        let mut stack = vec![ROOT];

        // Pre-order walk recording string depths
        while let Some(id) = stack.pop() {
            order.push(id);
            for &child in self.nodes.get(id).children.values() {
                depth[child as usize] = depth[id as usize] + self.nodes.edge_len(child, &self.corpus);
                stack.push(child);
            }
        }

        let mut docs: Vec<RoaringBitmap> = vec![RoaringBitmap::new(); node_count];
        let mut best_depth = 0;
        let mut candidates: Vec<NodeId> = Vec::new();

        // Reverse pre-order visits children before their parent
        for &id in order.iter().rev() {
            let node = self.nodes.get(id);
            if node.is_leaf() {
                if id != ROOT {
                    docs[id as usize].insert(node.span.doc);
                }
                continue;
            }

            let mut set = RoaringBitmap::new();
            for &child in node.children.values() {
                set |= std::mem::take(&mut docs[child as usize]);
            }

            if id != ROOT && set.len() == doc_count as u64 {
                let d = depth[id as usize];
                if d > best_depth {
                    best_depth = d;
                    candidates.clear();
                }
                if d == best_depth {
                    candidates.push(id);
                }
            }

            docs[id as usize] = set;
        }

        let best = candidates
            .into_iter()
            .map(|id| self.path_label(id))
            .min()
            .unwrap_or_default();

        tracing::debug!(documents = doc_count, len = best_depth, "longest common substring");
        best
    }

    /// Concatenated edge labels from the root down to `id`
    ///
    /// Terminators are skipped; they never occur on the path of a node
    /// shared by two or more documents.
    pub(crate) fn path_label(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        let mut current = id;
        while current != ROOT {
            parts.push(self.nodes.label(current, &self.corpus));
            current = match self.nodes.get(current).parent {
                Some(parent) => parent,
                None => break,
            };
        }

        parts
            .iter()
            .rev()
            .flat_map(|label| label.iter())
            .filter_map(|sym| sym.as_char())
            .collect()
    }
}
