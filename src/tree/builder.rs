//! Online suffix tree construction (Ukkonen)
//!
//! One committed document is added to the tree one symbol at a time. Each
//! phase appends the next symbol to every suffix that is still pending
//! (`remainder` of them), starting at the active point:
//!
//! - if the symbol already follows the active point the suffix is implicit,
//!   the active point grows by one and the phase ends early;
//! - otherwise a leaf is attached at the active point, splitting the active
//!   edge first when the active point lies inside it.
//!
//! Edge labels are walked by whole edges (skip/count), so construction stays
//! amortized linear in the document length.

use super::corpus::Corpus;
use super::node::NodeStore;
use super::types::*;

/// Insertion point for the next extension
///
/// Lives only for the duration of one document's construction.
#[derive(Debug, Clone, Copy)]
struct ActivePoint {
    node: NodeId,
    /// First symbol of the active edge below `node`
    edge: Symbol,
    /// Symbols already matched along the active edge
    length: usize,
}

impl ActivePoint {
    fn at_root(edge: Symbol) -> Self {
        Self {
            node: ROOT,
            edge,
            length: 0,
        }
    }

    /// Skip over the whole edge into `child` if the active length covers
    /// it. Returns `true` if the active point moved.
    #[inline]
    fn walk_down(&mut self, child: NodeId, edge_len: usize, pos: usize, text: &[Symbol]) -> bool {
        if self.length < edge_len {
            return false;
        }
        self.length -= edge_len;
        self.edge = text[pos - self.length];
        self.node = child;
        true
    }
}

/// Counters reported after a document has been added
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub leaves: usize,
    pub splits: usize,
}

struct Builder<'a> {
    nodes: &'a mut NodeStore,
    corpus: &'a Corpus,
    doc: DocId,
    /// Internal node waiting for its suffix link in the current phase
    pending_link: Option<NodeId>,
    summary: BuildSummary,
}

impl Builder<'_> {
    /// Point the pending node's suffix link at `target` and make `target`
    /// the new pending node.
    fn link(&mut self, target: NodeId) {
        if let Some(prev) = self.pending_link {
            if prev != ROOT {
                self.nodes.get_mut(prev).suffix_link = Some(target);
            }
        }
        self.pending_link = Some(target);
    }

    fn add_leaf(&mut self, parent: NodeId, key: Symbol, pos: usize) {
        self.nodes.add_leaf(parent, key, Span::open(self.doc, pos));
        self.summary.leaves += 1;
    }

    fn run(mut self) -> BuildSummary {
        let corpus = self.corpus;
        let text = corpus.symbols(self.doc);
        let mut active = ActivePoint::at_root(text[0]);
        let mut remainder = 0usize;

        for (pos, &sym) in text.iter().enumerate() {
            remainder += 1;
            self.pending_link = None;

            while remainder > 0 {
                if active.length == 0 {
                    active.edge = sym;
                }

                match self.nodes.child(active.node, active.edge) {
                    None => {
                        self.add_leaf(active.node, active.edge, pos);
                        self.link(active.node);
                    }
                    Some(next) => {
                        let edge_len = self.nodes.edge_len(next, corpus);
                        if active.walk_down(next, edge_len, pos, text) {
                            continue;
                        }

                        if self.nodes.symbol_at(next, active.length, corpus) == sym {
                            // Already present: every shorter pending suffix is too
                            active.length += 1;
                            self.link(active.node);
                            break;
                        }

                        let mid = self.nodes.split(next, active.length, corpus);
                        self.summary.splits += 1;
                        self.add_leaf(mid, sym, pos);
                        self.link(mid);
                    }
                }

                remainder -= 1;

                if active.node == ROOT && active.length > 0 {
                    active.length -= 1;
                    active.edge = text[pos - active.length];
                } else {
                    active.node = self.nodes.get(active.node).suffix_link.unwrap_or(ROOT);
                }
            }
        }

        debug_assert_eq!(remainder, 0, "terminator must make every suffix explicit");
        self.summary
    }
}

/// Add every suffix of the committed document `doc` to the tree
pub fn extend(nodes: &mut NodeStore, corpus: &Corpus, doc: DocId) -> BuildSummary {
    Builder {
        nodes,
        corpus,
        doc,
        pending_link: None,
        summary: BuildSummary::default(),
    }
    .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(texts: &[&str]) -> (NodeStore, Corpus) {
        let mut corpus = Corpus::new();
        let mut nodes = NodeStore::new();
        for text in texts {
            let symbols = corpus.prepare(text, None).unwrap();
            let id = corpus.commit(text, symbols);
            extend(&mut nodes, &corpus, id);
        }
        (nodes, corpus)
    }

    fn leaf_count(nodes: &NodeStore) -> usize {
        nodes.iter().filter(|(id, n)| *id != ROOT && n.is_leaf()).count()
    }

    #[test]
    fn test_one_leaf_per_suffix() {
        // n characters plus terminator give n + 1 suffixes
        let (nodes, _) = build(&["banana"]);
        assert_eq!(leaf_count(&nodes), 7);

        let (nodes, _) = build(&["GATTACA", "GATTACA"]);
        assert_eq!(leaf_count(&nodes), 16);
    }

    #[test]
    fn test_summary_counts() {
        let mut corpus = Corpus::new();
        let mut nodes = NodeStore::new();
        let symbols = corpus.prepare("abcabx", None).unwrap();
        let id = corpus.commit("abcabx", symbols);

        let summary = extend(&mut nodes, &corpus, id);

        assert_eq!(summary.leaves, 7);
        // "ab" and "b" become internal nodes
        assert_eq!(summary.splits, 2);
        assert_eq!(nodes.len(), 1 + summary.leaves + summary.splits);
    }

    #[test]
    fn test_internal_nodes_branch() {
        let (nodes, _) = build(&["cdddcdc", "abcabxabcd"]);
        for (id, node) in nodes.iter() {
            if id != ROOT && !node.is_leaf() {
                assert!(node.children.len() >= 2, "node {} does not branch", id);
                assert!(node.suffix_link.is_some(), "node {} has no suffix link", id);
            }
        }
    }

    #[test]
    fn test_leaves_stay_open() {
        let (nodes, _) = build(&["mississippi", "missouri"]);
        for (id, node) in nodes.iter() {
            if id != ROOT && node.is_leaf() {
                assert!(node.span.is_open());
            }
        }
    }

    #[test]
    fn test_empty_document() {
        let (nodes, corpus) = build(&[""]);
        assert_eq!(leaf_count(&nodes), 1);
        assert_eq!(nodes.child(ROOT, Symbol::End(0)).map(|id| nodes.edge_len(id, &corpus)), Some(1));
    }
}
