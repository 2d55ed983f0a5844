//! Read-only substring queries
//!
//! Patterns are matched from the root one whole edge label at a time. The
//! point where a match ends (a node plus the number of symbols consumed on
//! the edge into it) is a [`Locus`]; every leaf below it is one occurrence.

use super::types::*;
use super::SuffixTree;
use rayon::prelude::*;

/// End point of a matched pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locus {
    /// Node whose incoming edge contains the end of the match
    pub node: NodeId,
    /// Symbols of that edge covered by the match
    pub matched: usize,
}

impl SuffixTree {
    /// Find where `pattern` ends in the tree, if it occurs at all
    pub fn locate(&self, pattern: &str) -> Option<Locus> {
        let pattern: Vec<Symbol> = pattern.chars().map(Symbol::Char).collect();
        let mut locus = Locus {
            node: ROOT,
            matched: 0,
        };

        let mut rest = pattern.as_slice();
        while let Some(&first) = rest.first() {
            let child = self.nodes.child(locus.node, first)?;
            let label = self.nodes.label(child, &self.corpus);
            let n = label.len().min(rest.len());

            if label[..n] != rest[..n] {
                return None;
            }

            locus = Locus {
                node: child,
                matched: n,
            };
            rest = &rest[n..];
        }

        Some(locus)
    }

    /// Check whether `pattern` occurs in any indexed document
    ///
    /// The empty pattern is contained in every tree.
    pub fn contains(&self, pattern: &str) -> bool {
        self.locate(pattern).is_some()
    }

    /// Every occurrence of `pattern`, sorted by document and offset
    ///
    /// Offsets count characters, not bytes. The empty pattern occurs at
    /// every offset from 0 to the document length inclusive.
    pub fn find_all(&self, pattern: &str) -> Vec<Occurrence> {
        let Some(locus) = self.locate(pattern) else {
            return Vec::new();
        };
        let pattern_len = pattern.chars().count();

        let mut result = Vec::new();
        // (node, symbols between the end of the match and the end of the
        // edge into node)
        let mut stack = vec![(
            locus.node,
            self.nodes.edge_len(locus.node, &self.corpus) - locus.matched,
        )];

        while let Some((id, remaining)) = stack.pop() {
            let node = self.nodes.get(id);
            if node.is_leaf() {
                if id != ROOT {
                    let doc = node.span.doc;
                    let offset = self.corpus.stored_len(doc) - remaining - pattern_len;
                    result.push(Occurrence::new(doc, offset));
                }
                continue;
            }

            for &child in node.children.values() {
                stack.push((child, remaining + self.nodes.edge_len(child, &self.corpus)));
            }
        }

        result.sort_unstable();
        tracing::debug!(pattern_len, hits = result.len(), "find_all");
        result
    }

    /// Run `contains` for many patterns
    ///
    /// Batches at or above the configured threshold run on the rayon pool.
    pub fn contains_batch<P>(&self, patterns: &[P]) -> Vec<bool>
    where
        P: AsRef<str> + Sync,
    {
        if patterns.len() >= self.config.parallel_threshold {
            patterns.par_iter().map(|p| self.contains(p.as_ref())).collect()
        } else {
            patterns.iter().map(|p| self.contains(p.as_ref())).collect()
        }
    }

    /// Run `find_all` for many patterns
    pub fn find_all_batch<P>(&self, patterns: &[P]) -> Vec<Vec<Occurrence>>
    where
        P: AsRef<str> + Sync,
    {
        if patterns.len() >= self.config.parallel_threshold {
            patterns.par_iter().map(|p| self.find_all(p.as_ref())).collect()
        } else {
            patterns.iter().map(|p| self.find_all(p.as_ref())).collect()
        }
    }
}
