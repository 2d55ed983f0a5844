//! Generalized suffix tree
//!
//! This module indexes any number of documents in a single suffix tree
//! built online with Ukkonen's algorithm, and answers substring queries
//! against it.
//!
//! ## Architecture
//!
//! - `corpus`: Append-only store of the inserted documents
//! - `node`: Arena of nodes, edge labels and edge splitting
//! - `builder`: Ukkonen construction driven by the active point
//! - `query`: `contains` and `find_all`
//! - `lcs`: Longest substring common to every document
//! - `validate`: Structural invariant checks for tests and debugging
//! - `dot`: Graphviz output for diagnostics
//! - `shared`: Reader/writer locked wrapper for multi-threaded use
//!
//! ## Lifecycle
//!
//! Documents are validated in full before anything is stored, so a failed
//! insert leaves the tree untouched. Nodes are created and split during
//! inserts and never removed.

pub mod builder;
pub mod corpus;
pub mod dot;
pub mod lcs;
pub mod node;
pub mod query;
pub mod shared;
pub mod types;
pub mod validate;

// Re-exports for convenience
pub use corpus::{Corpus, Strings};
pub use node::{Node, NodeStore};
pub use shared::SharedSuffixTree;
pub use types::*;
pub use validate::InvariantViolation;

use crate::error::{GstError, Result};

/// Suffix tree over an ordered set of documents
#[derive(Debug, Default)]
pub struct SuffixTree {
    corpus: Corpus,
    nodes: NodeStore,
    config: TreeConfig,
}

impl SuffixTree {
    /// Create an empty tree with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Build a tree from a sequence of documents, in order
    pub fn from_documents<I, S>(docs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::new();
        for doc in docs {
            tree.insert(doc.as_ref())?;
        }
        Ok(tree)
    }

    /// Index a document and return its id
    ///
    /// Fails with `InvalidCharacter` if the text contains the reserved
    /// terminator, or `DocumentTooLarge` if it exceeds the configured
    /// limit. On failure the tree is unchanged.
    pub fn insert(&mut self, text: &str) -> Result<DocId> {
        let symbols = match self.corpus.prepare(text, self.config.max_document_len) {
            Ok(symbols) => symbols,
            Err(e) => {
                tracing::warn!(error = %e, "rejected document");
                return Err(e);
            }
        };

        let id = self.corpus.commit(text, symbols);
        let summary = builder::extend(&mut self.nodes, &self.corpus, id);

        tracing::debug!(
            doc_id = id,
            chars = self.corpus.stored_len(id) - 1,
            leaves = summary.leaves,
            splits = summary.splits,
            nodes = self.nodes.len(),
            "indexed document"
        );

        if self.config.validate_on_insert {
            self.must_be_valid();
        }

        Ok(id)
    }

    /// Index a UTF-8 encoded document
    ///
    /// Fails with `MalformedInput` at the first invalid byte.
    pub fn insert_bytes(&mut self, bytes: &[u8]) -> Result<DocId> {
        let text = std::str::from_utf8(bytes).map_err(GstError::malformed)?;
        self.insert(text)
    }

    /// Text of a document as it was inserted
    pub fn str(&self, id: DocId) -> Result<&str> {
        self.corpus.text(id).ok_or(GstError::UnknownDocument(id))
    }

    /// All inserted texts in insertion order
    pub fn strings(&self) -> Strings<'_> {
        self.corpus.strings()
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            documents: self.corpus.len(),
            characters: self.corpus.total_chars(),
            nodes: self.nodes.len(),
            ..TreeStats::default()
        };

        for (id, node) in self.nodes.iter() {
            if id == ROOT {
                continue;
            }
            if node.is_leaf() {
                stats.leaves += 1;
            } else {
                stats.internal_nodes += 1;
            }
            if node.suffix_link.is_some() {
                stats.suffix_links += 1;
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checked_tree() -> SuffixTree {
        SuffixTree::with_config(TreeConfig {
            validate_on_insert: true,
            ..Default::default()
        })
    }

    #[test]
    fn test_insert_assigns_ids() {
        let mut tree = checked_tree();
        assert_eq!(tree.insert("GATTACA").unwrap(), 0);
        assert_eq!(tree.insert("GATTACA").unwrap(), 1);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.str(1).unwrap(), "GATTACA");
    }

    #[test]
    fn test_failed_insert_leaves_tree_unchanged() {
        let mut tree = checked_tree();
        tree.insert("ACGT").unwrap();
        let before = tree.stats();

        let err = tree.insert("AC\0GT").unwrap_err();
        assert!(matches!(err, GstError::InvalidCharacter { ch: '\0', offset: 2 }));
        assert_eq!(tree.stats(), before);

        // The next document still receives the next id
        assert_eq!(tree.insert("TTGA").unwrap(), 1);
    }

    #[test]
    fn test_insert_bytes_rejects_malformed() {
        let mut tree = checked_tree();
        let err = tree.insert_bytes(&[b'G', b'A', 0xC3]).unwrap_err();
        assert!(matches!(err, GstError::MalformedInput { offset: 2, .. }));
        assert!(tree.is_empty());

        assert_eq!(tree.insert_bytes("日本語".as_bytes()).unwrap(), 0);
        assert_eq!(tree.str(0).unwrap(), "日本語");
    }

    #[test]
    fn test_document_limit() {
        let mut tree = SuffixTree::with_config(TreeConfig {
            max_document_len: Some(3),
            ..Default::default()
        });
        assert!(tree.insert("abc").is_ok());
        assert!(matches!(
            tree.insert("abcd"),
            Err(GstError::DocumentTooLarge { len: 4, limit: 3 })
        ));
    }

    #[test]
    fn test_unknown_document() {
        let tree = SuffixTree::new();
        assert!(matches!(tree.str(0), Err(GstError::UnknownDocument(0))));
    }

    #[test]
    fn test_strings_in_order() {
        let tree = SuffixTree::from_documents(["one", "two", "three"]).unwrap();
        let all: Vec<_> = tree.strings().collect();
        assert_eq!(all, vec!["one", "two", "three"]);
        // Restarting yields the same sequence
        assert_eq!(tree.strings().collect::<Vec<_>>(), all);
    }

    #[test]
    fn test_stats() {
        let tree = SuffixTree::from_documents(["abcabx"]).unwrap();
        let stats = tree.stats();
        assert_eq!(stats.documents, 1);
        assert_eq!(stats.characters, 6);
        assert_eq!(stats.leaves, 7);
        assert_eq!(stats.internal_nodes, 2);
        assert_eq!(stats.nodes, 10);
        assert_eq!(stats.suffix_links, 2);
    }
}
