//! Types for the generalized suffix tree
//!
//! Edge labels never copy text: every node stores a [`Span`] that points
//! back into the corpus by document id, character offset and length.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Identifier of an indexed document, equal to its insertion rank
pub type DocId = u32;

/// Index of a node in the node arena
pub type NodeId = u32;

/// The root node always occupies the first arena slot
pub const ROOT: NodeId = 0;

/// Character reserved as the document terminator in the textual view of
/// the corpus. Inserted text must not contain it.
pub const TERMINATOR_CHAR: char = '\0';

/// One position of an indexed document
///
/// Every document ends with its own `End` symbol, so no suffix of one
/// document can be a prefix of a suffix of another at a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Char(char),
    End(DocId),
}

impl Symbol {
    #[inline]
    pub fn as_char(self) -> Option<char> {
        match self {
            Symbol::Char(c) => Some(c),
            Symbol::End(_) => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Char(c) => write!(f, "{}", c),
            Symbol::End(doc) => write!(f, "${}", doc),
        }
    }
}

/// Reference to a run of symbols inside one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Document the label is read from
    pub doc: DocId,
    /// Offset of the first symbol, in characters
    pub start: usize,
    /// Number of symbols, or `None` for a leaf label that runs to the end
    /// of its document
    pub len: Option<usize>,
}

impl Span {
    /// Label running from `start` to the end of `doc`
    pub fn open(doc: DocId, start: usize) -> Self {
        Self {
            doc,
            start,
            len: None,
        }
    }

    pub fn closed(doc: DocId, start: usize, len: usize) -> Self {
        Self {
            doc,
            start,
            len: Some(len),
        }
    }

    /// Label of the root, which has no incoming edge
    pub fn empty() -> Self {
        Self::closed(0, 0, 0)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.len.is_none()
    }
}

/// A single match returned by `find_all`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Occurrence {
    /// Document the pattern was found in
    pub doc_id: DocId,
    /// Character offset of the first matched character within the document
    pub offset: usize,
}

impl Occurrence {
    pub fn new(doc_id: DocId, offset: usize) -> Self {
        Self { doc_id, offset }
    }
}

/// Configuration for building a suffix tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Reject documents longer than this many characters (default: unlimited)
    pub max_document_len: Option<usize>,
    /// Run the structural validator after every insert (default: false)
    pub validate_on_insert: bool,
    /// Batch queries of at least this many patterns run on the rayon pool
    pub parallel_threshold: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_document_len: None,
            validate_on_insert: false,
            parallel_threshold: 64,
        }
    }
}

impl TreeConfig {
    /// Load a configuration from a JSON file; missing fields keep their
    /// defaults
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Size summary of a built tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Number of indexed documents
    pub documents: usize,
    /// Total characters indexed, terminators excluded
    pub characters: usize,
    /// All nodes, root included
    pub nodes: usize,
    /// Internal nodes, root excluded
    pub internal_nodes: usize,
    pub leaves: usize,
    pub suffix_links: usize,
}
