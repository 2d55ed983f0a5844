//! # gstree - Generalized Suffix Tree
//!
//! gstree indexes any number of documents in one suffix tree, built online
//! with Ukkonen's algorithm in time linear in the total input length, and
//! answers substring queries against all of them at once.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`tree`] - Corpus, node arena, construction, queries and validation
//! - [`fasta`] - FASTA record reader feeding sequences into the tree
//! - [`error`] - Error types shared by the library
//!
//! ## Quick Start
//!
//! ```
//! use gstree::SuffixTree;
//!
//! let mut tree = SuffixTree::new();
//! tree.insert("GATTACA").unwrap();
//! tree.insert("TAGACCA").unwrap();
//!
//! assert!(tree.contains("TTAC"));
//! assert_eq!(tree.find_all("GA").len(), 2);
//! assert_eq!(tree.longest_common_substring(), "AC");
//! ```
//!
//! ## Queries
//!
//! 1. **contains** - walks edge labels from the root, O(m) in the pattern
//! 2. **find_all** - collects every leaf below the match, O(m + hits)
//! 3. **longest_common_substring** - one bottom-up pass over the tree
//!
//! Offsets are counted in characters, so multi-byte text is never split.

pub mod error;
pub mod fasta;
pub mod tree;

pub use error::{GstError, Result};
pub use tree::{DocId, Occurrence, SharedSuffixTree, SuffixTree, TreeConfig, TreeStats};
