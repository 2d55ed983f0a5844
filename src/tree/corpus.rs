//! Append-only document store
//!
//! Each document is kept twice: the original text, returned by `str`, and
//! the decoded symbol sequence (characters followed by the document's
//! terminator) that edge labels point into.

use super::types::*;
use crate::error::{GstError, Result};

#[derive(Debug)]
struct Document {
    text: String,
    symbols: Vec<Symbol>,
}

/// Ordered collection of inserted documents
#[derive(Debug, Default)]
pub struct Corpus {
    docs: Vec<Document>,
    /// Total characters across all documents, terminators excluded
    chars: usize,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a document before anything is stored
    ///
    /// Returns the decoded symbols (terminator included) so the caller
    /// commits exactly what was validated.
    pub fn prepare(&self, text: &str, max_len: Option<usize>) -> Result<Vec<Symbol>> {
        let id = self.next_id();
        let mut symbols = Vec::with_capacity(text.len() + 1);

        for (offset, ch) in text.chars().enumerate() {
            if ch == TERMINATOR_CHAR {
                return Err(GstError::InvalidCharacter { ch, offset });
            }
            symbols.push(Symbol::Char(ch));
        }

        if let Some(limit) = max_len {
            if symbols.len() > limit {
                return Err(GstError::DocumentTooLarge {
                    len: symbols.len(),
                    limit,
                });
            }
        }

        symbols.push(Symbol::End(id));
        Ok(symbols)
    }

    /// Append a prepared document and return its id
    pub fn commit(&mut self, text: &str, symbols: Vec<Symbol>) -> DocId {
        let id = self.next_id();
        debug_assert_eq!(symbols.last(), Some(&Symbol::End(id)));

        self.chars += symbols.len() - 1;
        self.docs.push(Document {
            text: text.to_owned(),
            symbols,
        });
        id
    }

    /// Id the next committed document will receive
    #[inline]
    pub fn next_id(&self) -> DocId {
        self.docs.len() as DocId
    }

    /// Original text of a document, terminator stripped
    pub fn text(&self, id: DocId) -> Option<&str> {
        self.docs.get(id as usize).map(|d| d.text.as_str())
    }

    /// Symbols of a document, terminator included
    ///
    /// Panics on an unknown id; callers only pass ids read from the tree.
    #[inline]
    pub fn symbols(&self, id: DocId) -> &[Symbol] {
        &self.docs[id as usize].symbols
    }

    #[inline]
    pub fn symbol(&self, id: DocId, offset: usize) -> Symbol {
        self.docs[id as usize].symbols[offset]
    }

    /// Length of a document in symbols, terminator included
    #[inline]
    pub fn stored_len(&self, id: DocId) -> usize {
        self.docs[id as usize].symbols.len()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn total_chars(&self) -> usize {
        self.chars
    }

    /// Iterate over all texts in insertion order
    pub fn strings(&self) -> Strings<'_> {
        Strings {
            inner: self.docs.iter(),
        }
    }
}

/// Iterator over the inserted texts
///
/// Cloning it restarts from the current position; calling
/// [`Corpus::strings`] again restarts from the first document.
#[derive(Debug, Clone)]
pub struct Strings<'a> {
    inner: std::slice::Iter<'a, Document>,
}

impl<'a> Iterator for Strings<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|d| d.text.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Strings<'_> {}
