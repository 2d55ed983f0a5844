//! FASTA record reader
//!
//! Feeds sequences into the tree. Lines are trimmed; blank lines and `;`
//! comments are skipped; `>` starts a new record named by the rest of the
//! line; every other line is appended to the current sequence. Records
//! without sequence data are dropped.

use crate::error::{GstError, Result};
use crate::tree::{DocId, SuffixTree};
use serde::Serialize;

/// A named sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FastaRecord {
    pub name: String,
    pub sequence: String,
}

/// Iterator over the records of a FASTA text
#[derive(Debug, Clone)]
pub struct FastaRecords<'a> {
    lines: std::str::Lines<'a>,
    /// Header seen but not yet emitted
    pending_name: Option<String>,
}

impl<'a> FastaRecords<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            pending_name: None,
        }
    }
}

impl Iterator for FastaRecords<'_> {
    type Item = FastaRecord;

    fn next(&mut self) -> Option<FastaRecord> {
        let mut name = self.pending_name.take();
        let mut sequence = String::new();

        for line in self.lines.by_ref() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            if let Some(header) = line.strip_prefix('>') {
                if !sequence.is_empty() {
                    self.pending_name = Some(header.to_string());
                    return Some(FastaRecord {
                        name: name.unwrap_or_default(),
                        sequence,
                    });
                }
                name = Some(header.to_string());
            } else {
                sequence.push_str(line);
            }
        }

        if sequence.is_empty() {
            return None;
        }
        Some(FastaRecord {
            name: name.unwrap_or_default(),
            sequence,
        })
    }
}

/// Parse FASTA from text
pub fn parse(text: &str) -> FastaRecords<'_> {
    FastaRecords::new(text)
}

/// Parse FASTA from raw bytes, rejecting invalid UTF-8
pub fn parse_bytes(bytes: &[u8]) -> Result<Vec<FastaRecord>> {
    let text = std::str::from_utf8(bytes).map_err(GstError::malformed)?;
    Ok(parse(text).collect())
}

/// Insert every record's sequence into `tree`
///
/// Returns the assigned ids in record order. Stops at the first rejected
/// sequence; records inserted before it stay indexed.
pub fn index_records<'r, I>(tree: &mut SuffixTree, records: I) -> Result<Vec<DocId>>
where
    I: IntoIterator<Item = &'r FastaRecord>,
{
    let mut ids = Vec::new();
    for record in records {
        let id = tree.insert(&record.sequence)?;
        tracing::trace!(doc_id = id, name = %record.name, "indexed record");
        ids.push(id);
    }
    Ok(ids)
}
