//! Graphviz output
//!
//! Nodes are labelled with their incoming edge label, child edges with the
//! symbol they are keyed by, and suffix links are drawn dotted.

use super::types::*;
use super::SuffixTree;
use std::collections::VecDeque;
use std::io::{self, Write};

impl SuffixTree {
    /// Write the tree in DOT format
    pub fn write_dot<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "digraph G {{")?;

        let mut queue = VecDeque::from([ROOT]);
        while let Some(id) = queue.pop_front() {
            let node = self.nodes.get(id);

            let label = if id == ROOT {
                "root".to_string()
            } else {
                let text: String = self
                    .nodes
                    .label(id, &self.corpus)
                    .iter()
                    .map(|sym| sym.to_string())
                    .collect();
                escape(&text)
            };
            writeln!(w, "  n{} [label=\"{}\"]", id, label)?;

            let mut children: Vec<_> = node.children.iter().collect();
            children.sort_unstable();
            for (key, &child) in children {
                writeln!(w, "  n{} -> n{} [label=\"{}\"]", id, child, escape(&key.to_string()))?;
                queue.push_back(child);
            }

            if let Some(link) = node.suffix_link {
                writeln!(w, "  n{} -> n{} [style=\"dotted\"]", id, link)?;
            }
        }

        writeln!(w, "}}")
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_output() {
        let tree = SuffixTree::from_documents(["abab"]).unwrap();
        let mut buf = Vec::new();
        tree.write_dot(&mut buf).unwrap();
        let dot = String::from_utf8(buf).unwrap();

        assert!(dot.starts_with("digraph G {"));
        assert!(dot.trim_end().ends_with('}'));
        assert!(dot.contains("n0 [label=\"root\"]"));
        assert!(dot.contains("[label=\"ab\"]"));
        assert!(dot.contains("[label=\"$0\"]"));
        assert!(dot.contains("style=\"dotted\""));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a\"b\\c"), "a\\\"b\\\\c");
        assert_eq!(escape("x\ny"), "x\\ny");
    }
}
