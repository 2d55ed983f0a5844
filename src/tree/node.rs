//! Node arena
//!
//! All nodes live in one `Vec` addressed by [`NodeId`]. Child edges are the
//! only ownership relation; suffix links and parent ids are plain indices.

use super::corpus::Corpus;
use super::types::*;
use rustc_hash::FxHashMap;

/// A node and the edge leading into it
#[derive(Debug, Clone)]
pub struct Node {
    /// Label of the incoming edge
    pub span: Span,
    /// Children keyed by the first symbol of their edge label
    pub children: FxHashMap<Symbol, NodeId>,
    /// Suffix link, only meaningful for internal nodes
    pub suffix_link: Option<NodeId>,
    /// Parent node, `None` for the root
    pub parent: Option<NodeId>,
}

impl Node {
    fn new(span: Span, parent: Option<NodeId>) -> Self {
        Self {
            span,
            children: FxHashMap::default(),
            suffix_link: None,
            parent,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena owning every node reachable from the root
#[derive(Debug, Clone)]
pub struct NodeStore {
    nodes: Vec<Node>,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Create a store holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(Span::empty(), None)],
        }
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over `(id, node)` pairs in allocation order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as NodeId, n))
    }

    #[inline]
    pub fn child(&self, id: NodeId, key: Symbol) -> Option<NodeId> {
        self.get(id).children.get(&key).copied()
    }

    /// Length of the edge into `id`; open labels run to the end of their
    /// document
    #[inline]
    pub fn edge_len(&self, id: NodeId, corpus: &Corpus) -> usize {
        let span = self.get(id).span;
        match span.len {
            Some(len) => len,
            None => corpus.stored_len(span.doc) - span.start,
        }
    }

    /// The `i`th symbol of the edge label into `id`
    #[inline]
    pub fn symbol_at(&self, id: NodeId, i: usize, corpus: &Corpus) -> Symbol {
        let span = self.get(id).span;
        corpus.symbol(span.doc, span.start + i)
    }

    /// Symbols of the edge label into `id`
    pub fn label<'c>(&self, id: NodeId, corpus: &'c Corpus) -> &'c [Symbol] {
        if id == ROOT {
            return &[];
        }
        let span = self.get(id).span;
        let end = span.start + self.edge_len(id, corpus);
        &corpus.symbols(span.doc)[span.start..end]
    }

    /// Attach a new leaf under `parent`
    pub fn add_leaf(&mut self, parent: NodeId, key: Symbol, span: Span) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node::new(span, Some(parent)));
        self.get_mut(parent).children.insert(key, id);
        id
    }

    /// Split the edge into `node` after `at` symbols
    ///
    /// A new internal node takes over the first `at` symbols of the label
    /// and the slot `node` occupied under its parent; `node` keeps the rest
    /// of its label and hangs below the new node. Returns the new node.
    pub fn split(&mut self, node: NodeId, at: usize, corpus: &Corpus) -> NodeId {
        debug_assert!(at >= 1 && at < self.edge_len(node, corpus));

        let parent = self
            .get(node)
            .parent
            .expect("the root has no incoming edge to split");
        let key = self.symbol_at(node, 0, corpus);
        let span = self.get(node).span;

        let mid = self.nodes.len() as NodeId;
        self.nodes
            .push(Node::new(Span::closed(span.doc, span.start, at), Some(parent)));

        let lower = self.get_mut(node);
        lower.span = Span {
            doc: span.doc,
            start: span.start + at,
            len: span.len.map(|len| len - at),
        };
        lower.parent = Some(mid);

        let lower_key = self.symbol_at(node, 0, corpus);
        self.get_mut(mid).children.insert(lower_key, node);
        self.get_mut(parent).children.insert(key, mid);

        tracing::trace!(node, mid, at, "split edge");
        mid
    }
}
