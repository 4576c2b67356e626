//! Trie nodes
//!
//! Nodes live in an arena owned by [`TrieRouter`](crate::TrieRouter) and refer
//! to each other by [`NodeId`]. Every node records its parent and the component
//! on the edge leading to it, so absolute paths are rebuilt by walking upwards.

use indexmap::IndexMap;

use crate::path::PathComponent;
use crate::TrieRouter;

/// Index of a node in its router's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A trie vertex
///
/// Child kinds are visited in a fixed natural order: constants (insertion
/// order), parameter, wildcard, catch-all. A catch-all child never has children
/// of its own.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) component: Option<PathComponent>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) output: Option<T>,
    /// Keyed by normalized literal text
    pub(crate) constants: IndexMap<String, NodeId>,
    pub(crate) parameter: Option<(String, NodeId)>,
    pub(crate) wildcard: Option<NodeId>,
    pub(crate) catchall: Option<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn root() -> Self {
        Self::child(None, None)
    }

    pub(crate) fn child(component: Option<PathComponent>, parent: Option<NodeId>) -> Self {
        Self {
            component,
            parent,
            output: None,
            constants: IndexMap::new(),
            parameter: None,
            wildcard: None,
            catchall: None,
        }
    }

    /// Direct children in natural order
    pub(crate) fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.constants
            .values()
            .copied()
            .chain(self.parameter.as_ref().map(|(_, id)| *id))
            .chain(self.wildcard)
            .chain(self.catchall)
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.constants.is_empty()
            && self.parameter.is_none()
            && self.wildcard.is_none()
            && self.catchall.is_none()
    }
}

/// Borrowed view of a node inside a router
///
/// Handed out by introspection APIs such as
/// [`TrieRouter::neighbours`](crate::TrieRouter::neighbours).
pub struct NodeRef<'a, T> {
    pub(crate) trie: &'a TrieRouter<T>,
    pub(crate) id: NodeId,
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> std::fmt::Debug for NodeRef<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("path", &crate::path::render_path(&self.absolute_path()))
            .field("has_output", &self.output().is_some())
            .finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(trie: &'a TrieRouter<T>, id: NodeId) -> Self {
        Self { trie, id }
    }

    fn node(&self) -> &'a Node<T> {
        &self.trie.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Output registered at this node, if any
    pub fn output(&self) -> Option<&'a T> {
        self.node().output.as_ref()
    }

    /// Component on the edge from the parent; `None` for the root
    pub fn component(&self) -> Option<&'a PathComponent> {
        self.node().component.as_ref()
    }

    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.node().parent.map(|id| NodeRef::new(self.trie, id))
    }

    /// Components from the root down to this node
    pub fn absolute_path(&self) -> Vec<PathComponent> {
        let mut path = Vec::with_capacity(self.depth());
        let mut current = Some(*self);

        while let Some(node) = current {
            if let Some(component) = node.component() {
                path.push(component.clone());
            }
            current = node.parent();
        }

        path.reverse();
        path
    }

    /// Number of edges between the root and this node
    pub fn depth(&self) -> usize {
        std::iter::successors(self.node().parent, |id| self.trie.nodes[id.0].parent).count()
    }

    /// Direct children in natural order
    pub fn children(&self) -> Vec<NodeRef<'a, T>> {
        let trie = self.trie;
        self.node()
            .children()
            .map(|id| NodeRef::new(trie, id))
            .collect()
    }

    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    /// Shape equality with a node of a possibly differently-typed router
    ///
    /// Compares which child kinds exist, recursively, plus where outputs are
    /// present. Output values and parameter names are never compared.
    pub fn shape_eq<U>(&self, other: &NodeRef<'_, U>) -> bool {
        crate::algebra::contains_shape(other, self) && crate::algebra::contains_shape(self, other)
    }
}
