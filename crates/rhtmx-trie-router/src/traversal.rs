//! Traversal and introspection
//!
//! Breadth-first walks, neighbour queries and textual renderings of a trie.
//! These are debugging and tooling APIs, not part of the dispatch hot path.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use crate::node::{NodeId, NodeRef};
use crate::path::PathComponent;
use crate::TrieRouter;

type NeighbourOrder<'a, T> = Box<dyn FnMut(&NodeRef<'a, T>, &NodeRef<'a, T>) -> Ordering + 'a>;
type NeighbourFilter<'a, T> = Box<dyn FnMut(&NodeRef<'a, T>) -> bool + 'a>;

// ============================================================================
// Breadth-First Traversal
// ============================================================================

/// Configurable breadth-first traversal (functional builder)
///
/// The start node is visited first, then its descendants level by level.
/// Each visited node's children are sorted with the neighbour order (stable,
/// natural order by default) and enqueued only if the neighbour filter
/// accepts the node. An unresolvable root path visits nothing.
///
/// # Examples
///
/// ```
/// use rhtmx_trie_router::TrieRouter;
///
/// let router = TrieRouter::new()
///     .with_route(1, [">", "Police"])
///     .with_route(2, [">", "Police", "zoom"])
///     .with_route(3, [">", "Depot"]);
///
/// // Only expand nodes at depth <= 1
/// let visited = router
///     .bfs()
///     .with_neighbour_order(|a, b| b.output().cmp(&a.output()))
///     .with_neighbour_filter(|node| node.depth() <= 1)
///     .map(|path, _| rhtmx_trie_router::render_path(path));
///
/// assert_eq!(visited, vec!["", ">", ">/Depot", ">/Police"]);
/// ```
pub struct BfsTraversal<'a, T> {
    trie: &'a TrieRouter<T>,
    root_path: Vec<String>,
    order: Option<NeighbourOrder<'a, T>>,
    filter: Option<NeighbourFilter<'a, T>>,
}

impl<'a, T> BfsTraversal<'a, T> {
    pub(crate) fn new(trie: &'a TrieRouter<T>) -> Self {
        Self {
            trie,
            root_path: Vec::new(),
            order: None,
            filter: None,
        }
    }

    /// Starts the walk at the node reached through these constant segments
    pub fn with_root_path<S: AsRef<str>>(mut self, root_path: &[S]) -> Self {
        self.root_path = root_path.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Orders each node's children before they are enqueued
    pub fn with_neighbour_order<F>(mut self, order: F) -> Self
    where
        F: FnMut(&NodeRef<'a, T>, &NodeRef<'a, T>) -> Ordering + 'a,
    {
        self.order = Some(Box::new(order));
        self
    }

    /// Decides whether a visited node's children are enqueued
    ///
    /// Returning `false` prunes the subtree below that node.
    pub fn with_neighbour_filter<F>(mut self, filter: F) -> Self
    where
        F: FnMut(&NodeRef<'a, T>) -> bool + 'a,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Visits every reached node with its absolute path and output
    pub fn for_each<F>(self, mut visit: F)
    where
        F: FnMut(&[PathComponent], Option<&'a T>),
    {
        self.walk(|node| visit(&node.absolute_path(), node.output()));
    }

    /// Collects `transform(absolute_path, output)` for every reached node
    pub fn map<R, F>(self, mut transform: F) -> Vec<R>
    where
        F: FnMut(&[PathComponent], Option<&'a T>) -> R,
    {
        let mut results = Vec::new();
        self.walk(|node| results.push(transform(&node.absolute_path(), node.output())));
        results
    }

    /// Reached nodes in visiting order
    pub fn nodes(self) -> Vec<NodeRef<'a, T>> {
        let mut nodes = Vec::new();
        self.walk(|node| nodes.push(node));
        nodes
    }

    fn walk<F>(mut self, mut visit: F)
    where
        F: FnMut(NodeRef<'a, T>),
    {
        let trie = self.trie;
        let Some(start) = trie.resolve_constants(NodeId::ROOT, self.root_path.as_slice()) else {
            return;
        };

        let mut queue = VecDeque::from([NodeRef::new(trie, start)]);

        while let Some(node) = queue.pop_front() {
            visit(node);

            let expand = self.filter.as_mut().map_or(true, |filter| filter(&node));
            if !expand {
                continue;
            }

            let mut children = node.children();
            if let Some(order) = self.order.as_mut() {
                children.sort_by(|a, b| order(a, b));
            }
            queue.extend(children);
        }
    }
}

impl<T> TrieRouter<T> {
    /// Starts a configurable breadth-first traversal from the root
    pub fn bfs(&self) -> BfsTraversal<'_, T> {
        BfsTraversal::new(self)
    }

    /// Breadth-first walk below `root_path` in natural order
    pub fn for_each_bfs<S, F>(&self, root_path: &[S], visit: F)
    where
        S: AsRef<str>,
        F: FnMut(&[PathComponent], Option<&T>),
    {
        self.bfs().with_root_path(root_path).for_each(visit);
    }

    /// Visits every node of the trie breadth-first
    pub fn for_each<F>(&self, visit: F)
    where
        F: FnMut(&[PathComponent], Option<&T>),
    {
        self.bfs().for_each(visit);
    }

    /// Maps every node of the trie breadth-first
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_trie_router::TrieRouter;
    ///
    /// let router = TrieRouter::new()
    ///     .with_route(1, ["a", "b"])
    ///     .with_route(2, ["a", ":c"]);
    ///
    /// let outputs: Vec<Option<i32>> = router.map(|_, output| output.copied());
    /// assert_eq!(outputs, vec![None, None, Some(1), Some(2)]);
    /// ```
    pub fn map<R, F>(&self, transform: F) -> Vec<R>
    where
        F: FnMut(&[PathComponent], Option<&T>) -> R,
    {
        self.bfs().map(transform)
    }

    // ========================================================================
    // Neighbours
    // ========================================================================

    /// Direct children of the node reached through constant segments
    ///
    /// Returns `None` when `path` does not lead to an existing node, and an
    /// empty list when it leads to a leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_trie_router::TrieRouter;
    ///
    /// let router = TrieRouter::new()
    ///     .with_route(24, ["bar", "bar"])
    ///     .with_route(12, ["bar", "man"])
    ///     .with_route(6, ["bar", "man", ":yoo"]);
    ///
    /// let neighbours = router.neighbours(&["bar"]).unwrap();
    /// assert_eq!(neighbours.len(), 2);
    /// assert!(router.neighbours(&["nope"]).is_none());
    /// ```
    pub fn neighbours<S: AsRef<str>>(&self, path: &[S]) -> Option<Vec<NodeRef<'_, T>>> {
        let id = self.resolve_constants(NodeId::ROOT, path)?;
        Some(NodeRef::new(self, id).children())
    }

    /// Folds `combine` over the neighbours of `parent_path`
    ///
    /// Returns `None` when `parent_path` does not resolve.
    pub fn reduce_neighbours<'a, S, B, F>(&'a self, parent_path: &[S], initial: B, combine: F) -> Option<B>
    where
        S: AsRef<str>,
        F: FnMut(B, NodeRef<'a, T>) -> B,
    {
        let neighbours = self.neighbours(parent_path)?;
        Some(neighbours.into_iter().fold(initial, combine))
    }

    // ========================================================================
    // Renderings
    // ========================================================================

    /// Renders the trie as a Graphviz `digraph`
    ///
    /// Nodes are emitted breadth-first; `labeler` receives each node's
    /// absolute path (empty for the root) and output.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_trie_router::TrieRouter;
    ///
    /// let router = TrieRouter::new().with_route("leaf", ["a"]);
    /// let dot = router.to_dot(|path, output| match output {
    ///     Some(output) => output.to_string(),
    ///     None => rhtmx_trie_router::render_path(path),
    /// });
    ///
    /// assert_eq!(dot, "digraph {\n  n0 [label=\"\"];\n  n1 [label=\"leaf\"];\n  n0 -> n1;\n}\n");
    /// ```
    pub fn to_dot<F>(&self, mut labeler: F) -> String
    where
        F: FnMut(&[PathComponent], Option<&T>) -> String,
    {
        let mut dot = String::from("digraph {\n");

        self.bfs().walk(|node| {
            let label = labeler(&node.absolute_path(), node.output());
            dot.push_str(&format!(
                "  n{} [label=\"{}\"];\n",
                node.id().index(),
                escape_dot_label(&label)
            ));

            if let Some(parent) = node.parent() {
                dot.push_str(&format!(
                    "  n{} -> n{};\n",
                    parent.id().index(),
                    node.id().index()
                ));
            }
        });

        dot.push_str("}\n");
        dot
    }
}

fn escape_dot_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Indented tree of the trie, depth-first in natural child order
///
/// ```
/// use rhtmx_trie_router::TrieRouter;
///
/// let router = TrieRouter::new()
///     .with_route(0, ["a", "*"])
///     .with_route(1, ["**"]);
///
/// assert_eq!(router.to_string(), "→ a\n  → *\n→ **");
/// ```
impl<T> fmt::Display for TrieRouter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: Vec<(NodeId, usize)> = Vec::new();
        push_children(self, NodeId::ROOT, 0, &mut stack);

        let mut first = true;
        while let Some((id, depth)) = stack.pop() {
            if let Some(component) = &self.node(id).component {
                if !first {
                    f.write_str("\n")?;
                }
                first = false;
                write!(f, "{}→ {}", "  ".repeat(depth), component)?;
            }
            push_children(self, id, depth + 1, &mut stack);
        }

        Ok(())
    }
}

/// Pushes children in reverse so they pop in natural order
fn push_children<T>(trie: &TrieRouter<T>, id: NodeId, depth: usize, stack: &mut Vec<(NodeId, usize)>) {
    let children: Vec<NodeId> = trie.node(id).children().collect();
    stack.extend(children.into_iter().rev().map(|child| (child, depth)));
}
