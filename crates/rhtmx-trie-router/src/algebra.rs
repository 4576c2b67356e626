//! Trie algebra
//!
//! Shape-only comparison and merging of tries. Only the child kinds present
//! at each position and where outputs exist are compared, so two routers with
//! different output types can be compared and zipped together.

use crate::node::{NodeId, NodeRef};
use crate::path::PathComponent;
use crate::TrieRouter;

/// True when every position reachable in `inner`'s subtree is also reachable
/// in `outer`'s, with an output wherever `inner` has one
pub(crate) fn contains_shape<T, U>(outer: &NodeRef<'_, T>, inner: &NodeRef<'_, U>) -> bool {
    let (outer_trie, inner_trie) = (outer.trie, inner.trie);
    let mut stack = vec![(outer.id, inner.id)];

    while let Some((outer_id, inner_id)) = stack.pop() {
        let outer_node = outer_trie.node(outer_id);
        let inner_node = inner_trie.node(inner_id);

        if inner_node.output.is_some() && outer_node.output.is_none() {
            return false;
        }

        for (key, &inner_child) in &inner_node.constants {
            match outer_trie.constant_child(outer_id, key) {
                Some(outer_child) => stack.push((outer_child, inner_child)),
                None => return false,
            }
        }

        let kinds = [
            (
                inner_node.parameter.as_ref().map(|(_, id)| *id),
                outer_node.parameter.as_ref().map(|(_, id)| *id),
            ),
            (inner_node.wildcard, outer_node.wildcard),
            (inner_node.catchall, outer_node.catchall),
        ];

        for kind in kinds {
            match kind {
                (Some(inner_child), Some(outer_child)) => stack.push((outer_child, inner_child)),
                (Some(_), None) => return false,
                _ => {}
            }
        }
    }

    true
}

impl<T> TrieRouter<T> {
    /// True when a constant segment named `named` exists anywhere in the trie
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_trie_router::TrieRouter;
    ///
    /// let router = TrieRouter::new()
    ///     .with_route(0, [">", "Police", "zoom"])
    ///     .with_route(3, [">", "Cakes"]);
    ///
    /// assert!(router.has_slice("zoom"));
    /// assert!(!router.has_slice_under("zoom", &[">", "Cakes"]));
    /// ```
    pub fn has_slice(&self, named: &str) -> bool {
        self.has_slice_under::<&str>(named, &[])
    }

    /// True when a constant segment named `named` exists strictly below the
    /// node reached through `root_path`
    ///
    /// An unresolvable `root_path` yields `false`.
    pub fn has_slice_under<S: AsRef<str>>(&self, named: &str, root_path: &[S]) -> bool {
        let Some(start) = self.resolve_constants(NodeId::ROOT, root_path) else {
            return false;
        };
        let key = self.config.normalize(named);

        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.constants.contains_key(key.as_ref()) {
                return true;
            }
            stack.extend(node.children());
        }

        false
    }

    /// Structural containment: everything registered in `other` is also
    /// registered here, comparing shapes only
    ///
    /// Reflexive, and every router is a superset of an empty one.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_trie_router::TrieRouter;
    ///
    /// let lhs = TrieRouter::new()
    ///     .with_route(1, [">", "Depot"])
    ///     .with_route(2, [">", "Shutters"]);
    /// let rhs = TrieRouter::new().with_route(1.5, [">", "Depot"]);
    ///
    /// assert!(lhs.is_superset(&lhs));
    /// assert!(lhs.is_superset(&rhs));
    /// assert!(!rhs.is_superset(&lhs));
    /// ```
    pub fn is_superset<U>(&self, other: &TrieRouter<U>) -> bool {
        contains_shape(&self.root(), &other.root())
    }

    /// True when both routers have exactly the same registered shape
    pub fn is_equivalent<U>(&self, other: &TrieRouter<U>) -> bool {
        self.root().shape_eq(&other.root())
    }

    /// Merges two shape-equivalent routers
    ///
    /// Every output-bearing position gets `combine(absolute_path, self_output,
    /// other_output)`. Returns `None` unless the routers are
    /// [equivalent](Self::is_equivalent). The result keeps this router's
    /// configuration and child order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_trie_router::TrieRouter;
    ///
    /// let names = TrieRouter::new().with_route("Depot", [">", "Depot"]);
    /// let scores = TrieRouter::new().with_route(1.0, [">", "Depot"]);
    ///
    /// let zipped = names.zip(&scores, |_, name, score| (*name, *score)).unwrap();
    /// assert_eq!(zipped.neighbours(&[">"]).unwrap()[0].output(), Some(&("Depot", 1.0)));
    ///
    /// let extra = scores.with_route(2.0, [">", "Cakes"]);
    /// assert!(names.zip(&extra, |_, name, score| (*name, *score)).is_none());
    /// ```
    pub fn zip<U, V, F>(&self, other: &TrieRouter<U>, mut combine: F) -> Option<TrieRouter<V>>
    where
        F: FnMut(&[PathComponent], &T, &U) -> V,
    {
        if !self.is_equivalent(other) {
            tracing::debug!("Refusing to zip routers with different shapes");
            return None;
        }

        let mut zipped = TrieRouter::with_config(self.config.clone());
        let mut stack = vec![(NodeId::ROOT, NodeId::ROOT, NodeId::ROOT)];

        while let Some((self_id, other_id, zipped_id)) = stack.pop() {
            let self_node = self.node(self_id);

            if let (Some(lhs), Some(rhs)) = (&self_node.output, &other.node(other_id).output) {
                let path = NodeRef::new(self, self_id).absolute_path();
                zipped.nodes[zipped_id.0].output = Some(combine(&path, lhs, rhs));
            }

            // Constants resolve by their normalized key
            for (key, &self_child) in &self_node.constants {
                let other_child = other.constant_child(other_id, key)?;
                let component = self.node(self_child).component.as_ref()?;
                let zipped_child = zipped.child_or_insert(zipped_id, component);
                stack.push((self_child, other_child, zipped_child));
            }

            let variables = [
                self_node.parameter.as_ref().map(|(_, id)| *id),
                self_node.wildcard,
                self_node.catchall,
            ];
            for self_child in variables.into_iter().flatten() {
                let component = self.node(self_child).component.as_ref()?;
                let other_child = other.existing_child(other_id, component)?;
                let zipped_child = zipped.child_or_insert(zipped_id, component);
                stack.push((self_child, other_child, zipped_child));
            }
        }

        Some(zipped)
    }
}
