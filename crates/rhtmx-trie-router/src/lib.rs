//! # RHTMX Trie Router
//!
//! A path-segment trie that maps registered patterns to outputs of any type:
//! - Constant segments (`users`)
//! - Named parameters (`:id`)
//! - Single-segment wildcards (`*`)
//! - Trailing catch-alls (`**`, one or more segments)
//!
//! ## Matching Precedence
//!
//! At every node the matcher tries children in a fixed order and backtracks
//! when a branch dead-ends:
//!
//! 1. **Constant** - exact (or case-folded) literal match
//! 2. **Parameter** - captures one segment, percent-decoded
//! 3. **Wildcard** - consumes one segment without capturing
//! 4. **Catch-all** - consumes every remaining segment (at least one)
//!
//! Captures made on abandoned branches are rolled back, so a failed match
//! leaves no partial bindings behind.
//!
//! ## Trie Algebra
//!
//! Tries can be compared and merged by shape alone, even when their output
//! types differ: [`TrieRouter::is_superset`], [`TrieRouter::is_equivalent`]
//! and [`TrieRouter::zip`].
//!
//! ## Example
//!
//! ```
//! use rhtmx_trie_router::{Parameters, TrieRouter};
//!
//! let router = TrieRouter::new()
//!     .with_route("profile", ["users", ":user"])
//!     .with_route("files", ["static", "**"]);
//!
//! let mut params = Parameters::new();
//! assert_eq!(router.route(&["users", "Tanner"], &mut params), Some(&"profile"));
//! assert_eq!(params.get("user"), Some("Tanner"));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod algebra;
pub mod config;
pub mod error;
mod matcher;
pub mod node;
pub mod params;
pub mod path;
pub mod traversal;

pub use config::RouterConfig;
pub use error::PatternError;
pub use node::{NodeId, NodeRef};
pub use params::Parameters;
pub use path::{parse_path, render_path, PathComponent};
pub use traversal::BfsTraversal;

use node::Node;

// ============================================================================
// Router
// ============================================================================

/// Trie of registered patterns
///
/// Build it once (registration needs `&mut self`), then share it freely:
/// matching and traversal only need `&self`, and the router is `Send + Sync`
/// whenever `T` is.
#[derive(Debug, Clone)]
pub struct TrieRouter<T> {
    pub(crate) nodes: Vec<Node<T>>,
    pub(crate) config: RouterConfig,
}

impl<T> TrieRouter<T> {
    /// Creates an empty router with default settings (case-sensitive)
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Creates an empty router with the given configuration
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            nodes: vec![Node::root()],
            config,
        }
    }

    /// Creates a router with case-insensitive constant matching
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_trie_router::{Parameters, TrieRouter};
    ///
    /// let router = TrieRouter::with_case_insensitive(true).with_route(42, ["path", "TO", "fOo"]);
    ///
    /// let mut params = Parameters::new();
    /// assert_eq!(router.route(&["PATH", "tO", "FOo"], &mut params), Some(&42));
    /// ```
    pub fn with_case_insensitive(case_insensitive: bool) -> Self {
        Self::with_config(RouterConfig::default().with_case_insensitive(case_insensitive))
    }

    /// Configuration fixed at creation
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// True when nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[0].output.is_none()
    }

    /// Number of nodes, the root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// View of the root node, the entry point for traversal
    pub fn root(&self) -> NodeRef<'_, T> {
        NodeRef::new(self, NodeId::ROOT)
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Registers `output` at `pattern`
    ///
    /// Walks the pattern from the root, creating missing children on the way,
    /// and stores `output` on the final node. A later registration at the same
    /// node replaces the earlier output.
    ///
    /// Registration is permissive:
    /// - components after a catch-all are ignored
    /// - a parameter registered where a differently-named parameter already
    ///   exists re-binds that position to the new name
    ///
    /// Use [`try_register`](Self::try_register) to reject both cases instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_trie_router::{PathComponent, TrieRouter};
    ///
    /// let mut router = TrieRouter::new();
    /// router.register(42, ["foo", "bar", ":user"]);
    /// router.register(7, [PathComponent::constant("docs"), PathComponent::Catchall]);
    /// ```
    pub fn register<I>(&mut self, output: T, pattern: I)
    where
        I: IntoIterator,
        I::Item: Into<PathComponent>,
    {
        let pattern: Vec<PathComponent> = pattern.into_iter().map(Into::into).collect();
        let mut current = NodeId::ROOT;

        for (position, component) in pattern.iter().enumerate() {
            current = self.child_or_insert(current, component);

            if component.is_catchall() {
                let dropped = pattern.len() - position - 1;
                if dropped > 0 {
                    tracing::warn!(
                        pattern = %render_path(&pattern),
                        dropped,
                        "Ignoring components after catch-all"
                    );
                }
                break;
            }
        }

        tracing::debug!(pattern = %render_path(&pattern), "Registered route");
        self.nodes[current.0].output = Some(output);
    }

    /// Registers `output` at `pattern`, rejecting malformed patterns
    ///
    /// Fails without touching the trie when the pattern has components after a
    /// catch-all, an empty parameter name, or a parameter whose name differs
    /// from one already registered at the same position.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_trie_router::{PatternError, TrieRouter};
    ///
    /// let mut router = TrieRouter::new();
    /// router.try_register(1, ["users", ":id"]).unwrap();
    ///
    /// let err = router.try_register(2, ["users", ":name", "edit"]).unwrap_err();
    /// assert!(matches!(err, PatternError::ConflictingParameterName { .. }));
    /// ```
    pub fn try_register<I>(&mut self, output: T, pattern: I) -> Result<(), PatternError>
    where
        I: IntoIterator,
        I::Item: Into<PathComponent>,
    {
        let pattern: Vec<PathComponent> = pattern.into_iter().map(Into::into).collect();
        path::validate_pattern(&pattern)?;
        self.check_parameter_names(&pattern)?;
        self.register(output, pattern);
        Ok(())
    }

    /// Registers a route (functional builder)
    ///
    /// Consumes self and returns the router with the route added.
    pub fn with_route<I>(mut self, output: T, pattern: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathComponent>,
    {
        self.register(output, pattern);
        self
    }

    /// Walks the existing prefix of `pattern` looking for a parameter child
    /// bound under a different name
    fn check_parameter_names(&self, pattern: &[PathComponent]) -> Result<(), PatternError> {
        let mut current = NodeId::ROOT;

        for (position, component) in pattern.iter().enumerate() {
            let node = &self.nodes[current.0];

            if let (PathComponent::Parameter(new), Some((existing, _))) =
                (component, node.parameter.as_ref())
            {
                if existing != new {
                    return Err(PatternError::ConflictingParameterName {
                        existing: existing.clone(),
                        new: new.clone(),
                        at: render_path(&pattern[..position]),
                    });
                }
            }

            match self.existing_child(current, component) {
                Some(next) => current = next,
                None => break,
            }
        }

        Ok(())
    }

    pub(crate) fn existing_child(&self, id: NodeId, component: &PathComponent) -> Option<NodeId> {
        let node = &self.nodes[id.0];
        match component {
            PathComponent::Constant(value) => {
                node.constants.get(self.config.normalize(value).as_ref()).copied()
            }
            PathComponent::Parameter(_) => node.parameter.as_ref().map(|(_, id)| *id),
            PathComponent::Wildcard => node.wildcard,
            PathComponent::Catchall => node.catchall,
        }
    }

    pub(crate) fn child_or_insert(&mut self, id: NodeId, component: &PathComponent) -> NodeId {
        if let PathComponent::Parameter(name) = component {
            if let Some((existing, child)) = self.nodes[id.0].parameter.clone() {
                if &existing != name {
                    tracing::warn!(
                        existing = %existing,
                        new = %name,
                        "Re-binding parameter name at existing trie position"
                    );
                    self.nodes[id.0].parameter = Some((name.clone(), child));
                    self.nodes[child.0].component = Some(component.clone());
                }
                return child;
            }
        } else if let Some(child) = self.existing_child(id, component) {
            return child;
        }

        let child = NodeId(self.nodes.len());
        self.nodes.push(Node::child(Some(component.clone()), Some(id)));

        let node = &mut self.nodes[id.0];
        match component {
            PathComponent::Constant(value) => {
                let key = self.config.normalize(value).into_owned();
                node.constants.insert(key, child);
            }
            PathComponent::Parameter(name) => node.parameter = Some((name.clone(), child)),
            PathComponent::Wildcard => node.wildcard = Some(child),
            PathComponent::Catchall => node.catchall = Some(child),
        }

        child
    }

    // ========================================================================
    // Lookup Helpers
    // ========================================================================

    /// Resolves `path` from `start` through constant children only
    pub(crate) fn resolve_constants<S: AsRef<str>>(&self, start: NodeId, path: &[S]) -> Option<NodeId> {
        path.iter().try_fold(start, |id, segment| {
            self.constant_child(id, segment.as_ref())
        })
    }

    pub(crate) fn constant_child(&self, id: NodeId, segment: &str) -> Option<NodeId> {
        self.nodes[id.0]
            .constants
            .get(self.config.normalize(segment).as_ref())
            .copied()
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }
}

impl<T> Default for TrieRouter<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_router_is_empty() {
        let router: TrieRouter<i32> = TrieRouter::new();
        assert!(router.is_empty());
        assert_eq!(router.node_count(), 1);
    }

    #[test]
    fn test_register_shares_prefixes() {
        let mut router = TrieRouter::new();
        router.register(1, ["a", "b"]);
        router.register(2, ["a", "c"]);
        assert_eq!(router.node_count(), 4);
        assert!(!router.is_empty());
    }

    #[test]
    fn test_register_root_output() {
        let mut router = TrieRouter::new();
        router.register(1, Vec::<PathComponent>::new());
        assert!(!router.is_empty());
        assert_eq!(router.root().output(), Some(&1));
    }

    #[test]
    fn test_last_registration_wins() {
        let mut router = TrieRouter::new();
        router.register(1, ["a"]);
        router.register(2, ["a"]);
        let mut params = Parameters::new();
        assert_eq!(router.route(&["a"], &mut params), Some(&2));
    }

    #[test]
    fn test_components_after_catchall_are_ignored() {
        let mut router = TrieRouter::new();
        router.register(1, ["a", "**", "b"]);
        assert_eq!(router.node_count(), 3);

        let mut params = Parameters::new();
        assert_eq!(router.route(&["a", "x"], &mut params), Some(&1));
    }

    #[test]
    fn test_parameter_rebinding_replaces_name() {
        let mut router = TrieRouter::new();
        router.register(1, ["a", ":first"]);
        router.register(2, ["a", ":second", "b"]);

        let mut params = Parameters::new();
        assert_eq!(router.route(&["a", "x"], &mut params), Some(&1));
        assert_eq!(params.get("second"), Some("x"));
        assert_eq!(params.get("first"), None);
    }

    #[test]
    fn test_case_insensitive_keys_are_merged() {
        let mut router = TrieRouter::with_case_insensitive(true);
        router.register(1, ["Users"]);
        router.register(2, ["USERS", "me"]);
        assert_eq!(router.node_count(), 3);
    }

    #[test]
    fn test_try_register_rejects_catchall_not_last() {
        let mut router = TrieRouter::new();
        let err = router.try_register(1, ["a", "**", "b"]).unwrap_err();
        assert_eq!(err, PatternError::ComponentAfterCatchall { trailing: 1 });
        assert!(router.is_empty());
    }

    #[test]
    fn test_try_register_rejects_conflicting_parameter() {
        let mut router = TrieRouter::new();
        router.try_register(1, ["a", ":id"]).unwrap();

        let err = router.try_register(2, ["a", ":name"]).unwrap_err();
        assert_eq!(
            err,
            PatternError::ConflictingParameterName {
                existing: "id".to_string(),
                new: "name".to_string(),
                at: "a".to_string(),
            }
        );

        let mut params = Parameters::new();
        assert_eq!(router.route(&["a", "x"], &mut params), Some(&1));
        assert_eq!(params.get("id"), Some("x"));
    }

    #[test]
    fn test_try_register_accepts_same_parameter_name() {
        let mut router = TrieRouter::new();
        router.try_register(1, ["a", ":id"]).unwrap();
        router.try_register(2, ["a", ":id", "edit"]).unwrap();
        assert_eq!(router.node_count(), 4);
    }
}
