//! Backtracking matcher
//!
//! Depth-first search over the trie. At every node the children are tried in
//! natural order (constant → parameter → wildcard → catch-all); a branch that
//! dead-ends rolls its captures back before the next kind is tried.

use std::borrow::Cow;

use crate::node::NodeId;
use crate::params::Parameters;
use crate::path;
use crate::TrieRouter;

impl<T> TrieRouter<T> {
    /// Matches pre-split path segments against the registered patterns
    ///
    /// Returns the output of the first depth-first success. Parameter values
    /// are percent-decoded into `params`; a catch-all stores the remaining raw
    /// segments. A name bound again replaces its earlier value, so one bag can
    /// be reused across calls. When nothing matches, `params` is left as it was
    /// passed in.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_trie_router::{Parameters, TrieRouter};
    ///
    /// let router = TrieRouter::new()
    ///     .with_route("a", ["v1", "test"])
    ///     .with_route("b", ["v1", "**"])
    ///     .with_route("c", ["v1", "*"]);
    ///
    /// let mut params = Parameters::new();
    /// assert_eq!(router.route(&["v1", "test"], &mut params), Some(&"a"));
    /// assert_eq!(router.route(&["v1", "test", "foo"], &mut params), Some(&"b"));
    /// assert_eq!(router.route(&["v1", "foo"], &mut params), Some(&"c"));
    /// ```
    pub fn route<S: AsRef<str>>(&self, path: &[S], params: &mut Parameters) -> Option<&T> {
        let output = self.descend(NodeId::ROOT, path, params);
        params.commit();

        tracing::trace!(
            segments = path.len(),
            matched = output.is_some(),
            "Routed path"
        );

        output
    }

    /// Splits a request path with [`path::segments`] and routes it
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_trie_router::{Parameters, TrieRouter};
    ///
    /// let router = TrieRouter::new().with_route(1, ["users", ":id"]);
    ///
    /// let mut params = Parameters::new();
    /// assert_eq!(router.match_route("/users/42/", &mut params), Some(&1));
    /// assert_eq!(params.get("id"), Some("42"));
    /// ```
    pub fn match_route(&self, path: &str, params: &mut Parameters) -> Option<&T> {
        let segments = path::segments(path);
        self.route(segments.as_slice(), params)
    }

    fn descend<S: AsRef<str>>(&self, id: NodeId, path: &[S], params: &mut Parameters) -> Option<&T> {
        let node = self.node(id);

        let Some((head, rest)) = path.split_first() else {
            return node.output.as_ref();
        };
        let segment = head.as_ref();

        if let Some(child) = self.constant_child(id, segment) {
            if let Some(output) = self.descend(child, rest, params) {
                return Some(output);
            }
        }

        if let Some((name, child)) = &node.parameter {
            let checkpoint = params.checkpoint();
            params.bind(name, decode(segment));

            if let Some(output) = self.descend(*child, rest, params) {
                return Some(output);
            }
            params.rollback(checkpoint);
        }

        if let Some(child) = node.wildcard {
            if let Some(output) = self.descend(child, rest, params) {
                return Some(output);
            }
        }

        // Non-empty by construction: `path` had a head
        let output = self.node(node.catchall?).output.as_ref()?;
        params.set_catchall(path.iter().map(|s| s.as_ref().to_string()).collect());
        Some(output)
    }
}

/// Percent-decodes a captured value, keeping it verbatim when it is not valid
/// UTF-8 after decoding
fn decode(segment: &str) -> Cow<'_, str> {
    urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment))
}
