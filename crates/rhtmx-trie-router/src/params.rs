//! Parameter capture bag for a single match attempt
//!
//! Bindings live in an insertion-ordered map. While matching, every binding
//! also records the value it replaced in an undo log, so the matcher can take
//! a checkpoint before a speculative branch and unwind back to it when the
//! branch fails. Only bindings on the successful path stay observable.

use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};

/// Captured parameters and catch-all remainder
///
/// # Examples
///
/// ```
/// use rhtmx_trie_router::{Parameters, TrieRouter};
///
/// let mut router = TrieRouter::new();
/// router.register(42, ["users", ":user", "**"]);
///
/// let mut params = Parameters::new();
/// assert_eq!(router.route(&["users", "tanner", "posts", "2"], &mut params), Some(&42));
/// assert_eq!(params.get("user"), Some("tanner"));
/// assert_eq!(params.get_catchall(), ["posts", "2"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    values: IndexMap<String, String>,
    catchall: Option<Vec<String>>,
    /// Name and replaced value of each binding made since the last commit
    undo: Vec<(String, Option<String>)>,
}

/// Position in the undo log, restored by [`Parameters::rollback`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    undo: usize,
    has_catchall: bool,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Parses the value bound to `name`
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_trie_router::Parameters;
    ///
    /// let mut params = Parameters::new();
    /// params.set("id", "42");
    /// assert_eq!(params.get_as::<u32>("id"), Some(42));
    /// assert_eq!(params.get_as::<u32>("missing"), None);
    /// ```
    pub fn get_as<V: FromStr>(&self, name: &str) -> Option<V> {
        self.get(name)?.parse().ok()
    }

    /// Names of all bound parameters, in first-binding order
    pub fn all_names(&self) -> IndexSet<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    /// Catch-all remainder, empty when no catch-all produced the match
    pub fn get_catchall(&self) -> &[String] {
        self.catchall.as_deref().unwrap_or_default()
    }

    /// Catch-all remainder, `None` when no catch-all produced the match
    pub fn catchall(&self) -> Option<&[String]> {
        self.catchall.as_deref()
    }

    /// Iterates over bindings in first-binding order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of named bindings; the catch-all remainder is not counted
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no named bindings
    ///
    /// Agrees with [`len`](Self::len); check [`catchall`](Self::catchall)
    /// for the remainder.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Binds `name` to an already-decoded value, replacing any earlier value
    ///
    /// A replaced name keeps its original position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn set_catchall(&mut self, segments: Vec<String>) {
        self.catchall = Some(segments);
    }

    /// Drops every binding so the bag can be reused for another match
    pub fn clear(&mut self) {
        self.values.clear();
        self.catchall = None;
        self.undo.clear();
    }

    /// Binds like [`set`](Self::set), remembering the replaced value
    pub(crate) fn bind(&mut self, name: &str, value: impl Into<String>) {
        let replaced = self.values.insert(name.to_string(), value.into());
        self.undo.push((name.to_string(), replaced));
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            undo: self.undo.len(),
            has_catchall: self.catchall.is_some(),
        }
    }

    /// Unwinds every binding made since `checkpoint`, newest first
    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) {
        while self.undo.len() > checkpoint.undo {
            let Some((name, replaced)) = self.undo.pop() else {
                break;
            };
            match replaced {
                Some(value) => {
                    self.values.insert(name, value);
                }
                None => {
                    self.values.shift_remove(&name);
                }
            }
        }

        if !checkpoint.has_catchall {
            self.catchall = None;
        }
    }

    /// Forgets the undo log once a match attempt is over
    pub(crate) fn commit(&mut self) {
        self.undo.clear();
    }
}

impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.catchall == other.catchall
    }
}

impl Eq for Parameters {}
