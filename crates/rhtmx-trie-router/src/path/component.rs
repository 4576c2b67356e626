//! Path components for trie patterns
//!
//! Pure functional parsing of pattern tokens into typed components.
//! All functions are **pure**: same input → same output, no side effects.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single component of a registered route pattern
///
/// Functional sum type for pattern matching trie edges.
///
/// # Lexical Form
///
/// | Token    | Component              |
/// |----------|------------------------|
/// | `:name`  | `Parameter("name")`    |
/// | `*`      | `Wildcard`             |
/// | `**`     | `Catchall`             |
/// | anything | `Constant(token)`      |
///
/// # Examples
///
/// ```
/// use rhtmx_trie_router::PathComponent;
///
/// assert_eq!(PathComponent::parse("users"), PathComponent::constant("users"));
/// assert_eq!(PathComponent::parse(":id"), PathComponent::parameter("id"));
/// assert_eq!(PathComponent::parse("*"), PathComponent::Wildcard);
/// assert_eq!(PathComponent::parse("**"), PathComponent::Catchall);
///
/// // Rendering is the exact inverse
/// assert_eq!(PathComponent::parameter("id").to_string(), ":id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PathComponent {
    /// Literal segment, matched by string equality (or case-folded equality)
    Constant(String),
    /// Named single-segment capture
    Parameter(String),
    /// Unnamed single-segment matcher
    Wildcard,
    /// Terminal matcher consuming one or more remaining segments
    Catchall,
}

impl PathComponent {
    /// Classifies a token into a component (pure function)
    ///
    /// Total: unrecognized forms fall back to `Constant`.
    pub fn parse(token: &str) -> Self {
        match token {
            "*" => PathComponent::Wildcard,
            "**" => PathComponent::Catchall,
            _ => match token.strip_prefix(':') {
                Some(name) => PathComponent::Parameter(name.to_string()),
                None => PathComponent::Constant(token.to_string()),
            },
        }
    }

    /// Shorthand for `PathComponent::Constant`
    pub fn constant(value: impl Into<String>) -> Self {
        PathComponent::Constant(value.into())
    }

    /// Shorthand for `PathComponent::Parameter`
    pub fn parameter(name: impl Into<String>) -> Self {
        PathComponent::Parameter(name.into())
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, PathComponent::Constant(_))
    }

    pub fn is_catchall(&self) -> bool {
        matches!(self, PathComponent::Catchall)
    }

    /// Literal text for constants, binding name for parameters
    pub fn name(&self) -> Option<&str> {
        match self {
            PathComponent::Constant(value) | PathComponent::Parameter(value) => Some(value),
            PathComponent::Wildcard | PathComponent::Catchall => None,
        }
    }
}

impl fmt::Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathComponent::Constant(value) => f.write_str(value),
            PathComponent::Parameter(name) => write!(f, ":{}", name),
            PathComponent::Wildcard => f.write_str("*"),
            PathComponent::Catchall => f.write_str("**"),
        }
    }
}

impl FromStr for PathComponent {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PathComponent::parse(s))
    }
}

impl From<&str> for PathComponent {
    fn from(token: &str) -> Self {
        PathComponent::parse(token)
    }
}

impl From<String> for PathComponent {
    fn from(token: String) -> Self {
        PathComponent::parse(&token)
    }
}

impl From<&String> for PathComponent {
    fn from(token: &String) -> Self {
        PathComponent::parse(token)
    }
}

impl From<&PathComponent> for PathComponent {
    fn from(component: &PathComponent) -> Self {
        component.clone()
    }
}

impl From<PathComponent> for String {
    fn from(component: PathComponent) -> Self {
        component.to_string()
    }
}
