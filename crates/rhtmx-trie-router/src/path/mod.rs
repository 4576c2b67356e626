//! Path utilities for pattern literals and request paths
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.

pub mod component;
pub use component::PathComponent;

use crate::error::PatternError;

/// Parses a slash-separated pattern literal into components
///
/// A leading `/` is optional and empty segments are dropped, so `"/a//b"` and
/// `"a/b"` parse identically.
///
/// # Examples
///
/// ```
/// use rhtmx_trie_router::path::{parse_path, render_path};
/// use rhtmx_trie_router::PathComponent;
///
/// let components = parse_path("/users/:id/**");
/// assert_eq!(
///     components,
///     vec![
///         PathComponent::constant("users"),
///         PathComponent::parameter("id"),
///         PathComponent::Catchall,
///     ]
/// );
/// assert_eq!(render_path(&components), "users/:id/**");
/// ```
pub fn parse_path(path: &str) -> Vec<PathComponent> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(PathComponent::parse)
        .collect()
}

/// Renders components back into a pattern literal (no leading `/`)
pub fn render_path(components: &[PathComponent]) -> String {
    components
        .iter()
        .map(|component| component.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Splits a request path into segments
///
/// Handles all common user mistakes gracefully:
/// - Trailing slashes: `/path/` → `["path"]`
/// - Double slashes: `/path//to` → `["path", "to"]`
/// - Backslashes: `\path\to` → `["path", "to"]`
///
/// Segments are returned as-is; percent-decoding only happens to captured
/// parameter values during matching.
///
/// # Examples
///
/// ```
/// use rhtmx_trie_router::path::segments;
///
/// assert_eq!(segments("/users/123/"), vec!["users", "123"]);
/// assert_eq!(segments("\\docs\\guide"), vec!["docs", "guide"]);
/// assert!(segments("/").is_empty());
/// ```
pub fn segments(path: &str) -> Vec<&str> {
    path.split(|c: char| c == '/' || c == '\\')
        .filter(|s| !s.is_empty())
        .collect()
}

/// Strictly validates a pattern before registration
///
/// Registration itself is permissive; callers that want to reject malformed
/// patterns upstream run them through this first.
///
/// # Rules
///
/// - A catch-all must be the last component
/// - Parameter names must not be empty
///
/// # Examples
///
/// ```
/// use rhtmx_trie_router::path::{parse_path, validate_pattern};
///
/// assert!(validate_pattern(&parse_path("users/:id/**")).is_ok());
/// assert!(validate_pattern(&parse_path("users/**/edit")).is_err());
/// assert!(validate_pattern(&parse_path("users/:")).is_err());
/// ```
pub fn validate_pattern(components: &[PathComponent]) -> Result<(), PatternError> {
    components
        .iter()
        .enumerate()
        .try_for_each(|(position, component)| match component {
            PathComponent::Catchall if position + 1 < components.len() => {
                Err(PatternError::ComponentAfterCatchall {
                    trailing: components.len() - position - 1,
                })
            }
            PathComponent::Parameter(name) if name.is_empty() => {
                Err(PatternError::EmptyParameterName { position })
            }
            _ => Ok(()),
        })
}
