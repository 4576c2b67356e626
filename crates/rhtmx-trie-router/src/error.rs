//! Errors raised by strict pattern registration

use thiserror::Error;

/// Reasons a pattern is rejected by [`validate_pattern`](crate::path::validate_pattern)
/// or [`TrieRouter::try_register`](crate::TrieRouter::try_register)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("catch-all must be the last path component ({trailing} component(s) follow it)")]
    ComponentAfterCatchall { trailing: usize },

    #[error("parameter at position {position} has an empty name")]
    EmptyParameterName { position: usize },

    #[error("parameter `:{new}` conflicts with `:{existing}` already registered at `/{at}`")]
    ConflictingParameterName {
        existing: String,
        new: String,
        at: String,
    },
}
