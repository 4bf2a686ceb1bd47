//! Resolver error types.

use thiserror::Error;

/// Result type alias for resolver operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors reported to the caller of the resolution chain.
///
/// Downstream collaborator failures never appear here; they fold into the
/// chain as empty output. The worst user-visible outcome is the fixed
/// offline message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The query was empty after trimming. No source is attempted.
    #[error("query is empty")]
    EmptyQuery,
}
