//! Error types for the search engine.

use thiserror::Error;

/// Errors that can occur while indexing or searching.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A vector's length disagrees with the store's dimensionality, or two vectors compared by a
    /// metric have different lengths.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension provided.
        actual: usize,
    },

    /// A caller-supplied argument is outside its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The embedding capability failed.
    #[error("embedding failed: {0}")]
    Embedding(#[source] anyhow::Error),
}

impl SearchError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
