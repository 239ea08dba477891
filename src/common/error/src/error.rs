//! Core error types for algraph.

use thiserror::Error;

/// Result type alias using `AlgraphError`.
pub type AlgraphResult<T> = std::result::Result<T, AlgraphError>;

/// Core error type for algraph operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgraphError {
    /// Two graphs of incompatible kinds were combined.
    #[error("KindMismatch: cannot {op} a {left} graph with a {right} graph")]
    KindMismatch {
        /// Kind of the left operand.
        left: String,
        /// Kind of the right operand.
        right: String,
        /// Name of the rejected operation.
        op: &'static str,
    },

    /// A configured resource limit was exceeded.
    #[error("ResourceExhausted: {0}")]
    ResourceExhausted(String),

    /// Reference to a vertex or edge that the graph does not contain.
    #[error("GraphError: {0}")]
    GraphError(String),

    /// Invalid parameter provided.
    #[error("InvalidParameter: {0}")]
    InvalidParameter(String),

    /// JSON serialization error.
    #[error("SerdeJsonError: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AlgraphError {
    /// Create a new `KindMismatch` error.
    pub fn kind_mismatch(
        left: impl std::fmt::Display,
        right: impl std::fmt::Display,
        op: &'static str,
    ) -> Self {
        Self::KindMismatch {
            left: left.to_string(),
            right: right.to_string(),
            op,
        }
    }

    /// Create a new `ResourceExhausted` error.
    pub fn resource_exhausted<S: Into<String>>(msg: S) -> Self {
        Self::ResourceExhausted(msg.into())
    }

    /// Create a new `GraphError`.
    pub fn graph<S: Into<String>>(msg: S) -> Self {
        Self::GraphError(msg.into())
    }

    /// Create a new `InvalidParameter` error.
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Whether this error is a rejected kind combination.
    pub const fn is_kind_mismatch(&self) -> bool {
        matches!(self, Self::KindMismatch { .. })
    }
}

/// Ensure a condition holds, returning an error if not.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $variant:ident: $($msg:tt)*) => {
        if !$cond {
            return Err($crate::AlgraphError::$variant(format!($($msg)*)));
        }
    };
}

/// Return early with a `GraphError`.
#[macro_export]
macro_rules! graph_err {
    ($($arg:tt)*) => {
        return Err($crate::AlgraphError::GraphError(format!($($arg)*)))
    };
}
