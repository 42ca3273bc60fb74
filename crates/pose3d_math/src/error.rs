//! Error types for conversions and algebra
//!
//! Numeric domain problems (e.g. a sine drifting past ±1 from round-off) are
//! never reported here; the call site absorbs them.

use thiserror::Error;

/// Error type for rotation and pose operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A division by a norm below epsilon with no principled default
    #[error("Degenerate input in {operation}: norm {norm:e} is below epsilon")]
    DegenerateInput {
        /// Name of the failing operation
        operation: &'static str,
        /// The offending norm
        norm: f64,
    },
    /// Unsupported axis sequence, method name, policy or malformed matrix layout
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Input that should be unit (quaternion) or orthogonal (rotation block) is not
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TransformError>;
