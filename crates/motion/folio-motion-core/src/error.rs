//! Error types for the motion engine.
//!
//! Nothing here is ever shown to a page visitor: every failure degrades to
//! "show the final state". Errors exist for adapters and configuration.

use thiserror::Error;

/// Failures of the persistent key-value seam.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The platform exposes no storage (private mode, sandboxed frame, ...).
    #[error("key-value store unavailable")]
    Unavailable,
    /// The backend rejected the operation.
    #[error("key-value store error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    #[error("typewriter needs at least one phrase")]
    EmptyPhrases,
    #[error("invalid motion config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
