//! Error types for engine operations.

use thiserror::Error;

use crate::ShapeId;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in engine operations.
///
/// Interactive intents never produce these: a refused resize or a move
/// without an active shape is a no-op, not an error. Only lookups by
/// explicit id and configuration checks fail.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Shape not found in the collection.
    #[error("Shape not found: {0}")]
    ShapeNotFound(ShapeId),

    /// An operation required an active shape but none is selected.
    #[error("No active shape")]
    NoActiveShape,

    /// Engine configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Intent script serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
