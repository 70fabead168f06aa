//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Pixel data does not match the surface.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Encoding the surface failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// Writing an exported frame failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
