//! Error types for the render crate.

use charge_field_core::FieldError;
use thiserror::Error;

/// Errors produced while rasterizing or writing a scene.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A core operation rejected its input.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Writing a snapshot failed.
    #[error("i/o error: {0}")]
    Io(String),
}
