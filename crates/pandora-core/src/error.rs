//! Error types for the transformation engine.

use thiserror::Error;

/// Error type for engine operations.
#[derive(Debug, Error)]
pub enum PandoraError {
    /// An adjustment, filter, preset, blend mode or gradient name is not in the catalog.
    #[error("Cannot find '{name}' {kind}")]
    UnknownOperation { kind: &'static str, name: String },

    /// An operation was given fewer parameters than it requires.
    #[error("Cannot find parameters for '{operation}': expected {expected}, got {actual}")]
    MissingParameters {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A fill color could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Kernel weights do not form an odd-sided square.
    #[error("Invalid kernel: {0} weights do not form an odd-sided square")]
    InvalidKernel(usize),

    /// Pixel data length doesn't match the dimensions.
    #[error("Invalid pixel buffer: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },

    /// A preset document could not be parsed.
    #[error("Invalid preset definition: {0}")]
    InvalidPreset(String),
}

impl PandoraError {
    pub(crate) fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        PandoraError::UnknownOperation {
            kind,
            name: name.into(),
        }
    }
}

/// Result type for engine operations.
pub type PandoraResult<T> = Result<T, PandoraError>;
