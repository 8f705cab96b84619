//! Compiler adapter error types

use thiserror::Error;

/// Errors raised by a compiler adapter itself, as opposed to diagnostics it
/// reports about the code it was given
#[derive(Debug, Error)]
pub enum CompilerError {
    /// Neither a compiler nor compiler settings were configured
    #[error("No compiler configured: provide compiler settings or a compiler instance")]
    MissingSettings,

    /// The file extension does not map to a JavaScript/TypeScript source type
    #[error("Cannot determine source type for virtual file '{path}'")]
    InvalidSourceType { path: String },

    /// Anything else that went wrong inside the adapter
    #[error("Compiler failure: {0}")]
    Internal(String),
}

impl CompilerError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
