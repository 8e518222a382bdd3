//! Error types for the compilation crate.

use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// No built-in profile matches the requested backend name.
    #[error("Unknown backend profile '{name}' (known: {})", .known.join(", "))]
    UnknownBackend {
        /// Name that was looked up.
        name: String,
        /// Registry keys that do exist.
        known: Vec<String>,
    },

    /// A pass needs a target but none was set.
    #[error("Pass '{0}' requires a target backend profile")]
    MissingTarget(String),

    /// Rewriting produced a malformed circuit.
    #[error("IR error: {0}")]
    Ir(#[from] quantra_ir::IrError),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
