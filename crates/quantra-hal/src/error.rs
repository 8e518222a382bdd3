//! Error types for the HAL crate.

use thiserror::Error;

use crate::capability::Paradigm;

/// Errors that can occur in HAL operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Generic execution-time failure.
    #[error("Operation '{operation}' failed: {message}")]
    Operation {
        /// What was being attempted.
        operation: String,
        /// Why it failed.
        message: String,
    },

    /// The requested feature has no backend-executable realisation.
    #[error("Not implemented: {feature}{}", format_hint(.hint))]
    NotImplemented {
        /// Missing feature.
        feature: String,
        /// Optional pointer to an alternative.
        hint: Option<String>,
    },

    /// No backend in the pool can run the program.
    #[error(
        "No compatible backend for {paradigm} program with {num_qubits} qubits ({candidates} backends considered)"
    )]
    NoCompatibleBackend {
        /// Paradigm of the program.
        paradigm: Paradigm,
        /// Width of the program.
        num_qubits: u32,
        /// Size of the pool.
        candidates: usize,
    },

    /// Program exceeds the backend's qubit limit.
    #[error("Program needs {num_qubits} qubits but backend '{backend}' supports at most {limit}")]
    CircuitTooLarge {
        /// Width of the program.
        num_qubits: u32,
        /// Backend limit.
        limit: u32,
        /// Backend name.
        backend: String,
    },

    /// Invalid number of shots.
    #[error("Invalid shots: {0} (must be at least 1)")]
    InvalidShots(usize),

    /// Decomposed execution was cancelled between sub-problems.
    #[error("Cancelled after {completed} of {total} sub-problems")]
    Cancelled {
        /// Sub-problems solved before cancellation.
        completed: usize,
        /// Total sub-problems in the plan.
        total: usize,
    },

    /// Backend is not available.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Simulation error.
    #[error("Simulation error: {0}")]
    Sim(#[from] quantra_sim::SimError),

    /// Circuit IR error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] quantra_ir::IrError),
}

impl HalError {
    /// Shorthand for [`HalError::Operation`].
    pub fn operation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        HalError::Operation {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Shorthand for [`HalError::NotImplemented`].
    pub fn not_implemented(feature: impl Into<String>, hint: Option<&str>) -> Self {
        HalError::NotImplemented {
            feature: feature.into(),
            hint: hint.map(str::to_string),
        }
    }
}

/// Helper function to format an optional hint.
#[allow(clippy::ref_option)]
fn format_hint(hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!(" (hint: {hint})"),
        None => String::new(),
    }
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
