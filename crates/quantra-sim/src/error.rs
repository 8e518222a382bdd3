//! Error types for the sim crate.

use quantra_ir::QubitId;
use thiserror::Error;

/// Errors produced by state-vector simulation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Register width outside the simulable range.
    #[error("Cannot simulate {num_qubits} qubits: supported range is 1..={max}")]
    InvalidQubitCount {
        /// Requested width.
        num_qubits: u32,
        /// Largest supported width.
        max: u32,
    },

    /// A gate references a qubit the state does not have.
    #[error("Gate {gate} references qubit {qubit} but the state only has {num_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the state.
        num_qubits: u32,
        /// Gate name.
        gate: &'static str,
    },

    /// A gate references the same qubit twice.
    #[error("Gate {gate} references qubit {qubit} more than once")]
    DuplicateQubit {
        /// The repeated qubit.
        qubit: QubitId,
        /// Gate name.
        gate: &'static str,
    },

    /// A per-qubit parameter vector does not match the register width.
    #[error("Expected {expected} parameters (one per qubit), got {got}")]
    ParameterLengthMismatch {
        /// Register width.
        expected: usize,
        /// Parameters supplied.
        got: usize,
    },

    /// Circuit and state widths differ.
    #[error("Circuit has {circuit} qubits but the state has {state}")]
    WidthMismatch {
        /// Circuit width.
        circuit: u32,
        /// State width.
        state: u32,
    },

    /// Basis index outside the amplitude vector.
    #[error("Basis index {index} out of range for dimension {dimension}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Vector length.
        dimension: usize,
    },

    /// Amplitude vector is not a power of two long, or not normalised.
    #[error("Invalid amplitude vector: {0}")]
    InvalidAmplitudes(String),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] quantra_ir::IrError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
