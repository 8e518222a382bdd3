//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate references a qubit outside the circuit.
    #[error("Qubit {qubit} out of range for {num_qubits}-qubit circuit (gate: {gate})")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the circuit.
        num_qubits: u32,
        /// Name of the gate.
        gate: &'static str,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation (gate: {gate})")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the gate.
        gate: &'static str,
    },

    /// Gate name could not be parsed.
    #[error("Unknown gate name '{0}'")]
    UnknownGate(String),

    /// A QUBO/Ising term references a variable outside the model.
    #[error("Variable {index} out of range for model with {num_variables} variables")]
    VariableOutOfRange {
        /// The offending variable.
        index: usize,
        /// Number of variables in the model.
        num_variables: usize,
    },

    /// An assignment has the wrong number of variables for its model.
    #[error("Assignment has {got} variables, model expects {expected}")]
    AssignmentLength {
        /// Number of variables in the model.
        expected: usize,
        /// Number of variables supplied.
        got: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
