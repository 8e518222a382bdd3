//! Circuit validation against a backend profile.
//!
//! Every check returns the full list of violations it finds. [`validate_circuit`]
//! runs all four checks and concatenates their results, so a caller sees every
//! problem with a circuit in one pass.

use std::fmt::Write as _;

use thiserror::Error;
use tracing::debug;

use quantra_hal::{BackendConstraints, Connectivity};
use quantra_ir::{Circuit, GateKind, GateSet, QubitId};

/// A single constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The circuit is wider than the backend.
    #[error("Circuit requires {requested} qubits but backend '{backend}' supports at most {limit}")]
    QubitCountExceeded {
        /// Qubits the circuit uses.
        requested: u32,
        /// Backend limit.
        limit: u32,
        /// Backend name.
        backend: String,
    },

    /// The circuit uses a gate the backend cannot run.
    #[error("Gate {gate} is not supported by backend '{backend}' (supported: {})", join_gates(.supported))]
    UnsupportedGate {
        /// Offending gate kind.
        gate: GateKind,
        /// Backend name.
        backend: String,
        /// What the backend does support.
        supported: GateSet,
    },

    /// The circuit has more gates than the backend allows.
    #[error("Circuit depth {depth} exceeds the limit of {limit} for backend '{backend}'")]
    CircuitDepthExceeded {
        /// Gate count of the circuit.
        depth: usize,
        /// Backend limit.
        limit: usize,
        /// Backend name.
        backend: String,
    },

    /// A two-qubit gate couples qubits that are not connected.
    #[error("Qubits {q1} and {q2} are not connected on backend '{backend}'")]
    ConnectivityViolation {
        /// First operand.
        q1: QubitId,
        /// Second operand.
        q2: QubitId,
        /// Backend name.
        backend: String,
    },
}

fn join_gates(gates: &GateSet) -> String {
    gates
        .iter()
        .map(GateKind::name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check the circuit width against the backend limit.
pub fn validate_qubit_count(
    constraints: &BackendConstraints,
    circuit: &Circuit,
) -> Vec<ValidationError> {
    if circuit.num_qubits() > constraints.max_qubits {
        vec![ValidationError::QubitCountExceeded {
            requested: circuit.num_qubits(),
            limit: constraints.max_qubits,
            backend: constraints.name.clone(),
        }]
    } else {
        vec![]
    }
}

/// Report every distinct unsupported gate kind, in order of first use.
pub fn validate_gate_set(
    constraints: &BackendConstraints,
    circuit: &Circuit,
) -> Vec<ValidationError> {
    circuit
        .kinds_in_order()
        .into_iter()
        .filter(|&kind| !constraints.supports(kind))
        .map(|gate| ValidationError::UnsupportedGate {
            gate,
            backend: constraints.name.clone(),
            supported: constraints.supported_gates.clone(),
        })
        .collect()
}

/// Check the gate count against the depth limit, if the backend has one.
pub fn validate_circuit_depth(
    constraints: &BackendConstraints,
    circuit: &Circuit,
) -> Vec<ValidationError> {
    match constraints.max_circuit_depth {
        Some(limit) if circuit.gate_count() > limit => {
            vec![ValidationError::CircuitDepthExceeded {
                depth: circuit.gate_count(),
                limit,
                backend: constraints.name.clone(),
            }]
        }
        _ => vec![],
    }
}

/// Report every two-qubit gate whose operands are not coupled.
pub fn validate_connectivity(
    constraints: &BackendConstraints,
    circuit: &Circuit,
) -> Vec<ValidationError> {
    if constraints.connectivity == Connectivity::AllToAll {
        return vec![];
    }
    circuit
        .gates()
        .iter()
        .filter_map(|gate| gate.qubit_pair())
        .filter(|&(q1, q2)| !constraints.connectivity.allows(q1, q2))
        .map(|(q1, q2)| ValidationError::ConnectivityViolation {
            q1,
            q2,
            backend: constraints.name.clone(),
        })
        .collect()
}

/// Run all four checks.
///
/// Returns `Ok(())` only if every check passes; otherwise the concatenation
/// of all violations, grouped by check.
pub fn validate_circuit(
    constraints: &BackendConstraints,
    circuit: &Circuit,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = validate_qubit_count(constraints, circuit);
    errors.extend(validate_gate_set(constraints, circuit));
    errors.extend(validate_circuit_depth(constraints, circuit));
    errors.extend(validate_connectivity(constraints, circuit));

    debug!(
        "Validated {} gates against '{}': {} violation(s)",
        circuit.gate_count(),
        constraints.name,
        errors.len()
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Human-readable form of one violation.
pub fn format_validation_error(error: &ValidationError) -> String {
    error.to_string()
}

/// Human-readable summary of a list of violations.
pub fn format_validation_errors(errors: &[ValidationError]) -> String {
    let mut out = format!("{} validation error(s):", errors.len());
    for (i, error) in errors.iter().enumerate() {
        let _ = write!(out, "\n  {}. {}", i + 1, format_validation_error(error));
    }
    out
}
