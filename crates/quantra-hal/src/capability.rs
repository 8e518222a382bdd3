//! Backend capability model.
//!
//! A [`BackendCapability`] is derived on demand from a live backend handle and
//! describes what the backend can run: its paradigm, qubit limit, directly
//! supported gates and a relative performance score used for ranking.

use std::fmt;

use serde::{Deserialize, Serialize};

use quantra_ir::{Gate, GateKind, GateSet, Program, QubitId};

use crate::backend::Backend;

/// Execution model a backend natively supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paradigm {
    /// Gate-model circuits.
    GateBased,
    /// Ising/QUBO optimisation by annealing.
    Annealing,
}

impl fmt::Display for Paradigm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paradigm::GateBased => write!(f, "gate-based"),
            Paradigm::Annealing => write!(f, "annealing"),
        }
    }
}

/// Score multiplier when the backend's paradigm matches the program.
const MATCHING_FITNESS: f64 = 1.0;
/// Score multiplier when it does not.
const MISMATCHED_FITNESS: f64 = 0.5;

/// Capability description of one backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendCapability {
    /// Paradigm of the backend's native state.
    pub paradigm: Paradigm,
    /// Qubit limit; `None` is unlimited.
    pub max_qubits: Option<u32>,
    /// Directly supported gate kinds; empty for annealing backends.
    pub supported_gates: GateSet,
    /// Relative ranking score, higher is better.
    pub performance_score: f64,
    /// Whether the backend reported itself available.
    pub is_available: bool,
}

impl BackendCapability {
    /// Check whether a program of `num_qubits` qubits fits the limit.
    pub fn fits(&self, num_qubits: u32) -> bool {
        self.max_qubits.is_none_or(|limit| num_qubits <= limit)
    }
}

/// Classify a program: QAOA wrappers are annealing problems, everything else
/// is a gate circuit.
pub fn detect_circuit_paradigm(program: &Program) -> Paradigm {
    match program {
        Program::Qaoa(_) => Paradigm::Annealing,
        Program::Circuit(_) => Paradigm::GateBased,
    }
}

/// Ranking score: grows with the qubit limit, scaled by paradigm fitness.
///
/// Unlimited backends score as if they had `u32::MAX` qubits.
pub fn performance_score(max_qubits: Option<u32>, paradigm_matches: bool) -> f64 {
    let fitness = if paradigm_matches {
        MATCHING_FITNESS
    } else {
        MISMATCHED_FITNESS
    };
    let qubits = f64::from(max_qubits.unwrap_or(u32::MAX));
    fitness * (1.0 + qubits.ln_1p())
}

/// Derive the capability of `backend`, scored against `program` if given.
///
/// Without a program every paradigm counts as a match.
pub fn backend_capability(backend: &dyn Backend, program: Option<&Program>) -> BackendCapability {
    let paradigm = backend.native_state_type();
    let max_qubits = backend.max_qubits();
    let supported_gates = match paradigm {
        Paradigm::Annealing => GateSet::new(),
        Paradigm::GateBased => GateKind::ALL
            .into_iter()
            .filter(|&kind| backend.supports_operation(&representative_gate(kind)))
            .collect(),
    };
    let matches = program.is_none_or(|p| detect_circuit_paradigm(p) == paradigm);
    BackendCapability {
        paradigm,
        max_qubits,
        supported_gates,
        performance_score: performance_score(max_qubits, matches),
        is_available: backend.is_available(),
    }
}

/// A representative gate of `kind` on the lowest qubits.
fn representative_gate(kind: GateKind) -> Gate {
    let (q0, q1, q2) = (QubitId(0), QubitId(1), QubitId(2));
    match kind {
        GateKind::H => Gate::H(q0),
        GateKind::X => Gate::X(q0),
        GateKind::Y => Gate::Y(q0),
        GateKind::Z => Gate::Z(q0),
        GateKind::S => Gate::S(q0),
        GateKind::Sdg => Gate::Sdg(q0),
        GateKind::T => Gate::T(q0),
        GateKind::Tdg => Gate::Tdg(q0),
        GateKind::Rx => Gate::Rx {
            qubit: q0,
            theta: 0.0,
        },
        GateKind::Ry => Gate::Ry {
            qubit: q0,
            theta: 0.0,
        },
        GateKind::Rz => Gate::Rz {
            qubit: q0,
            theta: 0.0,
        },
        GateKind::Cnot => Gate::Cnot {
            control: q0,
            target: q1,
        },
        GateKind::Cz => Gate::Cz {
            control: q0,
            target: q1,
        },
        GateKind::Swap => Gate::Swap(q0, q1),
        GateKind::Rzz => Gate::Rzz(q0, q1, 0.0),
        GateKind::Ccx => Gate::Ccx {
            control1: q0,
            control2: q1,
            target: q2,
        },
        GateKind::Measure => Gate::Measure(q0),
        GateKind::Barrier => Gate::Barrier(vec![q0]),
    }
}
