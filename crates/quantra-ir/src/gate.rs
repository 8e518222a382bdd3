//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::IrError;
use crate::qubit::QubitId;

/// A gate together with the qubits it acts on and its real parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    // Single-qubit Clifford gates
    /// Hadamard gate.
    H(QubitId),
    /// Pauli-X gate.
    X(QubitId),
    /// Pauli-Y gate.
    Y(QubitId),
    /// Pauli-Z gate.
    Z(QubitId),
    /// S gate (sqrt(Z)).
    S(QubitId),
    /// S-dagger gate.
    Sdg(QubitId),
    /// T gate (fourth root of Z).
    T(QubitId),
    /// T-dagger gate.
    Tdg(QubitId),

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx { qubit: QubitId, theta: f64 },
    /// Rotation around Y axis.
    Ry { qubit: QubitId, theta: f64 },
    /// Phase rotation: multiplies the `|1⟩` amplitude by `e^{iθ}`.
    Rz { qubit: QubitId, theta: f64 },

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    Cnot { control: QubitId, target: QubitId },
    /// Controlled-Z gate.
    Cz { control: QubitId, target: QubitId },
    /// SWAP gate.
    Swap(QubitId, QubitId),
    /// ZZ rotation gate, `exp(-iθ/2 Z⊗Z)`.
    Rzz(QubitId, QubitId, f64),

    // Three-qubit gates
    /// Toffoli gate (CCX).
    Ccx {
        control1: QubitId,
        control2: QubitId,
        target: QubitId,
    },

    // Directives
    /// Projective measurement marker; leaves amplitudes untouched.
    Measure(QubitId),
    /// Scheduling barrier over a set of qubits.
    Barrier(Vec<QubitId>),
}

impl Gate {
    /// The operand-free kind of this gate.
    pub fn kind(&self) -> GateKind {
        match self {
            Gate::H(_) => GateKind::H,
            Gate::X(_) => GateKind::X,
            Gate::Y(_) => GateKind::Y,
            Gate::Z(_) => GateKind::Z,
            Gate::S(_) => GateKind::S,
            Gate::Sdg(_) => GateKind::Sdg,
            Gate::T(_) => GateKind::T,
            Gate::Tdg(_) => GateKind::Tdg,
            Gate::Rx { .. } => GateKind::Rx,
            Gate::Ry { .. } => GateKind::Ry,
            Gate::Rz { .. } => GateKind::Rz,
            Gate::Cnot { .. } => GateKind::Cnot,
            Gate::Cz { .. } => GateKind::Cz,
            Gate::Swap(..) => GateKind::Swap,
            Gate::Rzz(..) => GateKind::Rzz,
            Gate::Ccx { .. } => GateKind::Ccx,
            Gate::Measure(_) => GateKind::Measure,
            Gate::Barrier(_) => GateKind::Barrier,
        }
    }

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Qubits this gate acts on, in operand order.
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::H(q)
            | Gate::X(q)
            | Gate::Y(q)
            | Gate::Z(q)
            | Gate::S(q)
            | Gate::Sdg(q)
            | Gate::T(q)
            | Gate::Tdg(q)
            | Gate::Measure(q)
            | Gate::Rx { qubit: q, .. }
            | Gate::Ry { qubit: q, .. }
            | Gate::Rz { qubit: q, .. } => vec![*q],
            Gate::Cnot { control, target } | Gate::Cz { control, target } => {
                vec![*control, *target]
            }
            Gate::Swap(a, b) | Gate::Rzz(a, b, _) => vec![*a, *b],
            Gate::Ccx {
                control1,
                control2,
                target,
            } => vec![*control1, *control2, *target],
            Gate::Barrier(qubits) => qubits.clone(),
        }
    }

    /// The qubit pair of a two-qubit unitary, `None` for every other gate.
    pub fn qubit_pair(&self) -> Option<(QubitId, QubitId)> {
        match self {
            Gate::Cnot { control, target } | Gate::Cz { control, target } => {
                Some((*control, *target))
            }
            Gate::Swap(a, b) | Gate::Rzz(a, b, _) => Some((*a, *b)),
            _ => None,
        }
    }

    /// Returns the same gate acting on remapped qubits.
    pub fn map_qubits(&self, mut f: impl FnMut(QubitId) -> QubitId) -> Gate {
        match self {
            Gate::H(q) => Gate::H(f(*q)),
            Gate::X(q) => Gate::X(f(*q)),
            Gate::Y(q) => Gate::Y(f(*q)),
            Gate::Z(q) => Gate::Z(f(*q)),
            Gate::S(q) => Gate::S(f(*q)),
            Gate::Sdg(q) => Gate::Sdg(f(*q)),
            Gate::T(q) => Gate::T(f(*q)),
            Gate::Tdg(q) => Gate::Tdg(f(*q)),
            Gate::Rx { qubit, theta } => Gate::Rx {
                qubit: f(*qubit),
                theta: *theta,
            },
            Gate::Ry { qubit, theta } => Gate::Ry {
                qubit: f(*qubit),
                theta: *theta,
            },
            Gate::Rz { qubit, theta } => Gate::Rz {
                qubit: f(*qubit),
                theta: *theta,
            },
            Gate::Cnot { control, target } => Gate::Cnot {
                control: f(*control),
                target: f(*target),
            },
            Gate::Cz { control, target } => Gate::Cz {
                control: f(*control),
                target: f(*target),
            },
            Gate::Swap(a, b) => Gate::Swap(f(*a), f(*b)),
            Gate::Rzz(a, b, theta) => Gate::Rzz(f(*a), f(*b), *theta),
            Gate::Ccx {
                control1,
                control2,
                target,
            } => Gate::Ccx {
                control1: f(*control1),
                control2: f(*control2),
                target: f(*target),
            },
            Gate::Measure(q) => Gate::Measure(f(*q)),
            Gate::Barrier(qubits) => Gate::Barrier(qubits.iter().map(|q| f(*q)).collect()),
        }
    }

    /// Check whether this gate is a directive rather than a unitary.
    #[inline]
    pub fn is_directive(&self) -> bool {
        self.kind().is_directive()
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        match self {
            Gate::Rx { theta, .. } | Gate::Ry { theta, .. } | Gate::Rz { theta, .. } => {
                write!(f, "({theta:.4})")?;
            }
            Gate::Rzz(_, _, theta) => write!(f, "({theta:.4})")?,
            _ => {}
        }
        let qubits: Vec<String> = self.qubits().iter().map(ToString::to_string).collect();
        write!(f, " {}", qubits.join(", "))
    }
}

/// The operation of a gate, without operands.
///
/// This is the vocabulary backends use to advertise what they can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GateKind {
    H,
    X,
    Y,
    Z,
    S,
    Sdg,
    T,
    Tdg,
    Rx,
    Ry,
    Rz,
    Cnot,
    Cz,
    Swap,
    Rzz,
    Ccx,
    Measure,
    Barrier,
}

/// A set of gate kinds, ordered by declaration for stable formatting.
pub type GateSet = BTreeSet<GateKind>;

impl GateKind {
    /// Every gate kind, in declaration order.
    pub const ALL: [GateKind; 18] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::S,
        GateKind::Sdg,
        GateKind::T,
        GateKind::Tdg,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::Rz,
        GateKind::Cnot,
        GateKind::Cz,
        GateKind::Swap,
        GateKind::Rzz,
        GateKind::Ccx,
        GateKind::Measure,
        GateKind::Barrier,
    ];

    /// Canonical upper-case name.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::S => "S",
            GateKind::Sdg => "SDG",
            GateKind::T => "T",
            GateKind::Tdg => "TDG",
            GateKind::Rx => "RX",
            GateKind::Ry => "RY",
            GateKind::Rz => "RZ",
            GateKind::Cnot => "CNOT",
            GateKind::Cz => "CZ",
            GateKind::Swap => "SWAP",
            GateKind::Rzz => "RZZ",
            GateKind::Ccx => "CCX",
            GateKind::Measure => "MEASURE",
            GateKind::Barrier => "BARRIER",
        }
    }

    /// Number of qubits the gate acts on; `None` for the variadic barrier.
    #[inline]
    pub fn num_qubits(&self) -> Option<u32> {
        match self {
            GateKind::Cnot | GateKind::Cz | GateKind::Swap | GateKind::Rzz => Some(2),
            GateKind::Ccx => Some(3),
            GateKind::Barrier => None,
            _ => Some(1),
        }
    }

    /// Measurement and barrier are directives, every other kind is unitary.
    #[inline]
    pub fn is_directive(&self) -> bool {
        matches!(self, GateKind::Measure | GateKind::Barrier)
    }

    /// Build a gate set from names, e.g. `["H", "CNOT", "Rz"]`.
    pub fn set_from_names<'a>(
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<GateSet, IrError> {
        names.into_iter().map(|name| name.parse::<GateKind>()).collect()
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_uppercase().as_str() {
            "H" => GateKind::H,
            "X" => GateKind::X,
            "Y" => GateKind::Y,
            "Z" => GateKind::Z,
            "S" => GateKind::S,
            "SDG" => GateKind::Sdg,
            "T" => GateKind::T,
            "TDG" => GateKind::Tdg,
            "RX" => GateKind::Rx,
            "RY" => GateKind::Ry,
            "RZ" => GateKind::Rz,
            "CNOT" | "CX" => GateKind::Cnot,
            "CZ" => GateKind::Cz,
            "SWAP" => GateKind::Swap,
            "RZZ" => GateKind::Rzz,
            "CCX" | "CCNOT" | "TOFFOLI" => GateKind::Ccx,
            "MEASURE" => GateKind::Measure,
            "BARRIER" => GateKind::Barrier,
            _ => return Err(IrError::UnknownGate(s.to_string())),
        };
        Ok(kind)
    }
}
