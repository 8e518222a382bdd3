//! High-level circuit builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateKind, GateSet};
use crate::qubit::QubitId;

/// A quantum circuit: a fixed qubit count and an ordered gate list.
///
/// Circuits are values. [`Circuit::add_gate`] returns a new circuit and leaves
/// the receiver untouched; the fluent builders (`h`, `cx`, ...) consume `self`
/// so a chain reads top to bottom without intermediate bindings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawCircuit")]
pub struct Circuit {
    num_qubits: u32,
    gates: Vec<Gate>,
}

/// Wire form of a [`Circuit`]; operands are checked on the way in.
#[derive(Deserialize)]
struct RawCircuit {
    num_qubits: u32,
    gates: Vec<Gate>,
}

impl TryFrom<RawCircuit> for Circuit {
    type Error = IrError;

    fn try_from(raw: RawCircuit) -> IrResult<Self> {
        Circuit::from_gates(raw.num_qubits, raw.gates)
    }
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits.
    pub fn empty(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            gates: vec![],
        }
    }

    /// Create a circuit from a gate list, checking every gate's operands.
    pub fn from_gates(num_qubits: u32, gates: impl IntoIterator<Item = Gate>) -> IrResult<Self> {
        gates
            .into_iter()
            .try_fold(Self::empty(num_qubits), Circuit::push)
    }

    /// Return a new circuit with `gate` appended.
    pub fn add_gate(&self, gate: Gate) -> IrResult<Circuit> {
        self.clone().push(gate)
    }

    /// Append `gate`, consuming the circuit.
    pub fn push(mut self, gate: Gate) -> IrResult<Self> {
        self.check_operands(&gate)?;
        self.gates.push(gate);
        Ok(self)
    }

    fn check_operands(&self, gate: &Gate) -> IrResult<()> {
        let qubits = gate.qubits();
        for (i, &qubit) in qubits.iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate: gate.name(),
                });
            }
            if qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate: gate.name(),
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(self, qubit: QubitId) -> IrResult<Self> {
        self.push(Gate::H(qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(self, qubit: QubitId) -> IrResult<Self> {
        self.push(Gate::X(qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(self, qubit: QubitId) -> IrResult<Self> {
        self.push(Gate::Y(qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(self, qubit: QubitId) -> IrResult<Self> {
        self.push(Gate::Z(qubit))
    }

    /// Apply S gate.
    pub fn s(self, qubit: QubitId) -> IrResult<Self> {
        self.push(Gate::S(qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(self, qubit: QubitId) -> IrResult<Self> {
        self.push(Gate::Sdg(qubit))
    }

    /// Apply T gate.
    pub fn t(self, qubit: QubitId) -> IrResult<Self> {
        self.push(Gate::T(qubit))
    }

    /// Apply T-dagger gate.
    pub fn tdg(self, qubit: QubitId) -> IrResult<Self> {
        self.push(Gate::Tdg(qubit))
    }

    /// Apply RX rotation.
    pub fn rx(self, theta: f64, qubit: QubitId) -> IrResult<Self> {
        self.push(Gate::Rx { qubit, theta })
    }

    /// Apply RY rotation.
    pub fn ry(self, theta: f64, qubit: QubitId) -> IrResult<Self> {
        self.push(Gate::Ry { qubit, theta })
    }

    /// Apply RZ rotation.
    pub fn rz(self, theta: f64, qubit: QubitId) -> IrResult<Self> {
        self.push(Gate::Rz { qubit, theta })
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(self, control: QubitId, target: QubitId) -> IrResult<Self> {
        self.push(Gate::Cnot { control, target })
    }

    /// Apply CZ gate.
    pub fn cz(self, control: QubitId, target: QubitId) -> IrResult<Self> {
        self.push(Gate::Cz { control, target })
    }

    /// Apply SWAP gate.
    pub fn swap(self, q1: QubitId, q2: QubitId) -> IrResult<Self> {
        self.push(Gate::Swap(q1, q2))
    }

    /// Apply ZZ rotation.
    pub fn rzz(self, theta: f64, q1: QubitId, q2: QubitId) -> IrResult<Self> {
        self.push(Gate::Rzz(q1, q2, theta))
    }

    /// Apply Toffoli gate.
    pub fn ccx(self, control1: QubitId, control2: QubitId, target: QubitId) -> IrResult<Self> {
        self.push(Gate::Ccx {
            control1,
            control2,
            target,
        })
    }

    // =========================================================================
    // Directives
    // =========================================================================

    /// Mark a qubit for measurement.
    pub fn measure(self, qubit: QubitId) -> IrResult<Self> {
        self.push(Gate::Measure(qubit))
    }

    /// Mark every qubit for measurement.
    pub fn measure_all(self) -> IrResult<Self> {
        (0..self.num_qubits).try_fold(self, |c, q| c.measure(QubitId(q)))
    }

    /// Insert a barrier across the given qubits.
    pub fn barrier(self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<Self> {
        self.push(Gate::Barrier(qubits.into_iter().collect()))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of gates, directives included.
    #[inline]
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// The gates, in order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Consume the circuit, yielding its gates.
    pub fn into_gates(self) -> Vec<Gate> {
        self.gates
    }

    /// Check if the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Distinct gate kinds, in order of first use.
    pub fn kinds_in_order(&self) -> Vec<GateKind> {
        let mut kinds = Vec::new();
        for gate in &self.gates {
            let kind = gate.kind();
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }

    /// The set of gate kinds used.
    pub fn gate_kinds(&self) -> GateSet {
        self.gates.iter().map(Gate::kind).collect()
    }

    // =========================================================================
    // Prebuilt circuits
    // =========================================================================

    /// Bell state `(|00⟩ + |11⟩)/√2`.
    pub fn bell() -> IrResult<Self> {
        Circuit::empty(2).h(QubitId(0))?.cx(QubitId(0), QubitId(1))
    }

    /// GHZ state over `n` qubits.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let circuit = Circuit::empty(n).h(QubitId(0))?;
        (1..n).try_fold(circuit, |c, q| c.cx(QubitId(q - 1), QubitId(q)))
    }
}
