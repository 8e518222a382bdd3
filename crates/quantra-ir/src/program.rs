//! Executable programs: plain gate circuits or Hamiltonian-based QAOA problems.

use crate::circuit::Circuit;
use crate::error::IrResult;
use crate::ising::IsingModel;
use crate::qubit::QubitId;

/// Mixer Hamiltonian driving a QAOA run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mixer {
    /// `Σ X_i`, realised as an `RX(2β)` layer.
    #[default]
    TransverseField,
}

/// One QAOA layer: cost angle `gamma` and mixer angle `beta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QaoaLayer {
    pub gamma: f64,
    pub beta: f64,
}

/// A problem Hamiltonian wrapped with a mixer and layer angles.
///
/// Annealing backends consume the Ising problem directly. Gate backends run
/// the lowered circuit from [`QaoaProgram::to_circuit`].
#[derive(Debug, Clone, PartialEq)]
pub struct QaoaProgram {
    pub problem: IsingModel,
    pub mixer: Mixer,
    pub layers: Vec<QaoaLayer>,
}

impl QaoaProgram {
    /// Wrap `problem` with a transverse-field mixer and the given layers.
    pub fn new(problem: IsingModel, layers: Vec<QaoaLayer>) -> Self {
        Self {
            problem,
            mixer: Mixer::TransverseField,
            layers,
        }
    }

    pub fn num_qubits(&self) -> u32 {
        u32::try_from(self.problem.num_spins()).unwrap_or(u32::MAX)
    }

    /// Lower to gates: a Hadamard layer, then per layer `RZZ(2γJ)` on every
    /// coupling, `RZ(2γh)` on every field and `RX(2β)` on every qubit.
    pub fn to_circuit(&self) -> IrResult<Circuit> {
        let n = self.num_qubits();
        let mut circuit = (0..n).try_fold(Circuit::empty(n), |c, q| c.h(QubitId(q)))?;
        for layer in &self.layers {
            for (&(a, b), &j) in self.problem.couplings() {
                circuit = circuit.rzz(2.0 * layer.gamma * j, qubit(a), qubit(b))?;
            }
            for (i, &h) in self.problem.fields().iter().enumerate() {
                if h != 0.0 {
                    circuit = circuit.rz(2.0 * layer.gamma * h, qubit(i))?;
                }
            }
            circuit = match self.mixer {
                Mixer::TransverseField => (0..n)
                    .try_fold(circuit, |c, q| c.rx(2.0 * layer.beta, QubitId(q)))?,
            };
        }
        Ok(circuit)
    }
}

fn qubit(index: usize) -> QubitId {
    QubitId(u32::try_from(index).unwrap_or(u32::MAX))
}

/// Anything a backend can be asked to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum Program {
    /// A raw gate circuit.
    Circuit(Circuit),
    /// A QAOA problem wrapper.
    Qaoa(QaoaProgram),
}

impl Program {
    pub fn num_qubits(&self) -> u32 {
        match self {
            Program::Circuit(c) => c.num_qubits(),
            Program::Qaoa(q) => q.num_qubits(),
        }
    }

    /// The gate circuit to simulate; QAOA programs are lowered.
    pub fn to_circuit(&self) -> IrResult<Circuit> {
        match self {
            Program::Circuit(c) => Ok(c.clone()),
            Program::Qaoa(q) => q.to_circuit(),
        }
    }

    pub fn as_circuit(&self) -> Option<&Circuit> {
        match self {
            Program::Circuit(c) => Some(c),
            Program::Qaoa(_) => None,
        }
    }
}

impl From<Circuit> for Program {
    fn from(circuit: Circuit) -> Self {
        Program::Circuit(circuit)
    }
}

impl From<QaoaProgram> for Program {
    fn from(program: QaoaProgram) -> Self {
        Program::Qaoa(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{Gate, GateKind};

    #[test]
    fn test_lowering_shape() {
        let problem = IsingModel::new(3)
            .with_coupling(0, 1, 1.0)
            .unwrap()
            .with_coupling(1, 2, 1.0)
            .unwrap()
            .with_field(2, 0.5)
            .unwrap();
        let program = QaoaProgram::new(
            problem,
            vec![
                QaoaLayer {
                    gamma: 0.3,
                    beta: 0.7,
                },
                QaoaLayer {
                    gamma: 0.1,
                    beta: 0.2,
                },
            ],
        );
        let c = program.to_circuit().unwrap();
        // 3 H + 2 * (2 RZZ + 1 RZ + 3 RX)
        assert_eq!(c.gate_count(), 3 + 2 * 6);
        assert_eq!(c.gates()[3], Gate::Rzz(QubitId(0), QubitId(1), 0.6));
        assert!(c.gate_kinds().contains(&GateKind::Rx));
    }

    #[test]
    fn test_program_from_circuit() {
        let p: Program = Circuit::bell().unwrap().into();
        assert_eq!(p.num_qubits(), 2);
        assert!(p.as_circuit().is_some());
    }
}
