//! Backend-native quantum states.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quantra_ir::ising::ising_to_qubo_solution;
use quantra_sim::StateVector;

use crate::capability::Paradigm;
use crate::error::{HalError, HalResult};

/// Spin configurations returned by an annealing run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnealingSamples {
    /// One `±1` spin vector per read.
    pub reads: Vec<Vec<i8>>,
    /// Ising energy of each read.
    pub energies: Vec<f64>,
}

impl AnnealingSamples {
    /// The read with the lowest energy, with that energy.
    pub fn best(&self) -> Option<(&[i8], f64)> {
        self.reads
            .iter()
            .zip(self.energies.iter())
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(read, &energy)| (read.as_slice(), energy))
    }

    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }
}

/// The state a backend produces, in its native representation.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantumState {
    /// Dense amplitudes from a gate-based simulator.
    StateVector(StateVector),
    /// Reads from an annealer.
    Annealing(AnnealingSamples),
}

impl QuantumState {
    pub fn paradigm(&self) -> Paradigm {
        match self {
            QuantumState::StateVector(_) => Paradigm::GateBased,
            QuantumState::Annealing(_) => Paradigm::Annealing,
        }
    }

    /// Draw `shots` measurement records, one bit per qubit (qubit 0 first).
    ///
    /// State vectors are sampled by the Born rule. Annealing reads are drawn
    /// uniformly with replacement and mapped to bits (`+1 ↦ 0`, `-1 ↦ 1`).
    pub fn sample(&self, shots: usize, seed: Option<u64>) -> HalResult<Vec<Vec<u8>>> {
        match self {
            QuantumState::StateVector(sv) => Ok(sv.measure(shots, seed)),
            QuantumState::Annealing(samples) => {
                if samples.is_empty() {
                    return Err(HalError::operation("sample", "annealing run produced no reads"));
                }
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                Ok((0..shots)
                    .map(|_| {
                        let read = &samples.reads[rng.gen_range(0..samples.len())];
                        ising_to_qubo_solution(read)
                    })
                    .collect())
            }
        }
    }

    pub fn as_state_vector(&self) -> Option<&StateVector> {
        match self {
            QuantumState::StateVector(sv) => Some(sv),
            QuantumState::Annealing(_) => None,
        }
    }

    pub fn as_annealing(&self) -> Option<&AnnealingSamples> {
        match self {
            QuantumState::StateVector(_) => None,
            QuantumState::Annealing(samples) => Some(samples),
        }
    }
}

impl From<StateVector> for QuantumState {
    fn from(sv: StateVector) -> Self {
        QuantumState::StateVector(sv)
    }
}
