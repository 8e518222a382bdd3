//! Statevector simulation engine.

use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use quantra_ir::{Circuit, Gate, QubitId};

use crate::error::{SimError, SimResult};
use crate::matrix::Unitary2x2;

/// Largest register the engine will allocate (`2^20` amplitudes).
pub const MAX_QUBITS: u32 = 20;

/// Tolerance used by [`StateVector::from_amplitudes`] when checking the norm.
const NORM_TOLERANCE: f64 = 1e-10;

/// Axis of a per-qubit rotation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

/// A statevector representing a quantum state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: u32,
}

impl StateVector {
    /// Create a statevector initialized to |0...0⟩.
    pub fn init(num_qubits: u32) -> SimResult<Self> {
        check_width(num_qubits)?;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Build a state from explicit amplitudes.
    ///
    /// The length must be `2^n` for a supported `n` and the vector must be
    /// normalised.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> SimResult<Self> {
        let len = amplitudes.len();
        if !len.is_power_of_two() || len < 2 {
            return Err(SimError::InvalidAmplitudes(format!(
                "length {len} is not a power of two of at least 2"
            )));
        }
        let num_qubits = len.trailing_zeros();
        check_width(num_qubits)?;
        let state = Self {
            amplitudes,
            num_qubits,
        };
        let norm = state.norm();
        if (norm - 1.0).abs() > NORM_TOLERANCE {
            return Err(SimError::InvalidAmplitudes(format!("norm is {norm}")));
        }
        Ok(state)
    }

    /// Simulate `circuit` from |0...0⟩.
    #[instrument(skip(circuit), fields(num_qubits = circuit.num_qubits(), gates = circuit.gate_count()))]
    pub fn run(circuit: &Circuit) -> SimResult<Self> {
        let state = Self::init(circuit.num_qubits())?;
        let out = state.run_from(circuit)?;
        debug!("Simulated {} gates", circuit.gate_count());
        Ok(out)
    }

    /// Apply every gate of `circuit` to this state, returning the result.
    pub fn run_from(&self, circuit: &Circuit) -> SimResult<Self> {
        if circuit.num_qubits() != self.num_qubits {
            return Err(SimError::WidthMismatch {
                circuit: circuit.num_qubits(),
                state: self.num_qubits,
            });
        }
        let mut next = self.clone();
        for gate in circuit.gates() {
            next.apply_in_place(gate)?;
        }
        Ok(next)
    }

    /// Apply one gate, returning the new state.
    pub fn apply_gate(&self, gate: &Gate) -> SimResult<Self> {
        let mut next = self.clone();
        next.apply_in_place(gate)?;
        Ok(next)
    }

    /// Apply one rotation about `axis` to every qubit, `angles[q]` on qubit `q`.
    pub fn apply_rotation_layer(&self, axis: RotationAxis, angles: &[f64]) -> SimResult<Self> {
        if angles.len() != self.num_qubits as usize {
            return Err(SimError::ParameterLengthMismatch {
                expected: self.num_qubits as usize,
                got: angles.len(),
            });
        }
        let mut next = self.clone();
        for (q, &theta) in angles.iter().enumerate() {
            let m = match axis {
                RotationAxis::X => Unitary2x2::rx(theta),
                RotationAxis::Y => Unitary2x2::ry(theta),
                RotationAxis::Z => Unitary2x2::phase(theta),
            };
            next.apply_single(q, &m);
        }
        Ok(next)
    }

    fn check_operands(&self, gate: &Gate) -> SimResult<Vec<usize>> {
        let qubits = gate.qubits();
        for (i, &qubit) in qubits.iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(SimError::QubitOutOfRange {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate: gate.name(),
                });
            }
            if qubits[..i].contains(&qubit) {
                return Err(SimError::DuplicateQubit {
                    qubit,
                    gate: gate.name(),
                });
            }
        }
        Ok(qubits.into_iter().map(QubitId::index).collect())
    }

    fn apply_in_place(&mut self, gate: &Gate) -> SimResult<()> {
        let qubits = self.check_operands(gate)?;
        match gate {
            Gate::Cnot { .. } => self.apply_cx(qubits[0], qubits[1]),
            Gate::Cz { .. } => self.apply_cz(qubits[0], qubits[1]),
            Gate::Swap(..) => self.apply_swap(qubits[0], qubits[1]),
            Gate::Rzz(_, _, theta) => self.apply_rzz(qubits[0], qubits[1], *theta),
            Gate::Ccx { .. } => self.apply_ccx(qubits[0], qubits[1], qubits[2]),
            // Directives don't modify the statevector in simulation
            Gate::Measure(_) | Gate::Barrier(_) => {}
            single => {
                if let Some(m) = Unitary2x2::for_gate(single) {
                    self.apply_single(qubits[0], &m);
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit kernel
    // =========================================================================

    fn apply_single(&mut self, qubit: usize, m: &Unitary2x2) {
        let mask = 1 << qubit;
        let [a, b, c, d] = m.data;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let lo = self.amplitudes[i];
                let hi = self.amplitudes[j];
                self.amplitudes[i] = a * lo + b * hi;
                self.amplitudes[j] = c * lo + d * hi;
            }
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask != 0) {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_rzz(&mut self, q1: usize, q2: usize, theta: f64) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        let same = Complex64::from_polar(1.0, -theta / 2.0);
        let differ = Complex64::from_polar(1.0, theta / 2.0);
        for i in 0..self.amplitudes.len() {
            let parity = ((i & mask1) != 0) ^ ((i & mask2) != 0);
            self.amplitudes[i] *= if parity { differ } else { same };
        }
    }

    // =========================================================================
    // Three-qubit gate implementations
    // =========================================================================

    fn apply_ccx(&mut self, c1: usize, c2: usize, target: usize) {
        let c1_mask = 1 << c1;
        let c2_mask = 1 << c2;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & c1_mask != 0) && (i & c2_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Draw `shots` samples of the full register.
    ///
    /// Each shot is one bit per qubit, `bits[q]` being qubit `q`. A fixed
    /// `seed` makes the draw reproducible.
    pub fn measure(&self, shots: usize, seed: Option<u64>) -> Vec<Vec<u8>> {
        self.sample_indices(shots, seed)
            .into_iter()
            .map(|index| self.index_to_bits(index))
            .collect()
    }

    /// Draw `shots` basis indices with probability `|amp_i|²`.
    pub fn sample_indices(&self, shots: usize, seed: Option<u64>) -> Vec<usize> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut cumulative = Vec::with_capacity(self.amplitudes.len());
        let mut total = 0.0;
        for amp in &self.amplitudes {
            total += amp.norm_sqr();
            cumulative.push(total);
        }
        (0..shots)
            .map(|_| {
                let r: f64 = rng.r#gen::<f64>() * total;
                cumulative
                    .partition_point(|&c| c <= r)
                    .min(self.amplitudes.len() - 1)
            })
            .collect()
    }

    fn index_to_bits(&self, index: usize) -> Vec<u8> {
        (0..self.num_qubits)
            .map(|q| u8::from(index & (1 << q) != 0))
            .collect()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// The amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// `Σ|amp|²`.
    pub fn norm(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Probability of observing basis state `index`.
    pub fn probability(&self, index: usize) -> SimResult<f64> {
        self.amplitude(index).map(|a| a.norm_sqr())
    }

    /// Probabilities of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Amplitude of basis state `index`.
    pub fn amplitude(&self, index: usize) -> SimResult<Complex64> {
        self.amplitudes
            .get(index)
            .copied()
            .ok_or(SimError::IndexOutOfRange {
                index,
                dimension: self.amplitudes.len(),
            })
    }

    /// Element-wise comparison; states of different width are never equal.
    pub fn approx_eq(&self, other: &StateVector, tolerance: f64) -> bool {
        self.num_qubits == other.num_qubits
            && self
                .amplitudes
                .iter()
                .zip(other.amplitudes.iter())
                .all(|(a, b)| (a - b).norm() <= tolerance)
    }
}

fn check_width(num_qubits: u32) -> SimResult<()> {
    if num_qubits == 0 || num_qubits > MAX_QUBITS {
        return Err(SimError::InvalidQubitCount {
            num_qubits,
            max: MAX_QUBITS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn q(i: u32) -> QubitId {
        QubitId(i)
    }

    #[test]
    fn test_initial_state() {
        let sv = StateVector::init(2).unwrap();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_init_bounds() {
        assert!(matches!(
            StateVector::init(0),
            Err(SimError::InvalidQubitCount { num_qubits: 0, .. })
        ));
        assert!(StateVector::init(21).is_err());
        assert!(StateVector::init(1).is_ok());
    }

    #[test]
    fn test_hadamard() {
        let sv = StateVector::init(1).unwrap().apply_gate(&Gate::H(q(0))).unwrap();
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_apply_gate_leaves_input_untouched() {
        let before = StateVector::init(1).unwrap();
        let after = before.apply_gate(&Gate::X(q(0))).unwrap();
        assert!(approx_eq(before.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(after.amplitudes[1], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let sv = StateVector::run(&Circuit::bell().unwrap()).unwrap();
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_rz_multiplies_one_amplitude() {
        let sv = StateVector::init(1)
            .unwrap()
            .apply_gate(&Gate::X(q(0)))
            .unwrap()
            .apply_gate(&Gate::Rz {
                qubit: q(0),
                theta: PI / 2.0,
            })
            .unwrap();
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 1.0)));
    }

    #[test]
    fn test_swap() {
        let sv = StateVector::init(2)
            .unwrap()
            .apply_gate(&Gate::X(q(0)))
            .unwrap()
            .apply_gate(&Gate::Swap(q(0), q(1)))
            .unwrap();
        assert!(approx_eq(sv.amplitudes[0b10], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_ccx_flips_only_with_both_controls() {
        let toffoli = Gate::Ccx {
            control1: q(0),
            control2: q(1),
            target: q(2),
        };
        let one_control = StateVector::init(3)
            .unwrap()
            .apply_gate(&Gate::X(q(0)))
            .unwrap()
            .apply_gate(&toffoli)
            .unwrap();
        assert!((one_control.probability(0b001).unwrap() - 1.0).abs() < 1e-12);

        let both = one_control
            .apply_gate(&Gate::X(q(1)))
            .unwrap()
            .apply_gate(&toffoli)
            .unwrap();
        assert!((both.probability(0b111).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rzz_phases() {
        let theta = 0.8;
        let plus = StateVector::init(2)
            .unwrap()
            .apply_gate(&Gate::H(q(0)))
            .unwrap()
            .apply_gate(&Gate::H(q(1)))
            .unwrap();
        let sv = plus.apply_gate(&Gate::Rzz(q(0), q(1), theta)).unwrap();
        let same = Complex64::from_polar(0.5, -theta / 2.0);
        let differ = Complex64::from_polar(0.5, theta / 2.0);
        assert!(approx_eq(sv.amplitudes[0b00], same));
        assert!(approx_eq(sv.amplitudes[0b01], differ));
        assert!(approx_eq(sv.amplitudes[0b10], differ));
        assert!(approx_eq(sv.amplitudes[0b11], same));
    }

    #[test]
    fn test_operand_errors() {
        let sv = StateVector::init(2).unwrap();
        assert!(matches!(
            sv.apply_gate(&Gate::X(q(2))),
            Err(SimError::QubitOutOfRange { num_qubits: 2, .. })
        ));
        assert!(matches!(
            sv.apply_gate(&Gate::Cnot {
                control: q(1),
                target: q(1)
            }),
            Err(SimError::DuplicateQubit { gate: "CNOT", .. })
        ));
    }

    #[test]
    fn test_directives_are_noops() {
        let sv = StateVector::init(2).unwrap().apply_gate(&Gate::H(q(0))).unwrap();
        let measured = sv
            .apply_gate(&Gate::Measure(q(0)))
            .unwrap()
            .apply_gate(&Gate::Barrier(vec![q(0), q(1)]))
            .unwrap();
        assert_eq!(sv, measured);
    }

    #[test]
    fn test_rotation_layer() {
        let sv = StateVector::init(2)
            .unwrap()
            .apply_rotation_layer(RotationAxis::X, &[PI, 0.0])
            .unwrap();
        assert!((sv.probability(0b01).unwrap() - 1.0).abs() < 1e-12);
        assert!(matches!(
            sv.apply_rotation_layer(RotationAxis::Y, &[0.1]),
            Err(SimError::ParameterLengthMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_measure_deterministic() {
        // |10⟩ (qubit 1 set) should always sample to bits [0, 1]
        let sv = StateVector::init(2).unwrap().apply_gate(&Gate::X(q(1))).unwrap();
        let shots = sv.measure(50, None);
        assert_eq!(shots.len(), 50);
        assert!(shots.iter().all(|bits| bits == &vec![0, 1]));
    }

    #[test]
    fn test_measure_seeded_reproducible() {
        let sv = StateVector::run(&Circuit::ghz(3).unwrap()).unwrap();
        assert_eq!(sv.measure(64, Some(42)), sv.measure(64, Some(42)));
        for bits in sv.measure(64, Some(1)) {
            assert!(bits == vec![0, 0, 0] || bits == vec![1, 1, 1]);
        }
    }

    #[test]
    fn test_queries() {
        let sv = StateVector::init(1).unwrap();
        assert!((sv.norm() - 1.0).abs() < 1e-12);
        assert!(matches!(
            sv.amplitude(2),
            Err(SimError::IndexOutOfRange {
                index: 2,
                dimension: 2
            })
        ));
        let other = StateVector::init(2).unwrap();
        assert!(!sv.approx_eq(&other, 1.0));
        assert!(sv.approx_eq(&sv.clone(), 0.0));
    }

    #[test]
    fn test_from_amplitudes() {
        let s = 1.0 / 2.0_f64.sqrt();
        let sv = StateVector::from_amplitudes(vec![
            Complex64::new(s, 0.0),
            Complex64::new(0.0, s),
        ])
        .unwrap();
        assert_eq!(sv.num_qubits(), 1);
        assert!(StateVector::from_amplitudes(vec![Complex64::new(1.0, 0.0); 3]).is_err());
        assert!(StateVector::from_amplitudes(vec![Complex64::new(1.0, 0.0); 2]).is_err());
    }

    #[test]
    fn test_width_mismatch() {
        let sv = StateVector::init(3).unwrap();
        assert!(matches!(
            sv.run_from(&Circuit::bell().unwrap()),
            Err(SimError::WidthMismatch {
                circuit: 2,
                state: 3
            })
        ));
    }
}
