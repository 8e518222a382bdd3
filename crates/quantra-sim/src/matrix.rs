//! 2x2 unitary matrices for single-qubit gates.

use num_complex::Complex64;
use std::f64::consts::PI;
use std::ops::Mul;

use quantra_ir::Gate;

/// Tolerance for floating point comparisons.
const EPSILON: f64 = 1e-10;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 unitary matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::new(ONE, ZERO, ZERO, ONE)
    }

    /// Create a Hadamard matrix.
    pub fn h() -> Self {
        let s = Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0);
        Self::new(s, s, s, -s)
    }

    /// Create a Pauli-X matrix.
    pub fn x() -> Self {
        Self::new(ZERO, ONE, ONE, ZERO)
    }

    /// Create a Pauli-Y matrix.
    pub fn y() -> Self {
        Self::new(ZERO, Complex64::new(0.0, -1.0), Complex64::new(0.0, 1.0), ZERO)
    }

    /// Create a Pauli-Z matrix.
    pub fn z() -> Self {
        Self::new(ONE, ZERO, ZERO, -ONE)
    }

    /// `diag(1, e^{iθ})`: multiplies the `|1⟩` amplitude by `e^{iθ}`.
    pub fn phase(theta: f64) -> Self {
        Self::new(ONE, ZERO, ZERO, Complex64::from_polar(1.0, theta))
    }

    /// Create an RX rotation matrix.
    pub fn rx(theta: f64) -> Self {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let s = Complex64::new(0.0, -(theta / 2.0).sin());
        Self::new(c, s, s, c)
    }

    /// Create an RY rotation matrix.
    pub fn ry(theta: f64) -> Self {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let s = Complex64::new((theta / 2.0).sin(), 0.0);
        Self::new(c, -s, s, c)
    }

    /// The matrix of a single-qubit gate, `None` for anything else.
    pub fn for_gate(gate: &Gate) -> Option<Self> {
        let m = match gate {
            Gate::H(_) => Self::h(),
            Gate::X(_) => Self::x(),
            Gate::Y(_) => Self::y(),
            Gate::Z(_) => Self::z(),
            Gate::S(_) => Self::phase(PI / 2.0),
            Gate::Sdg(_) => Self::phase(-PI / 2.0),
            Gate::T(_) => Self::phase(PI / 4.0),
            Gate::Tdg(_) => Self::phase(-PI / 4.0),
            Gate::Rx { theta, .. } => Self::rx(*theta),
            Gate::Ry { theta, .. } => Self::ry(*theta),
            Gate::Rz { theta, .. } => Self::phase(*theta),
            _ => return None,
        };
        Some(m)
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        let [a, b, c, d] = self.data;
        Self::new(a.conj(), c.conj(), b.conj(), d.conj())
    }

    /// Check `U†U = I` within tolerance.
    pub fn is_unitary(&self) -> bool {
        (self.dagger() * *self).approx_eq(&Self::identity())
    }

    /// Element-wise comparison within tolerance.
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).norm() < EPSILON)
    }

    /// Equality up to a global phase factor.
    pub fn approx_eq_up_to_phase(&self, other: &Self) -> bool {
        let Some(k) = (0..4).find(|&k| self.data[k].norm() > EPSILON) else {
            return other.data.iter().all(|z| z.norm() < EPSILON);
        };
        if other.data[k].norm() < EPSILON {
            return false;
        }
        let phase = other.data[k] / self.data[k];
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a * phase - b).norm() < EPSILON)
    }
}

impl Mul for Unitary2x2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = rhs.data;
        Self::new(
            a * e + b * g,
            a * f + b * h,
            c * e + d * g,
            c * f + d * h,
        )
    }
}
