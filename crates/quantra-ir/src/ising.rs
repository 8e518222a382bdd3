//! QUBO and Ising encodings of combinatorial problems.
//!
//! A QUBO assigns energy `offset + Σ_{i≤j} Q_ij x_i x_j` to a binary vector
//! `x ∈ {0,1}^n` (diagonal entries act as linear terms since `x_i² = x_i`). An
//! Ising model assigns `offset + Σ h_i s_i + Σ_{i<j} J_ij s_i s_j` to spins
//! `s ∈ {-1,+1}^n`. The two are related by `x = (1 - s) / 2`, so `x = 0`
//! corresponds to spin up.

use std::collections::BTreeMap;

use crate::error::{IrError, IrResult};

/// Quadratic unconstrained binary optimisation problem.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Qubo {
    num_variables: usize,
    /// Upper-triangular coefficients keyed by `(i, j)` with `i <= j`.
    terms: BTreeMap<(usize, usize), f64>,
    offset: f64,
}

impl Qubo {
    /// Create a QUBO with no terms.
    pub fn new(num_variables: usize) -> Self {
        Self {
            num_variables,
            terms: BTreeMap::new(),
            offset: 0.0,
        }
    }

    /// Add `weight` to the `(i, j)` coefficient; `(j, i)` accumulates into the same entry.
    pub fn add_term(&mut self, i: usize, j: usize, weight: f64) -> IrResult<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        *self.terms.entry((i.min(j), i.max(j))).or_insert(0.0) += weight;
        Ok(())
    }

    /// Builder form of [`Qubo::add_term`].
    pub fn with_term(mut self, i: usize, j: usize, weight: f64) -> IrResult<Self> {
        self.add_term(i, j, weight)?;
        Ok(self)
    }

    /// Add a constant to the energy.
    pub fn add_offset(&mut self, offset: f64) {
        self.offset += offset;
    }

    fn check_index(&self, index: usize) -> IrResult<()> {
        if index >= self.num_variables {
            return Err(IrError::VariableOutOfRange {
                index,
                num_variables: self.num_variables,
            });
        }
        Ok(())
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn terms(&self) -> &BTreeMap<(usize, usize), f64> {
        &self.terms
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Energy of a binary assignment. Any non-zero entry counts as 1.
    pub fn energy(&self, x: &[u8]) -> IrResult<f64> {
        if x.len() != self.num_variables {
            return Err(IrError::AssignmentLength {
                expected: self.num_variables,
                got: x.len(),
            });
        }
        let bit = |i: usize| f64::from(u8::from(x[i] != 0));
        Ok(self.offset
            + self
                .terms
                .iter()
                .map(|(&(i, j), w)| w * bit(i) * bit(j))
                .sum::<f64>())
    }
}

/// Ising Hamiltonian over `±1` spins.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IsingModel {
    fields: Vec<f64>,
    /// Couplings keyed by `(i, j)` with `i < j`.
    couplings: BTreeMap<(usize, usize), f64>,
    offset: f64,
}

impl IsingModel {
    /// Create a model with `num_spins` spins and no terms.
    pub fn new(num_spins: usize) -> Self {
        Self {
            fields: vec![0.0; num_spins],
            couplings: BTreeMap::new(),
            offset: 0.0,
        }
    }

    /// Add `h` to the local field on spin `i`.
    pub fn add_field(&mut self, i: usize, h: f64) -> IrResult<()> {
        self.check_index(i)?;
        self.fields[i] += h;
        Ok(())
    }

    /// Add `j` to the coupling between spins `a` and `b`.
    ///
    /// A self-coupling is constant (`s_i² = 1`) and folds into the offset.
    pub fn add_coupling(&mut self, a: usize, b: usize, j: f64) -> IrResult<()> {
        self.check_index(a)?;
        self.check_index(b)?;
        if a == b {
            self.offset += j;
        } else {
            *self.couplings.entry((a.min(b), a.max(b))).or_insert(0.0) += j;
        }
        Ok(())
    }

    /// Builder form of [`IsingModel::add_coupling`].
    pub fn with_coupling(mut self, a: usize, b: usize, j: f64) -> IrResult<Self> {
        self.add_coupling(a, b, j)?;
        Ok(self)
    }

    /// Builder form of [`IsingModel::add_field`].
    pub fn with_field(mut self, i: usize, h: f64) -> IrResult<Self> {
        self.add_field(i, h)?;
        Ok(self)
    }

    /// Add a constant to the energy.
    pub fn add_offset(&mut self, offset: f64) {
        self.offset += offset;
    }

    fn check_index(&self, index: usize) -> IrResult<()> {
        if index >= self.fields.len() {
            return Err(IrError::VariableOutOfRange {
                index,
                num_variables: self.fields.len(),
            });
        }
        Ok(())
    }

    pub fn num_spins(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[f64] {
        &self.fields
    }

    pub fn couplings(&self) -> &BTreeMap<(usize, usize), f64> {
        &self.couplings
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Interaction graph edges, one per non-zero coupling.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.couplings
            .iter()
            .filter(|&(_, &j)| j != 0.0)
            .map(|(&edge, _)| edge)
            .collect()
    }

    /// Restrict the model to `spins` (global indices), renumbered `0..k`.
    ///
    /// Couplings leaving the selection are dropped; the offset is not carried
    /// over so sub-model energies can be summed with the parent's offset.
    pub fn sub_model(&self, spins: &[usize]) -> IrResult<IsingModel> {
        let mut local = vec![None; self.fields.len()];
        let mut sub = IsingModel::new(spins.len());
        for (k, &global) in spins.iter().enumerate() {
            self.check_index(global)?;
            local[global] = Some(k);
            sub.fields[k] = self.fields[global];
        }
        for (&(a, b), &j) in &self.couplings {
            if let (Some(la), Some(lb)) = (local[a], local[b]) {
                sub.add_coupling(la, lb, j)?;
            }
        }
        Ok(sub)
    }

    /// Energy of a spin assignment. Positive entries count as `+1`, others as `-1`.
    pub fn energy(&self, spins: &[i8]) -> IrResult<f64> {
        if spins.len() != self.fields.len() {
            return Err(IrError::AssignmentLength {
                expected: self.fields.len(),
                got: spins.len(),
            });
        }
        let spin = |i: usize| if spins[i] > 0 { 1.0 } else { -1.0 };
        let linear: f64 = self.fields.iter().enumerate().map(|(i, h)| h * spin(i)).sum();
        let quadratic: f64 = self
            .couplings
            .iter()
            .map(|(&(a, b), j)| j * spin(a) * spin(b))
            .sum();
        Ok(self.offset + linear + quadratic)
    }
}

/// Convert a QUBO into the equivalent Ising model.
pub fn qubo_to_ising(qubo: &Qubo) -> IsingModel {
    let mut ising = IsingModel::new(qubo.num_variables);
    ising.offset = qubo.offset;
    for (&(i, j), &q) in &qubo.terms {
        if i == j {
            ising.offset += q / 2.0;
            ising.fields[i] -= q / 2.0;
        } else {
            ising.offset += q / 4.0;
            ising.fields[i] -= q / 4.0;
            ising.fields[j] -= q / 4.0;
            *ising.couplings.entry((i, j)).or_insert(0.0) += q / 4.0;
        }
    }
    ising
}

/// Convert an Ising model into the equivalent QUBO.
pub fn ising_to_qubo(ising: &IsingModel) -> Qubo {
    let mut qubo = Qubo::new(ising.num_spins());
    qubo.offset = ising.offset;
    for (i, &h) in ising.fields.iter().enumerate() {
        if h != 0.0 {
            qubo.offset += h;
            *qubo.terms.entry((i, i)).or_insert(0.0) -= 2.0 * h;
        }
    }
    for (&(a, b), &j) in &ising.couplings {
        qubo.offset += j;
        *qubo.terms.entry((a, a)).or_insert(0.0) -= 2.0 * j;
        *qubo.terms.entry((b, b)).or_insert(0.0) -= 2.0 * j;
        *qubo.terms.entry((a, b)).or_insert(0.0) += 4.0 * j;
    }
    qubo
}

/// Map a binary assignment to spins: `0 ↦ +1`, `1 ↦ -1`.
pub fn qubo_to_ising_solution(x: &[u8]) -> Vec<i8> {
    x.iter().map(|&b| if b == 0 { 1 } else { -1 }).collect()
}

/// Map spins to a binary assignment: `+1 ↦ 0`, `-1 ↦ 1`.
pub fn ising_to_qubo_solution(spins: &[i8]) -> Vec<u8> {
    spins.iter().map(|&s| u8::from(s <= 0)).collect()
}

/// Energy of `x` under `qubo`.
pub fn qubo_energy(qubo: &Qubo, x: &[u8]) -> IrResult<f64> {
    qubo.energy(x)
}

/// Energy of `spins` under `ising`.
pub fn ising_energy(ising: &IsingModel, spins: &[i8]) -> IrResult<f64> {
    ising.energy(spins)
}
