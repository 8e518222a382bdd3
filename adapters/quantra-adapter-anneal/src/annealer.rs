//! Simulated-annealing backend implementation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use quantra_hal::{
    AnnealingSamples, Backend, BackendConfig, BackendFactory, ExecutionResult, HalError,
    HalResult, Paradigm, QuantumState,
};
use quantra_ir::ising::ising_to_qubo_solution;
use quantra_ir::{Gate, IsingModel, Program};

/// Registry kind of the simulated annealer.
pub const ANNEALER_KIND: &str = "annealer";

/// Annealing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealSchedule {
    /// Independent reads per execution.
    pub num_reads: usize,
    /// Metropolis sweeps per read.
    pub sweeps: usize,
    /// Initial inverse temperature.
    pub beta_start: f64,
    /// Final inverse temperature.
    pub beta_end: f64,
}

impl Default for AnnealSchedule {
    fn default() -> Self {
        Self {
            num_reads: 100,
            sweeps: 1000,
            beta_start: 0.1,
            beta_end: 5.0,
        }
    }
}

impl AnnealSchedule {
    fn validate(&self) -> HalResult<()> {
        if self.num_reads == 0 || self.sweeps == 0 {
            return Err(HalError::Configuration(
                "num_reads and sweeps must be at least 1".into(),
            ));
        }
        if !(self.beta_start > 0.0 && self.beta_end >= self.beta_start) {
            return Err(HalError::Configuration(format!(
                "beta schedule must satisfy 0 < beta_start <= beta_end, got {} -> {}",
                self.beta_start, self.beta_end
            )));
        }
        Ok(())
    }

    /// Inverse temperature at `sweep`, geometric from start to end.
    fn beta(&self, sweep: usize) -> f64 {
        if self.sweeps <= 1 {
            return self.beta_end;
        }
        let t = sweep as f64 / (self.sweeps - 1) as f64;
        self.beta_start * (self.beta_end / self.beta_start).powf(t)
    }
}

/// Local annealing backend.
///
/// Only [`Program::Qaoa`] is accepted: its Ising problem is annealed
/// directly and the variational layers are ignored.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealer {
    config: BackendConfig,
    max_qubits: Option<u32>,
    schedule: AnnealSchedule,
    seed: Option<u64>,
}

impl SimulatedAnnealer {
    /// Unlimited annealer with the default schedule.
    pub fn new() -> Self {
        Self {
            config: BackendConfig::new("simulated-annealer", ANNEALER_KIND),
            max_qubits: None,
            schedule: AnnealSchedule::default(),
            seed: None,
        }
    }

    /// Annealer sized like a D-Wave Advantage system (5000 qubits).
    pub fn dwave_advantage() -> Self {
        Self {
            config: BackendConfig::new("dwave-advantage", ANNEALER_KIND),
            max_qubits: Some(5000),
            ..Self::new()
        }
    }

    /// Replace the schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: AnnealSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Fix the seed used when a call does not pass one.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The schedule in use.
    pub fn schedule(&self) -> &AnnealSchedule {
        &self.schedule
    }

    fn problem<'a>(&self, program: &'a Program) -> HalResult<&'a IsingModel> {
        match program {
            Program::Qaoa(qaoa) => {
                if let Some(limit) = self.max_qubits {
                    if qaoa.num_qubits() > limit {
                        return Err(HalError::CircuitTooLarge {
                            num_qubits: qaoa.num_qubits(),
                            limit,
                            backend: self.config.name.clone(),
                        });
                    }
                }
                Ok(&qaoa.problem)
            }
            Program::Circuit(circuit) => Err(HalError::operation(
                "execute",
                format!(
                    "'{}' only accepts QAOA programs, got a raw circuit with {} gates",
                    self.config.name,
                    circuit.gate_count()
                ),
            )),
        }
    }

    /// Anneal `problem` `reads` times.
    #[instrument(skip_all, fields(spins = problem.num_spins(), reads = reads))]
    fn anneal(&self, problem: &IsingModel, reads: usize, seed: Option<u64>) -> HalResult<AnnealingSamples> {
        let mut rng = match seed.or(self.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let n = problem.num_spins();
        let mut neighbours: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        for (&(a, b), &j) in problem.couplings() {
            neighbours[a].push((b, j));
            neighbours[b].push((a, j));
        }
        let fields = problem.fields();

        let mut samples = AnnealingSamples::default();
        for _ in 0..reads {
            let mut spins: Vec<i8> = (0..n)
                .map(|_| if rng.gen_bool(0.5) { 1 } else { -1 })
                .collect();
            for sweep in 0..self.schedule.sweeps {
                let beta = self.schedule.beta(sweep);
                for i in 0..n {
                    let local: f64 = fields[i]
                        + neighbours[i]
                            .iter()
                            .map(|&(k, j)| j * f64::from(spins[k]))
                            .sum::<f64>();
                    // energy change of flipping spin i
                    let delta = -2.0 * f64::from(spins[i]) * local;
                    if delta <= 0.0 || rng.r#gen::<f64>() < (-beta * delta).exp() {
                        spins[i] = -spins[i];
                    }
                }
            }
            samples.energies.push(problem.energy(&spins)?);
            samples.reads.push(spins);
        }

        debug!(
            "Annealed {} reads, best energy {:?}",
            samples.len(),
            samples.best().map(|(_, e)| e)
        );
        Ok(samples)
    }
}

impl Default for SimulatedAnnealer {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SimulatedAnnealer {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn native_state_type(&self) -> Paradigm {
        Paradigm::Annealing
    }

    fn supports_operation(&self, _op: &Gate) -> bool {
        false
    }

    fn apply_operation(&self, op: &Gate, _state: QuantumState) -> HalResult<QuantumState> {
        Err(HalError::not_implemented(
            format!("{} on an annealing backend", op.name()),
            Some("submit a QAOA program instead of individual gates"),
        ))
    }

    fn execute_to_state(&self, program: &Program) -> HalResult<QuantumState> {
        let problem = self.problem(program)?;
        Ok(QuantumState::Annealing(self.anneal(
            problem,
            self.schedule.num_reads,
            None,
        )?))
    }

    fn initialize_state(&self, _num_qubits: u32) -> HalResult<QuantumState> {
        Ok(QuantumState::Annealing(AnnealingSamples::default()))
    }

    fn max_qubits(&self) -> Option<u32> {
        self.max_qubits
    }

    /// One annealing read per shot, in read order.
    fn execute(&self, program: &Program, shots: usize, seed: Option<u64>) -> HalResult<ExecutionResult> {
        if shots == 0 {
            return Err(HalError::InvalidShots(shots));
        }
        let problem = self.problem(program)?;
        let samples = self.anneal(problem, shots, seed)?;
        Ok(ExecutionResult {
            backend: self.config.name.clone(),
            num_shots: shots,
            measurements: samples.reads.iter().map(|read| ising_to_qubo_solution(read)).collect(),
        })
    }
}

impl BackendFactory for SimulatedAnnealer {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let defaults = AnnealSchedule::default();
        let usize_option = |key: &str, default: usize| -> HalResult<usize> {
            Ok(config
                .extra_u64(key)?
                .map_or(default, |v| usize::try_from(v).unwrap_or(usize::MAX)))
        };
        let schedule = AnnealSchedule {
            num_reads: usize_option("num_reads", defaults.num_reads)?,
            sweeps: usize_option("sweeps", defaults.sweeps)?,
            beta_start: config.extra_f64("beta_start")?.unwrap_or(defaults.beta_start),
            beta_end: config.extra_f64("beta_end")?.unwrap_or(defaults.beta_end),
        };
        schedule.validate()?;

        let max_qubits = config
            .extra_u64("max_qubits")?
            .map(|v| u32::try_from(v).unwrap_or(u32::MAX));
        let seed = config.extra_u64("seed")?;

        Ok(Self {
            config,
            max_qubits,
            schedule,
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantra_ir::{Circuit, QaoaProgram};

    fn chain(n: usize, j: f64) -> Program {
        let mut problem = IsingModel::new(n);
        for i in 1..n {
            problem.add_coupling(i - 1, i, j).unwrap();
        }
        QaoaProgram::new(problem, vec![]).into()
    }

    fn fast() -> SimulatedAnnealer {
        SimulatedAnnealer::new()
            .with_schedule(AnnealSchedule {
                num_reads: 8,
                sweeps: 200,
                ..AnnealSchedule::default()
            })
            .with_seed(17)
    }

    #[test]
    fn test_schedule_is_geometric() {
        let schedule = AnnealSchedule::default();
        assert!((schedule.beta(0) - 0.1).abs() < 1e-12);
        assert!((schedule.beta(schedule.sweeps - 1) - 5.0).abs() < 1e-9);
        assert!(schedule.beta(10) < schedule.beta(11));
    }

    #[test]
    fn test_finds_chain_ground_states() {
        let annealer = fast();
        let state = annealer.execute_to_state(&chain(6, -1.0)).unwrap();
        let samples = state.as_annealing().unwrap();
        assert_eq!(samples.len(), 8);
        let (_, best) = samples.best().unwrap();
        assert!((best + 5.0).abs() < 1e-12);

        let state = annealer.execute_to_state(&chain(6, 1.0)).unwrap();
        let (read, best) = state.as_annealing().unwrap().best().unwrap();
        assert!((best + 5.0).abs() < 1e-12);
        assert!(read.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn test_rejects_raw_circuit() {
        let program = Program::from(Circuit::bell().unwrap());
        let err = fast().execute_to_state(&program).unwrap_err();
        assert!(matches!(err, HalError::Operation { .. }));
        assert!(fast().execute(&program, 5, None).is_err());
    }

    #[test]
    fn test_gates_not_implemented() {
        let annealer = fast();
        assert!(!annealer.supports_operation(&Gate::H(quantra_ir::QubitId(0))));
        let state = annealer.initialize_state(2).unwrap();
        assert!(matches!(
            annealer.apply_operation(&Gate::H(quantra_ir::QubitId(0)), state),
            Err(HalError::NotImplemented { hint: Some(_), .. })
        ));
    }

    #[test]
    fn test_dwave_limit() {
        let annealer = SimulatedAnnealer::dwave_advantage();
        assert_eq!(annealer.max_qubits(), Some(5000));
        assert!(matches!(
            annealer.execute_to_state(&chain(5001, -1.0)),
            Err(HalError::CircuitTooLarge { limit: 5000, .. })
        ));
    }

    #[test]
    fn test_one_read_per_shot() {
        let result = fast().execute(&chain(4, -1.0), 25, Some(2)).unwrap();
        assert_eq!(result.num_shots, 25);
        assert_eq!(result.measurements.len(), 25);
        assert!(result.measurements.iter().all(|bits| bits.len() == 4));
        assert!(matches!(
            fast().execute(&chain(4, -1.0), 0, None),
            Err(HalError::InvalidShots(0))
        ));
    }
}
