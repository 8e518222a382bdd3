//! Simulator backend implementation.

use tracing::{debug, instrument, warn};

use quantra_hal::{
    Backend, BackendConfig, BackendFactory, HalError, HalResult, Paradigm, QuantumState,
};
use quantra_ir::{Gate, Program};
use quantra_sim::{MAX_QUBITS, StateVector};

/// Registry kind of the local simulator.
pub const SIMULATOR_KIND: &str = "simulator";

/// Local state-vector simulator backend.
///
/// Runs every gate kind directly. QAOA programs are lowered to their gate
/// circuit before simulation.
#[derive(Debug, Clone)]
pub struct LocalSimulator {
    /// Backend configuration.
    config: BackendConfig,
    /// Maximum number of qubits supported.
    max_qubits: u32,
}

impl LocalSimulator {
    /// Create a simulator with the full 20-qubit limit.
    pub fn new() -> Self {
        Self {
            config: BackendConfig::new("local-simulator", SIMULATOR_KIND),
            max_qubits: MAX_QUBITS,
        }
    }

    /// Create a simulator with a lower qubit limit. Values above 20 are clamped.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            max_qubits: clamp_qubits(max_qubits),
            ..Self::new()
        }
    }

    fn check_width(&self, num_qubits: u32) -> HalResult<()> {
        if num_qubits > self.max_qubits {
            return Err(HalError::CircuitTooLarge {
                num_qubits,
                limit: self.max_qubits,
                backend: self.config.name.clone(),
            });
        }
        Ok(())
    }
}

impl Default for LocalSimulator {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_qubits(requested: u32) -> u32 {
    if requested > MAX_QUBITS {
        warn!(
            "Simulator limit of {} qubits requested, clamping to {}",
            requested, MAX_QUBITS
        );
    }
    requested.clamp(1, MAX_QUBITS)
}

impl Backend for LocalSimulator {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn native_state_type(&self) -> Paradigm {
        Paradigm::GateBased
    }

    fn supports_operation(&self, _op: &Gate) -> bool {
        true
    }

    fn apply_operation(&self, op: &Gate, state: QuantumState) -> HalResult<QuantumState> {
        match state {
            QuantumState::StateVector(sv) => Ok(sv.apply_gate(op)?.into()),
            QuantumState::Annealing(_) => Err(HalError::operation(
                "apply_operation",
                format!("cannot apply {} to annealing samples", op.name()),
            )),
        }
    }

    #[instrument(skip_all, fields(backend = %self.config.name, num_qubits = program.num_qubits()))]
    fn execute_to_state(&self, program: &Program) -> HalResult<QuantumState> {
        self.check_width(program.num_qubits())?;
        let circuit = program.to_circuit()?;
        debug!("Simulating {} gates", circuit.gate_count());
        Ok(StateVector::run(&circuit)?.into())
    }

    fn initialize_state(&self, num_qubits: u32) -> HalResult<QuantumState> {
        self.check_width(num_qubits)?;
        Ok(StateVector::init(num_qubits)?.into())
    }

    fn max_qubits(&self) -> Option<u32> {
        Some(self.max_qubits)
    }
}

impl BackendFactory for LocalSimulator {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.extra_u64("max_qubits")? {
            Some(n) => clamp_qubits(u32::try_from(n).unwrap_or(u32::MAX)),
            None => MAX_QUBITS,
        };
        Ok(Self { config, max_qubits })
    }
}
