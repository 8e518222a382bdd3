//! Backend trait definition.

use std::fmt;

use serde::{Deserialize, Serialize};

use quantra_ir::{Gate, Program};

use crate::capability::Paradigm;
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;
use crate::state::QuantumState;

/// Configuration for a backend instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend instance.
    pub name: String,
    /// Registry key selecting the backend implementation.
    pub kind: String,
    /// Additional implementation-specific options.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Add extra configuration.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an unsigned integer option.
    pub fn extra_u64(&self, key: &str) -> HalResult<Option<u64>> {
        self.extra
            .get(key)
            .map(|v| {
                v.as_u64().ok_or_else(|| {
                    HalError::Configuration(format!(
                        "backend '{}': option '{key}' must be a non-negative integer, got {v}",
                        self.name
                    ))
                })
            })
            .transpose()
    }

    /// Read a floating-point option.
    pub fn extra_f64(&self, key: &str) -> HalResult<Option<f64>> {
        self.extra
            .get(key)
            .map(|v| {
                v.as_f64().ok_or_else(|| {
                    HalError::Configuration(format!(
                        "backend '{}': option '{key}' must be a number, got {v}",
                        self.name
                    ))
                })
            })
            .transpose()
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Trait for execution backends.
///
/// Backends are stateless handles: every method takes `&self` and returns a
/// fresh value. Dynamic dispatch happens only here; the pool handed to the
/// selector is a slice of `Arc<dyn Backend>`.
///
/// # Contract
///
/// - `native_state_type()` decides which programs the backend is offered.
/// - `supports_operation()` MUST be cheap; it is queried once per gate kind.
/// - `max_qubits()` returns `None` for backends without a qubit limit.
/// - `execute_to_state()` MUST reject programs it cannot run with an error
///   rather than approximating them.
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Paradigm of the states this backend produces.
    fn native_state_type(&self) -> Paradigm;

    /// Whether the backend can apply `op` directly.
    fn supports_operation(&self, op: &Gate) -> bool;

    /// Apply one operation to a state, returning the new state.
    fn apply_operation(&self, op: &Gate, state: QuantumState) -> HalResult<QuantumState>;

    /// Run a whole program from the initial state.
    fn execute_to_state(&self, program: &Program) -> HalResult<QuantumState>;

    /// The backend's initial state for `num_qubits` qubits.
    fn initialize_state(&self, num_qubits: u32) -> HalResult<QuantumState>;

    /// Optional qubit limit; `None` means unlimited.
    fn max_qubits(&self) -> Option<u32> {
        None
    }

    /// Check if the backend is currently available.
    fn is_available(&self) -> bool {
        true
    }

    /// Execute `program` and sample `shots` measurement records.
    fn execute(&self, program: &Program, shots: usize, seed: Option<u64>) -> HalResult<ExecutionResult> {
        if shots == 0 {
            return Err(HalError::InvalidShots(shots));
        }
        let state = self.execute_to_state(program)?;
        Ok(ExecutionResult {
            backend: self.name().to_string(),
            num_shots: shots,
            measurements: state.sample(shots, seed)?,
        })
    }
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config() {
        let config = BackendConfig::new("sim-a", "simulator")
            .with_extra("max_qubits", serde_json::json!(12))
            .with_extra("beta_end", serde_json::json!(4.5));

        assert_eq!(config.name, "sim-a");
        assert_eq!(config.kind, "simulator");
        assert_eq!(config.extra_u64("max_qubits").unwrap(), Some(12));
        assert_eq!(config.extra_f64("beta_end").unwrap(), Some(4.5));
        assert_eq!(config.extra_u64("missing").unwrap(), None);
    }

    #[test]
    fn test_backend_config_type_error() {
        let config = BackendConfig::new("a", "b").with_extra("sweeps", serde_json::json!("many"));
        assert!(matches!(
            config.extra_u64("sweeps"),
            Err(HalError::Configuration(_))
        ));
    }

    #[test]
    fn test_backend_config_flattened_json() {
        let config: BackendConfig =
            serde_json::from_str(r#"{"name":"x","kind":"annealer","num_reads":50}"#).unwrap();
        assert_eq!(config.extra_u64("num_reads").unwrap(), Some(50));
    }
}
