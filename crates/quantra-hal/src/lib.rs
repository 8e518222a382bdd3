//! Quantra Hardware Abstraction Layer
//!
//! This crate defines the seam between the compiler pipeline and whatever
//! actually runs a program: a local state-vector simulator, an annealer, or a
//! constraint profile of real hardware.
//!
//! # Overview
//!
//! - A [`Backend`] trait: the single dynamic-dispatch seam in the workspace
//! - [`QuantumState`] for backend-native states (amplitudes or annealing reads)
//! - [`BackendCapability`] derived on demand, plus paradigm detection
//! - Backend selection and ranking in [`selection`]
//! - Named hardware profiles ([`BackendConstraints`]) in [`profile`]
//! - [`BackendRegistry`] and [`ExecutionConfig`] to build pools from YAML
//!
//! # Example: Automatic Backend Selection
//!
//! ```ignore
//! use std::sync::Arc;
//! use quantra_hal::{Backend, execute_with_automatic_backend};
//! use quantra_ir::{Circuit, Program};
//!
//! let pool: Vec<Arc<dyn Backend>> = vec![Arc::new(LocalSimulator::new())];
//! let program = Program::from(Circuit::bell()?);
//! let result = execute_with_automatic_backend(&pool, &program, 1000, Some(7))?;
//! if let Some((bitstring, count)) = result.counts().most_frequent() {
//!     println!("Most frequent: {} ({} times)", bitstring, count);
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod config;
pub mod error;
pub mod profile;
pub mod registry;
pub mod result;
pub mod selection;
pub mod state;

pub use backend::{Backend, BackendConfig, BackendFactory};
pub use capability::{
    BackendCapability, Paradigm, backend_capability, detect_circuit_paradigm, performance_score,
};
pub use config::ExecutionConfig;
pub use error::{HalError, HalResult};
pub use profile::{BackendConstraints, Connectivity, known_profiles, profile_keys};
pub use registry::BackendRegistry;
pub use result::{Counts, ExecutionResult};
pub use selection::{
    Recommendation, backend_recommendations, can_execute_circuit, execute_with_automatic_backend,
    execute_with_automatic_backend_async, select_best_backend,
};
pub use state::{AnnealingSamples, QuantumState};
