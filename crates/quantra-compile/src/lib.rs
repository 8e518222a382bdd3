//! Quantra Validation and Transpilation
//!
//! This crate checks circuits against named backend profiles and rewrites
//! them into a backend's supported gate set.
//!
//! # Overview
//!
//! - **Validation**: [`validate_circuit`] runs the qubit-count, gate-set,
//!   depth and connectivity checks and returns every violation at once.
//! - **Legalization**: the [`GateLegalization`] pass rewrites unsupported
//!   gates into equivalent sequences, up to global phase.
//! - **Pipeline**: passes share a [`PropertySet`] and are sequenced by a
//!   [`PassManager`]; [`transpile`] runs the standard legalize-then-check
//!   pipeline.
//!
//! # Example
//!
//! ```rust
//! use quantra_compile::{needs_transpilation, transpile, validate_circuit};
//! use quantra_hal::BackendConstraints;
//! use quantra_ir::{Circuit, QubitId};
//!
//! let ionq = BackendConstraints::ionq_simulator();
//! let circuit = Circuit::empty(2)
//!     .h(QubitId(0))
//!     .unwrap()
//!     .cz(QubitId(0), QubitId(1))
//!     .unwrap();
//!
//! assert!(needs_transpilation(&ionq, &circuit));
//! assert!(validate_circuit(&ionq, &circuit).is_err());
//!
//! let legal = transpile(&ionq, &circuit).unwrap();
//! assert!(validate_circuit(&ionq, &legal).is_ok());
//! ```
//!
//! # Writing a Pass
//!
//! ```rust
//! use quantra_compile::{CompileResult, Pass, PassKind, PropertySet};
//! use quantra_ir::Circuit;
//!
//! struct StripDirectives;
//!
//! impl Pass for StripDirectives {
//!     fn name(&self) -> &str { "strip_directives" }
//!     fn kind(&self) -> PassKind { PassKind::Transformation }
//!
//!     fn run(&self, circuit: &Circuit, _props: &mut PropertySet) -> CompileResult<Circuit> {
//!         let gates = circuit.gates().iter().filter(|g| !g.is_directive()).cloned();
//!         Ok(Circuit::from_gates(circuit.num_qubits(), gates)?)
//!     }
//! }
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;
pub mod property;
pub mod transpile;
pub mod validation;

pub use error::{CompileError, CompileResult};
pub use manager::{PassManager, PassManagerBuilder};
pub use pass::{Pass, PassKind};
pub use passes::{ConstraintCheck, GateLegalization, legalize_gate};
pub use property::{LegalizationStats, PropertySet};
pub use transpile::{
    TranspilationStats, needs_transpilation, resolve_profile, transpilation_stats, transpile,
    transpile_for_backend, transpile_with_properties,
};
pub use validation::{
    ValidationError, format_validation_error, format_validation_errors, validate_circuit,
    validate_circuit_depth, validate_connectivity, validate_gate_set, validate_qubit_count,
};
