//! Quantra Local State-Vector Simulator Backend
//!
//! This crate wraps `quantra-sim` behind the [`Backend`](quantra_hal::Backend)
//! contract so the selector can hand it gate circuits. Simulation is exact;
//! memory grows as `2^n`, so the backend declares a qubit limit of at most 20.
//!
//! # Performance
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//!
//! # Example
//!
//! ```rust
//! use quantra_adapter_sim::LocalSimulator;
//! use quantra_hal::Backend;
//! use quantra_ir::{Circuit, Program};
//!
//! let backend = LocalSimulator::new();
//! let program = Program::from(Circuit::bell().unwrap());
//! let result = backend.execute(&program, 1000, Some(42)).unwrap();
//!
//! let counts = result.counts();
//! assert_eq!(counts.get("00") + counts.get("11"), 1000);
//! ```

mod simulator;

pub use simulator::{LocalSimulator, SIMULATOR_KIND};
