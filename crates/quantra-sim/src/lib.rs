//! `quantra-sim`: exact state-vector simulation.
//!
//! A [`StateVector`] holds the `2^n` complex amplitudes of an `n`-qubit
//! register (bit `i` of a basis index is qubit `i`). Gate application is
//! value-returning: every call yields a fresh state and leaves its input
//! untouched, so intermediate states can be kept and compared freely.
//!
//! # Quick start
//!
//! ```rust
//! use quantra_ir::Circuit;
//! use quantra_sim::StateVector;
//!
//! let state = StateVector::run(&Circuit::bell().unwrap()).unwrap();
//! assert!((state.probability(0b00).unwrap() - 0.5).abs() < 1e-12);
//! assert!((state.probability(0b11).unwrap() - 0.5).abs() < 1e-12);
//!
//! let shots = state.measure(100, Some(7));
//! assert!(shots.iter().all(|bits| bits[0] == bits[1]));
//! ```

pub mod error;
pub mod matrix;
pub mod statevector;

pub use error::{SimError, SimResult};
pub use matrix::Unitary2x2;
pub use statevector::{MAX_QUBITS, RotationAxis, StateVector};
