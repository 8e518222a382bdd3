//! Quantra Circuit Intermediate Representation
//!
//! This crate provides the vocabulary shared by every other Quantra crate:
//! the closed [`Gate`] sum type, the append-only [`Circuit`] container, and the
//! [`Program`] wrapper that lets annealing-style QAOA problems travel through
//! the same pipeline as plain gate circuits.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] for addressing qubits in a circuit
//! - **Gates**: [`Gate`] carries operands and parameters, [`GateKind`] names the
//!   operation without operands and is what backends advertise in a [`GateSet`]
//! - **Circuit**: [`Circuit`] with value-returning `add_gate` and a consuming builder
//! - **Programs**: [`Program`] and [`QaoaProgram`] for paradigm detection
//! - **Encodings**: [`Qubo`] and [`IsingModel`] with exact conversions between them
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use quantra_ir::{Circuit, QubitId};
//!
//! let circuit = Circuit::empty(2)
//!     .h(QubitId(0))
//!     .unwrap()
//!     .cx(QubitId(0), QubitId(1))
//!     .unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.gate_count(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `SDG` | 1 | S and S-dagger gates |
//! | `T`, `TDG` | 1 | T and T-dagger gates |
//! | `RX`, `RY`, `RZ` | 1 | Rotation gates |
//! | `CNOT` | 2 | Controlled-NOT |
//! | `CZ` | 2 | Controlled-Z |
//! | `SWAP` | 2 | SWAP gate |
//! | `RZZ` | 2 | ZZ rotation |
//! | `CCX` | 3 | Toffoli gate |
//! | `MEASURE`, `BARRIER` | any | Directives, no effect on amplitudes |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod ising;
pub mod program;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateKind, GateSet};
pub use ising::{IsingModel, Qubo};
pub use program::{Mixer, Program, QaoaLayer, QaoaProgram};
pub use qubit::QubitId;
