//! Quantra Simulated-Annealing Backend
//!
//! A local stand-in for annealing hardware such as D-Wave. It accepts QAOA
//! programs, anneals their Ising problem with Metropolis sweeps over a
//! geometric inverse-temperature schedule, and reports one spin read per shot.
//! Raw gate circuits are rejected.
//!
//! # Example
//!
//! ```rust
//! use quantra_adapter_anneal::SimulatedAnnealer;
//! use quantra_hal::Backend;
//! use quantra_ir::{IsingModel, Program, QaoaProgram};
//!
//! let problem = IsingModel::new(2).with_coupling(0, 1, -1.0).unwrap();
//! let program = Program::from(QaoaProgram::new(problem, vec![]));
//!
//! let result = SimulatedAnnealer::new().execute(&program, 10, Some(3)).unwrap();
//! assert!(result.measurements.iter().all(|bits| bits[0] == bits[1]));
//! ```

mod annealer;

pub use annealer::{ANNEALER_KIND, AnnealSchedule, SimulatedAnnealer};
