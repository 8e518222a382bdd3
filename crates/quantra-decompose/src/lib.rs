//! Quantra Problem Decomposition
//!
//! Splits problems that are too large for a backend into independent
//! sub-problems along their interaction graph, then solves and recombines
//! them.
//!
//! # Overview
//!
//! - [`connected_components`] and [`partition_by_components`] work on plain
//!   index graphs; [`can_decompose_within_limit`] checks that every component
//!   fits a qubit budget.
//! - [`plan`] turns a [`DecompositionStrategy`] into a [`DecompositionPlan`];
//!   [`execute`] solves it in order and fails fast.
//! - [`split_circuit`] and [`split_ising`] apply the partitioning to circuits
//!   and Ising problems.
//!
//! # Example
//!
//! ```rust
//! use quantra_decompose::{can_decompose_within_limit, connected_components};
//!
//! let edges = [(0, 1), (2, 3), (4, 5)];
//! assert_eq!(connected_components(6, &edges).len(), 3);
//! assert!(can_decompose_within_limit(6, &edges, 4, 2));
//! ```

pub mod circuit;
pub mod graph;
pub mod ising;
pub mod plan;

pub use circuit::{SubCircuit, merge_measurements, split_circuit};
pub use graph::{
    GraphPartition, can_decompose_within_limit, connected_components, partition_by_components,
};
pub use ising::{SubProblem, merge_spins, split_ising};
pub use plan::{
    CancellationToken, DecompositionPlan, DecompositionStrategy, execute,
    execute_with_cancellation, plan, solve_with_decomposition,
};
