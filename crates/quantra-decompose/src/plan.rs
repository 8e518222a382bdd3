//! Decomposition planning and execution.
//!
//! [`plan`] decides whether a problem runs directly or is split into
//! sub-problems; [`execute`] solves the plan in order, failing fast, and
//! recombines the sub-solutions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, instrument, warn};

use quantra_hal::{Backend, HalError, HalResult};

/// How to decide whether a problem is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompositionStrategy {
    /// Always run the problem as a whole.
    NoDecomposition,
    /// Split anything whose estimate exceeds the given qubit count.
    FixedPartition(usize),
    /// Split against the backend's qubit limit; unlimited backends never split.
    AdaptiveToBackend,
}

/// Outcome of [`plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecompositionPlan<T> {
    /// Solve the problem as a whole.
    RunDirect(T),
    /// Solve each sub-problem in order, then recombine.
    RunDecomposed(Vec<T>),
}

impl<T> DecompositionPlan<T> {
    /// Number of solver calls the plan needs.
    pub fn num_solves(&self) -> usize {
        match self {
            DecompositionPlan::RunDirect(_) => 1,
            DecompositionPlan::RunDecomposed(parts) => parts.len(),
        }
    }

    /// Check whether the plan splits the problem.
    pub fn is_decomposed(&self) -> bool {
        matches!(self, DecompositionPlan::RunDecomposed(_))
    }
}

/// Decide how `problem` should be solved on `backend`.
///
/// `decompose` is called only when the estimate exceeds the limit. A
/// decomposition into a single part cannot help and falls back to
/// [`DecompositionPlan::RunDirect`] with the original problem.
pub fn plan<T>(
    strategy: DecompositionStrategy,
    backend: &dyn Backend,
    estimate_qubits: impl Fn(&T) -> usize,
    decompose: impl FnOnce(&T) -> Vec<T>,
    problem: T,
) -> DecompositionPlan<T> {
    let limit = match strategy {
        DecompositionStrategy::NoDecomposition => return DecompositionPlan::RunDirect(problem),
        DecompositionStrategy::FixedPartition(max_size) => max_size,
        DecompositionStrategy::AdaptiveToBackend => match backend.max_qubits() {
            Some(limit) => limit as usize,
            None => return DecompositionPlan::RunDirect(problem),
        },
    };

    let estimate = estimate_qubits(&problem);
    if estimate <= limit {
        return DecompositionPlan::RunDirect(problem);
    }

    let parts = decompose(&problem);
    debug!(
        "Problem needs {} qubits, limit {}: {} part(s)",
        estimate,
        limit,
        parts.len()
    );
    if parts.len() == 1 {
        warn!("Problem cannot be split further, running it whole");
        return DecompositionPlan::RunDirect(problem);
    }
    DecompositionPlan::RunDecomposed(parts)
}

/// Solve a plan.
///
/// `RunDirect` calls `solve` once and returns its result unchanged.
/// `RunDecomposed` solves the parts in order, stops at the first error, and
/// hands the ordered sub-solutions to `recombine` (even when there are none).
pub fn execute<T, S>(
    solve: impl FnMut(T) -> HalResult<S>,
    recombine: impl FnOnce(Vec<S>) -> HalResult<S>,
    plan: DecompositionPlan<T>,
) -> HalResult<S> {
    run_plan(solve, recombine, plan, None)
}

/// Shared flag for cooperative cancellation of a decomposed run.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Like [`execute`], checking `token` before each sub-problem solve.
///
/// A solve that has started always runs to completion. Once the token is
/// cancelled no further solves start and [`HalError::Cancelled`] is returned.
pub fn execute_with_cancellation<T, S>(
    solve: impl FnMut(T) -> HalResult<S>,
    recombine: impl FnOnce(Vec<S>) -> HalResult<S>,
    plan: DecompositionPlan<T>,
    token: &CancellationToken,
) -> HalResult<S> {
    run_plan(solve, recombine, plan, Some(token))
}

#[instrument(skip_all, fields(solves = plan.num_solves()))]
fn run_plan<T, S>(
    mut solve: impl FnMut(T) -> HalResult<S>,
    recombine: impl FnOnce(Vec<S>) -> HalResult<S>,
    plan: DecompositionPlan<T>,
    token: Option<&CancellationToken>,
) -> HalResult<S> {
    match plan {
        DecompositionPlan::RunDirect(problem) => solve(problem),
        DecompositionPlan::RunDecomposed(parts) => {
            let total = parts.len();
            let mut solutions = Vec::with_capacity(total);
            for (index, part) in parts.into_iter().enumerate() {
                if token.is_some_and(CancellationToken::is_cancelled) {
                    info!("Cancelled after {} of {} sub-problems", index, total);
                    return Err(HalError::Cancelled {
                        completed: index,
                        total,
                    });
                }
                debug!("Solving sub-problem {}/{}", index + 1, total);
                solutions.push(solve(part)?);
            }
            recombine(solutions)
        }
    }
}

/// Plan against `backend`'s qubit limit, then execute.
pub fn solve_with_decomposition<T, S>(
    backend: &dyn Backend,
    problem: T,
    estimate_qubits: impl Fn(&T) -> usize,
    decompose: impl FnOnce(&T) -> Vec<T>,
    recombine: impl FnOnce(Vec<S>) -> HalResult<S>,
    solve: impl FnMut(T) -> HalResult<S>,
) -> HalResult<S> {
    let plan = plan(
        DecompositionStrategy::AdaptiveToBackend,
        backend,
        estimate_qubits,
        decompose,
        problem,
    );
    info!(
        "Solving on '{}' with {} solve(s)",
        backend.name(),
        plan.num_solves()
    );
    execute(solve, recombine, plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shared_between_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_plan_shape() {
        let direct: DecompositionPlan<u32> = DecompositionPlan::RunDirect(3);
        assert_eq!(direct.num_solves(), 1);
        assert!(!direct.is_decomposed());
        let split = DecompositionPlan::RunDecomposed(vec![1, 2, 3]);
        assert_eq!(split.num_solves(), 3);
        assert!(split.is_decomposed());
    }
}
