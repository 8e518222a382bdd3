//! Backend selection and ranking.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use quantra_ir::Program;

use crate::backend::Backend;
use crate::capability::{BackendCapability, backend_capability, detect_circuit_paradigm};
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// A ranked backend with the reasoning behind its score.
#[derive(Clone)]
pub struct Recommendation {
    /// The backend.
    pub backend: Arc<dyn Backend>,
    /// Its capability, scored against the program.
    pub capability: BackendCapability,
    /// Human-readable justification.
    pub rationale: String,
}

impl std::fmt::Debug for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommendation")
            .field("backend", &self.backend.name())
            .field("capability", &self.capability)
            .field("rationale", &self.rationale)
            .finish()
    }
}

/// Check whether `backend` can run `program`: the paradigms must match and
/// the program must fit the qubit limit.
pub fn can_execute_circuit(backend: &dyn Backend, program: &Program) -> bool {
    let capability = backend_capability(backend, Some(program));
    capability.paradigm == detect_circuit_paradigm(program) && capability.fits(program.num_qubits())
}

/// Pick the highest-scoring compatible backend. Ties keep the earlier backend.
#[instrument(skip_all, fields(candidates = backends.len(), num_qubits = program.num_qubits()))]
pub fn select_best_backend(
    backends: &[Arc<dyn Backend>],
    program: &Program,
) -> HalResult<Arc<dyn Backend>> {
    let mut best: Option<(&Arc<dyn Backend>, f64)> = None;
    for backend in backends {
        if !can_execute_circuit(backend.as_ref(), program) {
            debug!("Skipping incompatible backend {}", backend.name());
            continue;
        }
        let score = backend_capability(backend.as_ref(), Some(program)).performance_score;
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((backend, score));
        }
    }
    match best {
        Some((backend, score)) => {
            info!("Selected backend {} (score {:.3})", backend.name(), score);
            Ok(Arc::clone(backend))
        }
        None => Err(HalError::NoCompatibleBackend {
            paradigm: detect_circuit_paradigm(program),
            num_qubits: program.num_qubits(),
            candidates: backends.len(),
        }),
    }
}

/// Rank every compatible backend by score, best first.
///
/// `filter` further restricts the candidates by capability.
pub fn backend_recommendations(
    backends: &[Arc<dyn Backend>],
    program: &Program,
    filter: Option<&dyn Fn(&BackendCapability) -> bool>,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = backends
        .iter()
        .filter(|&backend| can_execute_circuit(backend.as_ref(), program))
        .map(|backend| {
            let capability = backend_capability(backend.as_ref(), Some(program));
            let rationale = rationale(&capability, program);
            Recommendation {
                backend: Arc::clone(backend),
                capability,
                rationale,
            }
        })
        .filter(|rec| filter.is_none_or(|f| f(&rec.capability)))
        .collect();
    // Stable sort keeps pool order among equal scores.
    recommendations.sort_by(|a, b| {
        b.capability
            .performance_score
            .total_cmp(&a.capability.performance_score)
    });
    recommendations
}

fn rationale(capability: &BackendCapability, program: &Program) -> String {
    let limit = match capability.max_qubits {
        Some(limit) => format!("{limit} qubits"),
        None => "unlimited qubits".to_string(),
    };
    let availability = if capability.is_available {
        "available"
    } else {
        "currently unavailable"
    };
    format!(
        "{} backend with {limit} for a {}-qubit program, {availability} (score {:.3})",
        capability.paradigm,
        program.num_qubits(),
        capability.performance_score
    )
}

/// Select a backend and run `program` on it.
///
/// Errors from the selected backend are returned as-is; no other backend is
/// tried.
#[instrument(skip_all, fields(shots = shots))]
pub fn execute_with_automatic_backend(
    backends: &[Arc<dyn Backend>],
    program: &Program,
    shots: usize,
    seed: Option<u64>,
) -> HalResult<ExecutionResult> {
    if shots == 0 {
        return Err(HalError::InvalidShots(shots));
    }
    let backend = select_best_backend(backends, program)?;
    backend.execute(program, shots, seed)
}

/// Non-blocking twin of [`execute_with_automatic_backend`].
///
/// Selection and execution run unchanged on the blocking pool; the caller
/// suspends only while they do.
pub async fn execute_with_automatic_backend_async(
    backends: Vec<Arc<dyn Backend>>,
    program: Program,
    shots: usize,
    seed: Option<u64>,
) -> HalResult<ExecutionResult> {
    tokio::task::spawn_blocking(move || {
        execute_with_automatic_backend(&backends, &program, shots, seed)
    })
    .await
    .map_err(|e| HalError::operation("execute_with_automatic_backend", e.to_string()))?
}
