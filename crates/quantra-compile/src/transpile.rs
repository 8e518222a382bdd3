//! Transpilation entry points.

use tracing::instrument;

use quantra_hal::{BackendConstraints, profile, profile_keys};
use quantra_ir::Circuit;

use crate::error::{CompileError, CompileResult};
use crate::manager::PassManagerBuilder;
use crate::property::{LegalizationStats, PropertySet};

/// Gate counts before and after transpilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranspilationStats {
    /// Gates in the input circuit.
    pub original: usize,
    /// Gates in the transpiled circuit.
    pub transpiled: usize,
    /// Input gates rewritten into fully supported sequences.
    pub decomposed: usize,
}

/// Check whether any gate kind in `circuit` is unsupported by `constraints`.
pub fn needs_transpilation(constraints: &BackendConstraints, circuit: &Circuit) -> bool {
    circuit
        .kinds_in_order()
        .into_iter()
        .any(|kind| !constraints.supports(kind))
}

/// Legalize `circuit` for `constraints`.
///
/// Returns a clone of the input when nothing needs rewriting.
pub fn transpile(constraints: &BackendConstraints, circuit: &Circuit) -> CompileResult<Circuit> {
    transpile_with_properties(constraints, circuit).map(|(circuit, _)| circuit)
}

/// Like [`transpile`], also returning the properties the passes produced:
/// the violations still present and the [`LegalizationStats`].
#[instrument(skip_all, fields(target = %constraints.name, gates = circuit.gate_count()))]
pub fn transpile_with_properties(
    constraints: &BackendConstraints,
    circuit: &Circuit,
) -> CompileResult<(Circuit, PropertySet)> {
    let (pm, mut properties) = PassManagerBuilder::new()
        .with_target(constraints.clone())
        .build();

    let transpiled = pm.run(circuit, &mut properties)?;
    Ok((transpiled, properties))
}

/// Look up a built-in profile by name and transpile for it.
pub fn transpile_for_backend(name: &str, circuit: &Circuit) -> CompileResult<Circuit> {
    let constraints = resolve_profile(name)?;
    transpile(&constraints, circuit)
}

/// Resolve a built-in profile by key or display name.
pub fn resolve_profile(name: &str) -> CompileResult<BackendConstraints> {
    profile::lookup(name).ok_or_else(|| CompileError::UnknownBackend {
        name: name.to_string(),
        known: profile_keys().into_iter().map(str::to_string).collect(),
    })
}

/// Gate counts of `circuit` before and after transpiling for `constraints`.
pub fn transpilation_stats(
    constraints: &BackendConstraints,
    circuit: &Circuit,
) -> CompileResult<TranspilationStats> {
    let (transpiled, properties) = transpile_with_properties(constraints, circuit)?;
    let decomposed = properties
        .get::<LegalizationStats>()
        .map_or(0, |stats| stats.decomposed);
    Ok(TranspilationStats {
        original: circuit.gate_count(),
        transpiled: transpiled.gate_count(),
        decomposed,
    })
}
