//! Constraint check analysis pass.

use tracing::warn;

use quantra_ir::Circuit;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;
use crate::validation::validate_circuit;

/// Validates the circuit against the target and records every remaining
/// violation in [`PropertySet::violations`].
pub struct ConstraintCheck;

impl Pass for ConstraintCheck {
    fn name(&self) -> &'static str {
        "constraint_check"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, circuit: &Circuit, properties: &mut PropertySet) -> CompileResult<Circuit> {
        let target = properties
            .target
            .as_ref()
            .ok_or_else(|| CompileError::MissingTarget(self.name().to_string()))?;

        let violations = validate_circuit(target, circuit).err().unwrap_or_default();
        if !violations.is_empty() {
            warn!(
                "{} constraint violation(s) remain for '{}'",
                violations.len(),
                target.name
            );
        }
        properties.violations = violations;
        Ok(circuit.clone())
    }

    fn should_run(&self, _circuit: &Circuit, properties: &PropertySet) -> bool {
        properties.target.is_some()
    }
}
