//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use quantra_hal::BackendConstraints;
use quantra_ir::Circuit;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{ConstraintCheck, GateLegalization};
use crate::property::PropertySet;

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes, threading the circuit through them in order.
    #[instrument(skip(self, circuit, properties), fields(num_qubits = circuit.num_qubits()))]
    pub fn run(&self, circuit: &Circuit, properties: &mut PropertySet) -> CompileResult<Circuit> {
        info!(
            "Running pass manager with {} passes on circuit with {} gates",
            self.passes.len(),
            circuit.gate_count()
        );

        let mut current = circuit.clone();
        for pass in &self.passes {
            if pass.should_run(&current, properties) {
                debug!("Running pass: {}", pass.name());
                current = pass.run(&current, properties)?;
                debug!("Pass {} completed, gates: {}", pass.name(), current.gate_count());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!("Pass manager completed, gates: {}", current.gate_count());
        Ok(current)
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the standard legalize-then-check pipeline.
pub struct PassManagerBuilder {
    check_constraints: bool,
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            check_constraints: true,
            properties: PropertySet::new(),
        }
    }

    /// Set the target profile.
    #[must_use]
    pub fn with_target(mut self, target: BackendConstraints) -> Self {
        self.properties.target = Some(target);
        self
    }

    /// Enable or disable the trailing constraint check.
    #[must_use]
    pub fn with_constraint_check(mut self, enabled: bool) -> Self {
        self.check_constraints = enabled;
        self
    }

    /// Build the pass manager and return it with the properties.
    pub fn build(self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();

        if self.properties.target.is_some() {
            pm.add_pass(GateLegalization);
            if self.check_constraints {
                pm.add_pass(ConstraintCheck);
            }
        }

        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
