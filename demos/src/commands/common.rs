//! Shared helpers for demo commands.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use console::style;

use quantra_adapter_anneal::{ANNEALER_KIND, SimulatedAnnealer};
use quantra_adapter_sim::{LocalSimulator, SIMULATOR_KIND};
use quantra_hal::{Backend, BackendRegistry, ExecutionConfig, ExecutionResult};
use quantra_ir::{Circuit, QubitId};

use crate::SampleCircuit;

/// Load the configuration file (if any) and apply `QUANTRA_*` overrides.
pub fn load_config(path: Option<&Path>) -> Result<ExecutionConfig> {
    let config = ExecutionConfig::load(path).with_context(|| match path {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Invalid configuration from environment".to_string(),
    })?;
    tracing::debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Registry with every backend kind shipped with Quantra.
pub fn registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register::<LocalSimulator>(SIMULATOR_KIND);
    registry.register::<SimulatedAnnealer>(ANNEALER_KIND);
    registry
}

/// Instantiate the configured backend pool.
pub fn backend_pool(config: &ExecutionConfig) -> Result<Vec<Arc<dyn Backend>>> {
    registry()
        .create_pool(&config.backends)
        .context("Failed to create backend pool")
}

/// Build one of the sample circuits, measured at the end.
pub fn sample_circuit(kind: SampleCircuit, qubits: u32) -> Result<Circuit> {
    let q = QubitId;
    let circuit = match kind {
        SampleCircuit::Bell => Circuit::bell()?,
        SampleCircuit::Ghz => Circuit::ghz(qubits)?,
        SampleCircuit::Toffoli => Circuit::empty(3)
            .x(q(0))?
            .x(q(1))?
            .ccx(q(0), q(1), q(2))?,
    };
    Ok(circuit.measure_all()?)
}

/// Print a histogram of the most frequent outcomes.
pub fn print_results(result: &ExecutionResult) {
    println!(
        "\n{} Results from {} ({} shots):",
        style("✓").green().bold(),
        style(&result.backend).yellow(),
        result.num_shots
    );

    let counts = result.counts();
    let mut sorted: Vec<(&str, usize)> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let total = counts.total_shots().max(1) as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = *count as f64 / total * 100.0;
        let bar: String = "█".repeat((prob / 2.0).round() as usize);
        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }
}
