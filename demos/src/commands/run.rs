//! Run command implementation.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use quantra_compile::{
    LegalizationStats, format_validation_errors, resolve_profile, transpile_with_properties,
    validate_circuit,
};
use quantra_hal::execute_with_automatic_backend_async;
use quantra_ir::Program;

use super::common::{backend_pool, load_config, print_results, sample_circuit};
use crate::SampleCircuit;

/// Execute the run command.
pub async fn execute(
    config: Option<&Path>,
    kind: SampleCircuit,
    qubits: u32,
    target: Option<&str>,
    shots: Option<usize>,
) -> Result<()> {
    let config = load_config(config)?;
    let shots = shots.unwrap_or(config.shots);
    let target = target.map(str::to_string).or(config.target.clone());

    let mut circuit = sample_circuit(kind, qubits)?;
    println!(
        "{} Running {:?} circuit: {} qubits, {} gates ({} shots)",
        style("→").cyan().bold(),
        kind,
        circuit.num_qubits(),
        circuit.gate_count(),
        shots
    );

    if let Some(target) = target {
        let constraints = resolve_profile(&target)?;
        println!("  Target: {}", style(&constraints.name).yellow());

        if let Err(errors) = validate_circuit(&constraints, &circuit) {
            println!(
                "  {} {}",
                style("!").yellow().bold(),
                format_validation_errors(&errors).replace('\n', "\n  ")
            );
        }

        let (transpiled, properties) = transpile_with_properties(&constraints, &circuit)?;
        let decomposed = properties
            .get::<LegalizationStats>()
            .map_or(0, |stats| stats.decomposed);
        println!(
            "  Transpiled: {} -> {} gates ({} rewritten)",
            circuit.gate_count(),
            transpiled.gate_count(),
            decomposed
        );
        if !properties.violations.is_empty() {
            anyhow::bail!(
                "circuit cannot run on {}: {}",
                constraints.name,
                format_validation_errors(&properties.violations)
            );
        }
        circuit = transpiled;
    }

    let pool = backend_pool(&config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Executing...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result =
        execute_with_automatic_backend_async(pool, Program::from(circuit), shots, config.seed)
            .await;
    spinner.finish_and_clear();

    print_results(&result?);
    Ok(())
}
