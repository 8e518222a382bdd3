//! Decompose command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use quantra_decompose::{DecompositionStrategy, SubCircuit, merge_measurements, plan, split_circuit};
use quantra_hal::{ExecutionResult, HalResult, select_best_backend};
use quantra_ir::{Circuit, Program, QubitId};

use super::common::{backend_pool, load_config, print_results};

/// `blocks` independent GHZ states of `block_size` qubits each.
fn ghz_blocks(blocks: u32, block_size: u32) -> Result<Circuit> {
    let mut circuit = Circuit::empty(blocks * block_size);
    for block in 0..blocks {
        let first = block * block_size;
        circuit = circuit.h(QubitId(first))?;
        for q in first + 1..first + block_size {
            circuit = circuit.cx(QubitId(q - 1), QubitId(q))?;
        }
    }
    Ok(circuit)
}

/// Execute the decompose command.
pub fn execute(
    config: Option<&Path>,
    blocks: u32,
    block_size: u32,
    shots: Option<usize>,
) -> Result<()> {
    let config = load_config(config)?;
    let shots = shots.unwrap_or(config.shots);
    let circuit = ghz_blocks(blocks, block_size)?;
    let num_qubits = circuit.num_qubits();

    let pool = backend_pool(&config)?;
    let backend = select_best_backend(&pool, &Program::from(Circuit::empty(1)))?;
    println!(
        "{} {} GHZ blocks, {} qubits on {} (limit {})",
        style("→").cyan().bold(),
        blocks,
        num_qubits,
        style(backend.name()).yellow(),
        backend
            .max_qubits()
            .map_or_else(|| "none".to_string(), |l| l.to_string())
    );

    let parts = split_circuit(&circuit)?;
    let whole = SubCircuit {
        qubits: (0..num_qubits).map(QubitId).collect(),
        circuit,
    };
    let plan = plan(
        DecompositionStrategy::AdaptiveToBackend,
        backend.as_ref(),
        |p: &SubCircuit| p.qubits.len(),
        |_| parts.clone(),
        whole,
    );
    println!("  Plan: {} solve(s)", plan.num_solves());

    let progress = ProgressBar::new(plan.num_solves() as u64);
    progress.set_style(ProgressStyle::default_bar().template("{bar:30.cyan} {pos}/{len} {msg}")?);

    let mut index = 0u64;
    let measurements = quantra_decompose::execute(
        |part: SubCircuit| -> HalResult<Vec<Vec<u8>>> {
            progress.set_message(format!("{} qubits", part.qubits.len()));
            let seed = config.seed.map(|s| s.wrapping_add(index));
            index += 1;
            let result = backend.execute(&Program::from(part.circuit), shots, seed)?;
            progress.inc(1);
            Ok(result.measurements)
        },
        |results| merge_measurements(num_qubits, &parts, &results),
        plan,
    );
    progress.finish_and_clear();

    print_results(&ExecutionResult {
        backend: backend.name().to_string(),
        num_shots: shots,
        measurements: measurements?,
    });
    Ok(())
}
