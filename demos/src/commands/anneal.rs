//! Anneal command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quantra_adapter_anneal::ANNEALER_KIND;
use quantra_hal::execute_with_automatic_backend_async;
use quantra_ir::ising::qubo_to_ising_solution;
use quantra_ir::{IsingModel, Program, QaoaProgram};

use super::common::{backend_pool, load_config, print_results};

/// Ring of `spins` spins with random `±1` couplings and small random fields.
fn random_ring(spins: usize, seed: u64) -> Result<IsingModel> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut model = IsingModel::new(spins);
    for i in 0..spins {
        let j = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        model.add_coupling(i, (i + 1) % spins, j)?;
        model.add_field(i, rng.gen_range(-0.1..0.1))?;
    }
    Ok(model)
}

/// Execute the anneal command.
pub async fn execute(config: Option<&Path>, spins: usize, instance_seed: u64) -> Result<()> {
    let config = load_config(config)?;
    let problem = random_ring(spins, instance_seed)?;
    println!(
        "{} Annealing a {}-spin ring ({} couplings)",
        style("→").cyan().bold(),
        problem.num_spins(),
        problem.couplings().len()
    );

    let pool = backend_pool(&config)?;
    let program = Program::from(QaoaProgram::new(problem.clone(), vec![]));
    let result = execute_with_automatic_backend_async(pool, program, config.shots, config.seed)
        .await
        .with_context(|| format!("no backend of kind '{ANNEALER_KIND}' can take the problem"))?;

    let mut best: Option<f64> = None;
    for bits in &result.measurements {
        let energy = problem.energy(&qubo_to_ising_solution(bits))?;
        best = Some(best.map_or(energy, |b: f64| b.min(energy)));
    }
    print_results(&result);
    if let Some(best) = best {
        println!("\n  Best energy: {}", style(format!("{best:.4}")).green().bold());
    }
    Ok(())
}
