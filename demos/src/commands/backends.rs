//! Backends command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use quantra_hal::{Connectivity, backend_capability, known_profiles};

use super::common::{backend_pool, load_config};

/// Execute the backends command.
pub fn execute(config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let pool = backend_pool(&config)?;

    println!("{} Backend pool:\n", style("Quantra").cyan().bold());
    for backend in &pool {
        let capability = backend_capability(backend.as_ref(), None);
        println!(
            "  {} {} ({:?})",
            if backend.is_available() {
                style("●").green()
            } else {
                style("○").red()
            },
            style(backend.name()).bold(),
            capability.paradigm
        );
        match capability.max_qubits {
            Some(limit) => println!("    Qubits: {limit}"),
            None => println!("    Qubits: unlimited"),
        }
        println!("    Score: {:.2}", capability.performance_score);
    }

    println!("\n{} Hardware profiles:\n", style("Quantra").cyan().bold());
    for profile in known_profiles() {
        let connectivity = match &profile.connectivity {
            Connectivity::AllToAll => "all-to-all".to_string(),
            Connectivity::Limited(edges) => format!("{} couplings", edges.len()),
        };
        let depth = profile
            .max_circuit_depth
            .map_or_else(|| "unbounded".to_string(), |d| d.to_string());
        println!("  {}", style(&profile.name).bold());
        println!(
            "    Qubits: {}, depth: {}, {}",
            profile.max_qubits, depth, connectivity
        );
        let mut gates: Vec<_> = profile.supported_gates.iter().map(|g| g.name()).collect();
        gates.sort_unstable();
        println!("    Gates: {}", gates.join(", "));
    }

    Ok(())
}
