//! Quantra demo command-line interface.
//!
//! ```text
//! quantra-demo backends
//! quantra-demo run --circuit ghz --qubits 5 --target ionq.simulator
//! quantra-demo decompose --blocks 3 --block-size 8
//! quantra-demo anneal --spins 40
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{anneal, backends, decompose, run};

/// Quantra - validate, transpile and execute quantum programs
#[derive(Parser)]
#[command(name = "quantra-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (YAML)
    #[arg(short, long, global = true, env = "QUANTRA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Built-in sample circuits.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SampleCircuit {
    /// Two-qubit Bell pair
    Bell,
    /// n-qubit GHZ state
    Ghz,
    /// Toffoli on |110>, exercising the CCX ladder
    Toffoli,
}

#[derive(Subcommand)]
enum Commands {
    /// List the configured backend pool and built-in hardware profiles
    Backends,

    /// Validate, transpile and execute a sample circuit
    Run {
        /// Circuit to run
        #[arg(long, value_enum, default_value = "ghz")]
        circuit: SampleCircuit,

        /// Width of the GHZ circuit
        #[arg(short, long, default_value = "3")]
        qubits: u32,

        /// Hardware profile to transpile for (overrides the config)
        #[arg(short, long)]
        target: Option<String>,

        /// Number of shots (overrides the config)
        #[arg(short, long)]
        shots: Option<usize>,
    },

    /// Run independent GHZ blocks wider than the simulator by splitting them
    Decompose {
        /// Number of independent blocks
        #[arg(long, default_value = "3")]
        blocks: u32,

        /// Qubits per block
        #[arg(long, default_value = "8")]
        block_size: u32,

        /// Number of shots (overrides the config)
        #[arg(short, long)]
        shots: Option<usize>,
    },

    /// Anneal a random ring Ising problem on the annealing backend
    Anneal {
        /// Number of spins
        #[arg(long, default_value = "24")]
        spins: usize,

        /// Seed for the random couplings
        #[arg(long, default_value = "7")]
        instance_seed: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Backends => backends::execute(config),

        Commands::Run {
            circuit,
            qubits,
            target,
            shots,
        } => run::execute(config, circuit, qubits, target.as_deref(), shots).await,

        Commands::Decompose {
            blocks,
            block_size,
            shots,
        } => decompose::execute(config, blocks, block_size, shots),

        Commands::Anneal {
            spins,
            instance_seed,
        } => anneal::execute(config, spins, instance_seed).await,
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
