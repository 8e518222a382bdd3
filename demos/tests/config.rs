//! The shipped demo configuration loads and builds a working pool.

use std::sync::Arc;

use quantra_adapter_anneal::{ANNEALER_KIND, SimulatedAnnealer};
use quantra_adapter_sim::{LocalSimulator, SIMULATOR_KIND};
use quantra_hal::{Backend, BackendRegistry, ExecutionConfig, Paradigm, select_best_backend};
use quantra_ir::{Circuit, IsingModel, Program, QaoaProgram};

fn shipped_config() -> ExecutionConfig {
    ExecutionConfig::from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/config/quantra.yaml"))
        .unwrap()
}

fn pool(config: &ExecutionConfig) -> Vec<Arc<dyn Backend>> {
    let mut registry = BackendRegistry::new();
    registry.register::<LocalSimulator>(SIMULATOR_KIND);
    registry.register::<SimulatedAnnealer>(ANNEALER_KIND);
    registry.create_pool(&config.backends).unwrap()
}

#[test]
fn test_shipped_config_parses() {
    let config = shipped_config();
    assert_eq!(config.shots, 1000);
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.target.as_deref(), Some("ionq.simulator"));
    assert_eq!(config.backends.len(), 3);
}

#[test]
fn test_shipped_pool_routes_both_paradigms() {
    let pool = pool(&shipped_config());
    assert_eq!(pool[2].native_state_type(), Paradigm::Annealing);

    let ghz: Program = Circuit::ghz(10).unwrap().into();
    assert_eq!(select_best_backend(&pool, &ghz).unwrap().name(), "local-simulator");

    let problem = IsingModel::new(50).with_coupling(3, 4, 1.0).unwrap();
    let qaoa: Program = QaoaProgram::new(problem, vec![]).into();
    assert_eq!(
        select_best_backend(&pool, &qaoa).unwrap().name(),
        "simulated-annealer"
    );
}
