//! Property tests for the state-vector engine.

use proptest::prelude::*;
use quantra_ir::{Circuit, Gate, QubitId};
use quantra_sim::{SimError, StateVector};

const TOL: f64 = 1e-10;

/// Any unitary gate that fits an `n`-qubit register, `n >= 1`.
///
/// Two-qubit gates appear from `n = 2` and CCX from `n = 3`.
fn gate_strategy(n: u32) -> BoxedStrategy<Gate> {
    let q = move || (0..n).prop_map(QubitId);
    let angle = || -6.3f64..6.3;
    let mut options = vec![
        q().prop_map(Gate::H).boxed(),
        q().prop_map(Gate::X).boxed(),
        q().prop_map(Gate::Y).boxed(),
        q().prop_map(Gate::Z).boxed(),
        q().prop_map(Gate::S).boxed(),
        q().prop_map(Gate::Sdg).boxed(),
        q().prop_map(Gate::T).boxed(),
        q().prop_map(Gate::Tdg).boxed(),
        (q(), angle()).prop_map(|(qubit, theta)| Gate::Rx { qubit, theta }).boxed(),
        (q(), angle()).prop_map(|(qubit, theta)| Gate::Ry { qubit, theta }).boxed(),
        (q(), angle()).prop_map(|(qubit, theta)| Gate::Rz { qubit, theta }).boxed(),
    ];
    if n >= 2 {
        let pair = move || {
            (0..n, 1..n).prop_map(move |(a, off)| (QubitId(a), QubitId((a + off) % n)))
        };
        options.extend([
            pair().prop_map(|(control, target)| Gate::Cnot { control, target }).boxed(),
            pair().prop_map(|(control, target)| Gate::Cz { control, target }).boxed(),
            pair().prop_map(|(a, b)| Gate::Swap(a, b)).boxed(),
            (pair(), angle()).prop_map(|((a, b), t)| Gate::Rzz(a, b, t)).boxed(),
        ]);
    }
    if n >= 3 {
        options.push(
            (0..n)
                .prop_map(move |a| Gate::Ccx {
                    control1: QubitId(a),
                    control2: QubitId((a + 1) % n),
                    target: QubitId((a + 2) % n),
                })
                .boxed(),
        );
    }
    prop::strategy::Union::new(options).boxed()
}

fn sized_circuit(
    widths: impl Strategy<Value = u32>,
    max_gates: usize,
) -> impl Strategy<Value = Circuit> {
    widths.prop_flat_map(move |n| {
        prop::collection::vec(gate_strategy(n), 0..max_gates)
            .prop_map(move |gates| Circuit::from_gates(n, gates).unwrap())
    })
}

/// Registers of 3 to 6 qubits, so every gate kind can appear.
fn circuit_strategy() -> impl Strategy<Value = Circuit> {
    sized_circuit(3u32..7, 40)
}

/// One- and two-qubit registers, the mid range, and a sparse 12-qubit case.
fn any_width_circuit() -> impl Strategy<Value = Circuit> {
    prop_oneof![
        sized_circuit(1u32..3, 20),
        sized_circuit(3u32..7, 40),
        sized_circuit(Just(12u32), 8),
    ]
}

// =============================================================================
// Norm preservation
// =============================================================================

proptest! {
    #[test]
    fn norm_is_preserved(circuit in any_width_circuit()) {
        let state = StateVector::run(&circuit).unwrap();
        prop_assert!((state.norm() - 1.0).abs() < TOL, "norm {}", state.norm());
    }

    #[test]
    fn norm_is_preserved_on_narrow_registers(circuit in sized_circuit(1u32..3, 30)) {
        let state = StateVector::run(&circuit).unwrap();
        prop_assert!((state.norm() - 1.0).abs() < TOL, "norm {}", state.norm());
    }

    #[test]
    fn init_is_all_zero_basis_state(n in 1u32..=12) {
        let state = StateVector::init(n).unwrap();
        prop_assert_eq!(state.amplitudes().len(), 1usize << n);
        prop_assert!((state.amplitude(0).unwrap().re - 1.0).abs() < TOL);
        prop_assert!(state.amplitudes()[1..].iter().all(|a| a.norm() == 0.0));
    }
}

// =============================================================================
// Self-inverse gates
// =============================================================================

fn self_inverse_strategy(n: u32) -> impl Strategy<Value = Gate> {
    gate_strategy(n).prop_filter("self-inverse gates only", |g| {
        matches!(
            g,
            Gate::H(_)
                | Gate::X(_)
                | Gate::Y(_)
                | Gate::Z(_)
                | Gate::Cnot { .. }
                | Gate::Cz { .. }
                | Gate::Swap(..)
                | Gate::Ccx { .. }
        )
    })
}

proptest! {
    #[test]
    fn self_inverse_twice_is_identity(
        prefix in circuit_strategy(),
        gate in self_inverse_strategy(3),
    ) {
        // `prefix` has at least 3 qubits, so any 3-qubit gate fits.
        let start = StateVector::run(&prefix).unwrap();
        let twice = start.apply_gate(&gate).unwrap().apply_gate(&gate).unwrap();
        prop_assert!(start.approx_eq(&twice, TOL));
    }

    #[test]
    fn seeded_measurement_is_reproducible(
        circuit in any_width_circuit(),
        seed in any::<u64>(),
    ) {
        let state = StateVector::run(&circuit).unwrap();
        prop_assert_eq!(state.measure(16, Some(seed)), state.measure(16, Some(seed)));
    }
}

// =============================================================================
// Sampling statistics
// =============================================================================

#[test]
fn test_hadamard_sampling_is_balanced() {
    let state = StateVector::run(&Circuit::empty(1).h(QubitId(0)).unwrap()).unwrap();
    let ones: usize = state
        .measure(10_000, Some(2024))
        .iter()
        .map(|bits| bits[0] as usize)
        .sum();
    assert!((4_500..5_500).contains(&ones), "ones = {ones}");
}

#[test]
fn test_twenty_qubit_register_stays_normalised() {
    let circuit = Circuit::empty(20)
        .h(QubitId(0))
        .unwrap()
        .cx(QubitId(0), QubitId(19))
        .unwrap()
        .ccx(QubitId(0), QubitId(19), QubitId(10))
        .unwrap()
        .rz(0.7, QubitId(10))
        .unwrap()
        .swap(QubitId(3), QubitId(17))
        .unwrap();
    let state = StateVector::run(&circuit).unwrap();
    assert!((state.norm() - 1.0).abs() < TOL, "norm {}", state.norm());
    assert!((state.probability(0).unwrap() - 0.5).abs() < TOL);
}

#[test]
fn test_twenty_qubits_is_the_limit() {
    assert!(StateVector::init(20).is_ok());
    assert!(matches!(
        StateVector::init(21),
        Err(SimError::InvalidQubitCount { max: 20, .. })
    ));
}
