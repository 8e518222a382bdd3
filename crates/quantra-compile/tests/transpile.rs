//! Validation and transpilation against the built-in profiles.

use num_complex::Complex64;
use proptest::prelude::*;
use quantra_compile::{
    ValidationError, transpile, transpile_for_backend, transpile_with_properties,
    validate_circuit, validate_gate_set,
};
use quantra_hal::BackendConstraints;
use quantra_ir::{Circuit, Gate, GateKind, QubitId};
use quantra_sim::StateVector;

fn q(i: u32) -> QubitId {
    QubitId(i)
}

/// A generic entangled state, so phase differences between basis states show.
fn prepared(n: u32) -> StateVector {
    let mut c = Circuit::empty(n);
    for i in 0..n {
        let x = f64::from(i);
        c = c.ry(0.3 + 0.7 * x, q(i)).unwrap().rz(0.1 + 0.2 * x, q(i)).unwrap();
    }
    for i in 1..n {
        c = c.cx(q(i - 1), q(i)).unwrap();
    }
    for i in 0..n {
        c = c.rx(0.5 + 0.1 * f64::from(i), q(i)).unwrap();
    }
    StateVector::run(&c).unwrap()
}

fn equal_up_to_phase(a: &StateVector, b: &StateVector) -> bool {
    let overlap: Complex64 = a
        .amplitudes()
        .iter()
        .zip(b.amplitudes())
        .map(|(x, y)| x.conj() * y)
        .sum();
    (overlap.norm() - 1.0).abs() < 1e-9
}

fn assert_equivalent(original: &Circuit, transpiled: &Circuit) {
    let input = prepared(original.num_qubits());
    let expected = input.run_from(original).unwrap();
    let actual = input.run_from(transpiled).unwrap();
    assert!(
        equal_up_to_phase(&expected, &actual),
        "{original:?} != {transpiled:?}"
    );
}

/// Only rotations and CZ.
fn rotations_and_cz() -> BackendConstraints {
    let mut target = BackendConstraints::ionq_hardware();
    target.name = "Rotations+CZ".into();
    target.supported_gates = [GateKind::Rx, GateKind::Ry, GateKind::Rz, GateKind::Cz]
        .into_iter()
        .collect();
    target
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_oversized_circuit_reports_every_kind_of_violation() {
    let gates = (0..200u32).map(|i| match i % 3 {
        0 => Gate::H(q(i % 100)),
        1 => Gate::Cz {
            control: q(i % 100),
            target: q((i + 1) % 100),
        },
        _ => Gate::Ccx {
            control1: q(i % 100),
            control2: q((i + 1) % 100),
            target: q((i + 2) % 100),
        },
    });
    let circuit = Circuit::from_gates(100, gates).unwrap();
    let errors = validate_circuit(&BackendConstraints::ionq_simulator(), &circuit).unwrap_err();

    assert!(errors.iter().any(|e| matches!(
        e,
        ValidationError::QubitCountExceeded { requested: 100, limit: 29, .. }
    )));
    assert!(errors.iter().any(|e| matches!(
        e,
        ValidationError::CircuitDepthExceeded { depth: 200, limit: 100, .. }
    )));
    let unsupported: Vec<_> = errors
        .iter()
        .filter_map(|e| match e {
            ValidationError::UnsupportedGate { gate, .. } => Some(*gate),
            _ => None,
        })
        .collect();
    assert_eq!(unsupported, vec![GateKind::Cz, GateKind::Ccx]);
    assert_eq!(errors.len(), 4);
}

#[test]
fn test_errors_ordered_by_check() {
    let mut rigetti = BackendConstraints::rigetti_aspen_m3();
    rigetti.max_circuit_depth = Some(1);
    let circuit = Circuit::empty(80)
        .cx(q(0), q(2))
        .unwrap()
        .cz(q(0), q(2))
        .unwrap();
    let errors = validate_circuit(&rigetti, &circuit).unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [
            ValidationError::QubitCountExceeded { .. },
            ValidationError::UnsupportedGate {
                gate: GateKind::Cnot,
                ..
            },
            ValidationError::CircuitDepthExceeded { .. },
            ValidationError::ConnectivityViolation { .. },
            ValidationError::ConnectivityViolation { .. },
        ]
    ));
}

// =============================================================================
// Transpilation
// =============================================================================

#[test]
fn test_supported_circuit_is_unchanged() {
    let circuit = Circuit::empty(3)
        .h(q(0))
        .unwrap()
        .cx(q(0), q(1))
        .unwrap()
        .swap(q(1), q(2))
        .unwrap()
        .rx(0.4, q(2))
        .unwrap()
        .measure_all()
        .unwrap();
    let out = transpile_for_backend("ionq.simulator", &circuit).unwrap();
    assert_eq!(out.gates(), circuit.gates());
}

#[test]
fn test_transpiled_circuit_validates() {
    let circuit = Circuit::empty(3)
        .h(q(0))
        .unwrap()
        .s(q(1))
        .unwrap()
        .cz(q(0), q(1))
        .unwrap()
        .ccx(q(0), q(1), q(2))
        .unwrap()
        .tdg(q(2))
        .unwrap();
    let ionq = BackendConstraints::ionq_simulator();
    let (out, props) = transpile_with_properties(&ionq, &circuit).unwrap();
    assert!(props.violations.is_empty());
    assert_eq!(validate_circuit(&ionq, &out), Ok(()));
    assert_eq!(out.gates()[0], Gate::H(q(0)));
    assert_eq!(out.num_qubits(), 3);
}

#[test]
fn test_remaining_violations_recorded() {
    let mut target = BackendConstraints::ionq_hardware();
    target.supported_gates = [GateKind::H].into_iter().collect();
    let circuit = Circuit::bell().unwrap();
    let (out, props) = transpile_with_properties(&target, &circuit).unwrap();
    assert_eq!(out, circuit);
    assert!(matches!(
        props.violations.as_slice(),
        [ValidationError::UnsupportedGate {
            gate: GateKind::Cnot,
            ..
        }]
    ));
}

#[test]
fn test_each_rewrite_preserves_statistics() {
    let gates = [
        Gate::H(q(0)),
        Gate::X(q(1)),
        Gate::Y(q(0)),
        Gate::Z(q(2)),
        Gate::S(q(0)),
        Gate::Sdg(q(1)),
        Gate::T(q(2)),
        Gate::Tdg(q(0)),
        Gate::Cnot {
            control: q(0),
            target: q(2),
        },
        Gate::Cz {
            control: q(2),
            target: q(1),
        },
        Gate::Swap(q(0), q(1)),
        Gate::Rzz(q(1), q(2), 0.83),
        Gate::Ccx {
            control1: q(2),
            control2: q(0),
            target: q(1),
        },
    ];
    let targets = [
        BackendConstraints::ionq_simulator(),
        BackendConstraints::rigetti_aspen_m3(),
        rotations_and_cz(),
    ];
    for target in &targets {
        for gate in &gates {
            let circuit = Circuit::from_gates(3, [gate.clone()]).unwrap();
            let out = transpile(target, &circuit).unwrap();
            assert!(
                validate_gate_set(target, &out).is_empty(),
                "{gate} not legal on {}",
                target.name
            );
            assert_equivalent(&circuit, &out);
        }
    }
}

// =============================================================================
// Properties
// =============================================================================

fn gate_strategy(n: u32) -> impl Strategy<Value = Gate> {
    let q = move || (0..n).prop_map(QubitId);
    let pair = move || {
        (0..n, 1..n).prop_map(move |(a, off)| (QubitId(a), QubitId((a + off) % n)))
    };
    let angle = || -3.2f64..3.2;
    prop_oneof![
        q().prop_map(Gate::H),
        q().prop_map(Gate::X),
        q().prop_map(Gate::Y),
        q().prop_map(Gate::S),
        q().prop_map(Gate::T),
        q().prop_map(Gate::Tdg),
        (q(), angle()).prop_map(|(qubit, theta)| Gate::Ry { qubit, theta }),
        pair().prop_map(|(control, target)| Gate::Cnot { control, target }),
        pair().prop_map(|(control, target)| Gate::Cz { control, target }),
        pair().prop_map(|(a, b)| Gate::Swap(a, b)),
        (pair(), angle()).prop_map(|((a, b), t)| Gate::Rzz(a, b, t)),
        (0..n).prop_map(move |a| Gate::Ccx {
            control1: QubitId(a),
            control2: QubitId((a + 1) % n),
            target: QubitId((a + 2) % n),
        }),
    ]
}

fn circuit_strategy() -> impl Strategy<Value = Circuit> {
    (3u32..5).prop_flat_map(|n| {
        prop::collection::vec(gate_strategy(n), 0..12)
            .prop_map(move |gates| Circuit::from_gates(n, gates).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transpile_is_legal_and_equivalent(circuit in circuit_strategy()) {
        for target in [BackendConstraints::rigetti_aspen_m3(), rotations_and_cz()] {
            let out = transpile(&target, &circuit).unwrap();
            prop_assert!(validate_gate_set(&target, &out).is_empty());
            let input = prepared(circuit.num_qubits());
            let expected = input.run_from(&circuit).unwrap();
            let actual = input.run_from(&out).unwrap();
            prop_assert!(equal_up_to_phase(&expected, &actual));
        }
    }

    #[test]
    fn transpile_preserves_width_and_input(circuit in circuit_strategy()) {
        let before = circuit.clone();
        let out = transpile(&BackendConstraints::ionq_simulator(), &circuit).unwrap();
        prop_assert_eq!(out.num_qubits(), circuit.num_qubits());
        prop_assert_eq!(circuit, before);
    }
}
