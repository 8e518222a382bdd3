//! Gate legalization pass.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use tracing::{debug, warn};

use quantra_hal::BackendConstraints;
use quantra_ir::{Circuit, Gate, QubitId};

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{LegalizationStats, PropertySet};
use crate::transpile::needs_transpilation;

/// Bound on nested rewrites. CNOT and CZ rewrite into each other, so a target
/// supporting neither would otherwise recurse forever.
const MAX_REWRITE_DEPTH: usize = 6;

/// Rewrites every gate the target does not support into an equivalent
/// sequence (up to global phase), preserving gate order.
///
/// Phase gates, CZ and CCX always rewrite. CNOT, SWAP, H, the Paulis and RZZ
/// rewrite only when the result is fully supported by the target; otherwise
/// they are left for the constraint check to report.
pub struct GateLegalization;

impl Pass for GateLegalization {
    fn name(&self) -> &'static str {
        "gate_legalization"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &Circuit, properties: &mut PropertySet) -> CompileResult<Circuit> {
        let target = properties
            .target
            .as_ref()
            .ok_or_else(|| CompileError::MissingTarget(self.name().to_string()))?;

        let mut stats = LegalizationStats::default();
        let mut gates = Vec::with_capacity(circuit.gate_count());
        for gate in circuit.gates() {
            if target.supports(gate.kind()) {
                gates.push(gate.clone());
                continue;
            }
            let replacement = legalize_gate(gate, target);
            if replacement.len() == 1 && replacement[0] == *gate {
                warn!("No legal rewrite of {} for '{}'", gate, target.name);
            } else if replacement.iter().all(|g| target.supports(g.kind())) {
                debug!("Rewrote {} into {} gates", gate, replacement.len());
                stats.decomposed += 1;
                stats.emitted += replacement.len();
            } else {
                warn!(
                    "Rewrote {} into {} gates, some still unsupported by '{}'",
                    gate,
                    replacement.len(),
                    target.name
                );
                stats.partial += 1;
                stats.emitted += replacement.len();
            }
            gates.extend(replacement);
        }

        properties.insert(stats);
        Ok(Circuit::from_gates(circuit.num_qubits(), gates)?)
    }

    fn should_run(&self, circuit: &Circuit, properties: &PropertySet) -> bool {
        properties
            .target
            .as_ref()
            .is_some_and(|target| needs_transpilation(target, circuit))
    }
}

/// Legalize one gate for `target`.
///
/// Returns the gate itself when it is already supported or no rewrite applies.
pub fn legalize_gate(gate: &Gate, target: &BackendConstraints) -> Vec<Gate> {
    let mut out = Vec::new();
    legalize_into(gate, target, 0, &mut out);
    out
}

fn legalize_into(gate: &Gate, target: &BackendConstraints, depth: usize, out: &mut Vec<Gate>) {
    if target.supports(gate.kind()) || depth >= MAX_REWRITE_DEPTH {
        out.push(gate.clone());
        return;
    }

    if let Some(replacement) = required_rewrite(gate) {
        for g in &replacement {
            legalize_into(g, target, depth + 1, out);
        }
        return;
    }

    if let Some(replacement) = optional_rewrite(gate) {
        let mut candidate = Vec::new();
        for g in &replacement {
            legalize_into(g, target, depth + 1, &mut candidate);
        }
        if candidate.iter().all(|g| target.supports(g.kind())) {
            out.extend(candidate);
            return;
        }
    }

    out.push(gate.clone());
}

/// Rewrites applied whenever the input gate is unsupported.
fn required_rewrite(gate: &Gate) -> Option<Vec<Gate>> {
    let rewritten = match *gate {
        Gate::S(q) => vec![rz(q, FRAC_PI_2)],
        Gate::Sdg(q) => vec![rz(q, -FRAC_PI_2)],
        Gate::T(q) => vec![rz(q, FRAC_PI_4)],
        Gate::Tdg(q) => vec![rz(q, -FRAC_PI_4)],
        Gate::Cz { control, target } => vec![
            Gate::H(target),
            Gate::Cnot { control, target },
            Gate::H(target),
        ],
        Gate::Ccx {
            control1,
            control2,
            target,
        } => toffoli_ladder(control1, control2, target),
        _ => return None,
    };
    Some(rewritten)
}

/// Rewrites applied only if their output legalizes completely.
fn optional_rewrite(gate: &Gate) -> Option<Vec<Gate>> {
    let rewritten = match *gate {
        Gate::Cnot { control, target } => vec![
            Gate::H(target),
            Gate::Cz { control, target },
            Gate::H(target),
        ],
        Gate::Swap(a, b) => vec![cnot(a, b), cnot(b, a), cnot(a, b)],
        Gate::H(q) => vec![rz(q, FRAC_PI_2), rx(q, FRAC_PI_2), rz(q, FRAC_PI_2)],
        Gate::X(q) => vec![rx(q, PI)],
        Gate::Y(q) => vec![Gate::Ry { qubit: q, theta: PI }],
        Gate::Z(q) => vec![rz(q, PI)],
        Gate::Rzz(a, b, theta) => vec![cnot(a, b), rz(b, theta), cnot(a, b)],
        _ => return None,
    };
    Some(rewritten)
}

/// Six-CNOT Toffoli decomposition with T/TDG phases.
fn toffoli_ladder(a: QubitId, b: QubitId, c: QubitId) -> Vec<Gate> {
    vec![
        Gate::H(c),
        cnot(b, c),
        Gate::Tdg(c),
        cnot(a, c),
        Gate::T(c),
        cnot(b, c),
        Gate::Tdg(c),
        cnot(a, c),
        Gate::T(b),
        Gate::T(c),
        Gate::H(c),
        cnot(a, b),
        Gate::T(a),
        Gate::Tdg(b),
        cnot(a, b),
    ]
}

fn cnot(control: QubitId, target: QubitId) -> Gate {
    Gate::Cnot { control, target }
}

fn rz(qubit: QubitId, theta: f64) -> Gate {
    Gate::Rz { qubit, theta }
}

fn rx(qubit: QubitId, theta: f64) -> Gate {
    Gate::Rx { qubit, theta }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantra_ir::GateKind;

    fn q(i: u32) -> QubitId {
        QubitId(i)
    }

    #[test]
    fn test_phase_gates_become_rz() {
        let ionq = BackendConstraints::ionq_simulator();
        assert_eq!(legalize_gate(&Gate::S(q(0)), &ionq), vec![rz(q(0), FRAC_PI_2)]);
        assert_eq!(legalize_gate(&Gate::Sdg(q(0)), &ionq), vec![rz(q(0), -FRAC_PI_2)]);
        assert_eq!(legalize_gate(&Gate::T(q(1)), &ionq), vec![rz(q(1), FRAC_PI_4)]);
        assert_eq!(legalize_gate(&Gate::Tdg(q(1)), &ionq), vec![rz(q(1), -FRAC_PI_4)]);
    }

    #[test]
    fn test_cz_on_cnot_target() {
        let ionq = BackendConstraints::ionq_simulator();
        let cz = Gate::Cz {
            control: q(0),
            target: q(1),
        };
        assert_eq!(
            legalize_gate(&cz, &ionq),
            vec![Gate::H(q(1)), cnot(q(0), q(1)), Gate::H(q(1))]
        );
    }

    #[test]
    fn test_toffoli_on_ionq() {
        let ionq = BackendConstraints::ionq_simulator();
        let ccx = Gate::Ccx {
            control1: q(0),
            control2: q(1),
            target: q(2),
        };
        let out = legalize_gate(&ccx, &ionq);
        assert_eq!(out.len(), 15);
        assert_eq!(out.iter().filter(|g| g.kind() == GateKind::Cnot).count(), 6);
        assert!(out.iter().all(|g| ionq.supports(g.kind())));
    }

    #[test]
    fn test_toffoli_on_cz_target() {
        let rigetti = BackendConstraints::rigetti_aspen_m3();
        let ccx = Gate::Ccx {
            control1: q(0),
            control2: q(1),
            target: q(2),
        };
        let out = legalize_gate(&ccx, &rigetti);
        assert!(out.iter().all(|g| rigetti.supports(g.kind())));
        assert_eq!(out.iter().filter(|g| g.kind() == GateKind::Cz).count(), 6);
    }

    #[test]
    fn test_optional_rewrite_only_when_fully_legal() {
        let mut target = BackendConstraints::ionq_hardware();
        target.supported_gates = [GateKind::Rx, GateKind::Rz].into_iter().collect();

        // H has a complete rewrite
        assert_eq!(legalize_gate(&Gate::H(q(0)), &target).len(), 3);
        // CNOT needs CZ, which needs CNOT again: left alone
        assert_eq!(legalize_gate(&cnot(q(0), q(1)), &target), vec![cnot(q(0), q(1))]);
    }

    #[test]
    fn test_supported_gate_unchanged() {
        let ionq = BackendConstraints::ionq_simulator();
        let swap = Gate::Swap(q(0), q(1));
        assert_eq!(legalize_gate(&swap, &ionq), vec![swap]);
        assert_eq!(legalize_gate(&Gate::Measure(q(0)), &ionq), vec![Gate::Measure(q(0))]);
    }

    #[test]
    fn test_partial_rewrite_not_counted_as_decomposed() {
        let mut target = BackendConstraints::ionq_hardware();
        target.supported_gates = [GateKind::H, GateKind::Rz].into_iter().collect();
        let circuit = Circuit::empty(3)
            .ccx(q(0), q(1), q(2))
            .unwrap()
            .t(q(0))
            .unwrap();
        let mut properties = PropertySet::new().with_target(target);

        let out = GateLegalization.run(&circuit, &mut properties).unwrap();
        assert_eq!(out.gate_count(), 16);
        assert_eq!(
            properties.get::<LegalizationStats>(),
            Some(&LegalizationStats {
                decomposed: 1,
                partial: 1,
                emitted: 16,
            })
        );
    }

    #[test]
    fn test_skipped_when_circuit_already_legal() {
        let properties = PropertySet::new().with_target(BackendConstraints::ionq_simulator());
        assert!(!GateLegalization.should_run(&Circuit::bell().unwrap(), &properties));
        let with_t = Circuit::bell().unwrap().t(QubitId(0)).unwrap();
        assert!(GateLegalization.should_run(&with_t, &properties));
    }

    #[test]
    fn test_missing_target() {
        let result = GateLegalization.run(&Circuit::empty(1), &mut PropertySet::new());
        assert!(matches!(result, Err(CompileError::MissingTarget(_))));
    }
}
