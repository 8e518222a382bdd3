//! Named hardware profiles.
//!
//! A [`BackendConstraints`] is the static description a circuit is validated
//! and transpiled against. The registry is compiled in; [`lookup`] resolves a
//! profile by key (`"ionq.simulator"`) or display name (`"IonQ Simulator"`).

use std::collections::BTreeSet;

use quantra_ir::{GateKind, GateSet, QubitId};

/// Which qubit pairs a two-qubit gate may couple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connectivity {
    /// Any pair.
    AllToAll,
    /// Only the listed undirected edges.
    Limited(BTreeSet<(u32, u32)>),
}

impl Connectivity {
    /// Build a limited coupling map, normalising each edge to `(min, max)`.
    pub fn limited(edges: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Connectivity::Limited(edges.into_iter().map(|(a, b)| (a.min(b), a.max(b))).collect())
    }

    /// Check whether `q1` and `q2` are directly coupled, in either order.
    pub fn allows(&self, q1: QubitId, q2: QubitId) -> bool {
        match self {
            Connectivity::AllToAll => true,
            Connectivity::Limited(edges) => {
                edges.contains(&(q1.0, q2.0)) || edges.contains(&(q2.0, q1.0))
            }
        }
    }
}

/// Static constraints of a named backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConstraints {
    /// Display name.
    pub name: String,
    /// Qubit limit.
    pub max_qubits: u32,
    /// Gate kinds the backend runs natively.
    pub supported_gates: GateSet,
    /// Gate-count limit, if any.
    pub max_circuit_depth: Option<usize>,
    /// Coupling map.
    pub connectivity: Connectivity,
}

impl BackendConstraints {
    /// Check whether `kind` is accepted. Directives are always accepted.
    pub fn supports(&self, kind: GateKind) -> bool {
        kind.is_directive() || self.supported_gates.contains(&kind)
    }

    /// IonQ cloud simulator: 29 qubits, all-to-all, depth 100.
    pub fn ionq_simulator() -> Self {
        Self {
            name: "IonQ Simulator".into(),
            max_qubits: 29,
            supported_gates: ionq_gates(),
            max_circuit_depth: Some(100),
            connectivity: Connectivity::AllToAll,
        }
    }

    /// IonQ trapped-ion hardware: 11 qubits, all-to-all, depth 100.
    pub fn ionq_hardware() -> Self {
        Self {
            name: "IonQ Hardware".into(),
            max_qubits: 11,
            supported_gates: ionq_gates(),
            max_circuit_depth: Some(100),
            connectivity: Connectivity::AllToAll,
        }
    }

    /// Rigetti Aspen-M-3: 79 working qubits on an octagonal lattice, CZ
    /// entangler, depth 50.
    pub fn rigetti_aspen_m3() -> Self {
        Self {
            name: "Rigetti Aspen-M-3".into(),
            max_qubits: 79,
            supported_gates: [
                GateKind::H,
                GateKind::X,
                GateKind::Y,
                GateKind::Z,
                GateKind::Rx,
                GateKind::Ry,
                GateKind::Rz,
                GateKind::Cz,
            ]
            .into_iter()
            .collect(),
            max_circuit_depth: Some(50),
            connectivity: Connectivity::limited(octagonal_lattice(2, 5, 79)),
        }
    }
}

fn ionq_gates() -> GateSet {
    [
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::H,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::Rz,
        GateKind::Cnot,
        GateKind::Swap,
    ]
    .into_iter()
    .collect()
}

/// Coupling map of `rows × cols` octagons of 8 qubits each.
///
/// Octagon `k` holds qubits `8k..8k+8` in a ring. Horizontal neighbours are
/// joined by two couplers (`1–6`, `2–5`), vertical neighbours by two more
/// (`3–0`, `4–7`). Edges touching a qubit `>= working` are dropped.
fn octagonal_lattice(rows: u32, cols: u32, working: u32) -> Vec<(u32, u32)> {
    let base = |row: u32, col: u32| 8 * (row * cols + col);
    let mut edges = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let b = base(row, col);
            edges.extend((0..8).map(|i| (b + i, b + (i + 1) % 8)));
            if col + 1 < cols {
                let r = base(row, col + 1);
                edges.push((b + 1, r + 6));
                edges.push((b + 2, r + 5));
            }
            if row + 1 < rows {
                let d = base(row + 1, col);
                edges.push((b + 3, d));
                edges.push((b + 4, d + 7));
            }
        }
    }
    edges.retain(|&(a, b)| a < working && b < working);
    edges
}

/// Registry keys and constructors of every built-in profile.
const PROFILES: [(&str, fn() -> BackendConstraints); 3] = [
    ("ionq.simulator", BackendConstraints::ionq_simulator),
    ("ionq.hardware", BackendConstraints::ionq_hardware),
    ("rigetti.aspen-m-3", BackendConstraints::rigetti_aspen_m3),
];

/// Every built-in profile, in registry order.
pub fn known_profiles() -> Vec<BackendConstraints> {
    PROFILES.iter().map(|(_, make)| make()).collect()
}

/// Registry keys of the built-in profiles.
pub fn profile_keys() -> Vec<&'static str> {
    PROFILES.iter().map(|(key, _)| *key).collect()
}

/// Find a profile by key or display name, ignoring case.
pub fn lookup(name: &str) -> Option<BackendConstraints> {
    let wanted = name.trim();
    PROFILES.iter().find_map(|(key, make)| {
        if key.eq_ignore_ascii_case(wanted) {
            return Some(make());
        }
        let profile = make();
        profile.name.eq_ignore_ascii_case(wanted).then_some(profile)
    })
}
