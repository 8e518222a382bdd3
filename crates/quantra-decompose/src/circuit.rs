//! Splitting circuits along their multi-qubit interactions.

use quantra_hal::{HalError, HalResult};
use quantra_ir::{Circuit, Gate, QubitId};

use crate::graph::partition_by_components;

/// One independent piece of a split circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct SubCircuit {
    /// Global qubits of the piece; local qubit `i` is `qubits[i]`.
    pub qubits: Vec<QubitId>,
    /// The piece, renumbered to local qubits.
    pub circuit: Circuit,
}

/// Edges of the interaction graph: consecutive operand pairs of every
/// multi-qubit gate. Barriers do not couple qubits.
fn interaction_edges(circuit: &Circuit) -> Vec<(usize, usize)> {
    circuit
        .gates()
        .iter()
        .filter(|gate| !gate.is_directive())
        .flat_map(|gate| {
            let qubits = gate.qubits();
            qubits
                .windows(2)
                .map(|w| (w[0].index(), w[1].index()))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Split `circuit` into sub-circuits with no gate acting across them.
///
/// Pieces are ordered by their lowest global qubit and keep the relative
/// order of their gates. Idle qubits become empty single-qubit pieces. A
/// barrier is restricted to each piece it touches.
pub fn split_circuit(circuit: &Circuit) -> HalResult<Vec<SubCircuit>> {
    let num_qubits = circuit.num_qubits() as usize;
    let partitions = partition_by_components(num_qubits, &interaction_edges(circuit));

    let mut owner = vec![(0usize, 0u32); num_qubits];
    for (part, partition) in partitions.iter().enumerate() {
        for (local, &global) in partition.vertices.iter().enumerate() {
            owner[global] = (part, local as u32);
        }
    }
    let local = |q: QubitId| QubitId(owner[q.index()].1);

    let mut gates: Vec<Vec<Gate>> = vec![Vec::new(); partitions.len()];
    for gate in circuit.gates() {
        match gate {
            Gate::Barrier(qubits) => {
                let mut per_part: Vec<Vec<QubitId>> = vec![Vec::new(); partitions.len()];
                for &q in qubits {
                    per_part[owner[q.index()].0].push(local(q));
                }
                for (part, qubits) in per_part.into_iter().enumerate() {
                    if !qubits.is_empty() {
                        gates[part].push(Gate::Barrier(qubits));
                    }
                }
            }
            _ => {
                let Some(first) = gate.qubits().first().copied() else {
                    continue;
                };
                gates[owner[first.index()].0].push(gate.map_qubits(local));
            }
        }
    }

    partitions
        .into_iter()
        .zip(gates)
        .map(|(partition, gates)| -> HalResult<SubCircuit> {
            let circuit = Circuit::from_gates(partition.vertices.len() as u32, gates)?;
            Ok(SubCircuit {
                qubits: partition
                    .vertices
                    .into_iter()
                    .map(|v| QubitId(v as u32))
                    .collect(),
                circuit,
            })
        })
        .collect()
}

/// Recombine per-piece shots into full-width bit vectors.
///
/// `results[p][s]` is shot `s` of piece `p` in local qubit order. Every piece
/// must report the same number of shots.
pub fn merge_measurements(
    num_qubits: u32,
    parts: &[SubCircuit],
    results: &[Vec<Vec<u8>>],
) -> HalResult<Vec<Vec<u8>>> {
    if parts.len() != results.len() {
        return Err(HalError::operation(
            "merge_measurements",
            format!("{} pieces but {} results", parts.len(), results.len()),
        ));
    }
    let shots = results.first().map_or(0, Vec::len);
    if let Some(bad) = results.iter().position(|r| r.len() != shots) {
        return Err(HalError::operation(
            "merge_measurements",
            format!(
                "piece {bad} has {} shots, expected {shots}",
                results[bad].len()
            ),
        ));
    }

    let mut merged = vec![vec![0u8; num_qubits as usize]; shots];
    for (part, part_shots) in parts.iter().zip(results) {
        for (full, bits) in merged.iter_mut().zip(part_shots) {
            if bits.len() != part.qubits.len() {
                return Err(HalError::operation(
                    "merge_measurements",
                    format!(
                        "shot has {} bits for a {}-qubit piece",
                        bits.len(),
                        part.qubits.len()
                    ),
                ));
            }
            for (&global, &bit) in part.qubits.iter().zip(bits) {
                let slot = full.get_mut(global.index()).ok_or_else(|| {
                    HalError::operation(
                        "merge_measurements",
                        format!("{global} is outside a {num_qubits}-qubit register"),
                    )
                })?;
                *slot = bit;
            }
        }
    }
    Ok(merged)
}
