//! Splitting Ising problems along their coupling graph.

use quantra_hal::{HalError, HalResult};
use quantra_ir::IsingModel;

use crate::graph::partition_by_components;

/// One independent piece of an Ising problem.
#[derive(Debug, Clone, PartialEq)]
pub struct SubProblem {
    /// Global spin indices; local spin `i` is `spins[i]`.
    pub spins: Vec<usize>,
    /// The piece, renumbered to local spins, without the parent's offset.
    pub model: IsingModel,
}

/// Split `model` into its coupling-graph components.
pub fn split_ising(model: &IsingModel) -> HalResult<Vec<SubProblem>> {
    partition_by_components(model.num_spins(), &model.edges())
        .into_iter()
        .map(|partition| -> HalResult<SubProblem> {
            let model = model.sub_model(&partition.vertices)?;
            Ok(SubProblem {
                spins: partition.vertices,
                model,
            })
        })
        .collect()
}

/// Write each piece's spins back into a full assignment.
pub fn merge_spins(
    num_spins: usize,
    parts: &[SubProblem],
    solutions: &[Vec<i8>],
) -> HalResult<Vec<i8>> {
    if parts.len() != solutions.len() {
        return Err(HalError::operation(
            "merge_spins",
            format!("{} pieces but {} solutions", parts.len(), solutions.len()),
        ));
    }
    let mut spins = vec![1i8; num_spins];
    for (part, solution) in parts.iter().zip(solutions) {
        if solution.len() != part.spins.len() {
            return Err(HalError::operation(
                "merge_spins",
                format!(
                    "solution has {} spins for a {}-spin piece",
                    solution.len(),
                    part.spins.len()
                ),
            ));
        }
        for (&global, &spin) in part.spins.iter().zip(solution) {
            let slot = spins.get_mut(global).ok_or_else(|| {
                HalError::operation("merge_spins", format!("spin {global} out of range"))
            })?;
            *slot = spin;
        }
    }
    Ok(spins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_and_merge() {
        let model = IsingModel::new(5)
            .with_coupling(0, 3, -1.0)
            .unwrap()
            .with_coupling(1, 4, 2.0)
            .unwrap()
            .with_field(2, 0.5)
            .unwrap();
        let parts = split_ising(&model).unwrap();
        let spins: Vec<_> = parts.iter().map(|p| p.spins.clone()).collect();
        assert_eq!(spins, vec![vec![0, 3], vec![1, 4], vec![2]]);
        assert_eq!(parts[1].model.couplings().get(&(0, 1)), Some(&2.0));
        assert_eq!(parts[2].model.fields(), &[0.5]);

        let merged = merge_spins(5, &parts, &[vec![-1, 1], vec![1, -1], vec![-1]]).unwrap();
        assert_eq!(merged, vec![-1, 1, -1, 1, -1]);

        // pieces add up to the whole
        let total: f64 = parts
            .iter()
            .zip([vec![-1, 1], vec![1, -1], vec![-1]])
            .map(|(p, s)| p.model.energy(&s).unwrap())
            .sum();
        let whole = model.energy(&merged).unwrap();
        assert!((total + model.offset() - whole).abs() < 1e-12);
    }

    #[test]
    fn test_merge_rejects_mismatch() {
        let parts = split_ising(&IsingModel::new(2)).unwrap();
        assert!(merge_spins(2, &parts, &[vec![1]]).is_err());
        assert!(merge_spins(2, &parts, &[vec![1, 1], vec![1]]).is_err());
    }
}
