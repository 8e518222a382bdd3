//! Execution results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Histogram of measured bitstrings.
///
/// Bitstrings list qubit 0 first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Counts {
    counts: BTreeMap<String, usize>,
}

impl Counts {
    /// Number of times `bitstring` was observed.
    pub fn get(&self, bitstring: &str) -> usize {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of shots.
    pub fn total_shots(&self) -> usize {
        self.counts.values().sum()
    }

    /// Most frequent bitstring; ties go to the lexicographically smallest.
    pub fn most_frequent(&self) -> Option<(&str, usize)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(bits, &count)| (bits.as_str(), count))
    }

    /// Iterate over `(bitstring, count)` pairs in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(bits, &count)| (bits.as_str(), count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Per-shot measurement records from one execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Name of the backend that produced the result.
    pub backend: String,
    /// Number of shots requested.
    pub num_shots: usize,
    /// One bit vector per shot, qubit 0 first.
    pub measurements: Vec<Vec<u8>>,
}

impl ExecutionResult {
    /// Histogram of the measurements.
    pub fn counts(&self) -> Counts {
        let mut counts = BTreeMap::new();
        for shot in &self.measurements {
            let bits: String = shot.iter().map(|&b| if b == 0 { '0' } else { '1' }).collect();
            *counts.entry(bits).or_insert(0) += 1;
        }
        Counts { counts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let result = ExecutionResult {
            backend: "test".into(),
            num_shots: 4,
            measurements: vec![vec![1, 0], vec![1, 0], vec![0, 0], vec![1, 1]],
        };
        let counts = result.counts();
        assert_eq!(counts.get("10"), 2);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.total_shots(), 4);
        assert_eq!(counts.most_frequent(), Some(("10", 2)));
    }

    #[test]
    fn test_most_frequent_tie() {
        let result = ExecutionResult {
            backend: "test".into(),
            num_shots: 2,
            measurements: vec![vec![1], vec![0]],
        };
        assert_eq!(result.counts().most_frequent(), Some(("0", 1)));
    }
}
