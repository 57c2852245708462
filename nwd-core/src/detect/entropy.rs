use std::collections::HashMap;

use super::neighbors::NeighborCounts;

/// Computes the neighbor entropy of every substring of one side.
///
/// Applied once to the left neighbor maps and once to the right ones.
/// Substrings without any recorded neighbor get no entry: the scorer
/// substitutes its own default for them.
pub fn compute_entropy(neighbors: &HashMap<String, NeighborCounts>) -> HashMap<String, f64> {
	neighbors
		.iter()
		.filter_map(|(word, counts)| counts.entropy().map(|entropy| (word.clone(), entropy)))
		.collect()
}
