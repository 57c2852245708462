use std::collections::BTreeMap;

/// Characters observed immediately next to a substring, on one side.
///
/// Conceptually, this is the outgoing edge set of a substring in a
/// character adjacency graph, each edge weighted by its number of
/// observations.
///
/// ## Responsibilities:
/// - Accumulate neighbor occurrences during scanning
/// - Merge with the counts of another partial scan
/// - Compute the Shannon entropy of the neighbor distribution
///
/// ## Invariants
/// - Each stored count is strictly positive
/// - Neighbors are kept ordered, so entropy sums in a fixed order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NeighborCounts {
	/// Occurrences indexed by neighbor character.
	/// Example: { '的' => 42, '了' => 3 }
	counts: BTreeMap<char, usize>,
}

impl NeighborCounts {
	/// Creates an empty neighbor map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `neighbor`.
	pub fn add(&mut self, neighbor: char) {
		*self.counts.entry(neighbor).or_insert(0) += 1;
	}

	/// Number of times `neighbor` was observed.
	pub fn get(&self, neighbor: char) -> usize {
		self.counts.get(&neighbor).copied().unwrap_or(0)
	}

	/// Number of distinct neighbor characters.
	pub fn distinct(&self) -> usize {
		self.counts.len()
	}

	/// Total number of recorded occurrences.
	pub fn total(&self) -> usize {
		self.counts.values().sum()
	}

	/// Base-10 Shannon entropy `-Σ p log10 p` of the neighbor distribution.
	///
	/// Returns `None` when no neighbor was recorded.
	/// A single distinct neighbor gives exactly `0.0`, `k` equally
	/// frequent neighbors give `log10(k)`.
	pub fn entropy(&self) -> Option<f64> {
		if self.counts.is_empty() {
			return None;
		}
		if self.counts.len() == 1 {
			return Some(0.0);
		}

		let total = self.total() as f64;
		let entropy: f64 = self
			.counts
			.values()
			.map(|&count| {
				let p = count as f64 / total;
				-p * p.log10()
			})
			.sum();

		// Rounding can leave a value like -0.0 or -1e-17
		Some(entropy.max(0.0))
	}

	/// Merges the counts of another partial scan into this one.
	pub fn merge(&mut self, other: &Self) {
		for (neighbor, count) in &other.counts {
			*self.counts.entry(*neighbor).or_insert(0) += *count;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn from_chars(chars: &str) -> NeighborCounts {
		let mut counts = NeighborCounts::new();
		chars.chars().for_each(|c| counts.add(c));
		counts
	}

	#[test]
	fn empty_map_has_no_entropy() {
		assert_eq!(NeighborCounts::new().entropy(), None);
	}

	#[test]
	fn single_neighbor_has_zero_entropy() {
		assert_eq!(from_chars("aaaa").entropy(), Some(0.0));
	}

	#[test]
	fn uniform_neighbors_reach_log10_k() {
		let entropy = from_chars("abcdabcd").entropy().unwrap();
		assert!((entropy - 4f64.log10()).abs() < 1e-12);

		let entropy = from_chars("xy").entropy().unwrap();
		assert!((entropy - 2f64.log10()).abs() < 1e-12);
	}

	#[test]
	fn skewed_neighbors_stay_below_uniform() {
		let entropy = from_chars("aaab").entropy().unwrap();
		assert!(entropy > 0.0);
		assert!(entropy < 2f64.log10());
	}

	#[test]
	fn merge_sums_counts() {
		let mut left = from_chars("aab");
		left.merge(&from_chars("bc"));

		assert_eq!(left.get('a'), 2);
		assert_eq!(left.get('b'), 2);
		assert_eq!(left.get('c'), 1);
		assert_eq!(left.get('z'), 0);
		assert_eq!(left.distinct(), 3);
		assert_eq!(left.total(), 5);
	}
}
