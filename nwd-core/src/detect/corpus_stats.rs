use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use log::debug;

use super::config::check_max_word_length;
use super::neighbors::NeighborCounts;
use crate::error::{Error, Result};

/// Below this many lines, spawning workers costs more than it saves.
const MIN_PARALLEL_LINES: usize = 1024;

/// Raw statistics accumulated over a corpus.
///
/// For every substring of length `1..max_word_length` found inside a line,
/// `CorpusStats` keeps its number of occurrences and the characters seen
/// immediately to its left and to its right.
///
/// # Responsibilities
/// - Slide windows of every length across each line
/// - Accumulate substring counts and neighbor maps
/// - Merge with another partial scan (parallel reduction)
///
/// # Invariants
/// - `max_word_length` is always >= 2, so the length-1 pass always runs
/// - Every character of a counted substring is itself counted as a unigram
/// - No window and no neighbor relation crosses a line boundary
#[derive(Clone, Debug, PartialEq)]
pub struct CorpusStats {
	/// Exclusive upper bound on substring length.
	max_word_length: usize,

	/// Occurrences of every substring, all lengths in one table.
	counts: HashMap<String, usize>,

	/// Characters preceding each substring.
	left_neighbors: HashMap<String, NeighborCounts>,

	/// Characters following each substring.
	right_neighbors: HashMap<String, NeighborCounts>,
}

impl CorpusStats {
	/// Creates empty statistics for windows of length `1..max_word_length`.
	///
	/// # Errors
	/// Returns an error if `max_word_length < 2`.
	pub fn new(max_word_length: usize) -> Result<Self> {
		check_max_word_length(max_word_length)?;
		Ok(Self {
			max_word_length,
			counts: HashMap::new(),
			left_neighbors: HashMap::new(),
			right_neighbors: HashMap::new(),
		})
	}

	/// Scans all `lines`, using at most `workers` threads.
	///
	/// # Behavior
	/// - With a single worker or a small corpus, scans inline.
	/// - Otherwise splits the lines into one contiguous chunk per worker
	///   (never more workers than lines), builds a partial `CorpusStats`
	///   per chunk on a scoped thread and merges every partial result.
	///
	/// Counting is additive, so the result is identical to a sequential
	/// scan whatever order the partial results arrive in.
	pub fn scan<S: AsRef<str> + Sync>(lines: &[S], max_word_length: usize, workers: usize) -> Result<Self> {
		let mut stats = Self::new(max_word_length)?;

		let workers = workers.min(lines.len());
		if workers <= 1 || lines.len() < MIN_PARALLEL_LINES {
			debug!("scanning {} lines sequentially", lines.len());
			for line in lines {
				stats.add_line(line.as_ref());
			}
			return Ok(stats);
		}

		let chunk_size = lines.len().div_ceil(workers);
		debug!("scanning {} lines with {workers} workers, chunks of {chunk_size}", lines.len());

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for chunk in lines.chunks(chunk_size) {
				let tx = tx.clone();
				scope.spawn(move || {
					let mut partial = CorpusStats {
						max_word_length,
						counts: HashMap::new(),
						left_neighbors: HashMap::new(),
						right_neighbors: HashMap::new(),
					};
					for line in chunk {
						partial.add_line(line.as_ref());
					}
					// `rx` is alive until every partial is merged
					let _ = tx.send(partial);
				});
			}
		});
		drop(tx);

		for partial in rx.iter() {
			stats.merge(&partial)?;
		}

		Ok(stats)
	}

	/// Adds one line of the corpus.
	///
	/// The line is trimmed, then for each length `L` a window slides over
	/// every character offset `0..=len - L`.
	///
	/// # Notes
	/// - UTF-8 safe: windows are counted in characters, not bytes.
	/// - Lines shorter than `L` contribute no window of length `L`.
	/// - Occurrences touching the start (end) of the line record no left
	///   (right) neighbor.
	pub fn add_line(&mut self, line: &str) {
		let chars: Vec<char> = line.trim().chars().collect();

		for length in 1..self.max_word_length {
			if chars.len() < length {
				// Line too short, no window of this length (or longer)
				break;
			}

			for i in 0..=chars.len() - length {
				let word: String = chars[i..i + length].iter().collect();

				if i > 0 {
					self.left_neighbors.entry(word.clone()).or_default().add(chars[i - 1]);
				}
				if i + length < chars.len() {
					self.right_neighbors.entry(word.clone()).or_default().add(chars[i + length]);
				}
				*self.counts.entry(word).or_insert(0) += 1;
			}
		}
	}

	/// Merges another partial scan into this one.
	///
	/// Counts and neighbor occurrences of matching substrings are summed.
	///
	/// # Errors
	/// Returns an error if the two scans used different window bounds.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.max_word_length != other.max_word_length {
			return Err(Error::InvalidConfig(format!(
				"cannot merge scans with max_word_length {} and {}",
				self.max_word_length, other.max_word_length
			)));
		}

		for (word, count) in &other.counts {
			*self.counts.entry(word.clone()).or_insert(0) += *count;
		}
		Self::merge_neighbors(&mut self.left_neighbors, &other.left_neighbors);
		Self::merge_neighbors(&mut self.right_neighbors, &other.right_neighbors);

		Ok(())
	}

	fn merge_neighbors(into: &mut HashMap<String, NeighborCounts>, from: &HashMap<String, NeighborCounts>) {
		for (word, neighbors) in from {
			if let Some(existing) = into.get_mut(word) {
				existing.merge(neighbors);
			} else {
				into.insert(word.clone(), neighbors.clone());
			}
		}
	}

	/// Exclusive upper bound on substring length.
	pub fn max_word_length(&self) -> usize {
		self.max_word_length
	}

	/// Occurrences of `word` in the corpus (0 if never seen).
	pub fn count(&self, word: &str) -> usize {
		self.counts.get(word).copied().unwrap_or(0)
	}

	/// Global count table, every length included.
	pub fn counts(&self) -> &HashMap<String, usize> {
		&self.counts
	}

	/// Left neighbor map of every substring seen with a left neighbor.
	pub fn left_neighbors(&self) -> &HashMap<String, NeighborCounts> {
		&self.left_neighbors
	}

	/// Right neighbor map of every substring seen with a right neighbor.
	pub fn right_neighbors(&self) -> &HashMap<String, NeighborCounts> {
		&self.right_neighbors
	}

	/// Number of distinct substrings counted.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scan(lines: &[&str], max_word_length: usize) -> CorpusStats {
		let mut stats = CorpusStats::new(max_word_length).unwrap();
		lines.iter().for_each(|line| stats.add_line(line));
		stats
	}

	#[test]
	fn rejects_max_word_length_below_two() {
		assert!(matches!(CorpusStats::new(1), Err(Error::InvalidConfig(_))));
		assert!(CorpusStats::new(2).is_ok());
	}

	#[test]
	fn counts_repeated_line() {
		let stats = scan(&["abcabc"], 3);

		assert_eq!(stats.count("a"), 2);
		assert_eq!(stats.count("b"), 2);
		assert_eq!(stats.count("c"), 2);
		assert_eq!(stats.count("ab"), 2);
		assert_eq!(stats.count("bc"), 2);
		assert_eq!(stats.count("ca"), 1);
		assert_eq!(stats.count("abc"), 0);
		assert_eq!(stats.len(), 6);
	}

	#[test]
	fn records_neighbors_inside_line_only() {
		let stats = scan(&["abcabc"], 3);

		let left_bc = &stats.left_neighbors()["bc"];
		assert_eq!(left_bc.get('a'), 2);
		assert_eq!(left_bc.distinct(), 1);

		let right_ab = &stats.right_neighbors()["ab"];
		assert_eq!(right_ab.get('c'), 2);
		assert_eq!(right_ab.distinct(), 1);

		// "ab" starts the line once: one left neighbor only
		assert_eq!(stats.left_neighbors()["ab"].total(), 1);
		// "bc" ends the line once: one right neighbor only
		assert_eq!(stats.right_neighbors()["bc"].total(), 1);
	}

	#[test]
	fn lines_do_not_leak_into_each_other() {
		let stats = scan(&["ab", "cd"], 3);

		assert_eq!(stats.count("bc"), 0);
		assert!(!stats.right_neighbors().contains_key("b"));
		assert!(!stats.left_neighbors().contains_key("c"));
	}

	#[test]
	fn short_and_empty_lines_contribute_nothing_extra() {
		let stats = scan(&["", "   ", "x"], 5);

		assert_eq!(stats.len(), 1);
		assert_eq!(stats.count("x"), 1);
		assert!(stats.left_neighbors().is_empty());
		assert!(stats.right_neighbors().is_empty());
	}

	#[test]
	fn counts_characters_not_bytes() {
		let stats = scan(&["新词新词"], 3);

		assert_eq!(stats.count("新"), 2);
		assert_eq!(stats.count("新词"), 2);
		assert_eq!(stats.count("词新"), 1);
		assert_eq!(stats.right_neighbors()["新词"].get('新'), 1);
	}

	#[test]
	fn line_is_trimmed_before_scanning() {
		let stats = scan(&["  ab \t"], 3);

		assert_eq!(stats.count(" "), 0);
		assert_eq!(stats.count("ab"), 1);
		assert!(!stats.left_neighbors().contains_key("ab"));
	}

	#[test]
	fn merge_equals_single_scan() {
		let mut merged = scan(&["abcabc"], 4);
		merged.merge(&scan(&["bcd", "dab"], 4)).unwrap();

		assert_eq!(merged, scan(&["abcabc", "bcd", "dab"], 4));
	}

	#[test]
	fn merge_rejects_different_bounds() {
		let mut stats = scan(&["ab"], 3);
		assert!(stats.merge(&scan(&["ab"], 4)).is_err());
	}

	#[test]
	fn parallel_scan_matches_sequential() {
		let lines: Vec<String> = (0..3000)
			.map(|i| format!("新词{}发现，信息{}熵", i % 17, i % 5))
			.collect();

		let sequential = CorpusStats::scan(&lines, 5, 1).unwrap();
		let parallel = CorpusStats::scan(&lines, 5, 4).unwrap();
		assert_eq!(sequential, parallel);
	}

	#[test]
	fn oversized_worker_count_is_clamped_to_lines() {
		let lines: Vec<&str> = (0..1200).map(|i| if i % 2 == 0 { "新词发现" } else { "发现新词" }).collect();

		let sequential = CorpusStats::scan(&lines, 5, 1).unwrap();
		assert_eq!(CorpusStats::scan(&lines, 5, usize::MAX / 8 + 1).unwrap(), sequential);
		assert_eq!(CorpusStats::scan(&lines, 5, usize::MAX).unwrap(), sequential);
		assert_eq!(sequential.count("新词"), 1200);
	}
}
