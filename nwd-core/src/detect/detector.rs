use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use super::config::DetectorConfig;
use super::corpus_stats::CorpusStats;
use super::entropy::compute_entropy;
use super::pmi::{LengthTotals, compute_pmi};
use super::scorer::score;
use crate::error::Result;
use crate::io;

/// A scored new word candidate, with the signals behind its value.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Candidate {
	pub word: String,
	/// Length in characters.
	pub length: usize,
	pub value: f64,
	pub pmi: f64,
	pub left_entropy: Option<f64>,
	pub right_entropy: Option<f64>,
}

/// High-level new word detector.
///
/// Runs the whole pipeline once at construction and then exposes every
/// intermediate table read-only.
///
/// # Responsibilities
/// - Scan the corpus into substring counts and neighbor maps
/// - Derive per-length totals, PMI and left/right neighbor entropy
/// - Score candidates and rank them deterministically
///
/// # Invariants
/// - Tables are never mutated after construction
/// - `word_values` only holds substrings of 2+ characters without the separator
#[derive(Debug)]
pub struct NewWordDetector {
	config: DetectorConfig,
	stats: CorpusStats,
	totals: LengthTotals,
	pmi: HashMap<String, f64>,
	left_entropy: HashMap<String, f64>,
	right_entropy: HashMap<String, f64>,
	word_values: HashMap<String, f64>,
}

impl NewWordDetector {
	/// Loads a corpus file (one record per line) and runs the pipeline.
	///
	/// # Errors
	/// - Returns an error if the configuration is invalid.
	/// - Returns an error if the file cannot be read or is not UTF-8.
	pub fn from_path<P: AsRef<Path>>(filepath: P, config: DetectorConfig) -> Result<Self> {
		config.validate()?;
		let lines = io::read_corpus(&filepath)?;
		info!("loaded {} lines from {}", lines.len(), filepath.as_ref().display());
		Self::from_lines(lines.as_slice(), config)
	}

	/// Runs the pipeline over in-memory lines.
	///
	/// # Errors
	/// Returns an error if the configuration is invalid.
	pub fn from_lines<S: AsRef<str> + Sync>(lines: &[S], config: DetectorConfig) -> Result<Self> {
		config.validate()?;

		let stats = CorpusStats::scan(lines, config.max_word_length(), config.worker_count())?;
		if stats.is_empty() {
			warn!("corpus has no characters, no candidate will be produced");
		}
		info!("counted {} distinct substrings", stats.len());

		let totals = LengthTotals::from_counts(stats.counts());
		let pmi = compute_pmi(stats.counts(), &totals)?;
		let left_entropy = compute_entropy(stats.left_neighbors());
		let right_entropy = compute_entropy(stats.right_neighbors());
		let word_values = score(&pmi, &left_entropy, &right_entropy, config.separator, config.missing_value());
		info!("scored {} candidates", word_values.len());

		Ok(Self { config, stats, totals, pmi, left_entropy, right_entropy, word_values })
	}

	pub fn config(&self) -> &DetectorConfig {
		&self.config
	}

	/// Raw scan results (counts and neighbor maps).
	pub fn stats(&self) -> &CorpusStats {
		&self.stats
	}

	/// Per-length count totals.
	pub fn totals(&self) -> &LengthTotals {
		&self.totals
	}

	/// PMI of every counted substring, single characters included.
	pub fn pmi(&self) -> &HashMap<String, f64> {
		&self.pmi
	}

	pub fn left_entropy(&self) -> &HashMap<String, f64> {
		&self.left_entropy
	}

	pub fn right_entropy(&self) -> &HashMap<String, f64> {
		&self.right_entropy
	}

	/// Final word value of every candidate.
	pub fn word_values(&self) -> &HashMap<String, f64> {
		&self.word_values
	}

	/// Word value of `word`, if it is a scored candidate.
	pub fn word_value(&self, word: &str) -> Option<f64> {
		self.word_values.get(word).copied()
	}

	/// Returns every candidate, best first.
	///
	/// Equal values are ordered by substring, so the ranking does not
	/// depend on hash map iteration order.
	pub fn ranked(&self) -> Vec<Candidate> {
		let mut scored: Vec<(&String, f64)> = self.word_values.iter().map(|(w, v)| (w, *v)).collect();
		scored.sort_by(|a, b| match b.1.total_cmp(&a.1) {
			Ordering::Equal => a.0.cmp(b.0),
			ordering => ordering,
		});

		scored.into_iter().map(|(word, value)| self.candidate(word, value)).collect()
	}

	/// Returns the `k` best candidates of exactly `length` characters.
	pub fn top_k(&self, length: usize, k: usize) -> Vec<Candidate> {
		self.ranked()
			.into_iter()
			.filter(|candidate| candidate.length == length)
			.take(k)
			.collect()
	}

	/// Candidate lengths that can appear in the ranking.
	pub fn candidate_lengths(&self) -> std::ops::Range<usize> {
		2..self.config.max_word_length()
	}

	fn candidate(&self, word: &str, value: f64) -> Candidate {
		Candidate {
			word: word.to_owned(),
			length: word.chars().count(),
			value,
			pmi: self.pmi.get(word).copied().unwrap_or(self.config.missing_value()),
			left_entropy: self.left_entropy.get(word).copied(),
			right_entropy: self.right_entropy.get(word).copied(),
		}
	}
}
