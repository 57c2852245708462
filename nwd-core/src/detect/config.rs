use std::ops::Range;

use crate::error::{Error, Result};

/// Default exclusive upper bound on n-gram length (windows 1..=4).
pub const DEFAULT_MAX_WORD_LENGTH: usize = 5;

/// Default separator excluded from candidates (full-width comma).
pub const DEFAULT_SEPARATOR: char = '，';

/// Default value used when a substring has no PMI or entropy entry.
pub const DEFAULT_MISSING_VALUE: f64 = 1e-3;

/// Fails unless windows of at least two characters will be scanned.
pub(crate) fn check_max_word_length(max_word_length: usize) -> Result<()> {
	if max_word_length < 2 {
		return Err(Error::InvalidConfig(format!(
			"max_word_length must be >= 2, got {max_word_length}"
		)));
	}
	Ok(())
}

/// Configuration of a detection run.
///
/// Fixed at construction of a `NewWordDetector`.
///
/// # Invariants
/// - `max_word_length >= 2`, so that multi-character windows exist
/// - `missing_value` is finite and strictly positive
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorConfig {
	/// Exclusive upper bound on n-gram length.
	max_word_length: usize,

	/// Substrings containing this character are never scored.
	pub separator: char,

	/// Fallback for absent PMI/entropy entries.
	missing_value: f64,

	/// Scanning workers. `0` uses one per logical CPU, `1` scans sequentially.
	pub threads: usize,
}

impl Default for DetectorConfig {
	fn default() -> Self {
		Self {
			max_word_length: DEFAULT_MAX_WORD_LENGTH,
			separator: DEFAULT_SEPARATOR,
			missing_value: DEFAULT_MISSING_VALUE,
			threads: 0,
		}
	}
}

impl DetectorConfig {
	/// Returns the exclusive upper bound on n-gram length.
	pub fn max_word_length(&self) -> usize {
		self.max_word_length
	}

	/// Returns the fallback used for absent PMI/entropy entries.
	pub fn missing_value(&self) -> f64 {
		self.missing_value
	}

	/// Sets the exclusive upper bound on n-gram length.
	///
	/// # Errors
	/// Returns an error if `max_word_length < 2`.
	pub fn set_max_word_length(&mut self, max_word_length: usize) -> Result<()> {
		check_max_word_length(max_word_length)?;
		self.max_word_length = max_word_length;
		Ok(())
	}

	/// Sets the fallback used for absent PMI/entropy entries.
	///
	/// # Errors
	/// Returns an error if the value is not finite and strictly positive.
	pub fn set_missing_value(&mut self, missing_value: f64) -> Result<()> {
		Self::check_missing_value(missing_value)?;
		self.missing_value = missing_value;
		Ok(())
	}

	/// Checks every invariant.
	///
	/// `separator` and `threads` need no check.
	pub fn validate(&self) -> Result<()> {
		check_max_word_length(self.max_word_length)?;
		Self::check_missing_value(self.missing_value)
	}

	/// Window lengths scanned over each line.
	pub fn window_lengths(&self) -> Range<usize> {
		1..self.max_word_length
	}

	/// Resolved number of scanning workers (always >= 1).
	pub fn worker_count(&self) -> usize {
		if self.threads == 0 { num_cpus::get().max(1) } else { self.threads }
	}

	fn check_missing_value(missing_value: f64) -> Result<()> {
		if !missing_value.is_finite() || missing_value <= 0.0 {
			return Err(Error::InvalidConfig(format!(
				"missing_value must be finite and > 0, got {missing_value}"
			)));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_scans_lengths_one_to_four() {
		let config = DetectorConfig::default();
		assert_eq!(config.window_lengths(), 1..5);
		assert_eq!(config.separator, '，');
		assert!(config.validate().is_ok());
	}

	#[test]
	fn rejects_short_max_word_length() {
		let mut config = DetectorConfig::default();
		assert!(matches!(config.set_max_word_length(1), Err(Error::InvalidConfig(_))));
		assert!(config.set_max_word_length(0).is_err());
		assert_eq!(config.max_word_length(), DEFAULT_MAX_WORD_LENGTH);
		assert!(config.set_max_word_length(2).is_ok());
	}

	#[test]
	fn rejects_non_positive_missing_value() {
		let mut config = DetectorConfig::default();
		assert!(config.set_missing_value(0.0).is_err());
		assert!(config.set_missing_value(-1.0).is_err());
		assert!(config.set_missing_value(f64::NAN).is_err());
		assert!(config.set_missing_value(0.5).is_ok());
		assert_eq!(config.missing_value(), 0.5);
	}

	#[test]
	fn explicit_threads_are_kept() {
		let config = DetectorConfig { threads: 3, ..DetectorConfig::default() };
		assert_eq!(config.worker_count(), 3);
		assert!(DetectorConfig::default().worker_count() >= 1);
	}
}
