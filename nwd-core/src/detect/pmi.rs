use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::error::{Error, Result};

/// Sum of substring counts per substring length.
///
/// Denominator of the empirical probability of a substring
/// within its own length class.
///
/// # Invariants
/// - `total(L) == Σ count[w]` over every `w` of `L` characters
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LengthTotals {
	totals: BTreeMap<usize, usize>,
}

impl LengthTotals {
	/// Sums the global count table by substring length (in characters).
	pub fn from_counts(counts: &HashMap<String, usize>) -> Self {
		let mut totals = BTreeMap::new();
		for (word, count) in counts {
			*totals.entry(word.chars().count()).or_insert(0) += *count;
		}
		Self { totals }
	}

	/// Total count of substrings of `length` characters (0 if none).
	pub fn total(&self, length: usize) -> usize {
		self.totals.get(&length).copied().unwrap_or(0)
	}

	/// Iterates over `(length, total)` in increasing length.
	pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.totals.iter().map(|(l, t)| (*l, *t))
	}
}

/// Computes the length-normalized PMI of every counted substring.
///
/// For a substring `w` of `n` characters:
/// - `p_word = count[w] / total[n]`
/// - `p_chars = Π count[c] / total[1]` over the characters of `w`
/// - `pmi[w] = log10(p_word / p_chars) / n`
///
/// Single characters get exactly `0.0`, since `p_word == p_chars`.
///
/// # Errors
/// Returns `Error::MissingUnigram` if a character of some substring has no
/// unigram count. This only happens when the length-1 pass was skipped.
pub fn compute_pmi(counts: &HashMap<String, usize>, totals: &LengthTotals) -> Result<HashMap<String, f64>> {
	let unigram_total = totals.total(1) as f64;
	let mut pmi = HashMap::with_capacity(counts.len());

	for (word, &count) in counts {
		let length = word.chars().count();
		let p_word = count as f64 / totals.total(length) as f64;

		let mut p_chars = 1.0;
		for c in word.chars() {
			let unigram = unigram_count(counts, c)?;
			p_chars *= unigram as f64 / unigram_total;
		}

		pmi.insert(word.clone(), (p_word / p_chars).log10() / length as f64);
	}

	debug!("computed PMI for {} substrings", pmi.len());
	Ok(pmi)
}

fn unigram_count(counts: &HashMap<String, usize>, c: char) -> Result<usize> {
	let mut buf = [0u8; 4];
	match counts.get(&*c.encode_utf8(&mut buf)) {
		Some(&count) if count > 0 => Ok(count),
		_ => Err(Error::MissingUnigram(c)),
	}
}
