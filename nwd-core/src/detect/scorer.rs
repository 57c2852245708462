use std::collections::HashMap;

use log::debug;

/// Returns `true` if `word` may be reported as a new word.
///
/// Single characters are never words, and a substring spanning the
/// separator only reflects a punctuation boundary.
pub fn is_candidate(word: &str, separator: char) -> bool {
	word.chars().nth(1).is_some() && !word.contains(separator)
}

/// Combines cohesion and flexibility into a word value per candidate.
///
/// For every candidate `w` of the PMI table:
/// `value[w] = pmi[w] * min(left[w], right[w])`
///
/// A side without any recorded neighbor uses `missing_value` instead,
/// so a substring always found at a line boundary scores low rather
/// than failing. Taking the minimum lets either side veto the candidate.
pub fn score(
	pmi: &HashMap<String, f64>,
	left_entropy: &HashMap<String, f64>,
	right_entropy: &HashMap<String, f64>,
	separator: char,
	missing_value: f64,
) -> HashMap<String, f64> {
	let values: HashMap<String, f64> = pmi
		.iter()
		.filter(|(word, _)| is_candidate(word, separator))
		.map(|(word, &pmi)| {
			let left = left_entropy.get(word).copied().unwrap_or(missing_value);
			let right = right_entropy.get(word).copied().unwrap_or(missing_value);
			(word.clone(), pmi * left.min(right))
		})
		.collect();

	debug!("scored {} candidates out of {} substrings", values.len(), pmi.len());
	values
}
