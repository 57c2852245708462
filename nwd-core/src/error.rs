use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a corpus or running the pipeline.
///
/// Every variant is fatal: the pipeline is a single batch computation
/// and never retries.
#[derive(Debug, Error)]
pub enum Error {
	/// The corpus could not be opened or read.
	#[error("cannot read corpus {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The corpus is not valid UTF-8.
	#[error("corpus {path} is not valid UTF-8 (first invalid byte at offset {offset})")]
	Decode { path: PathBuf, offset: usize },

	/// Rejected configuration (ex. `max_word_length < 2`).
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// A character of a longer substring has no unigram count.
	///
	/// Only reachable if the length-1 pass was skipped, which is a
	/// precondition violation rather than a data problem.
	#[error("no unigram count for character {0:?}")]
	MissingUnigram(char),
}

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
