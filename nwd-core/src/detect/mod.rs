//! Statistics pipeline for new word detection.
//!
//! Stages run strictly in order, each one reading only the tables
//! produced before it:
//! - Corpus scanning (`CorpusStats`): substring counts and neighbor maps
//! - PMI estimation (`pmi`): internal cohesion per substring
//! - Entropy estimation (`entropy`): left/right contextual flexibility
//! - Scoring (`scorer`): combined word value for candidate substrings
//!
//! `NewWordDetector` wires the stages together behind a construct-once API.

/// Pipeline configuration (`DetectorConfig`).
pub mod config;

/// Per-substring neighbor character counts.
///
/// Accumulates occurrences, merges partial scans and computes
/// the Shannon entropy of the neighbor distribution.
pub mod neighbors;

/// Corpus scanner producing substring counts and neighbor maps.
///
/// Supports sequential scanning and sharded parallel scanning
/// merged through a reduction step.
pub mod corpus_stats;

/// Per-length totals and length-normalized PMI.
pub mod pmi;

/// Left/right neighbor entropy tables.
pub mod entropy;

/// Word value computation and candidate filtering.
pub mod scorer;

/// High-level pipeline owning every table.
pub mod detector;
