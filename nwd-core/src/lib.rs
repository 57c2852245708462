//! Unsupervised new word detection over raw, unsegmented text.
//!
//! This crate scores every multi-character substring of a corpus by combining:
//! - Internal cohesion (length-normalized pointwise mutual information)
//! - Contextual flexibility (entropy of the left and right neighbor characters)
//!
//! The high-level entry point is [`detect::detector::NewWordDetector`].
//! Lower-level stages are exposed for callers that want the raw tables.

/// Statistics pipeline: scanning, PMI, neighbor entropy and scoring.
pub mod detect;

/// Error type shared by all pipeline stages.
pub mod error;

/// I/O utilities (corpus loading).
pub mod io;

pub use detect::config::DetectorConfig;
pub use detect::detector::{Candidate, NewWordDetector};
pub use error::{Error, Result};
