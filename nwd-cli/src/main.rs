use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use nwd_core::{Candidate, DetectorConfig, NewWordDetector};

#[derive(Parser)]
#[command(name = "nwd")]
#[command(about = "Discover new words in raw text from PMI and neighbor entropy")]
struct Cli {
	/// Corpus file, one sentence per line (UTF-8)
	corpus: PathBuf,

	/// Exclusive upper bound on candidate length
	#[arg(short, long, default_value_t = 5)]
	max_word_length: usize,

	/// Number of candidates reported per length
	#[arg(short, long, default_value_t = 10)]
	top: usize,

	/// Candidates containing this character are ignored
	#[arg(short, long, default_value_t = '，')]
	separator: char,

	/// Scanning threads (0 = one per CPU)
	#[arg(long, default_value_t = 0)]
	threads: usize,

	/// Print candidates and their signals as JSON
	#[arg(long)]
	json: bool,
}

fn main() -> Result<()> {
	env_logger::init();
	let cli = Cli::parse();

	let mut config = DetectorConfig::default();
	config.set_max_word_length(cli.max_word_length)?;
	config.separator = cli.separator;
	config.threads = cli.threads;
	debug!("running with {config:?}");

	let detector = NewWordDetector::from_path(&cli.corpus, config)
		.with_context(|| format!("Failed to detect new words in {}", cli.corpus.display()))?;

	// Best candidates for each length, shortest first
	let report: BTreeMap<usize, Vec<Candidate>> = detector
		.candidate_lengths()
		.map(|length| (length, detector.top_k(length, cli.top)))
		.collect();

	if cli.json {
		println!("{}", serde_json::to_string_pretty(&report)?);
		return Ok(());
	}

	for (length, candidates) in &report {
		let words: Vec<&str> = candidates.iter().map(|c| c.word.as_str()).collect();
		println!("{length}: {}", words.join(" "));
	}

	Ok(())
}
