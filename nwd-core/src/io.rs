use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// Reads a UTF-8 corpus file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n`, `\r\n` and a lone `\r`
/// - A trailing line terminator does not produce an empty last line
///
/// # Errors
/// - `Error::Io` if the file cannot be opened or read
/// - `Error::Decode` if the content is not valid UTF-8
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let path = filename.as_ref();
	let io_error = |source| Error::Io { path: path.to_path_buf(), source };

	let mut bytes = Vec::new();
	File::open(path)
		.map_err(io_error)?
		.read_to_end(&mut bytes)
		.map_err(io_error)?;

	let contents = String::from_utf8(bytes).map_err(|e| Error::Decode {
		path: path.to_path_buf(),
		offset: e.utf8_error().valid_up_to(),
	})?;

	let lines = split_lines(&contents);
	debug!("read {} lines from {}", lines.len(), path.display());
	Ok(lines)
}

fn split_lines(contents: &str) -> Vec<String> {
	let is_break = |c: char| c == '\n' || c == '\r';
	let contents = contents.replace("\r\n", "\n");

	let mut lines: Vec<String> = contents.split(is_break).map(str::to_owned).collect();
	if contents.is_empty() || contents.ends_with(is_break) {
		lines.pop();
	}
	lines
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn reads_lines_with_mixed_endings() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "新词发现\r\n信息熵\n\n互信息").unwrap();

		let lines = read_corpus(file.path()).unwrap();
		assert_eq!(lines, vec!["新词发现", "信息熵", "", "互信息"]);
	}

	#[test]
	fn lone_carriage_return_ends_a_line() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(b"ab\rcd\r\ref\r").unwrap();

		let lines = read_corpus(file.path()).unwrap();
		assert_eq!(lines, vec!["ab", "cd", "", "ef"]);
	}

	#[test]
	fn trailing_terminator_adds_no_line() {
		assert!(split_lines("").is_empty());
		assert_eq!(split_lines("a\n"), vec!["a"]);
		assert_eq!(split_lines("a\r\n\r\n"), vec!["a", ""]);
		assert_eq!(split_lines("a\n\rb"), vec!["a", "", "b"]);
	}

	#[test]
	fn missing_file_is_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = read_corpus(dir.path().join("absent.txt")).unwrap_err();
		assert!(matches!(err, Error::Io { .. }));
	}

	#[test]
	fn invalid_utf8_is_decode_error() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(b"ab\xffcd").unwrap();

		match read_corpus(file.path()) {
			Err(Error::Decode { offset, .. }) => assert_eq!(offset, 2),
			other => panic!("expected decode error, got {other:?}"),
		}
	}
}
