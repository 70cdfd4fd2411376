//! Reads a flat hex-text program file into a sequence of 32-bit words.
//!
//! Format: ASCII text, one instruction per line, each line a
//! hexadecimal 32-bit value with or without a leading `0x`. Blank lines
//! are skipped so a trailing newline doesn't produce a spurious word.

use crate::error::LoadError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub fn load_program<P: AsRef<Path>>(path: P) -> Result<Vec<u32>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut words = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        let digits = token.strip_prefix("0x").unwrap_or(token);
        let word = u32::from_str_radix(digits, 16).map_err(|_| LoadError::MalformedWord {
            line: line_number + 1,
            token: token.to_string(),
        })?;
        words.push(word);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_words_with_and_without_prefix() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0x00700293").unwrap();
        writeln!(file, "02300313").unwrap();
        writeln!(file).unwrap();

        let words = load_program(file.path()).unwrap();
        assert_eq!(words, vec![0x00700293, 0x02300313]);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let result = load_program("/nonexistent/path/to/program.hex");
        assert!(matches!(result, Err(LoadError::Open { .. })));
    }

    #[test]
    fn malformed_token_is_reported_with_line_number() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0x00700293").unwrap();
        writeln!(file, "not-hex").unwrap();

        let result = load_program(file.path());
        assert!(matches!(
            result,
            Err(LoadError::MalformedWord { line: 2, .. })
        ));
    }
}
