//! Bounded line-delimited JSON loading
//!
//! Every physical line is classified as a record, a blank line, or a line that
//! failed to decode. Decode failures are counted and skipped; they never abort
//! the surrounding read.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::KeyscanError;

/// Maximum number of decode error messages kept per file
const MAX_ERRORS: usize = 100;

/// Classification of one input line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// The line decoded as a JSON value
    Record(Value),
    /// The line was empty or whitespace only
    Blank,
    /// The line failed to decode
    Invalid(String),
}

/// Classify one raw line
pub fn decode_line(line: &[u8]) -> LineOutcome {
    let trimmed = line.trim_ascii();
    if trimmed.is_empty() {
        return LineOutcome::Blank;
    }

    match serde_json::from_slice::<Value>(trimmed) {
        Ok(value) => LineOutcome::Record(value),
        Err(e) => LineOutcome::Invalid(e.to_string()),
    }
}

/// Iterator over the classified lines of a reader, with 1-based line numbers
pub struct RecordReader<R> {
    reader: R,
    line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = std::io::Result<(usize, LineOutcome)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line += 1;
                let mut bytes = self.buf.as_slice();
                if self.line == 1 {
                    bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                }
                Some(Ok((self.line, decode_line(bytes))))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Records loaded from one input, with line accounting
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedRecords {
    /// Decoded records in file order
    #[serde(skip)]
    pub records: Vec<Value>,
    /// Physical lines consumed
    pub lines_read: usize,
    /// Lines that failed to decode
    pub skipped_lines: usize,
    /// Decode error messages (limited to the first 100)
    pub errors: Vec<String>,
}

impl LoadedRecords {
    /// Record a decode failure (messages limited to 100)
    pub fn add_error(&mut self, error: KeyscanError) {
        self.skipped_lines += 1;
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(error.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read up to `max_records` decoded records from `reader` (0 = no limit)
///
/// The cap counts decoded records, not physical lines: blank and undecodable
/// lines are read past without using up the budget, so a file that opens with
/// bad lines still yields a full sample.
pub fn read_records<R: BufRead>(
    reader: R,
    max_records: usize,
) -> Result<LoadedRecords, std::io::Error> {
    let mut loaded = LoadedRecords::default();

    for item in RecordReader::new(reader) {
        let (line, outcome) = item?;
        loaded.lines_read = line;
        match outcome {
            LineOutcome::Record(value) => loaded.records.push(value),
            LineOutcome::Blank => {}
            LineOutcome::Invalid(message) => {
                tracing::debug!(line, %message, "Skipping undecodable line");
                loaded.add_error(KeyscanError::RecordDecode { line, message });
            }
        }

        if max_records > 0 && loaded.records.len() >= max_records {
            break;
        }
    }

    Ok(loaded)
}

/// Load up to `max_records` decoded records from a file (0 = no limit)
///
/// The file handle is released before this function returns, on every path.
pub fn load_records(path: &Path, max_records: usize) -> Result<LoadedRecords, KeyscanError> {
    let file = File::open(path).map_err(|e| KeyscanError::file_access(path, e))?;
    read_records(BufReader::new(file), max_records).map_err(|e| KeyscanError::file_access(path, e))
}
