//! Loaders for the tables consumed by the annotation pipeline.
//!
//! This module provides parsers for:
//!
//! - **Exon catalogs**: Reference exons with ordinal numbers (TSV with header)
//! - **BED12 files**: Block-structured isoform models
//! - **Count tables**: Isoform identifier and read count
//! - **Annotation tables**: Output of the annotate phase (`identifier<TAB>annotation`)
//! - **Gene models (GTF)**: Exon features grouped by `transcript_id`
//!
//! Every parser reads the whole input into typed records up front. A malformed
//! row fails the whole load with a [`ParseError`] naming the offending line,
//! so no partial table ever reaches the matching code.
//!
//! Files ending in `.gz` or `.bgz` are decompressed transparently.
//!
//! ## Example
//!
//! ```rust,no_run
//! use isoexon::parsing::bed::parse_bed12_file;
//! use std::path::Path;
//!
//! let intervals = parse_bed12_file(Path::new("isoforms.bed12")).unwrap();
//! println!("{} isoforms", intervals.len());
//! ```

use std::io::Read;
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod annotations;
pub mod bed;
pub mod catalog;
pub mod counts;
pub mod gtf;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Too many records: {0} exceeds maximum allowed")]
    TooManyRecords(usize),
}

impl ParseError {
    /// Build an `InvalidFormat` error for a 1-based line number
    pub fn at_line(line_num: usize, message: impl std::fmt::Display) -> Self {
        Self::InvalidFormat(format!("line {line_num}: {message}"))
    }
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read a whole text file, decompressing gzip/bgzip input.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened, decoded, or is not UTF-8.
pub fn read_text(path: &Path) -> Result<String, ParseError> {
    if is_gzipped(path) {
        let file = std::fs::File::open(path)?;
        let mut decoder = MultiGzDecoder::new(file);
        let mut content = String::new();
        decoder.read_to_string(&mut content)?;
        Ok(content)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Data lines of a text table with their 1-based line numbers.
///
/// Blank lines and lines starting with `#` are skipped; trailing `\r` is removed.
pub(crate) fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(|(i, line)| {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            None
        } else {
            Some((i + 1, line))
        }
    })
}

/// Parse an unsigned integer field, reporting the column name on failure
pub(crate) fn parse_u64(field: &str, column: &str, line_num: usize) -> Result<u64, ParseError> {
    field
        .trim()
        .parse()
        .map_err(|_| ParseError::at_line(line_num, format!("invalid {column} '{field}'")))
}
