//! Parser for isoform read-count tables.
//!
//! Format: `identifier\tcount[\t...]`. A leading header row is recognized by a
//! non-numeric count field and skipped. Extra columns are ignored, so the
//! output of the merge phase can be read back as a count table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::parsing::{data_lines, read_text, ParseError};
use crate::utils::validation::check_record_limit;

/// One row of a count table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRecord {
    pub identifier: String,
    pub count: u64,
}

impl CountRecord {
    pub fn new(identifier: impl Into<String>, count: u64) -> Self {
        Self {
            identifier: identifier.into(),
            count,
        }
    }
}

/// Parse a count table file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_counts_file(path: &Path) -> Result<Vec<CountRecord>, ParseError> {
    let content = read_text(path)?;
    parse_counts_text(&content)
}

/// Parse count table text
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a row has fewer than 2 fields or a
/// count that is not a non-negative integer.
pub fn parse_counts_text(text: &str) -> Result<Vec<CountRecord>, ParseError> {
    let mut records = Vec::new();
    let mut first_data_line = true;

    for (line_num, line) in data_lines(text) {
        let fields: Vec<&str> = line.split('\t').collect();

        if fields.len() < 2 {
            return Err(ParseError::at_line(line_num, "has fewer than 2 fields"));
        }

        let count = parse_count(fields[1]);

        if first_data_line {
            first_data_line = false;
            if count.is_none() {
                continue;
            }
        }

        let count = count.ok_or_else(|| {
            ParseError::at_line(line_num, format!("invalid count '{}'", fields[1]))
        })?;

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        records.push(CountRecord::new(fields[0].trim(), count));
    }

    Ok(records)
}

/// Accepts integers, and floats with no fractional part (`12.0`)
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Checked above
fn parse_count(field: &str) -> Option<u64> {
    let field = field.trim();
    if let Ok(n) = field.parse::<u64>() {
        return Some(n);
    }
    let value: f64 = field.parse().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        Some(value as u64)
    } else {
        None
    }
}
