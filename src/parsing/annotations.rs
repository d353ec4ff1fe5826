//! Parsers for tables written by the annotate and merge phases.

use std::path::Path;

use crate::core::types::CountedIsoform;
use crate::parsing::{data_lines, parse_u64, read_text, ParseError};
use crate::utils::validation::check_record_limit;

/// One row of an annotate-phase table: `identifier\tannotation`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub identifier: String,
    pub annotation: String,
}

/// Parse an annotation table file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` if a row lacks the annotation column.
pub fn parse_annotation_file(path: &Path) -> Result<Vec<AnnotationRecord>, ParseError> {
    let content = read_text(path)?;
    parse_annotation_text(&content)
}

/// Parse annotation table text
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a row lacks the annotation column.
pub fn parse_annotation_text(text: &str) -> Result<Vec<AnnotationRecord>, ParseError> {
    let mut records = Vec::new();

    for (line_num, line) in data_lines(text) {
        let Some((identifier, annotation)) = line.split_once('\t') else {
            return Err(ParseError::at_line(line_num, "missing annotation column"));
        };

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        records.push(AnnotationRecord {
            identifier: identifier.trim().to_string(),
            annotation: annotation.trim().to_string(),
        });
    }

    Ok(records)
}

/// Parse a merge-phase table file (`identifier\tcount\tannotation`)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_counted_file(path: &Path) -> Result<Vec<CountedIsoform>, ParseError> {
    let content = read_text(path)?;
    parse_counted_text(&content)
}

/// Parse merge-phase table text
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a row has fewer than 3 fields or a
/// non-numeric count.
pub fn parse_counted_text(text: &str) -> Result<Vec<CountedIsoform>, ParseError> {
    let mut records = Vec::new();

    for (line_num, line) in data_lines(text) {
        let fields: Vec<&str> = line.splitn(3, '\t').collect();
        if fields.len() < 3 {
            return Err(ParseError::at_line(line_num, "has fewer than 3 fields"));
        }

        let count = parse_u64(fields[1], "count", line_num)?;

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        records.push(CountedIsoform::new(
            fields[0].trim(),
            count,
            fields[2].trim(),
        ));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_annotation_text() {
        let text = "PB-1-1\t1, 2, 3\nPB-2-1\t1:100-200\n";
        let records = parse_annotation_text(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identifier, "PB-1-1");
        assert_eq!(records[0].annotation, "1, 2, 3");
        assert_eq!(records[1].annotation, "1:100-200");
    }

    #[test]
    fn test_parse_annotation_missing_column() {
        let err = parse_annotation_text("PB-1-1\t1\nbroken\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_counted_text() {
        let text = "PB.1.1\t40\t1, 2, 3\nENST1\t3\tN/A\n";
        let rows = parse_counted_text(text).unwrap();
        assert_eq!(rows[0], CountedIsoform::new("PB.1.1", 40, "1, 2, 3"));
        assert_eq!(rows[1].annotation, "N/A");
    }

    #[test]
    fn test_parse_counted_bad_count() {
        assert!(parse_counted_text("a\tten\t1, 2\n").is_err());
        assert!(parse_counted_text("a\t10\n").is_err());
    }
}
