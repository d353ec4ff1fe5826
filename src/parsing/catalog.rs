//! Parser for exon catalog tables.
//!
//! Format: `chromosome\tstart\tend\texon#\texon_name`, 1-based inclusive,
//! with a header row. When the header uses recognized column names, columns
//! are located by name so reordered catalogs still load; otherwise the
//! positional layout above is assumed.

use std::path::Path;

use crate::core::exon::Exon;
use crate::parsing::{data_lines, parse_u64, read_text, ParseError};
use crate::utils::validation::check_record_limit;

/// Column positions of the catalog fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CatalogColumns {
    chromosome: usize,
    start: usize,
    end: usize,
    number: usize,
    name: Option<usize>,
}

impl Default for CatalogColumns {
    fn default() -> Self {
        Self {
            chromosome: 0,
            start: 1,
            end: 2,
            number: 3,
            name: Some(4),
        }
    }
}

impl CatalogColumns {
    /// Locate columns from a header row; `None` if the row is not a known header
    fn from_header(fields: &[&str]) -> Option<Self> {
        let find = |names: &[&str]| {
            fields.iter().position(|f| {
                let f = f.trim().trim_start_matches('#').to_lowercase();
                names.contains(&f.as_str())
            })
        };

        Some(Self {
            chromosome: find(&["chromosome", "chrom", "chr", "seqname"])?,
            start: find(&["start"])?,
            end: find(&["end"])?,
            number: find(&["exon#", "exon_number", "number", "exon"])?,
            name: find(&["exon_name", "name", "exon_id"]),
        })
    }

    fn min_fields(&self) -> usize {
        [self.chromosome, self.start, self.end, self.number]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// Parse an exon catalog file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_catalog_file(path: &Path) -> Result<Vec<Exon>, ParseError> {
    let content = read_text(path)?;
    parse_catalog_text(&content)
}

/// Parse exon catalog text
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a row has too few fields, a
/// non-numeric coordinate or exon number, or `start > end`, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_catalog_text(text: &str) -> Result<Vec<Exon>, ParseError> {
    let mut exons = Vec::new();
    let mut columns = CatalogColumns::default();
    let mut first_data_line = true;

    for (line_num, line) in data_lines(text) {
        let fields: Vec<&str> = line.split('\t').collect();

        if first_data_line {
            first_data_line = false;
            if let Some(found) = CatalogColumns::from_header(&fields) {
                columns = found;
                continue;
            }
            // Unrecognized header: skip it if the start column is not numeric
            if fields
                .get(columns.start)
                .is_some_and(|f| f.trim().parse::<u64>().is_err())
            {
                continue;
            }
        }

        if fields.len() < columns.min_fields() {
            return Err(ParseError::at_line(
                line_num,
                format!(
                    "expected at least {} fields, found {}",
                    columns.min_fields(),
                    fields.len()
                ),
            ));
        }

        let chromosome = fields[columns.chromosome].trim().to_string();
        let start = parse_u64(fields[columns.start], "start", line_num)?;
        let end = parse_u64(fields[columns.end], "end", line_num)?;
        let number = fields[columns.number].trim();
        if number.is_empty() {
            return Err(ParseError::at_line(line_num, "missing exon number"));
        }

        if start > end {
            return Err(ParseError::at_line(
                line_num,
                format!("exon start {start} is after end {end}"),
            ));
        }

        let name = columns
            .name
            .and_then(|i| fields.get(i))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        if check_record_limit(exons.len()).is_some() {
            return Err(ParseError::TooManyRecords(exons.len()));
        }

        exons.push(Exon::new(chromosome, start, end, number).with_name(name));
    }

    Ok(exons)
}
