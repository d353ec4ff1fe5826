//! Parser for BED12 isoform models.
//!
//! Twelve tab-separated fields: `chrom chromStart chromEnd name score strand
//! thickStart thickEnd itemRgb blockCount blockSizes blockStarts`. Block sizes
//! and starts are comma-separated and usually comma-terminated.

use std::path::Path;

use crate::core::interval::{Block, GenomicInterval, Strand};
use crate::parsing::{data_lines, parse_u64, read_text, ParseError};
use crate::utils::validation::check_record_limit;

const BED12_FIELDS: usize = 12;

/// Parse a BED12 file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_bed12_file(path: &Path) -> Result<Vec<GenomicInterval>, ParseError> {
    let content = read_text(path)?;
    parse_bed12_text(&content)
}

/// Parse BED12 text. `track` and `browser` lines are ignored.
///
/// A strand of `.` (unknown) is read as forward.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has fewer than 12 fields, a
/// non-numeric coordinate, a strand other than `+`, `-` or `.`, or inconsistent block lists.
pub fn parse_bed12_text(text: &str) -> Result<Vec<GenomicInterval>, ParseError> {
    let mut intervals = Vec::new();

    for (line_num, line) in data_lines(text) {
        if line.starts_with("track") || line.starts_with("browser") {
            continue;
        }

        if check_record_limit(intervals.len()).is_some() {
            return Err(ParseError::TooManyRecords(intervals.len()));
        }

        intervals.push(parse_bed12_line(line, line_num)?);
    }

    Ok(intervals)
}

/// Parse one BED12 line
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` describing the first problem found.
pub fn parse_bed12_line(line: &str, line_num: usize) -> Result<GenomicInterval, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < BED12_FIELDS {
        return Err(ParseError::at_line(
            line_num,
            format!(
                "BED12 needs {BED12_FIELDS} fields, found {}",
                fields.len()
            ),
        ));
    }

    let chromosome = fields[0].trim();
    let start = parse_u64(fields[1], "chromStart", line_num)?;
    let end = parse_u64(fields[2], "chromEnd", line_num)?;
    let name = fields[3].trim();
    let strand = match fields[5].trim() {
        "." => Strand::Forward,
        s => Strand::parse(s)
            .ok_or_else(|| ParseError::at_line(line_num, format!("invalid strand '{}'", fields[5])))?,
    };
    let block_count = parse_u64(fields[9], "blockCount", line_num)?;

    let sizes = parse_block_list(fields[10], "blockSizes", line_num)?;
    let offsets = parse_block_list(fields[11], "blockStarts", line_num)?;

    if sizes.len() != offsets.len() {
        return Err(ParseError::at_line(
            line_num,
            format!(
                "{} block sizes but {} block starts",
                sizes.len(),
                offsets.len()
            ),
        ));
    }
    if sizes.is_empty() {
        return Err(ParseError::at_line(line_num, "record has no blocks"));
    }
    if sizes.len() as u64 != block_count {
        return Err(ParseError::at_line(
            line_num,
            format!("blockCount {block_count} but {} blocks listed", sizes.len()),
        ));
    }
    if let Some(i) = sizes.iter().position(|&s| s == 0) {
        return Err(ParseError::at_line(
            line_num,
            format!("block {} has zero length", i + 1),
        ));
    }

    let blocks = offsets
        .into_iter()
        .zip(sizes)
        .map(|(offset, length)| Block::new(offset, length))
        .collect();

    Ok(GenomicInterval::new(chromosome, start, end, name, strand).with_blocks(blocks))
}

/// Parse a comma-separated (optionally comma-terminated) list of integers
fn parse_block_list(field: &str, column: &str, line_num: usize) -> Result<Vec<u64>, ParseError> {
    field
        .trim()
        .trim_end_matches(',')
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_u64(s, column, line_num))
        .collect()
}
