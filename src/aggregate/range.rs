use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::core::types::{join_tokens, split_tokens, CountedIsoform, LocalIsoformGroup};

/// Prefix of the labels assigned to local isoform groups
pub const LOCAL_ISOFORM_PREFIX: &str = "Local-Iso";

#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Isoform {identifier}: cannot read exon number from token '{token}'")]
    InvalidToken { identifier: String, token: String },
}

/// Exon range to summarize, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeQuery {
    pub start_exon: u32,
    pub end_exon: u32,
    /// Keep full exon tokens instead of bare exon numbers
    pub strict: bool,
}

impl RangeQuery {
    pub fn new(start_exon: u32, end_exon: u32) -> Self {
        Self {
            start_exon,
            end_exon,
            strict: false,
        }
    }

    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn contains(&self, number: u32) -> bool {
        self.start_exon <= number && number <= self.end_exon
    }
}

/// Coordinate tokens (`1:150-160`) are recognized by their `-`
fn is_coordinate_token(token: &str) -> bool {
    token.contains('-')
}

/// Leading exon number of a token such as `7` or `7_alt`
fn exon_number(token: &str) -> Option<u32> {
    token.split('_').next()?.trim().parse().ok()
}

/// Extract the part of an exon path that lies within `query`.
///
/// Returns `Ok(None)` when the path does not contain both boundary exons.
///
/// # Errors
///
/// Returns `RangeError::InvalidToken` if a non-coordinate token has no
/// leading exon number.
pub fn extract_sub_path(
    identifier: &str,
    tokens: &[&str],
    query: &RangeQuery,
) -> Result<Option<Vec<String>>, RangeError> {
    let mut sub_path = Vec::new();
    let mut seen_start = false;
    let mut seen_end = false;

    for &token in tokens {
        if is_coordinate_token(token) {
            if seen_start && !seen_end {
                sub_path.push(token.to_string());
            }
            continue;
        }

        let number = exon_number(token).ok_or_else(|| RangeError::InvalidToken {
            identifier: identifier.to_string(),
            token: token.to_string(),
        })?;

        if query.contains(number) {
            if query.strict {
                sub_path.push(token.to_string());
            } else {
                sub_path.push(number.to_string());
            }
        }
        if number == query.start_exon {
            seen_start = true;
        }
        if number == query.end_exon {
            seen_end = true;
        }
    }

    Ok((seen_start && seen_end).then_some(sub_path))
}

/// Group isoforms by their sub-path within `query` and sum their counts.
///
/// Isoforms missing either boundary exon, and unresolved (`N/A`) rows, are
/// dropped. Groups are sorted by descending count (ties in order of first
/// appearance) and labelled `Local-Iso1`, `Local-Iso2`, ...
///
/// # Errors
///
/// Returns `RangeError::InvalidToken` if an annotation holds a token that is
/// neither a coordinate nor an exon number.
pub fn summarize(
    isoforms: &[CountedIsoform],
    query: &RangeQuery,
) -> Result<Vec<LocalIsoformGroup>, RangeError> {
    let mut groups: Vec<(String, u64)> = Vec::new();
    let mut path_to_group: HashMap<String, usize> = HashMap::new();
    let mut dropped = 0usize;

    for isoform in isoforms {
        if !isoform.is_resolved() {
            dropped += 1;
            continue;
        }

        let tokens = split_tokens(&isoform.annotation);
        let Some(sub_path) = extract_sub_path(&isoform.identifier, &tokens, query)? else {
            dropped += 1;
            continue;
        };

        let key = join_tokens(&sub_path);
        if let Some(&idx) = path_to_group.get(&key) {
            groups[idx].1 = groups[idx].1.saturating_add(isoform.count);
        } else {
            path_to_group.insert(key.clone(), groups.len());
            groups.push((key, isoform.count));
        }
    }

    debug!(
        "Range {}-{}: {} groups, {} isoforms dropped",
        query.start_exon,
        query.end_exon,
        groups.len(),
        dropped
    );

    groups.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(groups
        .into_iter()
        .enumerate()
        .map(|(i, (sub_path, summed_count))| LocalIsoformGroup {
            label: format!("{LOCAL_ISOFORM_PREFIX}{}", i + 1),
            summed_count,
            sub_path,
        })
        .collect())
}
