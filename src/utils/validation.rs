//! Centralized validation and identifier helpers.

/// Maximum number of records allowed in a single input table
pub const MAX_RECORDS: usize = 50_000_000;

/// Default substring marking reference (catalog) transcript identifiers
pub const DEFAULT_REFERENCE_MARKER: &str = "ENST";

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// Remove a leading `chr` from a chromosome name (`chr1` -> `1`).
///
/// # Examples
///
/// ```
/// use isoexon::utils::validation::strip_chr_prefix;
///
/// assert_eq!(strip_chr_prefix("chr1"), "1");
/// assert_eq!(strip_chr_prefix("X"), "X");
/// ```
#[must_use]
pub fn strip_chr_prefix(chromosome: &str) -> &str {
    chromosome.strip_prefix("chr").unwrap_or(chromosome)
}

/// Identifier as printed by the annotate phase: underscores become hyphens.
#[must_use]
pub fn display_identifier(name: &str) -> String {
    name.replace('_', "-")
}

/// Strip the trailing disambiguation segment of an identifier.
///
/// The segment after the last `_` or `-` is dropped
/// (`ENST00000001_3` -> `ENST00000001`). Identifiers without a separator, or
/// whose only separator is leading, are returned unchanged.
///
/// # Examples
///
/// ```
/// use isoexon::utils::validation::normalize_identifier;
///
/// assert_eq!(normalize_identifier("ENST00000001_3"), "ENST00000001");
/// assert_eq!(normalize_identifier("PB.1.1"), "PB.1.1");
/// ```
#[must_use]
pub fn normalize_identifier(id: &str) -> &str {
    match id.rfind(['_', '-']) {
        Some(pos) if pos > 0 => &id[..pos],
        _ => id,
    }
}

/// Key used to join count identifiers against annotation identifiers.
///
/// The identifier is normalized and `_` / `-` are collapsed so that names
/// rewritten by [`display_identifier`] still join against raw count names.
#[must_use]
pub fn join_key(id: &str) -> String {
    display_identifier(normalize_identifier(id.trim()))
}

/// Check whether an identifier names a reference transcript
#[must_use]
pub fn is_reference_transcript(id: &str, marker: &str) -> bool {
    !marker.is_empty() && id.contains(marker)
}

/// Drop a `.N` version suffix from a transcript identifier
#[must_use]
pub fn strip_version(id: &str) -> &str {
    match id.rsplit_once('.') {
        Some((base, version))
            if !base.is_empty() && version.chars().all(|c| c.is_ascii_digit()) =>
        {
            base
        }
        _ => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_record_limit() {
        assert!(check_record_limit(100).is_none());
        assert!(check_record_limit(MAX_RECORDS - 1).is_none());
        assert!(check_record_limit(MAX_RECORDS).is_some());
    }

    #[test]
    fn test_strip_chr_prefix() {
        assert_eq!(strip_chr_prefix("chr1"), "1");
        assert_eq!(strip_chr_prefix("chrX"), "X");
        assert_eq!(strip_chr_prefix("1"), "1");
        assert_eq!(strip_chr_prefix("MT"), "MT");
    }

    #[test]
    fn test_display_identifier() {
        assert_eq!(display_identifier("PB_1_1"), "PB-1-1");
        assert_eq!(display_identifier("plain"), "plain");
    }

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier("ENST00000001_3"), "ENST00000001");
        assert_eq!(normalize_identifier("PB.1.1_ENSG0001"), "PB.1.1");
        assert_eq!(normalize_identifier("PB-1-1"), "PB-1");
        assert_eq!(normalize_identifier("ENST00000001"), "ENST00000001");
        assert_eq!(normalize_identifier("_x"), "_x");
    }

    #[test]
    fn test_join_key_collapses_punctuation() {
        // Raw count name and the name printed by the annotate phase join
        assert_eq!(join_key("PB_1_1"), join_key(&display_identifier("PB_1_1")));
        assert_eq!(join_key("iso_7"), "iso");
        assert_eq!(join_key(" ENST00000001_3 "), "ENST00000001");
    }

    #[test]
    fn test_is_reference_transcript() {
        assert!(is_reference_transcript("ENST00000001_3", "ENST"));
        assert!(!is_reference_transcript("PB.1.1", "ENST"));
        assert!(!is_reference_transcript("ENST1", ""));
    }

    #[test]
    fn test_strip_version() {
        assert_eq!(strip_version("ENST00000001.5"), "ENST00000001");
        assert_eq!(strip_version("ENST00000001"), "ENST00000001");
        assert_eq!(strip_version("PB.1.x"), "PB.1.x");
    }
}
