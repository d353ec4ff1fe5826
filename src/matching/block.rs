use serde::Serialize;

use crate::catalog::store::ExonCatalog;
use crate::core::exon::Exon;
use crate::core::types::MatchResult;

/// Where a block sits within its interval, which decides the boundary rule
///
/// | Position | Exon start | Exon end |
/// |----------|------------|----------|
/// | First    | `<=` block start | `==` block end |
/// | Internal | `==` block start | `==` block end |
/// | Last     | `==` block start | `<=` block end |
///
/// The first block may be a truncated first exon, so only its 3' boundary has
/// to line up. The last block keeps the reference behavior of accepting a
/// catalog exon that ends at or before the block end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockPosition {
    First,
    Internal,
    Last,
}

impl BlockPosition {
    /// Classify block `index` of an interval with `total` blocks.
    ///
    /// A single-block interval is classified as `First`.
    pub fn classify(index: usize, total: usize) -> Self {
        if index == 0 {
            Self::First
        } else if index + 1 == total {
            Self::Last
        } else {
            Self::Internal
        }
    }

    /// Check whether `exon` satisfies this position's rule for a block at
    /// 1-based inclusive `(start, end)`. Chromosome is not checked here.
    pub fn accepts(self, exon: &Exon, start: u64, end: u64) -> bool {
        match self {
            Self::First => exon.start <= start && exon.end == end,
            Self::Internal => exon.start == start && exon.end == end,
            Self::Last => exon.start == start && exon.end <= end,
        }
    }
}

/// Match one block against the catalog.
///
/// `start`/`end` are the block's 1-based inclusive coordinates. The first
/// catalog exon on `chromosome` (in catalog order) that satisfies the rule
/// for `position` wins; with no match the block's coordinates are returned.
pub fn match_block(
    catalog: &ExonCatalog,
    chromosome: &str,
    start: u64,
    end: u64,
    position: BlockPosition,
) -> MatchResult {
    match catalog.find_first(chromosome, |exon| position.accepts(exon, start, end)) {
        Some(exon) => MatchResult::matched(exon.number.as_str()),
        None => MatchResult::unmatched(chromosome, start, end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_catalog() -> ExonCatalog {
        ExonCatalog::from_exons(vec![
            Exon::new("1", 100, 200, 1),
            Exon::new("1", 300, 400, 2),
            Exon::new("1", 500, 600, 3),
        ])
    }

    #[test]
    fn test_classify() {
        assert_eq!(BlockPosition::classify(0, 3), BlockPosition::First);
        assert_eq!(BlockPosition::classify(1, 3), BlockPosition::Internal);
        assert_eq!(BlockPosition::classify(2, 3), BlockPosition::Last);
        assert_eq!(BlockPosition::classify(1, 2), BlockPosition::Last);
    }

    #[test]
    fn test_single_block_uses_first_rule() {
        assert_eq!(BlockPosition::classify(0, 1), BlockPosition::First);

        // Truncated start is allowed, end must align
        let catalog = make_catalog();
        let result = match_block(&catalog, "1", 150, 200, BlockPosition::classify(0, 1));
        assert_eq!(result, MatchResult::matched("1"));

        // Last-block rule would have rejected this (start differs)
        let result = match_block(&catalog, "1", 150, 200, BlockPosition::Last);
        assert!(!result.is_matched());
    }

    #[test]
    fn test_first_block_truncated_start() {
        let catalog = make_catalog();
        let result = match_block(&catalog, "1", 150, 200, BlockPosition::First);
        assert_eq!(result, MatchResult::matched("1"));
    }

    #[test]
    fn test_first_block_end_must_align() {
        let catalog = make_catalog();
        let result = match_block(&catalog, "1", 150, 199, BlockPosition::First);
        assert_eq!(result, MatchResult::unmatched("1", 150, 199));
    }

    #[test]
    fn test_first_block_exon_starting_later_rejected() {
        let catalog = make_catalog();
        let result = match_block(&catalog, "1", 90, 200, BlockPosition::First);
        assert!(!result.is_matched());
    }

    #[test]
    fn test_last_block_exon_within_block() {
        let catalog = make_catalog();
        // Block runs past the catalog exon end
        let result = match_block(&catalog, "1", 500, 650, BlockPosition::Last);
        assert_eq!(result, MatchResult::matched("3"));
    }

    #[test]
    fn test_last_block_exon_extending_past_block_rejected() {
        let catalog = make_catalog();
        let result = match_block(&catalog, "1", 100, 160, BlockPosition::Last);
        assert_eq!(result, MatchResult::unmatched("1", 100, 160));
    }

    #[test]
    fn test_last_block_start_must_align() {
        let catalog = make_catalog();
        let result = match_block(&catalog, "1", 501, 600, BlockPosition::Last);
        assert!(!result.is_matched());
    }

    #[test]
    fn test_internal_block_exact() {
        let catalog = make_catalog();
        assert_eq!(
            match_block(&catalog, "1", 300, 400, BlockPosition::Internal),
            MatchResult::matched("2")
        );
        assert!(!match_block(&catalog, "1", 300, 401, BlockPosition::Internal).is_matched());
        assert!(!match_block(&catalog, "1", 299, 400, BlockPosition::Internal).is_matched());
    }

    #[test]
    fn test_other_chromosome_never_matches() {
        let catalog = make_catalog();
        let result = match_block(&catalog, "2", 300, 400, BlockPosition::Internal);
        assert_eq!(result.to_string(), "2:300-400");
    }

    #[test]
    fn test_match_reports_catalog_label() {
        let catalog = ExonCatalog::from_exons(vec![Exon::new("1", 300, 400, "2_a")]);
        let result = match_block(&catalog, "1", 300, 400, BlockPosition::Internal);
        assert_eq!(result.to_string(), "2_a");
    }

    #[test]
    fn test_first_catalog_row_wins() {
        let catalog = ExonCatalog::from_exons(vec![
            Exon::new("1", 80, 200, 5),
            Exon::new("1", 100, 200, 1),
        ]);
        let result = match_block(&catalog, "1", 150, 200, BlockPosition::First);
        assert_eq!(result, MatchResult::matched("5"));
    }
}
