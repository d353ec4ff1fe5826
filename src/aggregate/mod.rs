//! Aggregation of read counts over annotated isoforms.
//!
//! - [`CountMerger`]: Join a count table with isoform annotations by
//!   normalized identifier and rank rows by count
//! - [`summarize`]: Collapse isoforms onto their exon sub-path within an exon
//!   range and rank the resulting local isoforms
//!
//! ## Identifier normalization
//!
//! Count tables and annotation tables rarely spell identifiers the same way.
//! Both sides are reduced to a join key by dropping the trailing `_`/`-`
//! segment and treating `_` and `-` as equivalent:
//!
//! | Raw identifier | Join key |
//! |----------------|----------|
//! | `PB.1.1_ENSG0001` | `PB.1.1` |
//! | `ENST00000001_3` | `ENST00000001` |
//! | `PB_1_1` | `PB-1` |
//! | `PB-1-1` | `PB-1` |
//!
//! Raw identifiers sharing a key are counted as one isoform.

pub mod merge;
pub mod range;

pub use merge::{CountMerger, LookupSource, MergeConfig, MergeOutcome, Unresolved};
pub use range::{extract_sub_path, summarize, RangeError, RangeQuery};
