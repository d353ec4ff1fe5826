//! Core data types for isoform annotation.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Exon`]: A reference exon from the exon catalog (1-based, inclusive)
//! - [`GenomicInterval`]: A BED12 isoform record decomposed into [`Block`]s
//! - [`Strand`]: Transcription strand of an isoform
//! - [`MatchResult`], [`AnnotatedIsoform`], [`CountedIsoform`], [`LocalIsoformGroup`]:
//!   Results produced by the matching and aggregation phases
//!
//! ## Coordinates
//!
//! Two coordinate systems meet here:
//!
//! | Source | Start | End |
//! |--------|-------|-----|
//! | Exon catalog / GTF | 1-based | inclusive |
//! | BED12 interval | 0-based | exclusive |
//!
//! Blocks are converted to 1-based inclusive coordinates before being compared
//! with catalog exons; see [`Block::absolute`].

pub mod exon;
pub mod interval;
pub mod types;
