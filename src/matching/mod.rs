//! Block-to-exon matching.
//!
//! This module provides the core matching functionality:
//!
//! - [`match_block`]: Find the catalog exon for a single block
//! - [`BlockPosition`]: Boundary rule selection (first / internal / last block)
//! - [`AnnotationEngine`]: Annotate whole isoforms and reference transcripts
//!
//! ## Matching Algorithm
//!
//! Each block of an isoform is compared with the catalog exons on the same
//! chromosome, in catalog order, and the first exon satisfying the block's
//! boundary rule wins:
//!
//! 1. **First block**: exon may start before the block; ends must be equal
//! 2. **Internal blocks**: starts and ends must be equal
//! 3. **Last block**: starts must be equal; exon must not end after the block
//!
//! A single-block isoform is matched with the first-block rule. A block
//! without a match is reported by its coordinates (`chrom:start-end`).
//!
//! ## Example
//!
//! ```rust,no_run
//! use isoexon::{AnnotationEngine, ExonCatalog};
//! use isoexon::parsing::bed::parse_bed12_file;
//! use std::path::Path;
//!
//! let catalog = ExonCatalog::load_from_file(Path::new("exons.tsv")).unwrap();
//! let intervals = parse_bed12_file(Path::new("isoforms.bed12")).unwrap();
//!
//! let engine = AnnotationEngine::new(&catalog);
//! for iso in engine.annotate_all(&intervals) {
//!     println!("{}\t{}", iso.identifier, iso.annotation());
//! }
//! ```

pub mod block;
pub mod engine;

pub use block::{match_block, BlockPosition};
pub use engine::{AnnotationConfig, AnnotationEngine};
