//! # isoexon
//!
//! A library for annotating long-read isoforms with reference exon numbers.
//!
//! Isoform models come out of long-read pipelines as BED12 records: a span on
//! the genome split into blocks, one per observed exon. Reading them against a
//! transcript model means knowing which reference exon each block is. `isoexon`
//! matches every block against a catalog of reference exons and writes each
//! isoform as an ordered exon path (`1, 2, 4, 5`), keeping raw coordinates
//! (`1:1500-1620`) for blocks that match nothing.
//!
//! ## Features
//!
//! - **Position-aware matching**: first and last blocks may be truncated
//!   relative to the reference exon; internal blocks must match exactly
//! - **Strand-aware paths**: minus-strand isoforms are reported 5' to 3'
//! - **Count merging**: read counts joined by normalized identifier and ranked
//! - **Reference transcripts**: resolved through a GTF gene model
//! - **Local isoforms**: isoforms collapsed onto an exon range with summed counts
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
//!
//! ## Modules
//!
//! - [`catalog`]: Reference exon catalog storage and indexing
//! - [`core`]: Core data types for exons, intervals, and results
//! - [`matching`]: Block matching and isoform annotation
//! - [`aggregate`]: Count merging and exon-range summaries
//! - [`parsing`]: Parsers for catalog, BED12, count, annotation and GTF files
//! - [`cli`]: Command-line interface implementation

pub mod aggregate;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use aggregate::{summarize, CountMerger, MergeConfig, RangeQuery};
pub use catalog::store::ExonCatalog;
pub use core::exon::Exon;
pub use core::interval::{Block, GenomicInterval, Strand};
pub use core::types::*;
pub use matching::engine::{AnnotationConfig, AnnotationEngine};
