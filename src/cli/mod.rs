//! Command-line interface for isoexon.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **annotate**: Map BED12 isoform blocks onto catalog exon numbers
//! - **merge**: Join a read-count table with annotations, ranked by count
//! - **summarize**: Collapse isoforms onto an exon range and sum their counts
//!
//! ## Usage
//!
//! ```text
//! # Annotate isoforms
//! isoexon annotate exons.tsv isoforms.bed12 > isoforms.anno.tsv
//!
//! # Attach counts
//! isoexon merge isoforms.anno.tsv counts.tsv > anno_counts.tsv
//!
//! # Reference transcripts resolved through a GTF, written next to the counts
//! isoexon merge isoforms.anno.tsv counts.tsv exons.tsv genes.gtf.gz --to-file
//!
//! # Local isoforms between exons 2 and 4
//! isoexon summarize anno_counts.tsv --start 2 --end 4
//! ```

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

pub mod annotate;
pub mod merge;
pub mod summarize;

#[derive(Parser)]
#[command(name = "isoexon")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Annotate isoforms with reference exon numbers and summarize their counts")]
#[command(
    long_about = "isoexon maps the exon blocks of long-read isoforms (BED12) onto a catalog of reference exons.\n\nIt provides:\n- Per-isoform exon paths, with raw coordinates where no catalog exon matches\n- Read counts joined to those paths and ranked\n- Local isoform summaries over a chosen exon range"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "tsv")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Annotate BED12 isoforms with catalog exon numbers
    Annotate(annotate::AnnotateArgs),

    /// Merge read counts with isoform annotations
    Merge(merge::MergeArgs),

    /// Sum counts of isoforms sharing an exon sub-path within a range
    Summarize(summarize::SummarizeArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Tsv,
    Json,
}

/// Write `rows` as a pretty JSON array followed by a newline
pub(crate) fn write_json<W: Write, T: Serialize>(out: &mut W, rows: &[T]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, rows)?;
    writeln!(out)?;
    Ok(())
}
