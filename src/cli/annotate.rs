use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::catalog::store::ExonCatalog;
use crate::cli::{write_json, OutputFormat};
use crate::core::types::{AnnotatedIsoform, MatchResult};
use crate::matching::engine::{AnnotationConfig, AnnotationEngine};
use crate::parsing::bed::parse_bed12_file;

#[derive(Args)]
pub struct AnnotateArgs {
    /// Exon catalog (TSV: chromosome, start, end, exon#, exon_name)
    #[arg(required = true)]
    pub catalog: PathBuf,

    /// Isoform models in BED12 format
    #[arg(required = true)]
    pub bed12: PathBuf,

    /// Keep `chr` prefixes on chromosome names instead of stripping them
    #[arg(long)]
    pub keep_chr_prefix: bool,
}

#[derive(Serialize)]
struct AnnotationRow<'a> {
    identifier: &'a str,
    annotation: String,
    exon_path: &'a [MatchResult],
}

/// Execute annotate subcommand
///
/// # Errors
///
/// Returns an error if either input cannot be parsed or output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AnnotateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut catalog = ExonCatalog::load_from_file(&args.catalog)
        .with_context(|| format!("loading exon catalog {}", args.catalog.display()))?;
    if !args.keep_chr_prefix {
        catalog = catalog.with_stripped_chr_prefix();
    }
    info!(
        "Loaded {} catalog exons on {} chromosomes",
        catalog.len(),
        catalog.chromosome_count()
    );

    let intervals = parse_bed12_file(&args.bed12)
        .with_context(|| format!("reading BED12 {}", args.bed12.display()))?;
    info!("Parsed {} isoforms", intervals.len());

    let engine = AnnotationEngine::with_config(
        &catalog,
        AnnotationConfig {
            strip_chr_prefix: !args.keep_chr_prefix,
        },
    );
    let annotated = engine.annotate_all(&intervals);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_annotations(&mut out, &annotated, format)?;
    out.flush()?;

    Ok(())
}

/// Write annotated isoforms as `identifier\tannotation` lines or JSON
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_annotations<W: Write>(
    out: &mut W,
    annotated: &[AnnotatedIsoform],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Tsv => {
            for iso in annotated {
                writeln!(out, "{}\t{}", iso.identifier, iso.annotation())?;
            }
        }
        OutputFormat::Json => {
            let rows: Vec<AnnotationRow> = annotated
                .iter()
                .map(|iso| AnnotationRow {
                    identifier: &iso.identifier,
                    annotation: iso.annotation(),
                    exon_path: &iso.exon_path,
                })
                .collect();
            write_json(out, &rows)?;
        }
    }
    Ok(())
}
