use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::aggregate::merge::{CountMerger, MergeConfig};
use crate::catalog::store::ExonCatalog;
use crate::cli::{write_json, OutputFormat};
use crate::core::types::CountedIsoform;
use crate::matching::engine::{AnnotationConfig, AnnotationEngine};
use crate::parsing::annotations::parse_annotation_file;
use crate::parsing::counts::parse_counts_file;
use crate::parsing::gtf::{parse_gtf_file, GeneModel};
use crate::utils::validation::DEFAULT_REFERENCE_MARKER;

/// Suffix of the file written by `merge --to-file`
pub const ANNO_COUNTS_SUFFIX: &str = ".anno_counts.tsv";

#[derive(Args)]
pub struct MergeArgs {
    /// Annotation table written by `isoexon annotate`
    #[arg(required = true)]
    pub annotations: PathBuf,

    /// Read-count table (identifier, count)
    #[arg(required = true)]
    pub counts: PathBuf,

    /// Exon catalog, used with GENE_MODEL to annotate reference transcripts
    #[arg(requires = "gene_model")]
    pub catalog: Option<PathBuf>,

    /// Gene model (GTF) holding the exons of reference transcripts
    pub gene_model: Option<PathBuf>,

    /// Substring marking reference transcript identifiers
    #[arg(long, default_value = DEFAULT_REFERENCE_MARKER)]
    pub reference_marker: String,

    /// Match gene-model transcript ids without their version suffix
    #[arg(long)]
    pub ignore_version: bool,

    /// Keep `chr` prefixes on chromosome names instead of stripping them
    #[arg(long)]
    pub keep_chr_prefix: bool,

    /// Write to `<counts>.anno_counts.tsv` instead of standard output
    #[arg(long)]
    pub to_file: bool,
}

/// Execute merge subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be parsed or output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MergeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let records = parse_annotation_file(&args.annotations)
        .with_context(|| format!("reading annotations {}", args.annotations.display()))?;
    let counts = parse_counts_file(&args.counts)
        .with_context(|| format!("reading counts {}", args.counts.display()))?;
    info!(
        "Loaded {} annotations and {} count rows",
        records.len(),
        counts.len()
    );

    let reference = match (&args.catalog, &args.gene_model) {
        (Some(catalog), Some(gene_model)) => Some(load_reference(
            catalog,
            gene_model,
            args.keep_chr_prefix,
        )?),
        _ => None,
    };
    let engine = reference.as_ref().map(|(catalog, _)| {
        AnnotationEngine::with_config(
            catalog,
            AnnotationConfig {
                strip_chr_prefix: !args.keep_chr_prefix,
            },
        )
    });

    let config = MergeConfig {
        reference_marker: args.reference_marker.clone(),
        ignore_version: args.ignore_version,
    };
    let mut merger = CountMerger::new(&records).with_config(config);
    if let (Some((_, model)), Some(engine)) = (&reference, &engine) {
        merger = merger.with_gene_model(model, engine);
    }

    let outcome = merger.merge(&counts);
    info!(
        "Merged {} isoforms ({} unresolved)",
        outcome.rows.len(),
        outcome.unresolved.len()
    );

    if args.to_file {
        let path = derived_output_path(&args.counts);
        let file = File::create(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        let mut out = BufWriter::new(file);
        write_counted(&mut out, &outcome.rows, format)?;
        out.flush()?;
        info!("Wrote {}", path.display());
    } else {
        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        write_counted(&mut out, &outcome.rows, format)?;
        out.flush()?;
    }

    Ok(())
}

fn load_reference(
    catalog: &Path,
    gene_model: &Path,
    keep_chr_prefix: bool,
) -> anyhow::Result<(ExonCatalog, GeneModel)> {
    let mut exons = ExonCatalog::load_from_file(catalog)
        .with_context(|| format!("loading exon catalog {}", catalog.display()))?;
    if !keep_chr_prefix {
        exons = exons.with_stripped_chr_prefix();
    }
    let model = parse_gtf_file(gene_model)
        .with_context(|| format!("reading gene model {}", gene_model.display()))?;
    info!(
        "Loaded {} catalog exons and {} gene-model transcripts",
        exons.len(),
        model.len()
    );
    Ok((exons, model))
}

/// Output path for `--to-file`: the counts file name with its table
/// extension (and any `.gz`) replaced by `.anno_counts.tsv`.
pub fn derived_output_path(counts: &Path) -> PathBuf {
    let name = counts
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut stem = name.as_str();
    for ext in [".gz", ".bgz"] {
        stem = stem.strip_suffix(ext).unwrap_or(stem);
    }
    for ext in [".tsv", ".txt", ".csv"] {
        stem = stem.strip_suffix(ext).unwrap_or(stem);
    }

    counts.with_file_name(format!("{stem}{ANNO_COUNTS_SUFFIX}"))
}

/// Write merged rows as `identifier\tcount\tannotation` lines or JSON
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_counted<W: Write>(
    out: &mut W,
    rows: &[CountedIsoform],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Tsv => {
            for row in rows {
                writeln!(out, "{}\t{}\t{}", row.identifier, row.count, row.annotation)?;
            }
        }
        OutputFormat::Json => write_json(out, rows)?,
    }
    Ok(())
}
