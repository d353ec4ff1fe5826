use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::aggregate::range::{summarize, RangeQuery};
use crate::cli::{write_json, OutputFormat};
use crate::core::types::LocalIsoformGroup;
use crate::parsing::annotations::parse_counted_file;

#[derive(Args)]
pub struct SummarizeArgs {
    /// Annotated count table written by `isoexon merge`
    #[arg(required = true)]
    pub file: PathBuf,

    /// First exon number of the range
    #[arg(short, long)]
    pub start: u32,

    /// Last exon number of the range
    #[arg(short, long)]
    pub end: u32,

    /// Keep full exon tokens; by default only exon numbers are reported
    #[arg(short = 'S', long)]
    pub strict: bool,
}

/// Execute summarize subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be parsed or holds an unreadable
/// exon token.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SummarizeArgs, format: OutputFormat) -> anyhow::Result<()> {
    if args.start > args.end {
        warn!(
            "Start exon {} is after end exon {}; no exon falls inside the range",
            args.start, args.end
        );
    }

    let rows = parse_counted_file(&args.file)
        .with_context(|| format!("reading annotated counts {}", args.file.display()))?;
    info!("Loaded {} annotated isoforms", rows.len());

    let query = RangeQuery::new(args.start, args.end).strict(args.strict);
    let groups = summarize(&rows, &query)?;
    info!("Found {} local isoforms", groups.len());

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_groups(&mut out, &groups, format)?;
    out.flush()?;

    Ok(())
}

/// Write groups as `label\tsummed_count\tsub_path` lines or JSON
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_groups<W: Write>(
    out: &mut W,
    groups: &[LocalIsoformGroup],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Tsv => {
            for group in groups {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    group.label, group.summed_count, group.sub_path
                )?;
            }
        }
        OutputFormat::Json => write_json(out, groups)?,
    }
    Ok(())
}
