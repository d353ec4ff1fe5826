use clap::Parser;
use tracing_subscriber::EnvFilter;

use isoexon::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("isoexon=debug,info")
    } else {
        EnvFilter::new("isoexon=warn")
    };

    // Diagnostics go to stderr; stdout carries result tables only
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Annotate(args) => {
            cli::annotate::run(args, cli.format)?;
        }
        cli::Commands::Merge(args) => {
            cli::merge::run(args, cli.format)?;
        }
        cli::Commands::Summarize(args) => {
            cli::summarize::run(args, cli.format)?;
        }
    }

    Ok(())
}
