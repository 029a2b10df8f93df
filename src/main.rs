use clap::Parser;
use tracing_subscriber::EnvFilter;

use read_coverage::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("read_coverage=debug,info")
    } else {
        EnvFilter::new("read_coverage=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Illumina(args) => {
            let (mode, options) = args.into_parts();
            cli::run::run(mode, options, cli.format)?;
        }
        cli::Commands::Nanopore(args) => {
            let (mode, options) = args.into_parts();
            cli::run::run(mode, options, cli.format)?;
        }
        cli::Commands::Hybrid(args) => {
            let (mode, options) = args.into_parts();
            cli::run::run(mode, options, cli.format)?;
        }
        cli::Commands::Merge(args) => {
            cli::merge::run(args, cli.format)?;
        }
    }

    Ok(())
}
