use clap::Parser;
use tracing_subscriber::EnvFilter;

use usfm_nav::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("usfm_nav=debug,info")
    } else {
        EnvFilter::new("usfm_nav=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Resolve(args) => {
            cli::resolve::run(args, &cli.data, cli.format, cli.verbose)?;
        }
        cli::Commands::Section(args) => {
            cli::section::run(args, &cli.data, cli.format, cli.verbose)?;
        }
        cli::Commands::Verse(args) => {
            cli::section::run_verse(args, &cli.data, cli.format, cli.verbose)?;
        }
        cli::Commands::Links(args) => {
            cli::links::run(args, &cli.data, cli.format, cli.verbose)?;
        }
        cli::Commands::Books => {
            cli::book::run_books(&cli.data, cli.format, cli.verbose)?;
        }
        cli::Commands::Stats(args) => {
            cli::book::run_stats(args, &cli.data, cli.format, cli.verbose)?;
        }
        cli::Commands::Empty(args) => {
            cli::book::run_empty(args, &cli.data, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
