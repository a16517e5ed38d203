use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use arbor::{load_tree, TreeConfig};
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: arbor <filename of data file>";

#[derive(Parser, Debug)]
#[command(
    name = "arbor",
    about = "Load a file line by line into a binary search tree and print it in order"
)]
struct Cli {
    /// Text file, one entry per line. A leading `-` is part of the name.
    #[arg(allow_hyphen_values = true)]
    file: PathBuf,
    /// Balance factor magnitude tolerated before the rebalance hook fires.
    #[arg(long, default_value_t = arbor::config::DEFAULT_BALANCE_THRESHOLD)]
    balance_threshold: usize,
    /// Log filter written to stderr (e.g. `debug`, `arbor=trace`).
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(&cli.log_level)?;

    let config = TreeConfig::default().with_balance_threshold(cli.balance_threshold);
    let tree = load_tree(&cli.file, config)?;

    tree.print_tree().context("failed to write tree to stdout")?;
    Ok(())
}

fn init_logging(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter '{filter}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}
