//! CLI entry point for converting the movies dataset into the actors file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use bacon_parse::convert_file;

#[derive(Parser)]
#[command(name = "bacon-parse")]
#[command(about = "Parse the movies dataset credits.csv into an actors file")]
struct Cli {
    /// The credits.csv file from the movies dataset.
    csv: PathBuf,

    /// Output path for the actors file.
    #[arg(short, long, default_value = "preprocessed/actors.jsonl")]
    parsed_output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    convert_file(&cli.csv, &cli.parsed_output)
        .with_context(|| format!("failed to parse {}", cli.csv.display()))?;

    Ok(())
}
