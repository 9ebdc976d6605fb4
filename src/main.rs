use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use stratum::config::OutputFormat;
use stratum::{StratumConfig, run};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Json,
    Md,
    Plain,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Md => OutputFormat::Markdown,
            CliOutputFormat::Plain => OutputFormat::Plain,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version="0.3.0", about="Source analyzer and dependency orderer (Stratum)", long_about = None)]
struct Args {
    /// Project root to analyze
    path: Option<PathBuf>,

    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Entry file forced to the front of the ordering (repeatable)
    #[arg(short, long)]
    entry: Vec<PathBuf>,

    /// Add ignore pattern (glob)
    #[arg(long)]
    ignore: Vec<String>,

    /// Source file extension to analyze
    #[arg(long)]
    ext: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load from file or default
    let mut config = StratumConfig::load_from_file().unwrap_or_default();

    // 2. Override with CLI args
    if let Some(p) = args.path {
        config.path = p;
    }
    if let Some(o) = args.output {
        config.output = o;
    }
    if let Some(f) = args.format {
        config.output_format = f.into();
    }
    if !args.entry.is_empty() {
        config.entry_points = args.entry;
    }
    if !args.ignore.is_empty() {
        // CLI ignores ADD to config ignores
        config.ignore_patterns.extend(args.ignore);
    }
    if let Some(e) = args.ext {
        config.extension = e.trim_start_matches('.').to_string();
    }
    if args.verbose {
        config.verbose = true;
    }

    run(config)
}
