//! csv-etl - Minimal data-cleaning pipeline

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

use csv_etl::config::{
    Config, SummaryFormat, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE, INPUT_FILE_ENV,
    OUTPUT_FILE_ENV,
};
use csv_etl::output::render_summary_to_stdout;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSummaryFormat {
    Text,
    Json,
}

impl From<CliSummaryFormat> for SummaryFormat {
    fn from(f: CliSummaryFormat) -> Self {
        match f {
            CliSummaryFormat::Text => SummaryFormat::Text,
            CliSummaryFormat::Json => SummaryFormat::Json,
        }
    }
}

/// Drop incomplete rows from a delimited file and add tax / net salary columns
#[derive(Parser, Debug)]
#[command(name = "csv-etl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Delimited input file (first line is the header)
    #[arg(short, long, env = INPUT_FILE_ENV, default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Destination for the cleaned file
    #[arg(short, long, env = OUTPUT_FILE_ENV, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Field delimiter (single ASCII character, or `tab`); inferred from the input extension by default
    #[arg(short, long, value_parser = parse_delimiter)]
    delimiter: Option<u8>,

    /// Fail instead of creating a missing output directory
    #[arg(long)]
    no_create_dirs: bool,

    /// Run summary format
    #[arg(short, long, value_enum, default_value = "text")]
    format: CliSummaryFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("delimiter must be a single ASCII character, got '{}'", s)),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::new(cli.input, cli.output).with_create_output_dir(!cli.no_create_dirs);
    if let Some(delimiter) = cli.delimiter {
        config = config.with_delimiter(delimiter);
    }

    let summary = match csv_etl::run(&config) {
        Ok(summary) => summary,
        Err(e) => {
            // The failing stage logs at error level; print it when that is filtered out
            if !tracing::enabled!(Level::ERROR) {
                eprintln!("{}", e);
            }
            debug!(stage = %e.stage(), "ETL process aborted");
            return ExitCode::FAILURE;
        }
    };
    info!("ETL process completed successfully");

    if let Err(e) = render_summary_to_stdout(&summary, cli.format.into()) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
