//! Configuration handling for csv-etl

use std::path::{Path, PathBuf};

/// Input path used when `INPUT_FILE` is not set
pub const DEFAULT_INPUT_FILE: &str = "data/input_data.csv";
/// Output path used when `OUTPUT_FILE` is not set
pub const DEFAULT_OUTPUT_FILE: &str = "output/output_data.csv";

/// Environment variable naming the input file
pub const INPUT_FILE_ENV: &str = "INPUT_FILE";
/// Environment variable naming the output file
pub const OUTPUT_FILE_ENV: &str = "OUTPUT_FILE";

/// Output format for the run summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for SummaryFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(SummaryFormat::Text),
            "json" => Ok(SummaryFormat::Json),
            _ => Err(format!("Unknown summary format: {}", s)),
        }
    }
}

/// Configuration for a pipeline run
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the delimited input file
    pub input_file: PathBuf,
    /// Path the cleaned table is written to
    pub output_file: PathBuf,
    /// Field delimiter; inferred from the input extension when unset
    pub delimiter: Option<u8>,
    /// Create the output file's parent directory before loading
    pub create_output_dir: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from(DEFAULT_INPUT_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            delimiter: None,
            create_output_dir: true,
        }
    }
}

impl Config {
    /// Create a new Config with file paths
    pub fn new(input_file: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            input_file: input_file.into(),
            output_file: output_file.into(),
            ..Default::default()
        }
    }

    /// Build a Config from `INPUT_FILE` / `OUTPUT_FILE`, falling back to the defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let input = lookup(INPUT_FILE_ENV).unwrap_or_else(|| DEFAULT_INPUT_FILE.to_string());
        let output = lookup(OUTPUT_FILE_ENV).unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());
        Self::new(input, output)
    }

    /// Set an explicit field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Enable or disable creation of the output directory
    pub fn with_create_output_dir(mut self, create: bool) -> Self {
        self.create_output_dir = create;
        self
    }

    /// The delimiter to read and write with.
    ///
    /// An explicit delimiter wins; otherwise `.tsv` and `.tab` inputs are
    /// tab-separated and everything else is comma-separated.
    pub fn effective_delimiter(&self) -> u8 {
        self.delimiter
            .unwrap_or_else(|| delimiter_for_path(&self.input_file))
    }
}

fn delimiter_for_path(path: &Path) -> u8 {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "tsv" | "tab" => b'\t',
        _ => b',',
    }
}
