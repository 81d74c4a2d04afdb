//! Driver: Extract, Transform and Load in sequence

use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::error::PipelineError;
use crate::output::load;
use crate::parser::extract;
use crate::transform::transform;

/// What a successful run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub input_file: String,
    pub output_file: String,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub rows_written: usize,
    pub unparsable_salaries: usize,
    /// Output columns in order
    pub columns: Vec<String>,
}

/// Run the pipeline once.
///
/// The first failing stage ends the run; later stages are never attempted
/// and no output file is produced.
pub fn run(config: &Config) -> Result<RunSummary, PipelineError> {
    info!(
        input = %config.input_file.display(),
        output = %config.output_file.display(),
        "starting ETL process"
    );

    let table = extract(config)?;
    let (table, stats) = transform(table)?;
    load(&table, config)?;

    Ok(RunSummary {
        input_file: config.input_file.display().to_string(),
        output_file: config.output_file.display().to_string(),
        rows_read: stats.rows_in,
        rows_dropped: stats.rows_dropped,
        rows_written: table.row_count(),
        unparsable_salaries: stats.unparsable_salaries,
        columns: table.columns.iter().map(|c| c.name.clone()).collect(),
    })
}
