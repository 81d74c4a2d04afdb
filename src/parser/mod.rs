//! Reader stage: loads a delimited file into a Table

mod csv;

use std::path::Path;

use anyhow::Result;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::PipelineError;
use crate::model::Table;

pub use self::csv::CsvParser;

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path) -> Result<Table>;
}

/// Create the parser for the configured input
pub fn parser_for(config: &Config) -> Box<dyn Parser> {
    let delimiter = config.effective_delimiter();
    debug!(delimiter = %char::from(delimiter).escape_default(), "selected input delimiter");
    Box::new(CsvParser::new(delimiter))
}

/// Extract the configured input file.
///
/// Either the complete table is returned or an extraction failure; nothing
/// partial escapes.
pub fn extract(config: &Config) -> Result<Table, PipelineError> {
    let path = &config.input_file;
    match parser_for(config).parse(path) {
        Ok(table) => {
            info!(
                path = %path.display(),
                rows = table.row_count(),
                columns = table.column_count(),
                "data extraction successful"
            );
            Ok(table)
        }
        Err(e) => {
            let err = PipelineError::Extraction(e);
            error!("{}", err);
            Err(err)
        }
    }
}
