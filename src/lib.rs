//! csv-etl - Minimal data-cleaning pipeline
//!
//! Reads a delimited file, drops rows with any missing cell, derives `tax`
//! and `net_salary` from `salary`, and writes the result to a new file.

pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod transform;

pub use config::Config;
pub use error::{PipelineError, Stage};
pub use model::Table;
pub use pipeline::{run, RunSummary};
