//! Writer stage and run-summary formatting

mod csv;
mod summary;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::PipelineError;
use crate::model::Table;

pub use self::csv::CsvWriter;
pub use summary::{render_summary, render_summary_to_stdout};

/// Trait for table serializers
pub trait TableWriter {
    /// Serialize a table to a writer
    fn write(&self, table: &Table, writer: &mut dyn Write) -> Result<()>;
}

/// Create the writer for the configured output
pub fn writer_for(config: &Config) -> Box<dyn TableWriter> {
    Box::new(CsvWriter::new(config.effective_delimiter()))
}

/// Create the output file's parent directory if it is missing
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            debug!(dir = %dir.display(), "creating output directory");
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))
        }
        _ => Ok(()),
    }
}

/// Write `table` to `path` through a temporary file in the same directory,
/// renamed over the destination only once fully written.
fn write_atomically(table: &Table, writer: &dyn TableWriter, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in: {}", dir.display()))?;
    writer.write(table, &mut tmp)?;
    tmp.flush()?;

    // An existing destination keeps its mode; new files are 0644
    match std::fs::metadata(path) {
        Ok(existing) => tmp.as_file().set_permissions(existing.permissions())?,
        #[cfg(unix)]
        Err(_) => {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))?;
        }
        #[cfg(not(unix))]
        Err(_) => {}
    }

    tmp.persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}

/// Load `table` into the configured output file, creating its directory
/// first when `create_output_dir` is set.
///
/// The destination is either fully replaced or left untouched.
pub fn load(table: &Table, config: &Config) -> Result<(), PipelineError> {
    let path = &config.output_file;
    let write = || -> Result<()> {
        if config.create_output_dir {
            ensure_output_dir(path)?;
        }
        write_atomically(table, writer_for(config).as_ref(), path)
    };

    match write() {
        Ok(()) => {
            info!(path = %path.display(), rows = table.row_count(), "data loaded successfully");
            Ok(())
        }
        Err(e) => {
            let err = PipelineError::Load(e);
            error!("{}", err);
            Err(err)
        }
    }
}
