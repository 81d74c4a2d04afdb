//! Delimited text writer

use std::borrow::Cow;
use std::io::Write;

use anyhow::{Context, Result};

use crate::model::{CellValue, Table};

use super::TableWriter;

/// Writes a table as delimited text with minimal quoting
pub struct CsvWriter {
    delimiter: u8,
}

impl CsvWriter {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl TableWriter for CsvWriter {
    fn write(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        csv_writer
            .write_record(table.column_names())
            .context("Failed to write header")?;

        for row in &table.rows {
            let fields: Vec<Cow<'_, str>> = row.cells.iter().map(CellValue::render).collect();
            csv_writer
                .write_record(fields.iter().map(|f| f.as_bytes()))
                .with_context(|| format!("Failed to write row from line {}", row.source_line))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
