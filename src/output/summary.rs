//! Text and JSON rendering of a run summary

use std::io::Write;

use anyhow::Result;

use crate::config::SummaryFormat;
use crate::pipeline::RunSummary;

fn render_text(summary: &RunSummary, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "Input:   {}", summary.input_file)?;
    writeln!(writer, "Output:  {}", summary.output_file)?;
    writeln!(writer)?;
    writeln!(writer, "Rows read:    {}", summary.rows_read)?;
    writeln!(writer, "Rows dropped: {}", summary.rows_dropped)?;
    writeln!(writer, "Rows written: {}", summary.rows_written)?;
    if summary.unparsable_salaries > 0 {
        writeln!(
            writer,
            "Non-numeric salaries: {}",
            summary.unparsable_salaries
        )?;
    }
    writeln!(writer, "Columns: {}", summary.columns.join(", "))?;
    Ok(())
}

/// Render a run summary to a writer
pub fn render_summary(
    summary: &RunSummary,
    format: SummaryFormat,
    writer: &mut dyn Write,
) -> Result<()> {
    match format {
        SummaryFormat::Text => render_text(summary, writer),
        SummaryFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, summary)?;
            writeln!(writer)?;
            Ok(())
        }
    }
}

/// Render a run summary to stdout
pub fn render_summary_to_stdout(summary: &RunSummary, format: SummaryFormat) -> Result<()> {
    let mut stdout = std::io::stdout();
    render_summary(summary, format, &mut stdout)
}
