//! Transformer stage: drops incomplete rows and derives tax columns

use anyhow::{bail, Result};
use tracing::{debug, error, info, warn};

use crate::error::PipelineError;
use crate::model::{CellValue, Row, Table};

/// Column the derived values are computed from
pub const SALARY_COLUMN: &str = "salary";
/// Derived `salary * TAX_RATE`
pub const TAX_COLUMN: &str = "tax";
/// Derived `salary - tax`
pub const NET_SALARY_COLUMN: &str = "net_salary";
/// Flat tax rate applied to every salary
pub const TAX_RATE: f64 = 0.1;

/// Counters from one transform run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransformStats {
    pub rows_in: usize,
    pub rows_dropped: usize,
    pub unparsable_salaries: usize,
}

impl TransformStats {
    pub fn rows_out(&self) -> usize {
        self.rows_in - self.rows_dropped
    }
}

/// Remove every row holding a missing cell in any column. Returns the number removed.
pub fn drop_incomplete_rows(table: &mut Table) -> usize {
    let before = table.row_count();
    table.retain_rows(Row::is_complete);
    before - table.row_count()
}

/// Set `tax` and `net_salary` computed from `salary`.
///
/// Columns already present are overwritten where they stand; missing ones
/// are appended, `tax` first. A salary that does not coerce to a number
/// leaves both derived cells missing. Returns the number of such rows.
pub fn derive_salary_columns(table: &mut Table) -> Result<usize> {
    let Some(salary_idx) = table.column_index(SALARY_COLUMN) else {
        bail!("required column '{}' not found", SALARY_COLUMN);
    };

    let mut taxes = Vec::with_capacity(table.row_count());
    let mut nets = Vec::with_capacity(table.row_count());
    let mut unparsable = 0;

    for row in &table.rows {
        match row.get(salary_idx).and_then(CellValue::as_f64) {
            Some(salary) => {
                let tax = salary * TAX_RATE;
                taxes.push(CellValue::Float(tax));
                nets.push(CellValue::Float(salary - tax));
            }
            None => {
                warn!(
                    line = row.source_line,
                    "salary is not numeric; derived columns left empty"
                );
                unparsable += 1;
                taxes.push(CellValue::Null);
                nets.push(CellValue::Null);
            }
        }
    }

    table.set_column(TAX_COLUMN, taxes)?;
    table.set_column(NET_SALARY_COLUMN, nets)?;

    Ok(unparsable)
}

fn check_structure(table: &Table) -> Result<()> {
    if table.column_index(SALARY_COLUMN).is_none() {
        bail!("required column '{}' not found", SALARY_COLUMN);
    }
    Ok(())
}

fn apply(mut table: Table) -> Result<(Table, TransformStats)> {
    check_structure(&table)?;

    let rows_in = table.row_count();
    let rows_dropped = drop_incomplete_rows(&mut table);
    debug!(rows_in, rows_dropped, "dropped incomplete rows");

    let unparsable_salaries = derive_salary_columns(&mut table)?;

    Ok((
        table,
        TransformStats {
            rows_in,
            rows_dropped,
            unparsable_salaries,
        },
    ))
}

/// Filter incomplete rows, then set the derived columns.
///
/// Fails as a whole when `salary` is absent; that check runs once, before
/// any row is touched.
pub fn transform(table: Table) -> Result<(Table, TransformStats), PipelineError> {
    match apply(table) {
        Ok((table, stats)) => {
            info!(
                rows = table.row_count(),
                dropped = stats.rows_dropped,
                "data transformation successful"
            );
            Ok((table, stats))
        }
        Err(e) => {
            let err = PipelineError::Transformation(e);
            error!("{}", err);
            Err(err)
        }
    }
}
