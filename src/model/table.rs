//! Table, Row, and Cell data structures

use std::borrow::Cow;

use anyhow::{bail, Result};
use indexmap::IndexMap;

use super::schema::Column;

/// A cell value. `Null` is the missing marker.
#[derive(Debug, Clone)]
pub enum CellValue {
    Null,
    Float(f64),
    String(Cow<'static, str>),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            _ => false,
        }
    }
}

impl CellValue {
    /// Check if the value is the missing marker
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Lenient numeric coercion. Text that does not parse yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Null => None,
            CellValue::Float(f) => Some(*f),
            CellValue::String(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Text written to a delimited file. Missing cells become empty fields.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Float(f) => Cow::Owned(format_float(*f)),
            CellValue::String(s) => Cow::Borrowed(s.as_ref()),
        }
    }
}

/// Shortest round-trip decimal, keeping a trailing `.0` on integral values
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(Cow::Owned(s.to_string()))
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// A row in the table
#[derive(Debug, Clone)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
    /// Line number in the source file (1-indexed, 0 when built in memory)
    pub source_line: usize,
}

impl Row {
    pub fn new(cells: Vec<CellValue>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }

    /// True when no cell holds the missing marker
    pub fn is_complete(&self) -> bool {
        !self.cells.iter().any(CellValue::is_null)
    }
}

/// A table of named columns and rows.
///
/// Every row holds exactly `column_count()` cells.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column definitions
    pub columns: Vec<Column>,
    /// All rows in the table
    pub rows: Vec<Row>,
    /// Column name to position
    name_index: IndexMap<String, usize>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        let name_index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Self {
            columns,
            rows: Vec::new(),
            name_index,
        }
    }

    /// Create an empty table from header names
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Column::new).collect())
    }

    /// Add a row to the table. Short rows are padded with the missing marker.
    pub fn add_row(&mut self, mut cells: Vec<CellValue>, source_line: usize) -> Result<()> {
        if cells.len() > self.column_count() {
            bail!(
                "expected {} fields, saw {}",
                self.column_count(),
                cells.len()
            );
        }
        cells.resize(self.column_count(), CellValue::Null);
        self.rows.push(Row::new(cells, source_line));
        Ok(())
    }

    /// Set a column's values, one per row.
    ///
    /// An existing column keeps its position and has its cells replaced;
    /// otherwise the column is appended after all others.
    pub fn set_column(&mut self, name: &str, values: Vec<CellValue>) -> Result<()> {
        if values.len() != self.row_count() {
            bail!(
                "column '{}' has {} values but the table has {} rows",
                name,
                values.len(),
                self.row_count()
            );
        }

        match self.column_index(name) {
            Some(index) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.cells[index] = value;
                }
            }
            None => {
                self.name_index.insert(name.to_string(), self.columns.len());
                self.columns.push(Column::new(name));
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.cells.push(value);
                }
            }
        }
        Ok(())
    }

    /// Keep only rows matching the predicate, preserving their relative order
    pub fn retain_rows<F>(&mut self, f: F)
    where
        F: FnMut(&Row) -> bool,
    {
        self.rows.retain(f);
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
