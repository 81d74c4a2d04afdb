//! Delimited text parser

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;

use crate::model::{CellValue, Table};

use super::Parser;

/// Tokens read as the missing marker, in addition to blank fields
const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parser for comma- (or otherwise) delimited files
pub struct CsvParser {
    delimiter: u8,
}

impl CsvParser {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Parse delimited text from any reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .context("Failed to read CSV headers")?
            .clone();

        if headers.is_empty() {
            bail!("No columns to parse from file");
        }

        let mut table = Table::from_names(normalize_headers(headers.iter()));

        for result in csv_reader.records() {
            let record = result.context("Failed to read CSV row")?;
            let line = record.position().map_or(0, |p| p.line() as usize);

            let cells: Vec<CellValue> = record.iter().map(parse_cell_value).collect();
            table
                .add_row(cells, line)
                .with_context(|| format!("Malformed row at line {}", line))?;
        }

        Ok(table)
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl Parser for CsvParser {
    fn parse(&self, path: &Path) -> Result<Table> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        self.parse_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse file: {}", path.display()))
    }
}

/// Read a raw field as present text or the missing marker
fn parse_cell_value(s: &str) -> CellValue {
    let trimmed = s.trim();
    if trimmed.is_empty() || NA_VALUES.contains(&s) {
        return CellValue::Null;
    }
    CellValue::from(s)
}

/// Name blank headers `Unnamed: <i>` and suffix repeats with `.1`, `.2`, ...
fn normalize_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: IndexMap<String, usize> = IndexMap::new();
    let mut names = Vec::new();

    for (i, name) in raw.enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", i)
        } else {
            name.to_string()
        };

        let mut candidate = base.clone();
        while let Some(count) = seen.get_mut(&candidate) {
            *count += 1;
            candidate = format!("{}.{}", base, count);
        }
        seen.insert(candidate.clone(), 0);
        names.push(candidate);
    }

    names
}
