//! In-memory capture tables.
//!
//! The whole file is read up front; cells stay as text and columns are typed
//! on demand. A column is numeric only when every cell is a finite number, so
//! a single blank, `NaN`, or word disqualifies the whole column.

use std::io::Read;
use std::path::Path;

use morphcurves_common::error::{MorphcurvesError, MorphcurvesResult};

/// A CSV table with a header row of channel names.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

impl Table {
    /// Read a table from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> MorphcurvesResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| MorphcurvesError::io_at(path, e))?;
        Self::from_reader(file).map_err(|e| match e {
            MorphcurvesError::Table { message } => {
                MorphcurvesError::table(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    /// Read a table from any CSV source.
    pub fn from_reader<R: Read>(reader: R) -> MorphcurvesResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| MorphcurvesError::table(e.to_string()))?;
        let headers = dedupe_headers(headers.iter());

        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| MorphcurvesError::table(e.to_string()))?;

        Ok(Self { headers, rows })
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cells of column `index`, top to bottom.
    pub fn cells(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row.get(index).unwrap_or(""))
    }

    /// Cells of the named column.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        self.column_index(name).map(|i| self.cells(i).collect())
    }

    /// Values of column `index` if every cell is a finite number.
    pub fn numeric_cells(&self, index: usize) -> Option<Vec<f64>> {
        self.cells(index).map(parse_numeric).collect()
    }

    /// Values of the named column if it is numeric.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        self.column_index(name).and_then(|i| self.numeric_cells(i))
    }
}

/// Parse a numeric cell. Blank and non-finite cells are not numeric.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Repeated header names get `.1`, `.2`, ... suffixes so every column stays addressable.
fn dedupe_headers<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for name in names {
        let mut candidate = name.to_string();
        let mut suffix = 1;
        while headers.contains(&candidate) {
            candidate = format!("{name}.{suffix}");
            suffix += 1;
        }
        headers.push(candidate);
    }
    headers
}
