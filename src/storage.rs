//! Load data files into an [`InputTable`].
//!
//! The first column becomes the index (its header, if any, the index name);
//! every other column is a candidate series. Supported: `.csv`, `.xlsx`, `.xls`.

use crate::error::{ChartError, Result};
use crate::models::{Column, IndexValue, InputTable, parse_cell};
use calamine::{Data, Reader, open_workbook_auto};
use csv::{ReaderBuilder, Trim};
use log::debug;
use std::path::Path;

fn load_err(path: &Path, message: impl Into<String>) -> ChartError {
    ChartError::Load {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Load a table, choosing the reader from the file suffix.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<InputTable> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "xlsx" | "xls" => load_workbook(path)?,
        _ => {
            return Err(load_err(
                path,
                "unsupported data file type (expected .csv, .xlsx or .xls)",
            ));
        }
    };
    debug!(
        "loaded {}: {} rows, {} columns",
        path.display(),
        table.n_rows(),
        table.columns().len()
    );
    Ok(table)
}

fn csv_err(path: &Path, e: csv::Error) -> ChartError {
    let message = e.to_string();
    match e.into_kind() {
        csv::ErrorKind::Io(io) => ChartError::Io(io),
        _ => load_err(path, message),
    }
}

/// Read a CSV file with a header row.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<InputTable> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| csv_err(path, e))?;
    let header: Vec<String> = rdr
        .headers()
        .map_err(|e| csv_err(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| csv_err(path, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    table_from_rows(path, header, rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// Read the first worksheet of an Excel workbook; the first row is the header.
pub fn load_workbook<P: AsRef<Path>>(path: P) -> Result<InputTable> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path).map_err(|e| match e {
        calamine::Error::Io(io) => ChartError::Io(io),
        other => load_err(path, other.to_string()),
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| load_err(path, "workbook has no worksheets"))?
        .map_err(|e| load_err(path, e.to_string()))?;
    let mut rows = range
        .rows()
        .map(|r| r.iter().map(cell_text).collect::<Vec<String>>());
    let header = rows.next().unwrap_or_default();
    table_from_rows(path, header, rows.collect())
}

/// Shared tail of both readers. Short rows are padded with missing cells and
/// blank rows are dropped.
fn table_from_rows(path: &Path, header: Vec<String>, rows: Vec<Vec<String>>) -> Result<InputTable> {
    let mut names = header.into_iter();
    let Some(index_name) = names.next() else {
        return Err(load_err(path, "missing header row"));
    };
    let names: Vec<String> = names.collect();

    let mut index = Vec::with_capacity(rows.len());
    let mut values: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(rows.len()); names.len()];
    for row in rows {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        index.push(IndexValue::parse(&row[0]));
        for (i, col) in values.iter_mut().enumerate() {
            col.push(row.get(i + 1).and_then(|c| parse_cell(c)));
        }
    }
    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, vals)| Column::new(name, vals))
        .collect();
    InputTable::new(Some(index_name), index, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn csv_first_column_is_the_index() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("data.csv");
        fs::write(&p, "year,A,B\n2000,1,10\n2001,,20\n\n2002,3\n").unwrap();
        let t = load_table(&p).unwrap();
        assert_eq!(t.index_name(), Some("year"));
        assert_eq!(t.numeric_index(), Some(vec![2000.0, 2001.0, 2002.0]));
        assert_eq!(t.columns()[0].values, vec![Some(1.0), None, Some(3.0)]);
        assert_eq!(t.columns()[1].values, vec![Some(10.0), Some(20.0), None]);
    }

    #[test]
    fn text_index_and_blank_header() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("countries.CSV");
        fs::write(&p, ",gdp\nGermany,4.2\nFrance,2.9\n").unwrap();
        let t = load_table(&p).unwrap();
        assert_eq!(t.index_name(), None);
        assert_eq!(t.index_labels(), ["Germany", "France"]);
    }

    #[test]
    fn unsupported_suffix_is_a_load_error() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("data.json");
        fs::write(&p, "{}").unwrap();
        assert!(matches!(load_table(&p), Err(ChartError::Load { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = load_table(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, ChartError::Io(_)));
    }

    #[test]
    fn corrupt_workbook_is_a_load_error() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("data.xlsx");
        fs::write(&p, "not a zip archive").unwrap();
        assert!(matches!(load_table(&p), Err(ChartError::Load { .. })));
    }
}
