//! Dataset Loader: reads the activity sheet into an `ActivityTable`.
//!
//! The reader is picked by file extension: Excel/OpenDocument workbooks
//! (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) are read from their first sheet,
//! anything else is read as CSV. Both produce the same table.
//!
//! Column labels are trimmed of surrounding whitespace on load so that a header
//! written as `" Activity name "` is addressed as `Activity name`. Cell values
//! are kept exactly as written.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};
use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::info;

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

#[derive(Debug, Error)]
#[error("Error loading dataset {}: {source}", path.display())]
pub struct DataLoadError {
    pub path: PathBuf,
    #[source]
    pub source: DatasetReadError,
}

#[derive(Debug, Error)]
pub enum DatasetReadError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Spreadsheet(#[from] calamine::Error),

    #[error("workbook has no sheets")]
    NoSheets,
}

/// Immutable in-memory table. Rows keep file order.
#[derive(Debug, Clone, Default)]
pub struct ActivityTable {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl ActivityTable {
    pub fn new(headers: Vec<String>, rows: Vec<StringRecord>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by its (trimmed) label.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell value at `row` under column `name`. `None` if either is absent.
    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        let column = self.column(name)?;
        self.rows.get(row)?.get(column)
    }
}

/// Reads `path` as a headered table. Fails on a missing or unreadable file,
/// on ragged CSV rows and on a workbook without sheets.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<ActivityTable, DataLoadError> {
    let path = path.as_ref();
    info!("Loading dataset from {}", path.display());

    let table = if is_spreadsheet(path) {
        read_workbook(path)
    } else {
        read_csv(path)
    }
    .map_err(|source| DataLoadError {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loaded {} activities", table.len());
    Ok(table)
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn read_csv(path: &Path) -> Result<ActivityTable, DatasetReadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;

    Ok(ActivityTable::new(headers, rows))
}

fn read_workbook(path: &Path) -> Result<ActivityTable, DatasetReadError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DatasetReadError::NoSheets)??;

    Ok(table_from_range(&range))
}

/// First row is the header; every cell is rendered with `Data`'s `Display`,
/// so whole-number floats come out as `3` and empty cells as `""`.
fn table_from_range(range: &Range<Data>) -> ActivityTable {
    let mut rows = range.rows();

    let headers = rows
        .next()
        .map(|header| {
            header
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    let records = rows
        .map(|row| row.iter().map(|cell| cell.to_string()).collect::<StringRecord>())
        .collect();

    ActivityTable::new(headers, records)
}
