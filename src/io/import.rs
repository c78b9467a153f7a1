use std::fs::File;
use std::path::Path;

use csv::{DeserializeRecordsIntoIter, StringRecord};
use serde::Deserialize;

/// Columns every stock CSV must carry, after trimming and lower-casing.
pub const ITEM_COLUMN: &str = "item";
pub const QUANTITY_COLUMN: &str = "quantidade";

/// Result of an import operation
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub errors: Vec<ImportError>,
}

/// Row-level error that did not stop the import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportError {
    /// 1-based data row number (the header is not counted)
    pub row: usize,
    pub error: String,
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}", self.row, self.error)
    }
}

/// Failure to open a stock CSV.
#[derive(Debug)]
pub enum OpenError {
    MissingColumns(Vec<String>),
    Csv(csv::Error),
}

impl From<csv::Error> for OpenError {
    fn from(err: csv::Error) -> Self {
        OpenError::Csv(err)
    }
}

/// One data row of a stock CSV, with the quantity left unparsed so that
/// a bad value can be reported for its own row.
#[derive(Debug, Clone, PartialEq)]
pub struct StockRow {
    pub row: usize,
    pub item: String,
    pub quantity: String,
}

#[derive(Debug, Deserialize)]
struct RawStockRow {
    item: String,
    quantidade: String,
}

/// Single-pass iterator over the data rows of a stock CSV.
pub struct StockRows {
    records: DeserializeRecordsIntoIter<File, RawStockRow>,
    row: usize,
}

impl StockRows {
    /// Open `path`, normalise its header and check the required columns.
    /// No data row is read before the header has been validated.
    pub fn open(path: &Path) -> Result<Self, OpenError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_path(path)?;

        let headers = normalize_headers(reader.headers()?);
        let missing = missing_columns(&headers);
        if !missing.is_empty() {
            return Err(OpenError::MissingColumns(missing));
        }
        reader.set_headers(headers);

        Ok(Self {
            records: reader.into_deserialize(),
            row: 0,
        })
    }
}

impl Iterator for StockRows {
    type Item = Result<StockRow, csv::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.row += 1;
        Some(record.map(|raw| StockRow {
            row: self.row,
            item: raw.item,
            quantity: raw.quantidade,
        }))
    }
}

fn normalize_headers(headers: &StringRecord) -> StringRecord {
    headers.iter().map(|h| h.trim().to_lowercase()).collect()
}

fn missing_columns(headers: &StringRecord) -> Vec<String> {
    [ITEM_COLUMN, QUANTITY_COLUMN]
        .into_iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(str::to_string)
        .collect()
}
