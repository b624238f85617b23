use std::{cell::RefCell, path::Path, vec::IntoIter};

use calamine::{open_workbook_auto, Data, Range, Reader};
use log::{debug, info};

use crate::{
    core::item::{ItemReader, ItemReaderResult},
    error::BatchError,
};

/// An item reader yielding the rows of one worksheet as cell strings.
///
/// The whole sheet is loaded when the reader is built; `read` only hands out
/// rows already in memory. Rows keep their sheet position: the first row and
/// column of the sheet are row 0 and cell 0 even when the used range starts
/// further down or right. Trailing empty cells are dropped, so the length of
/// a row is the position of its last non-empty cell plus one.
///
/// Cell number formats are not applied: numeric cells read as their shortest
/// decimal form (`129.90` reads `129.9`) and date cells as their serial value.
///
/// # Examples
///
/// ```
/// use yml_feed_rs::item::xlsx::xlsx_reader::XlsxItemReaderBuilder;
/// use yml_feed_rs::core::item::ItemReader;
///
/// let rows = vec![
///     vec!["id".to_string(), "name".to_string()],
///     vec!["1".to_string(), "Tea".to_string()],
/// ];
///
/// let reader = XlsxItemReaderBuilder::new()
///     .has_headers(true)
///     .from_rows(rows);
///
/// let row = reader.read().unwrap().unwrap();
/// assert_eq!(row, vec!["1", "Tea"]);
/// assert!(reader.read().unwrap().is_none());
/// ```
pub struct XlsxItemReader {
    rows: RefCell<IntoIter<Vec<String>>>,
}

impl XlsxItemReader {
    /// Number of rows left to read.
    pub fn remaining(&self) -> usize {
        self.rows.borrow().len()
    }
}

impl ItemReader<Vec<String>> for XlsxItemReader {
    fn read(&self) -> ItemReaderResult<Vec<String>> {
        Ok(self.rows.borrow_mut().next())
    }
}

/// Builder for [`XlsxItemReader`].
///
/// The header row is skipped by default.
#[derive(Debug, Clone)]
pub struct XlsxItemReaderBuilder {
    sheet: Option<String>,
    has_headers: bool,
}

impl Default for XlsxItemReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl XlsxItemReaderBuilder {
    pub fn new() -> Self {
        Self {
            sheet: None,
            has_headers: true,
        }
    }

    /// Name of the worksheet to read.
    pub fn sheet(mut self, sheet: &str) -> Self {
        self.sheet = Some(sheet.to_string());
        self
    }

    /// Whether the first row is a header to skip.
    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Opens the workbook at `path` and loads the configured sheet.
    ///
    /// # Errors
    ///
    /// - `BatchError::Configuration` when no sheet name was given
    /// - `BatchError::ItemReader` when the workbook cannot be opened or the
    ///   sheet does not exist
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<XlsxItemReader, BatchError> {
        let path = path.as_ref();
        let sheet = self
            .sheet
            .clone()
            .ok_or_else(|| BatchError::Configuration("No sheet name given".to_string()))?;

        let mut workbook = open_workbook_auto(path).map_err(|e| {
            BatchError::ItemReader(format!(
                "Failed to open workbook {}: {}",
                path.display(),
                e
            ))
        })?;
        let range = workbook.worksheet_range(&sheet).map_err(|e| {
            BatchError::ItemReader(format!(
                "Failed to read sheet {} of {}: {}",
                sheet,
                path.display(),
                e
            ))
        })?;

        let rows = range_to_rows(&range);
        info!("Loaded {} row(s) from sheet {}", rows.len(), sheet);
        Ok(self.from_rows(rows))
    }

    /// Builds a reader over rows already in memory.
    pub fn from_rows(self, mut rows: Vec<Vec<String>>) -> XlsxItemReader {
        if self.has_headers && !rows.is_empty() {
            let header = rows.remove(0);
            debug!("Skipping header row of {} cell(s)", header.len());
        }

        XlsxItemReader {
            rows: RefCell::new(rows.into_iter()),
        }
    }
}

/// Converts a worksheet range into rows anchored at cell A1.
fn range_to_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let (row_offset, column_offset) = range
        .start()
        .map_or((0, 0), |(row, column)| (row as usize, column as usize));

    let mut rows = vec![Vec::new(); row_offset];
    for cells in range.rows() {
        let mut row = vec![String::new(); column_offset];
        row.extend(cells.iter().map(cell_to_string));
        let len = row
            .iter()
            .rposition(|value| !value.is_empty())
            .map_or(0, |last| last + 1);
        row.truncate(len);
        rows.push(row);
    }
    rows
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        _ => cell.to_string(),
    }
}
