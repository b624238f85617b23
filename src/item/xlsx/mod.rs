/// XLSX support for reading worksheets as rows of cell strings.
///
/// The implementation uses `calamine` to open the workbook. Each reader loads
/// one named sheet into memory when it is built, so a job reading several
/// sheets has all of them loaded before its first step runs.
pub mod xlsx_reader;

pub use xlsx_reader::{XlsxItemReader, XlsxItemReaderBuilder};
