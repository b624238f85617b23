use thiserror::Error;

#[derive(Error, Debug)]
/// Batch error
pub enum BatchError {
    #[error("ItemWriter from: {0}")]
    ItemWriter(String),

    #[error("ItemReader from: {0}")]
    ItemReader(String),

    #[error("ItemProcessor from: {0}")]
    ItemProcessor(String),

    /// A row is too short for a column the mapper needs.
    #[error("Row has {len} cell(s) but column `{column}` is at index {index}")]
    RowShape {
        column: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Step {0}")]
    Step(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
