use crate::core::DatasetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV file has no header row")]
    EmptyFile,

    #[error("CSV must have at least one column")]
    InsufficientColumns,

    #[error("Inconsistent column count: row {row} has {actual} columns, expected {expected}")]
    InconsistentColumns {
        row: usize,
        actual: usize,
        expected: usize,
    },

    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("Invalid dataset: {0}")]
    Dataset(#[from] DatasetError),
}
