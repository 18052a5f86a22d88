pub mod csv;
pub mod error;

pub use self::csv::{read_csv, read_partition, write_csv, write_partition};
pub use error::CsvError;
